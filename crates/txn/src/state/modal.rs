use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::Chain;

/// Modal dialogs of the transaction flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalName {
    Loading,
    Submission,
    Success,
    Error,
}

impl ModalName {
    pub const ALL: [ModalName; 4] =
        [ModalName::Error, ModalName::Loading, ModalName::Submission, ModalName::Success];

    fn index(&self) -> usize {
        match self {
            ModalName::Error => 0,
            ModalName::Loading => 1,
            ModalName::Submission => 2,
            ModalName::Success => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModalName::Error => "Error",
            ModalName::Loading => "Waiting for wallet",
            ModalName::Submission => "Transaction pending",
            ModalName::Success => "Transaction Success",
        }
    }
}

/// Payload a modal is opened with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalData {
    Loading,
    Submission { hash: TxHash },
    Success { hash: TxHash },
    Error { hash: Option<TxHash>, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalAction {
    Open(ModalName, ModalData),
    Close(ModalName),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSlot {
    pub is_open: bool,
    pub data: Option<ModalData>,
}

/// Modal-visibility set: one slot per [`ModalName`].
///
/// Only one modal is expected to be open at a time, which holds as long as
/// every open is preceded by closing the modals of earlier phases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalSet {
    slots: [ModalSlot; 4],
}

impl ModalSet {
    pub fn reduce(&mut self, action: ModalAction) {
        match action {
            ModalAction::Open(name, data) => {
                self.slots[name.index()] = ModalSlot { is_open: true, data: Some(data) };
            },
            // Data is kept so a closing dialog can still render its content
            ModalAction::Close(name) => self.slots[name.index()].is_open = false,
        }
    }

    pub fn slot(&self, name: ModalName) -> &ModalSlot { &self.slots[name.index()] }

    pub fn is_open(&self, name: ModalName) -> bool { self.slot(name).is_open }

    /// Modals currently open, in render order.
    pub fn open(&self) -> Vec<ModalName> {
        ModalName::ALL.into_iter().filter(|name| self.is_open(*name)).collect()
    }

    /// Renders the modal surface: one view per modal.
    pub fn views(&self, message: &str, chain: &Chain) -> Vec<ModalView> {
        ModalName::ALL
            .into_iter()
            .map(|name| {
                let slot = self.slot(name);
                let (message, href) = match &slot.data {
                    Some(ModalData::Submission { hash }) | Some(ModalData::Success { hash }) => {
                        (message.to_string(), chain.tx_url(hash))
                    },
                    Some(ModalData::Error { message, .. }) => (message.clone(), None),
                    Some(ModalData::Loading) | None => (message.to_string(), None),
                };
                let link_text = href.as_ref().map(|_| chain.link_text());
                ModalView { name, open: slot.is_open, title: name.title(), message, href, link_text }
            })
            .collect()
    }
}

/// Rendered state of a single modal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub name: ModalName,
    pub open: bool,
    pub title: &'static str,
    pub message: String,
    /// Block explorer link of the transaction, if known.
    pub href: Option<String>,
    pub link_text: Option<String>,
}
