use dashmap::DashMap;

use super::Presenter;
use crate::state::{Toast, ToastId};

/// In-memory toast presenter.
///
/// Keeps the currently displayed toasts keyed by [`ToastId`], so showing a
/// toast twice under the same ID replaces it instead of stacking. Expiry of
/// timed toasts is left to whoever renders the board.
#[derive(Debug, Default)]
pub struct ToastBoard {
    toasts: DashMap<ToastId, Toast>,
}

impl ToastBoard {
    pub fn new() -> Self { Self::default() }

    /// Displayed toasts, ordered by correlation ID then phase.
    pub fn visible(&self) -> Vec<(ToastId, Toast)> {
        let mut toasts: Vec<_> =
            self.toasts.iter().map(|e| (e.key().clone(), e.value().clone())).collect();
        toasts.sort_by(|a, b| a.0.cmp(&b.0));
        toasts
    }

    pub fn get(&self, id: &ToastId) -> Option<Toast> { self.toasts.get(id).map(|t| t.clone()) }

    pub fn len(&self) -> usize { self.toasts.len() }

    pub fn is_empty(&self) -> bool { self.toasts.is_empty() }
}

impl Presenter for ToastBoard {
    fn show(&self, id: &ToastId, toast: &Toast) { self.toasts.insert(id.clone(), toast.clone()); }

    fn dismiss(&self, id: &ToastId) { self.toasts.remove(id); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::Phase, types::CorrelationId};

    fn toast(title: &str) -> Toast {
        Toast { phase: Phase::Loading, title: title.to_string(), message: None, hash: None, duration: None }
    }

    #[test]
    fn test_dedup_by_id() {
        let board = ToastBoard::new();
        let id = ToastId::new(Phase::Loading, CorrelationId::generate("Swap"));

        board.show(&id, &toast("first"));
        board.show(&id, &toast("second"));
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(&id).unwrap().title, "second");

        board.dismiss(&id);
        assert!(board.is_empty());
        // Dismissing an unknown toast is a no-op
        board.dismiss(&id);
        assert!(board.is_empty());
    }
}
