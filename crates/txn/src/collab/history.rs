use parking_lot::RwLock;

use super::History;
use crate::types::HistoryEntry;

/// Append-only in-memory transaction history.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new() -> Self { Self::default() }

    /// Entries, most recent first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize { self.entries.read().len() }

    pub fn is_empty(&self) -> bool { self.entries.read().is_empty() }
}

impl History for MemoryHistory {
    fn append(&self, entry: HistoryEntry) { self.entries.write().push(entry); }
}

#[cfg(feature = "display")]
mod display {
    use std::fmt::Display;

    use tabled::{Table, Tabled, settings::Style};

    use super::*;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Action")]
        action: String,
        #[tabled(rename = "Description")]
        description: String,
        #[tabled(rename = "Hash")]
        hash: String,
    }

    impl Display for MemoryHistory {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let full_hash = f.alternate();
            let rows = self.entries().into_iter().map(|e| Row {
                time: e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                action: e.action_type.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
                description: e.description,
                // Short form unless `{:#}` is requested
                hash: if full_hash { e.hash.to_string() } else { format!("{:#}", e.hash) },
            });
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            write!(f, "{}", table)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::TxHash;
    use chrono::Utc;

    use super::*;
    use crate::types::ActionType;

    fn entry(n: u8) -> HistoryEntry {
        HistoryEntry {
            hash: TxHash::repeat_byte(n),
            description: format!("tx {}", n),
            action_type: Some(ActionType::Swap),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_newest_first() {
        let history = MemoryHistory::new();
        assert!(history.is_empty());
        history.append(entry(1));
        history.append(entry(2));

        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hash, TxHash::repeat_byte(2));
        assert_eq!(entries[1].hash, TxHash::repeat_byte(1));
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_display() {
        let history = MemoryHistory::new();
        history.append(entry(0xcd));
        let rendered = format!("{:#}", history);
        assert!(rendered.contains("tx 205"));
        assert!(rendered.contains("swap"));
        assert!(rendered.contains(&TxHash::repeat_byte(0xcd).to_string()));
    }
}
