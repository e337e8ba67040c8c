//! History display models

/// One rendered ledger entry
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub amount: String,
    pub type_label: &'static str,
    pub summary: String,
    pub explorer_link: String,
}

/// A page of rendered history
#[derive(Debug)]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}
