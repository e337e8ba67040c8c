//! Ledger statistics models

/// Totals derived from the local ledger
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerStats {
    pub total_volume: f64,
    pub count: usize,
    pub average: f64,
}

/// Crowdfunding progress derived from the local ledger
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignProgress {
    pub campaign: String,
    pub raised: f64,
    pub backers: usize,
    pub goal: f64,
    /// 0..=100
    pub percent: f64,
}
