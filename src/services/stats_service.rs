use crate::models::{CampaignProgress, LedgerStats, TransactionRecord, TransactionType};

/// Totals over the given records
pub fn compute(records: &[TransactionRecord]) -> LedgerStats {
    if records.is_empty() {
        return LedgerStats::default();
    }

    let total_volume: f64 = records.iter().map(|r| r.amount).sum();
    let count = records.len();

    LedgerStats {
        total_volume,
        count,
        average: total_volume / count as f64,
    }
}

/// Crowdfunding progress for `campaign` as seen in the local ledger
pub fn campaign_progress(records: &[TransactionRecord], campaign: &str, goal: f64) -> CampaignProgress {
    let contributions = records.iter().filter(|r| {
        r.tx_type == TransactionType::Crowdfunding && r.campaign.as_deref() == Some(campaign)
    });

    let (raised, backers) = contributions.fold((0.0, 0usize), |(sum, n), r| (sum + r.amount, n + 1));

    let percent = if goal > 0.0 {
        (raised / goal * 100.0).min(100.0)
    } else {
        0.0
    };

    CampaignProgress {
        campaign: campaign.to_string(),
        raised,
        backers,
        goal,
        percent,
    }
}
