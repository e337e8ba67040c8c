use chrono::{Local, TimeZone};
use sqlx::sqlite::SqlitePool;

use crate::config::ChainDescriptor;
use crate::db;
use crate::models::{HistoryEntry, HistoryPage, TransactionRecord, TransactionType};
use crate::utils::address::short_address;
use crate::utils::errors::PayError;
use crate::utils::Page;

pub const HISTORY_PER_PAGE: usize = 10;

/// Human summary shown next to each ledger entry
pub fn summary(record: &TransactionRecord) -> String {
    match record.tx_type {
        TransactionType::BillSplit => format!(
            "Split with {}",
            record.recipient_name.as_deref().unwrap_or("Unknown")
        ),
        TransactionType::Crowdfunding => record
            .campaign
            .clone()
            .unwrap_or_else(|| "Campaign contribution".to_string()),
        TransactionType::CampusPurchase => record
            .item
            .as_deref()
            .map(|item| item.replacen('-', " ", 1))
            .unwrap_or_else(|| "Campus purchase".to_string()),
        TransactionType::Tip => {
            let message = record.message.as_deref().filter(|m| !m.is_empty());
            match (&record.recipient, message) {
                (Some(to), Some(message)) => format!("To: {} - {}", short_address(&to.to_checksum()), message),
                (Some(to), None) => format!("To: {}", short_address(&to.to_checksum())),
                (None, Some(message)) => message.to_string(),
                (None, None) => "No message".to_string(),
            }
        }
    }
}

/// Local date and time of an epoch-millisecond timestamp
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unknown time".to_string(),
    }
}

pub fn describe(record: &TransactionRecord, chain: &ChainDescriptor) -> HistoryEntry {
    HistoryEntry {
        timestamp: format_timestamp(record.timestamp),
        amount: format!("{} {}", record.amount, chain.currency_symbol),
        type_label: record.tx_type.label(),
        summary: summary(record),
        explorer_link: chain.transaction_url(&record.hash),
    }
}

/// One page of the ledger, newest first
pub async fn history_page(pool: &SqlitePool, chain: &ChainDescriptor, page: usize) -> Result<HistoryPage, PayError> {
    let records = db::ledger::load_all(pool).await;

    let selected = Page::of(&records, HISTORY_PER_PAGE, page).ok_or_else(|| {
        let total_pages = ((records.len() + HISTORY_PER_PAGE - 1) / HISTORY_PER_PAGE).max(1);
        PayError::validation("page", format!("history has {} page(s)", total_pages))
    })?;

    Ok(HistoryPage {
        entries: selected.items.iter().map(|r| describe(r, chain)).collect(),
        page: selected.current_page,
        total_pages: selected.total_pages,
        total_count: records.len(),
    })
}
