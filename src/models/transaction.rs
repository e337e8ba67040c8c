//! Transaction ledger models

use serde::{Deserialize, Serialize};

use crate::utils::address::Address;

/// Which payment flow produced a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Tip,
    BillSplit,
    Crowdfunding,
    CampusPurchase,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Tip => "Tip",
            TransactionType::BillSplit => "Bill Split",
            TransactionType::Crowdfunding => "Crowdfunding",
            TransactionType::CampusPurchase => "Campus",
        }
    }
}

/// One confirmed transfer as persisted in the local ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub from: Address,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl TransactionRecord {
    /// Record with only the fields every flow fills in
    pub fn new(tx_type: TransactionType, hash: String, amount: f64, from: Address, timestamp: i64) -> Self {
        Self {
            hash,
            amount,
            message: None,
            recipient: None,
            recipient_name: None,
            timestamp,
            from,
            tx_type,
            campaign: None,
            item: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let from: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        let mut record = TransactionRecord::new(TransactionType::BillSplit, "0xabc".into(), 2.5, from, 1_700_000_000_000);
        record.recipient_name = Some("Alice".into());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "bill_split");
        assert_eq!(json["recipientName"], "Alice");
        assert_eq!(json["from"], "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
        assert!(json.get("message").is_none());
        assert!(json.get("campaign").is_none());
    }

    #[test]
    fn test_reads_stored_record() {
        let raw = r#"{"hash":"0x1","amount":0.5,"message":"thanks","recipient":"0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359","timestamp":1,"from":"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed","type":"tip"}"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.tx_type, TransactionType::Tip);
        assert_eq!(record.message.as_deref(), Some("thanks"));
        assert!(record.recipient.is_some());
    }
}
