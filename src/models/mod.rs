//! Data models for PayFi commands and services
//!
//! Plain data shared between the services and the console commands.

pub mod history;
pub mod recipient;
pub mod stats;
pub mod subscription;
pub mod transaction;

pub use history::{HistoryEntry, HistoryPage};
pub use recipient::{Recipient, RecipientList};
pub use stats::{CampaignProgress, LedgerStats};
pub use subscription::{Frequency, Subscription};
pub use transaction::{TransactionRecord, TransactionType};
