use chrono::{DateTime, Duration, Months, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::db;
use crate::models::{Frequency, Subscription};
use crate::services::session_service::Session;
use crate::services::transfer_service;
use crate::utils::errors::PayError;

pub struct SubscriptionRequest<'a> {
    pub amount: f64,
    pub frequency: &'a str,
    pub recipient: &'a str,
}

/// When the first payment of a new schedule falls due.
///
/// Month-based frequencies keep the day of month, clamped to the last day of
/// shorter months.
pub fn next_payment_date(frequency: Frequency, now: DateTime<Utc>) -> DateTime<Utc> {
    let months = match frequency {
        Frequency::Weekly => return now + Duration::days(7),
        Frequency::Monthly => 1,
        Frequency::Quarterly => 3,
        Frequency::Yearly => 12,
    };

    now.checked_add_months(Months::new(months))
        .unwrap_or_else(|| now + Duration::days(30))
}

/// Store a recurring payment schedule. No transfer is submitted and nothing
/// ever executes the schedule.
pub async fn create_subscription(
    pool: &SqlitePool,
    session: &Session,
    config: &Config,
    request: SubscriptionRequest<'_>,
    now: DateTime<Utc>,
) -> Result<Subscription, PayError> {
    session.signer()?;

    transfer_service::validate_amount("amount", request.amount, config.chain.decimals)?;
    let frequency: Frequency = request
        .frequency
        .parse()
        .map_err(|e: String| PayError::validation("frequency", e))?;
    let recipient = transfer_service::validate_address("recipient", request.recipient)?;

    let subscription = Subscription {
        id: Uuid::new_v4(),
        amount: request.amount,
        frequency,
        recipient,
        next_payment: next_payment_date(frequency, now).timestamp_millis(),
        active: true,
        created: now.timestamp_millis(),
    };

    db::subscription::append(pool, &subscription).await?;
    info!(
        "Subscription {} created: {} {} {} to {}",
        subscription.id, subscription.amount, config.chain.currency_symbol, frequency, recipient
    );

    Ok(subscription)
}

pub async fn list_subscriptions(pool: &SqlitePool) -> Vec<Subscription> {
    db::subscription::load_all(pool).await
}
