use chrono::{Local, TimeZone, Utc};

use crate::commands::parse_amount;
use crate::context::AppContext;
use crate::services::subscription_service::{self, SubscriptionRequest};
use crate::utils::errors::PayError;
use crate::utils::Table;

const USAGE: &str = "Usage: subscribe <amount> <weekly|monthly|quarterly|yearly> <address>";

fn local_date(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

pub async fn execute(ctx: &mut AppContext, args: &[&str]) -> Result<String, PayError> {
    if args.len() < 3 {
        return Ok(USAGE.to_string());
    }

    let amount = parse_amount("amount", args[0])?;
    let subscription = subscription_service::create_subscription(
        &ctx.pool,
        &ctx.session,
        &ctx.config,
        SubscriptionRequest {
            amount,
            frequency: args[1],
            recipient: args[2],
        },
        Utc::now(),
    )
    .await?;

    Ok(format!(
        "✅ Subscription created: {} {} {} to {}\nNext payment: {}\nNote: payments are scheduled only and are not sent automatically",
        subscription.amount,
        ctx.config.chain.currency_symbol,
        subscription.frequency,
        subscription.recipient.short(),
        local_date(subscription.next_payment)
    ))
}

pub async fn list(ctx: &mut AppContext) -> Result<String, PayError> {
    let subscriptions = subscription_service::list_subscriptions(&ctx.pool).await;
    if subscriptions.is_empty() {
        return Ok("No subscriptions".to_string());
    }

    let mut table = Table::new(vec!["Amount", "Frequency", "Recipient", "Next payment", "Active"]);
    for s in &subscriptions {
        table.add_row(vec![
            format!("{} {}", s.amount, ctx.config.chain.currency_symbol),
            s.frequency.to_string(),
            s.recipient.short(),
            local_date(s.next_payment),
            if s.active { "yes" } else { "no" }.to_string(),
        ]);
    }
    Ok(table.render())
}
