use crate::commands::parse_amount;
use crate::context::AppContext;
use crate::services::campus_service;
use crate::utils::errors::PayError;

const USAGE: &str = "Usage: buy <item> <price>\nExample: buy meal-plan 15";

pub async fn execute(ctx: &mut AppContext, args: &[&str]) -> Result<String, PayError> {
    if args.len() < 2 {
        return Ok(USAGE.to_string());
    }

    let price = parse_amount("price", args[1])?;
    let record = campus_service::buy_item(&ctx.pool, &ctx.session, &ctx.config, args[0], price).await?;

    Ok(format!(
        "✅ Purchased {} for {} {}\n{}",
        record.item.as_deref().unwrap_or(args[0]),
        record.amount,
        ctx.config.chain.currency_symbol,
        ctx.config.chain.transaction_url(&record.hash)
    ))
}
