use crate::commands::parse_amount;
use crate::context::AppContext;
use crate::models::CampaignProgress;
use crate::services::crowdfund_service;
use crate::utils::errors::PayError;

fn render_progress(progress: &CampaignProgress, symbol: &str) -> String {
    const WIDTH: usize = 20;
    let filled = ((progress.percent / 100.0) * WIDTH as f64).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled.min(WIDTH)), "-".repeat(WIDTH - filled.min(WIDTH)));

    format!(
        "{}\n[{}] {:.1}%\nRaised {} of {} {} from {} backer(s)",
        progress.campaign, bar, progress.percent, progress.raised, progress.goal, symbol, progress.backers
    )
}

pub async fn execute(ctx: &mut AppContext, args: &[&str]) -> Result<String, PayError> {
    let Some(raw) = args.first() else {
        return Ok(format!(
            "Usage: contribute <amount>\nCampaign: {} ({})",
            ctx.config.campaign_name,
            ctx.config.campaign_address.short()
        ));
    };
    let amount = parse_amount("amount", raw)?;

    let (record, progress) = crowdfund_service::contribute(&ctx.pool, &ctx.session, &ctx.config, amount).await?;

    Ok(format!(
        "✅ Contributed {} {}\n{}\n\n{}",
        record.amount,
        ctx.config.chain.currency_symbol,
        ctx.config.chain.transaction_url(&record.hash),
        render_progress(&progress, &ctx.config.chain.currency_symbol)
    ))
}

pub async fn progress(ctx: &mut AppContext) -> Result<String, PayError> {
    let progress = crowdfund_service::campaign_progress(&ctx.pool, &ctx.config).await;
    Ok(render_progress(&progress, &ctx.config.chain.currency_symbol))
}
