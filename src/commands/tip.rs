use crate::commands::parse_amount;
use crate::context::AppContext;
use crate::services::tip_service::{self, TipRequest};
use crate::utils::errors::PayError;

const USAGE: &str = "Usage: tip <address> <amount> [message...]\n\
                     Example: tip 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed 0.5 great talk!";

pub async fn execute(ctx: &mut AppContext, args: &[&str]) -> Result<String, PayError> {
    if args.len() < 2 {
        return Ok(USAGE.to_string());
    }

    let amount = parse_amount("amount", args[1])?;
    let message = if args.len() > 2 { Some(args[2..].join(" ")) } else { None };

    let result = tip_service::send_tip(
        &ctx.pool,
        &ctx.session,
        &ctx.config,
        TipRequest {
            recipient: args[0],
            amount,
            message,
        },
    )
    .await?;

    let mut output = format!(
        "✅ Tip sent: {} {}\nTx: {}\n{}",
        result.record.amount,
        ctx.config.chain.currency_symbol,
        result.record.hash,
        ctx.config.chain.transaction_url(&result.record.hash)
    );
    if let Some(gas) = result.gas_used {
        output.push_str(&format!("\nGas used: {}", gas));
    }
    Ok(output)
}
