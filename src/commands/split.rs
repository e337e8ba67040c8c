use crate::commands::parse_amount;
use crate::context::AppContext;
use crate::services::split_service;
use crate::utils::errors::PayError;
use crate::utils::Table;

const RECIPIENT_USAGE: &str = "Usage:\n  \
    recipient add <address> [name...]\n  \
    recipient remove <number>\n  \
    recipient list [total]\n  \
    recipient clear";

/// Manage the recipient list of the next bill split
pub fn recipient(ctx: &mut AppContext, args: &[&str]) -> Result<String, PayError> {
    let Some((action, rest)) = args.split_first() else {
        return Ok(RECIPIENT_USAGE.to_string());
    };

    match action.to_lowercase().as_str() {
        "add" => {
            let Some((address, name)) = rest.split_first() else {
                return Ok(RECIPIENT_USAGE.to_string());
            };
            let added = ctx.recipients.add(address, &name.join(" "))?;
            let line = format!("Added {} ({})", added.name, added.address.short());
            Ok(format!("{}\n{} recipient(s) in this split", line, ctx.recipients.len()))
        }
        "remove" | "rm" => {
            let Some(raw) = rest.first() else {
                return Ok(RECIPIENT_USAGE.to_string());
            };
            let position = raw
                .parse::<usize>()
                .map_err(|_| PayError::validation("index", format!("'{}' is not a number", raw)))?;
            let removed = ctx.recipients.remove(position)?;
            Ok(format!("Removed {} ({})", removed.name, removed.address.short()))
        }
        "list" | "ls" => {
            let total = rest.first().map(|raw| parse_amount("total", raw)).transpose()?;
            Ok(render_list(ctx, total))
        }
        "clear" => {
            ctx.recipients.clear();
            Ok("Recipient list cleared".to_string())
        }
        _ => Ok(RECIPIENT_USAGE.to_string()),
    }
}

fn render_list(ctx: &AppContext, total: Option<f64>) -> String {
    if ctx.recipients.is_empty() {
        return "No recipients yet. Add one with `recipient add <address> [name]`".to_string();
    }

    let mut table = Table::new(vec!["#", "Name", "Address"]);
    for (i, r) in ctx.recipients.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), r.name.clone(), r.address.short()]);
    }

    let mut output = table.render();
    if let Some(total) = total.filter(|t| *t > 0.0) {
        output.push_str(&format!(
            "\n\nEach person pays {:.6} {}",
            ctx.recipients.amount_per_person(total),
            ctx.config.chain.currency_symbol
        ));
    }
    output
}

pub async fn execute(ctx: &mut AppContext, args: &[&str]) -> Result<String, PayError> {
    let Some(raw) = args.first() else {
        return Ok("Usage: split <total amount>".to_string());
    };
    let total = parse_amount("total", raw)?;

    let result = split_service::split_bill(&ctx.pool, &ctx.session, &ctx.config, &mut ctx.recipients, total).await?;

    let symbol = &ctx.config.chain.currency_symbol;
    let mut output = format!(
        "✅ Bill split complete: {} payment(s) of {:.6} {}",
        result.records.len(),
        result.amount_per_person,
        symbol
    );
    for record in &result.records {
        output.push_str(&format!(
            "\n  {} -> {}",
            record.recipient_name.as_deref().unwrap_or("Unknown"),
            ctx.config.chain.transaction_url(&record.hash)
        ));
    }
    Ok(output)
}
