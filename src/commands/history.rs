use crate::context::AppContext;
use crate::services::history_service;
use crate::utils::errors::PayError;
use crate::utils::Table;

pub async fn execute(ctx: &mut AppContext, args: &[&str]) -> Result<String, PayError> {
    // Accept both "2" and "p2"
    let page = match args.first() {
        Some(raw) => {
            let digits = raw.strip_prefix('p').unwrap_or(raw);
            digits
                .parse::<usize>()
                .map_err(|_| PayError::validation("page", format!("'{}' is not a page number", raw)))?
        }
        None => 1,
    };

    let history = history_service::history_page(&ctx.pool, &ctx.config.chain, page).await?;
    if history.total_count == 0 {
        return Ok("No transactions yet".to_string());
    }

    let mut table = Table::new(vec!["Time", "Amount", "Type", "Details"]);
    for entry in &history.entries {
        table.add_row(vec![
            entry.timestamp.clone(),
            entry.amount.clone(),
            entry.type_label.to_string(),
            entry.summary.clone(),
        ]);
    }

    let mut output = table.render();
    output.push_str("\n\nExplorer:");
    for entry in &history.entries {
        output.push_str(&format!("\n  {}", entry.explorer_link));
    }
    output.push_str(&format!(
        "\n\nPage {}/{} ({} transaction(s))",
        history.page, history.total_pages, history.total_count
    ));
    if history.page < history.total_pages {
        output.push_str(&format!(" - `history {}` for more", history.page + 1));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wallet::mock::{MockWallet, ALICE, BOB};
    use crate::commands::handle_line;
    use crate::commands::test_support::context;

    #[tokio::test]
    async fn test_empty_history() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        assert_eq!(execute(&mut ctx, &[]).await.unwrap(), "No transactions yet");
    }

    #[tokio::test]
    async fn test_history_lists_flows() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        handle_line(&mut ctx, "connect").await;
        handle_line(&mut ctx, &format!("tip {} 1 cheers", BOB)).await;
        handle_line(&mut ctx, "buy meal-plan 3").await;

        let output = handle_line(&mut ctx, "history").await.unwrap();
        assert!(output.contains("To: 0xfB69...d359 - cheers"));
        assert!(output.contains("meal plan"));
        assert!(output.contains("Campus"));
        assert!(output.contains("https://explorer-sphinx.shardeum.org/transaction/0x"));
        assert!(output.contains("Page 1/1 (2 transaction(s))"));
    }

    #[tokio::test]
    async fn test_page_out_of_range() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        let output = handle_line(&mut ctx, "history p3").await.unwrap();
        assert!(output.starts_with("❌ Invalid page"));
    }
}
