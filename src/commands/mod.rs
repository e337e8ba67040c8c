pub mod buy;
pub mod connect;
pub mod contribute;
pub mod help;
pub mod history;
pub mod split;
pub mod stats;
pub mod subscribe;
pub mod tip;

use tracing::{debug, warn};

use crate::context::AppContext;
use crate::utils::errors::PayError;

/// Run one console line. Returns the text to print, or `None` for blank input
/// and unknown commands that were already reported.
pub async fn handle_line(ctx: &mut AppContext, line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (command, args) = parts.split_first()?;
    let command = command.to_lowercase();

    debug!("Command '{}' with {} argument(s)", command, args.len());

    let result = match command.as_str() {
        "connect" => connect::connect(ctx).await,
        "disconnect" => connect::disconnect(ctx),
        "status" => connect::status(ctx),
        "tip" => tip::execute(ctx, args).await,
        "recipient" | "recipients" => split::recipient(ctx, args),
        "split" => split::execute(ctx, args).await,
        "subscribe" => subscribe::execute(ctx, args).await,
        "subscriptions" | "subs" => subscribe::list(ctx).await,
        "contribute" | "fund" => contribute::execute(ctx, args).await,
        "campaign" => contribute::progress(ctx).await,
        "buy" => buy::execute(ctx, args).await,
        "history" | "tx" => history::execute(ctx, args).await,
        "stats" => stats::execute(ctx).await,
        "help" | "?" => Ok(help::text(&ctx.config)),
        other => Ok(format!("Unknown command '{}'. Type `help` for the command list.", other)),
    };

    Some(match result {
        Ok(output) => output,
        Err(e) => {
            warn!("Command '{}' failed: {}", command, e);
            format!("❌ {}", e.status_message(&ctx.config.chain.currency_symbol))
        }
    })
}

/// Parse a decimal amount argument
pub(crate) fn parse_amount(field: &'static str, raw: &str) -> Result<f64, PayError> {
    raw.parse::<f64>()
        .map_err(|_| PayError::validation(field, format!("'{}' is not a number", raw)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::api::wallet::mock::MockWallet;
    use crate::api::wallet::WalletProvider;
    use crate::config::Config;
    use crate::context::AppContext;
    use crate::db::test_pool;

    /// Context wired to `wallet`, not yet connected
    pub async fn context(wallet: MockWallet) -> (Arc<MockWallet>, AppContext) {
        let wallet = Arc::new(wallet);
        let provider: Arc<dyn WalletProvider> = wallet.clone();
        let ctx = AppContext::new(Config::default(), test_pool().await, Some(provider));
        (wallet, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use crate::api::wallet::mock::{MockWallet, ALICE};

    #[tokio::test]
    async fn test_blank_line_is_ignored() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        assert!(handle_line(&mut ctx, "   ").await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        let output = handle_line(&mut ctx, "launch rockets").await.unwrap();
        assert!(output.contains("Unknown command 'launch'"));
    }

    #[tokio::test]
    async fn test_errors_become_status_lines() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        let output = handle_line(&mut ctx, "tip 0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359 1").await.unwrap();
        assert_eq!(output, "❌ Please connect your wallet first");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", "2.5").unwrap(), 2.5);
        assert!(matches!(
            parse_amount("amount", "lots"),
            Err(PayError::Validation { field: "amount", .. })
        ));
    }
}
