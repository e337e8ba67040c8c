use crate::context::AppContext;
use crate::services::session_service;
use crate::utils::errors::PayError;

pub async fn connect(ctx: &mut AppContext) -> Result<String, PayError> {
    if let Some(address) = ctx.session.account() {
        return Ok(format!("Already connected as {}", address.short()));
    }

    let address = session_service::connect(&mut ctx.session, ctx.provider.as_ref(), &ctx.config.chain).await?;
    Ok(format!(
        "✅ Connected: {} on {}",
        address.short(),
        ctx.config.chain.name
    ))
}

pub fn disconnect(ctx: &mut AppContext) -> Result<String, PayError> {
    if !ctx.session.is_connected() {
        return Ok("Wallet is not connected".to_string());
    }
    ctx.session.disconnect();
    Ok("Wallet disconnected".to_string())
}

pub fn status(ctx: &AppContext) -> Result<String, PayError> {
    let mut output = session_service::status(&ctx.session, &ctx.config.chain);
    if let Some(address) = ctx.session.account() {
        output.push_str(&format!("\nAccount: {}", address));
    }
    if !ctx.recipients.is_empty() {
        output.push_str(&format!("\nPending split recipients: {}", ctx.recipients.len()));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wallet::mock::{MockWallet, ALICE};
    use crate::commands::handle_line;
    use crate::commands::test_support::context;

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let (wallet, mut ctx) = context(MockWallet::new(ALICE)).await;

        let output = connect(&mut ctx).await.unwrap();
        assert!(output.contains("0x5aAe...eAed"));
        assert!(output.contains("Shardeum Sphinx 1.X"));
        assert_eq!(wallet.state.lock().unwrap().chain_id, 8080);

        let again = connect(&mut ctx).await.unwrap();
        assert!(again.starts_with("Already connected"));

        assert_eq!(disconnect(&mut ctx).unwrap(), "Wallet disconnected");
        assert_eq!(status(&ctx).unwrap(), "Disconnected");
    }

    #[tokio::test]
    async fn test_rejected_connect_is_reported() {
        let (_, mut ctx) = context(MockWallet::new(ALICE).with(|s| s.reject_accounts = true)).await;
        let output = handle_line(&mut ctx, "connect").await.unwrap();
        assert_eq!(output, "❌ Transaction cancelled by user");
        assert!(!ctx.session.is_connected());
    }

    #[tokio::test]
    async fn test_status_shows_full_address() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        connect(&mut ctx).await.unwrap();
        let output = status(&ctx).unwrap();
        assert!(output.contains(ALICE));
    }
}
