use sqlx::sqlite::SqlitePool;
use tracing::info;

use crate::api::wallet::TransferRequest;
use crate::config::Config;
use crate::db;
use crate::models::{CampaignProgress, TransactionRecord, TransactionType};
use crate::services::session_service::Session;
use crate::services::{stats_service, transfer_service};
use crate::utils::errors::PayError;

/// Contribute to the configured campaign
pub async fn contribute(
    pool: &SqlitePool,
    session: &Session,
    config: &Config,
    amount: f64,
) -> Result<(TransactionRecord, CampaignProgress), PayError> {
    let signer = session.signer()?;
    let value = transfer_service::validate_amount("amount", amount, config.chain.decimals)?;

    let transfer = TransferRequest::native(config.campaign_address, value);
    let confirmed = transfer_service::submit(signer, &transfer).await?;

    let mut record = TransactionRecord::new(
        TransactionType::Crowdfunding,
        confirmed.hash,
        amount,
        *signer.address(),
        confirmed.timestamp,
    );
    record.campaign = Some(config.campaign_name.clone());

    db::ledger::append(pool, &record).await?;
    info!("Contributed {} {} to '{}'", amount, config.chain.currency_symbol, config.campaign_name);

    let progress = campaign_progress(pool, config).await;
    Ok((record, progress))
}

/// Progress of the configured campaign from local records
pub async fn campaign_progress(pool: &SqlitePool, config: &Config) -> CampaignProgress {
    let records = db::ledger::load_all(pool).await;
    stats_service::campaign_progress(&records, &config.campaign_name, config.campaign_goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wallet::mock::{connected, MockWallet, ALICE};
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_contribution_goes_to_campaign() {
        let pool = test_pool().await;
        let (wallet, session, config) = connected(MockWallet::new(ALICE)).await;

        let (record, progress) = contribute(&pool, &session, &config, 25.0).await.unwrap();
        contribute(&pool, &session, &config, 25.0).await.unwrap();

        assert_eq!(record.tx_type, TransactionType::Crowdfunding);
        assert_eq!(record.campaign.as_deref(), Some("Shardeum dApp Development Fund"));
        assert_eq!(progress.raised, 25.0);
        assert_eq!(progress.backers, 1);

        let sent = wallet.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(_, req)| req.to == config.campaign_address));

        let progress = campaign_progress(&pool, &config).await;
        assert_eq!(progress.raised, 50.0);
        assert_eq!(progress.percent, 5.0);
    }

    #[tokio::test]
    async fn test_contribution_validates_amount() {
        let pool = test_pool().await;
        let (wallet, session, config) = connected(MockWallet::new(ALICE)).await;

        let result = contribute(&pool, &session, &config, -3.0).await;
        assert!(matches!(result, Err(PayError::Validation { field: "amount", .. })));
        assert!(wallet.sent().is_empty());
    }

    #[tokio::test]
    async fn test_contribution_after_disconnect() {
        let pool = test_pool().await;
        let (wallet, mut session, config) = connected(MockWallet::new(ALICE)).await;
        session.disconnect();

        assert!(matches!(
            contribute(&pool, &session, &config, 5.0).await,
            Err(PayError::NotConnected)
        ));
        assert!(wallet.sent().is_empty());
        assert_eq!(campaign_progress(&pool, &config).await.backers, 0);
    }
}
