use std::sync::Arc;

use sqlx::sqlite::SqlitePool;
use tokio::sync::broadcast;

use crate::api::wallet::{ProviderEvent, WalletProvider};
use crate::config::Config;
use crate::models::RecipientList;
use crate::services::session_service::{self, Session};

/// Everything a console command can touch
pub struct AppContext {
    pub config: Config,
    pub pool: SqlitePool,
    pub provider: Option<Arc<dyn WalletProvider>>,
    pub session: Session,
    pub recipients: RecipientList,
    /// Keeps the event channel open when no wallet is configured
    idle_events: Option<broadcast::Sender<ProviderEvent>>,
}

impl AppContext {
    pub fn new(config: Config, pool: SqlitePool, provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            config,
            pool,
            provider,
            session: Session::new(),
            recipients: RecipientList::new(),
            idle_events: None,
        }
    }

    /// Receiver for wallet account/chain notifications. Without a wallet the
    /// receiver simply never yields.
    pub fn subscribe(&mut self) -> broadcast::Receiver<ProviderEvent> {
        match &self.provider {
            Some(provider) => provider.subscribe(),
            None => self
                .idle_events
                .get_or_insert_with(|| broadcast::channel(1).0)
                .subscribe(),
        }
    }

    /// Apply a wallet notification to the session
    pub fn apply_event(&mut self, event: &ProviderEvent) -> Option<String> {
        session_service::handle_event(&mut self.session, event, &self.config.chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wallet::mock::{addr, MockWallet, ALICE, BOB};
    use crate::commands::{handle_line, test_support::context};
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_events_reach_session() {
        let (wallet, mut ctx) = context(MockWallet::new(ALICE)).await;
        let mut events = ctx.subscribe();
        handle_line(&mut ctx, "connect").await;

        wallet.emit(ProviderEvent::AccountsChanged(vec![addr(BOB)]));
        let event = events.recv().await.unwrap();
        let line = ctx.apply_event(&event).unwrap();
        assert!(line.contains("0xfB69...d359"));
        assert_eq!(ctx.session.account(), Some(&addr(BOB)));

        wallet.emit(ProviderEvent::ChainChanged(1));
        let event = events.recv().await.unwrap();
        assert!(ctx.apply_event(&event).is_some());
        assert!(!ctx.session.is_connected());
    }

    #[tokio::test]
    async fn test_subscribe_without_provider() {
        let mut ctx = AppContext::new(Config::default(), test_pool().await, None);
        let mut events = ctx.subscribe();
        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        let output = handle_line(&mut ctx, "connect").await.unwrap();
        assert!(output.starts_with("❌ No wallet provider detected"));
    }
}
