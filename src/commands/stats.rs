use crate::context::AppContext;
use crate::db;
use crate::models::TransactionType;
use crate::services::stats_service;
use crate::utils::errors::PayError;
use crate::utils::Table;

pub async fn execute(ctx: &mut AppContext) -> Result<String, PayError> {
    let records = db::ledger::load_all(&ctx.pool).await;
    let symbol = &ctx.config.chain.currency_symbol;
    let stats = stats_service::compute(&records);

    let mut output = format!(
        "Total volume: {:.4} {}\nTransactions: {}\nAverage: {:.4} {}",
        stats.total_volume, symbol, stats.count, stats.average, symbol
    );

    if stats.count > 0 {
        let mut table = Table::new(vec!["Type", "Count", "Volume"]);
        for tx_type in [
            TransactionType::Tip,
            TransactionType::BillSplit,
            TransactionType::Crowdfunding,
            TransactionType::CampusPurchase,
        ] {
            let subset: Vec<_> = records.iter().filter(|r| r.tx_type == tx_type).cloned().collect();
            if subset.is_empty() {
                continue;
            }
            let by_type = stats_service::compute(&subset);
            table.add_row(vec![
                tx_type.label().to_string(),
                by_type.count.to_string(),
                format!("{:.4} {}", by_type.total_volume, symbol),
            ]);
        }
        output.push_str("\n\n");
        output.push_str(&table.render());
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
    async fn test_empty_stats() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        let output = execute(&mut ctx).await.unwrap();
        assert_eq!(output, "Total volume: 0.0000 SHM\nTransactions: 0\nAverage: 0.0000 SHM");
    }

    #[tokio::test]
    async fn test_stats_by_type() {
        let (_, mut ctx) = context(MockWallet::new(ALICE)).await;
        handle_line(&mut ctx, "connect").await;
        handle_line(&mut ctx, &format!("tip {} 1", BOB)).await;
        handle_line(&mut ctx, "contribute 3").await;

        let output = handle_line(&mut ctx, "stats").await.unwrap();
        assert!(output.starts_with("Total volume: 4.0000 SHM\nTransactions: 2\nAverage: 2.0000 SHM"));
        assert!(output.contains("Crowdfunding"));
        assert!(!output.contains("Bill Split"));
    }
}
