//! Database seeder for SimpleBank development and testing.
//!
//! Creates a fixed set of demo accounts, then runs a burst of concurrent
//! transfers between them in both directions.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use futures::future::join_all;
use simplebank_db::entities::accounts;
use simplebank_db::{CreateAccountParams, Store, TransferTxParams};
use simplebank_shared::AppConfig;
use simplebank_shared::types::PageRequest;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Demo account holders and their opening balances in cents.
const DEMO_ACCOUNTS: [(&str, i64, &str); 4] = [
    ("Alice Martin", 100_000, "USD"),
    ("Bob Chen", 50_000, "USD"),
    ("Carla Diaz", 75_000, "USD"),
    ("Dmitri Volkov", 20_000, "EUR"),
];

/// Transfers issued per direction in the demo burst.
const TRANSFERS_PER_DIRECTION: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simplebank_db=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = Store::connect(&config)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let existing = store.queries().list_accounts(PageRequest::new(1, 1)).await?;
    if existing.meta.total > 0 {
        warn!(
            accounts = existing.meta.total,
            "Accounts already exist, skipping seed"
        );
        return Ok(());
    }

    let accounts = seed_accounts(&store).await?;
    seed_transfers(&store, &accounts).await?;

    for account in &accounts {
        let current = store
            .queries()
            .get_account(account.account_id())
            .await?
            .context("Seeded account disappeared")?;
        info!(
            account_id = current.id,
            owner = %current.owner,
            balance = current.balance,
            currency = %current.currency,
            "Final balance"
        );
    }

    info!("Seeding complete");
    Ok(())
}

async fn seed_accounts(store: &Store) -> anyhow::Result<Vec<accounts::Model>> {
    let mut created = Vec::with_capacity(DEMO_ACCOUNTS.len());

    for (owner, balance, currency) in DEMO_ACCOUNTS {
        let account = store
            .queries()
            .create_account(CreateAccountParams {
                owner: owner.to_string(),
                balance,
                currency: currency.to_string(),
            })
            .await
            .with_context(|| format!("Failed to create account for {owner}"))?;

        info!(account_id = account.id, owner, balance, "Created account");
        created.push(account);
    }

    Ok(created)
}

/// Moves money back and forth between the first two USD accounts concurrently.
async fn seed_transfers(store: &Store, accounts: &[accounts::Model]) -> anyhow::Result<()> {
    let [alice, bob, ..] = accounts else {
        anyhow::bail!("At least two accounts are required for demo transfers");
    };

    let transfers = (0..TRANSFERS_PER_DIRECTION * 2).map(|i| {
        let (from, to, amount) = if i % 2 == 0 {
            (alice.account_id(), bob.account_id(), 1_500)
        } else {
            (bob.account_id(), alice.account_id(), 500)
        };
        let params = TransferTxParams::new(from, to, amount).with_name(format!("seed {}", i + 1));
        store.transfer_tx(params)
    });

    let mut committed = 0usize;
    for result in join_all(transfers).await {
        match result {
            Ok(_) => committed += 1,
            Err(e) if e.is_retryable() => warn!(error = %e, "Demo transfer aborted, not retrying"),
            Err(e) => return Err(e).context("Demo transfer failed"),
        }
    }

    info!(committed, "Demo transfers finished");
    Ok(())
}
