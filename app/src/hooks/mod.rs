mod use_boss;
mod use_session;

pub use use_boss::{use_boss, BossAction};
pub use use_session::{provide_session, use_session_store, SessionAction};

use sapiens_api::error::Error;
use sapiens_api::rpc::{EthProvider, TransactionReceipt};

const RECEIPT_POLL_INTERVAL_MS: u32 = 2_000;
const RECEIPT_POLL_LIMIT: u32 = 60;

/// Poll until the transaction is mined, bounded so a stuck remote call
/// resolves to an error instead of hanging the UI state forever.
pub async fn wait_for_receipt(
    provider: &EthProvider,
    hash: &str,
) -> Result<TransactionReceipt, Error> {
    for _ in 0..RECEIPT_POLL_LIMIT {
        if let Some(receipt) = provider.transaction_receipt(hash).await? {
            if !receipt.succeeded() {
                return Err(Error::Reverted(hash.to_string()));
            }
            return Ok(receipt);
        }
        sleep_ms(RECEIPT_POLL_INTERVAL_MS).await;
    }
    Err(Error::SettlementTimeout {
        hash: hash.to_string(),
        polls: RECEIPT_POLL_LIMIT,
    })
}

#[cfg(feature = "web")]
async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(feature = "web"))]
async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(ms as u64)).await;
}
