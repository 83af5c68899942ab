use dioxus::prelude::*;
use futures::StreamExt;
use sapiens_api::prelude::*;

use crate::{contract_address, BossState, RPC_URL};

#[derive(Clone)]
pub enum BossAction {
    /// Fetch the boss snapshot; sent on arena mount and after each
    /// settled attack.
    Fetch,
}

pub fn use_boss() -> (Signal<BossState>, Coroutine<BossAction>) {
    let boss = use_context::<Signal<BossState>>();

    let coro = use_coroutine(move |mut rx: UnboundedReceiver<BossAction>| async move {
        let provider = EthProvider::new(RPC_URL);
        let contract = GameContract::new(contract_address());

        // initial fetch as soon as the arena is up
        fetch_boss(&provider, &contract, boss).await;

        while let Some(BossAction::Fetch) = rx.next().await {
            fetch_boss(&provider, &contract, boss).await;
        }
    });

    (boss, coro)
}

async fn fetch_boss(
    provider: &EthProvider,
    contract: &GameContract,
    mut boss: Signal<BossState>,
) {
    match contract.big_boss(provider).await {
        Ok(snapshot) => {
            tracing::info!("Boss: {} {}/{} hp", snapshot.name, snapshot.hp, snapshot.max_hp);
            boss.write().boss = Some(snapshot);
        }
        Err(e) => {
            tracing::error!("Failed to fetch boss: {e}");
        }
    }
}
