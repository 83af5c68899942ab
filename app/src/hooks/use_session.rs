use dioxus::prelude::*;
use futures::StreamExt;
use sapiens_api::prelude::*;

use crate::wallet;
use crate::{contract_address, SessionStore, RPC_URL};

#[derive(Clone)]
pub enum SessionAction {
    /// Explicit connect from the wallet button; may prompt the user.
    Connect,
    /// Re-run the ownership query for the current address (after connect
    /// or a settled mint).
    LoadCharacter,
}

pub fn use_session_store() -> Signal<SessionStore> {
    use_context::<Signal<SessionStore>>()
}

/// Register the session coroutine. Called once, above the router, so the
/// wallet button and the character screen can both send actions to it.
///
/// The coroutine first runs the passive discovery pass (check for an
/// already-authorized account, then the character it owns), then drains UI
/// actions one at a time - which is the serialization that keeps at most
/// one session mutation in flight.
pub fn provide_session() -> Coroutine<SessionAction> {
    let store = use_context::<Signal<SessionStore>>();

    use_coroutine(move |mut rx: UnboundedReceiver<SessionAction>| async move {
        let provider = EthProvider::new(RPC_URL);
        let contract = GameContract::new(contract_address());

        discover(&provider, &contract, store).await;

        while let Some(action) = rx.next().await {
            match action {
                SessionAction::Connect => connect(&provider, &contract, store).await,
                SessionAction::LoadCharacter => {
                    load_character(&provider, &contract, store).await
                }
            }
        }
    })
}

/// Passive startup check. Fails silently when no wallet is injected.
async fn discover(
    provider: &EthProvider,
    contract: &GameContract,
    mut store: Signal<SessionStore>,
) {
    if !wallet::capability_present() {
        tracing::info!("No wallet capability present");
        store.write().loading = false;
        return;
    }

    match wallet::authorized_accounts().await {
        Ok(Some(address)) => {
            tracing::info!("Found an authorized account: {address}");
            dispatch(store, SessionEvent::WalletDiscovered(address));
            load_character(provider, contract, store).await;
        }
        Ok(None) => {
            tracing::info!("No authorized account found");
        }
        Err(e) => {
            tracing::error!("Account discovery failed: {e}");
        }
    }
    store.write().loading = false;
}

/// Explicit connect. The missing-wallet case is the one place a blocking
/// alert is surfaced.
async fn connect(
    provider: &EthProvider,
    contract: &GameContract,
    store: Signal<SessionStore>,
) {
    if !wallet::capability_present() {
        wallet::alert_missing_wallet();
        return;
    }

    match wallet::request_accounts().await {
        Ok(Some(address)) => {
            tracing::info!("Connected: {address}");
            dispatch(store, SessionEvent::WalletDiscovered(address));
            load_character(provider, contract, store).await;
        }
        Ok(None) => {
            tracing::error!("Wallet authorized no accounts");
        }
        Err(e) => {
            tracing::error!("Wallet connection failed: {e}");
        }
    }
}

async fn load_character(
    provider: &EthProvider,
    contract: &GameContract,
    store: Signal<SessionStore>,
) {
    let Some(address) = store.read().session.address().copied() else {
        return;
    };

    tracing::info!("Checking for character NFT on {address}");
    match contract.character_of(provider, &address).await {
        Ok(Some(character)) => {
            tracing::info!("User has character NFT: {}", character.name);
            dispatch(store, SessionEvent::CharacterFound(character));
        }
        Ok(None) => {
            tracing::info!("No character NFT found");
            dispatch(store, SessionEvent::CharacterMissing);
        }
        Err(e) => {
            tracing::error!("Character fetch failed: {e}");
        }
    }
}

fn dispatch(mut store: Signal<SessionStore>, event: SessionEvent) {
    let mut state = store.write();
    let session = std::mem::take(&mut state.session);
    state.session = session.apply(event);
}
