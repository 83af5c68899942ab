use dioxus::prelude::*;
use futures::StreamExt;
use sapiens_api::prelude::*;

use crate::hooks::{use_session_store, wait_for_receipt, SessionAction};
use crate::wallet;
use crate::{contract_address, RPC_URL};

#[derive(Clone)]
enum MintAction {
    Mint(u64),
}

/// The catalog of mintable characters. Minting is gated to one in-flight
/// transaction; once it settles, the session coroutine re-runs the
/// ownership query, which moves the player into the arena.
#[component]
pub fn SelectCharacter() -> Element {
    let store = use_session_store();
    let session = use_coroutine_handle::<SessionAction>();
    let mut minting = use_signal(|| None::<u64>);

    let mint_coro = use_coroutine(move |mut rx: UnboundedReceiver<MintAction>| async move {
        let provider = EthProvider::new(RPC_URL);
        let contract = GameContract::new(contract_address());

        while let Some(MintAction::Mint(index)) = rx.next().await {
            if !wallet::capability_present() {
                wallet::alert_missing_wallet();
                continue;
            }
            let Some(address) = store.read().session.address().copied() else {
                continue;
            };
            if minting.read().is_some() {
                continue;
            }
            minting.set(Some(index));

            tracing::info!("Minting character template {index}...");
            match mint_character(&provider, &contract, &address, index).await {
                Ok(hash) => {
                    tracing::info!("Mint settled: {hash}");
                    session.send(SessionAction::LoadCharacter);
                }
                Err(e) => {
                    tracing::error!("Mint failed: {e}");
                }
            }
            minting.set(None);
        }
    });

    let in_flight = *minting.read();

    rsx! {
        div { class: "text-center",
            h2 { class: "text-3xl font-bold mb-8", "Mint Your Hero. Choose wisely." }

            div { class: "grid md:grid-cols-4 gap-6",
                for (index, template) in CHARACTER_TEMPLATES.iter().enumerate() {
                    div { key: "{template.name}", class: "card text-center",
                        h3 { class: "text-lg font-semibold text-gold mb-2", "{template.name}" }
                        p { class: "text-sm text-gray-400 mb-2", "{template.class}" }
                        img {
                            class: "w-full rounded mb-4",
                            src: "{template.image_uri}",
                            alt: "{template.name}",
                        }
                        p { class: "text-sm text-gray-300", "❤️ {template.hp} HP" }
                        p { class: "text-sm text-gray-300 mb-4", "⚔️ {template.attack_damage} Attack" }
                        button {
                            class: "btn btn-primary w-full",
                            disabled: in_flight.is_some(),
                            onclick: move |_| mint_coro.send(MintAction::Mint(index as u64)),
                            if in_flight == Some(index as u64) {
                                "Minting..."
                            } else {
                                "Mint {template.name}"
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn mint_character(
    provider: &EthProvider,
    contract: &GameContract,
    from: &Address,
    template_index: u64,
) -> Result<String, String> {
    let hash = wallet::send_transaction(
        from,
        contract.address(),
        &contract.mint_calldata(template_index),
    )
    .await?;
    wait_for_receipt(provider, &hash)
        .await
        .map_err(|e| e.to_string())?;
    Ok(hash)
}
