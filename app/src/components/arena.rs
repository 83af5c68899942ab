use dioxus::prelude::*;
use futures::StreamExt;
use sapiens_api::prelude::*;

use crate::components::LoadingIndicator;
use crate::hooks::{use_boss, use_session_store, wait_for_receipt, BossAction};
use crate::wallet;
use crate::{contract_address, RPC_URL};

#[derive(Clone)]
enum ArenaAction {
    Attack,
}

/// The battle screen: boss card, the player's character card, and the
/// attack button. The attack coroutine owns the three-valued interaction
/// state; re-fetching the boss after a settled attack is this view's
/// responsibility, not the handler's.
#[component]
pub fn Arena() -> Element {
    let store = use_session_store();
    let (boss, boss_coro) = use_boss();
    let mut tracker = use_signal(AttackTracker::default);

    let arena_coro = use_coroutine(move |mut rx: UnboundedReceiver<ArenaAction>| async move {
        let provider = EthProvider::new(RPC_URL);
        let contract = GameContract::new(contract_address());

        while let Some(ArenaAction::Attack) = rx.next().await {
            // no signing capability: silent no-op
            if !wallet::capability_present() {
                tracing::info!("No wallet capability; attack ignored");
                continue;
            }
            let Some(address) = store.read().session.address().copied() else {
                continue;
            };
            // one attack in flight at a time
            if !tracker.write().try_begin() {
                continue;
            }

            tracing::info!("Attacking boss...");
            match run_attack(&provider, &contract, &address).await {
                Ok(hash) => {
                    tracker.write().settle();
                    tracing::info!("Attack settled: {hash}");
                    boss_coro.send(BossAction::Fetch);
                }
                Err(e) => {
                    tracing::error!("Error attacking boss: {e}");
                    tracker.write().fail();
                }
            }
        }
    });

    let phase = tracker.read().phase();
    let attack_class = phase.css_class();

    let boss_snapshot = boss.read().boss.clone();
    let character = store.read().session.character().cloned();

    // The boss card only renders once the first snapshot arrives.
    let boss_card = match boss_snapshot {
        Some(boss) => rsx! {
            div { class: "card text-center {attack_class}",
                h2 { class: "text-2xl font-bold text-red-400 mb-4", "🔥 {boss.name} 🔥" }
                img { class: "w-full rounded mb-4", src: "{boss.image_uri}", alt: "{boss.name}" }
                div { class: "mb-4",
                    progress {
                        class: "w-full",
                        value: "{boss.hp}",
                        max: "{boss.max_hp}",
                    }
                    p { class: "text-sm text-gray-300", "{boss.hp} / {boss.max_hp} HP" }
                }
                button {
                    class: "btn btn-primary w-full",
                    // clicks while an attack is in flight are no-ops
                    onclick: move |_| {
                        if !tracker.read().is_attacking() {
                            arena_coro.send(ArenaAction::Attack);
                        }
                    },
                    "💥 Attack {boss.name}"
                }
                if phase == AttackPhase::Attacking {
                    div { class: "mt-4",
                        LoadingIndicator {}
                        p { class: "text-gray-400", "Attacking ⚔️" }
                    }
                }
            }
        },
        None => rsx! {},
    };

    let player_card = match character {
        Some(character) => rsx! {
            div { class: "card text-center",
                h2 { class: "text-xl font-semibold mb-2", "Your Character" }
                h3 { class: "text-2xl font-bold text-gold mb-4", "{character.name}" }
                img {
                    class: "w-full rounded mb-4",
                    src: "{character.image_uri}",
                    alt: "{character.name}",
                }
                div { class: "mb-4",
                    progress {
                        class: "w-full",
                        value: "{character.hp}",
                        max: "{character.max_hp}",
                    }
                    p { class: "text-sm text-gray-300", "{character.hp} / {character.max_hp} HP" }
                }
                p { class: "text-gray-300", "⚔️ Attack Damage: {character.attack_damage}" }
            }
        },
        None => rsx! {},
    };

    rsx! {
        div { class: "grid md:grid-cols-2 gap-8",
            {boss_card}
            {player_card}
        }
    }
}

async fn run_attack(
    provider: &EthProvider,
    contract: &GameContract,
    from: &Address,
) -> Result<String, String> {
    let hash = wallet::send_transaction(from, contract.address(), &contract.attack_calldata())
        .await?;
    wait_for_receipt(provider, &hash)
        .await
        .map_err(|e| e.to_string())?;
    Ok(hash)
}
