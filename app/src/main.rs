#![allow(non_snake_case)]

mod components;
mod hooks;
mod pages;
mod route;
mod wallet;

use dioxus::prelude::*;
use route::Route;
use sapiens_api::prelude::*;

// Configuration
pub const CONTRACT_ADDRESS: &str = "0x35c34a2f22468201ce552fafd2a0c5dc42bbbd12";
pub const RPC_URL: &str = "https://rpc.sepolia.org";

pub fn contract_address() -> Address {
    CONTRACT_ADDRESS.parse().unwrap_or_default()
}

fn main() {
    #[cfg(feature = "web")]
    {
        tracing_wasm::set_as_global_default();
        dioxus::launch(App);
    }

    #[cfg(feature = "desktop")]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    // Global state providers
    use_context_provider(|| Signal::new(SessionStore::default()));
    use_context_provider(|| Signal::new(BossState::default()));

    // Session coroutine lives above the router so every component can
    // reach it; it runs the passive wallet discovery pass on startup.
    hooks::provide_session();

    rsx! {
        Router::<Route> {}
    }
}

// Global state types
#[derive(Clone, Debug)]
pub struct SessionStore {
    pub session: Session,
    pub loading: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            session: Session::default(),
            // progress indicator until the startup discovery pass settles
            loading: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BossState {
    pub boss: Option<BossSnapshot>,
}
