use dioxus::prelude::*;

use crate::hooks::{use_session_store, SessionAction};

#[component]
pub fn WalletButton() -> Element {
    let store = use_session_store();
    let session = use_coroutine_handle::<SessionAction>();

    let connect_wallet = move |_| {
        session.send(SessionAction::Connect);
    };

    let store_read = store.read();

    // There is no disconnect path: once connected the button just shows
    // the address.
    if let Some(address) = store_read.session.address() {
        let address = address.to_string();
        let short_address = format!("{}...{}", &address[..6], &address[address.len() - 4..]);

        rsx! {
            span { class: "text-sm text-gray-400 font-mono", "{short_address}" }
        }
    } else {
        rsx! {
            button {
                class: "btn btn-primary",
                onclick: connect_wallet,
                "Connect Wallet"
            }
        }
    }
}
