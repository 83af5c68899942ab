use dioxus::prelude::*;
use sapiens_api::prelude::*;

use crate::components::{Arena, LoadingIndicator, SelectCharacter};
use crate::hooks::{use_session_store, SessionAction};

/// The single page of the client. Renders exactly one screen, chosen by
/// the pure selector over the session state and the loading flag.
#[component]
pub fn Game() -> Element {
    let store = use_session_store();

    let store_read = store.read();
    let screen = select_screen(store_read.loading, &store_read.session);
    drop(store_read);

    match screen {
        Screen::Loading => rsx! { LoadingIndicator {} },
        Screen::ConnectWallet => rsx! { ConnectWalletScreen {} },
        Screen::SelectCharacter => rsx! { SelectCharacter {} },
        Screen::Arena => rsx! { Arena {} },
    }
}

#[component]
fn ConnectWalletScreen() -> Element {
    let session = use_coroutine_handle::<SessionAction>();

    rsx! {
        div { class: "max-w-xl mx-auto text-center py-16",
            video {
                class: "rounded mb-8 mx-auto",
                width: "320",
                height: "240",
                autoplay: true,
                source { src: "https://i.imgur.com/MfuSeoA.mp4", r#type: "video/mp4" }
            }
            button {
                class: "btn btn-primary text-lg px-8 py-3",
                onclick: move |_| session.send(SessionAction::Connect),
                "Connect Wallet To Get Started"
            }
        }
    }
}
