use dioxus::prelude::*;

use crate::components::WalletButton;
use crate::route::Route;

#[component]
pub fn Layout() -> Element {
    rsx! {
        div { class: "min-h-screen",
            style: "background-color: var(--surface-base);",
            // Navigation
            nav { class: "border-b elevated-border backdrop-blur sticky top-0 z-50",
                style: "background-color: var(--surface-base);",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8",
                    div { class: "flex justify-between h-16",
                        div { class: "flex items-center",
                            span { class: "text-2xl font-bold text-gold", "⚔️ MetaSapiens ⚔️" }
                        }
                        div { class: "flex items-center",
                            WalletButton {}
                        }
                    }
                }
            }

            // Main content
            main { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8",
                p { class: "text-center text-xl text-gray-400 mb-8",
                    "Team up to protect the Metaverse!"
                }
                Outlet::<Route> {}
            }

            // Footer
            footer { class: "border-t elevated-border py-8 mt-auto",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 text-center text-low",
                    p { "MetaSapiens - NFT Boss Battle" }
                    p { class: "text-sm mt-2",
                        "Contract: "
                        code { class: "text-gold", "{crate::CONTRACT_ADDRESS}" }
                    }
                }
            }
        }
    }
}
