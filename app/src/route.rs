use dioxus::prelude::*;

use crate::components::Layout;
use crate::pages::Game;

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Game {},
}
