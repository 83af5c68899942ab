//! Pure mapping from session state to the screen to render.

use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Loading,
    ConnectWallet,
    SelectCharacter,
    Arena,
}

/// Exactly one screen per state; the loading flag short-circuits the rest.
pub fn select_screen(loading: bool, session: &Session) -> Screen {
    if loading {
        return Screen::Loading;
    }
    match session {
        Session::Disconnected => Screen::ConnectWallet,
        Session::Connected { .. } => Screen::SelectCharacter,
        Session::Playing { .. } => Screen::Arena,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, CharacterSnapshot};

    fn playing() -> Session {
        Session::Playing {
            address: Address::default(),
            character: CharacterSnapshot {
                name: "Xander".into(),
                image_uri: "ipfs://xander".into(),
                hp: 300,
                max_hp: 300,
                attack_damage: 200,
            },
        }
    }

    #[test]
    fn loading_short_circuits_every_state() {
        assert_eq!(select_screen(true, &Session::Disconnected), Screen::Loading);
        assert_eq!(
            select_screen(
                true,
                &Session::Connected {
                    address: Address::default()
                }
            ),
            Screen::Loading
        );
        assert_eq!(select_screen(true, &playing()), Screen::Loading);
    }

    #[test]
    fn one_screen_per_session_state() {
        assert_eq!(
            select_screen(false, &Session::Disconnected),
            Screen::ConnectWallet
        );
        assert_eq!(
            select_screen(
                false,
                &Session::Connected {
                    address: Address::default()
                }
            ),
            Screen::SelectCharacter
        );
        assert_eq!(select_screen(false, &playing()), Screen::Arena);
    }

    #[test]
    fn output_depends_only_on_inputs() {
        let session = playing();
        let first = select_screen(false, &session);
        // interleave unrelated evaluations; same inputs, same output
        let _ = select_screen(true, &Session::Disconnected);
        let _ = select_screen(false, &Session::Disconnected);
        assert_eq!(select_screen(false, &session), first);
    }
}
