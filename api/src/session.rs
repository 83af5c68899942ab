//! Wallet session as an explicit reducer.
//!
//! The app holds one `Session` value and funnels every change through
//! `apply`, so transitions are deterministic and testable without a
//! browser. There is no disconnect event: once an address is known it is
//! only ever refreshed, and once a character is known it is only ever
//! replaced.

use crate::model::{Address, CharacterSnapshot};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Session {
    /// No wallet address known.
    #[default]
    Disconnected,
    /// Wallet address known, no character snapshot held.
    Connected { address: Address },
    /// Wallet address known and character snapshot held.
    Playing {
        address: Address,
        character: CharacterSnapshot,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// An authorized account surfaced, passively or via explicit connect.
    WalletDiscovered(Address),
    /// The ownership query returned a character for the current address.
    CharacterFound(CharacterSnapshot),
    /// The ownership query returned nothing.
    CharacterMissing,
}

impl Session {
    pub fn apply(self, event: SessionEvent) -> Session {
        match (self, event) {
            (Session::Disconnected, SessionEvent::WalletDiscovered(address)) => {
                Session::Connected { address }
            }
            (Session::Connected { .. }, SessionEvent::WalletDiscovered(address)) => {
                Session::Connected { address }
            }
            (Session::Playing { character, .. }, SessionEvent::WalletDiscovered(address)) => {
                Session::Playing { address, character }
            }
            (Session::Connected { address }, SessionEvent::CharacterFound(character)) => {
                Session::Playing { address, character }
            }
            (Session::Playing { address, .. }, SessionEvent::CharacterFound(character)) => {
                Session::Playing { address, character }
            }
            // A character with no address to attach it to is dropped, and
            // an empty ownership read never un-knows a character.
            (state, SessionEvent::CharacterFound(_)) => state,
            (state, SessionEvent::CharacterMissing) => state,
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Session::Disconnected => None,
            Session::Connected { address } => Some(address),
            Session::Playing { address, .. } => Some(address),
        }
    }

    pub fn character(&self) -> Option<&CharacterSnapshot> {
        match self {
            Session::Playing { character, .. } => Some(character),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn addr(tag: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = tag;
        Address::new(bytes)
    }

    fn xander() -> CharacterSnapshot {
        CharacterSnapshot {
            name: "Xander".into(),
            image_uri: "ipfs://xander".into(),
            hp: 300,
            max_hp: 300,
            attack_damage: 200,
        }
    }

    #[test]
    fn discovery_connects() {
        let session = Session::Disconnected.apply(SessionEvent::WalletDiscovered(addr(1)));
        assert_eq!(session.address(), Some(&addr(1)));
        assert_eq!(session.character(), None);
    }

    #[test]
    fn character_fetch_enters_playing() {
        let session = Session::Disconnected
            .apply(SessionEvent::WalletDiscovered(
                Address::from_str("0x0000000000000000000000000000000000000abc").unwrap(),
            ))
            .apply(SessionEvent::CharacterFound(xander()));
        assert_eq!(session.character().map(|c| c.name.as_str()), Some("Xander"));
        assert_eq!(session.character().map(|c| (c.hp, c.max_hp)), Some((300, 300)));
    }

    #[test]
    fn missing_character_leaves_connected() {
        let connected = Session::Disconnected.apply(SessionEvent::WalletDiscovered(addr(1)));
        let after = connected.clone().apply(SessionEvent::CharacterMissing);
        assert_eq!(after, connected);
    }

    #[test]
    fn character_is_never_unknown_without_replacement() {
        let playing = Session::Disconnected
            .apply(SessionEvent::WalletDiscovered(addr(1)))
            .apply(SessionEvent::CharacterFound(xander()));

        // no event sequence regresses to Disconnected
        let after = playing
            .clone()
            .apply(SessionEvent::CharacterMissing)
            .apply(SessionEvent::WalletDiscovered(addr(1)))
            .apply(SessionEvent::CharacterMissing);
        assert_eq!(after.character(), playing.character());
        assert!(after.address().is_some());
    }

    #[test]
    fn refetched_character_replaces_snapshot() {
        let mut hurt = xander();
        hurt.hp = 250;
        let session = Session::Disconnected
            .apply(SessionEvent::WalletDiscovered(addr(1)))
            .apply(SessionEvent::CharacterFound(xander()))
            .apply(SessionEvent::CharacterFound(hurt.clone()));
        assert_eq!(session.character(), Some(&hurt));
    }

    #[test]
    fn character_without_address_is_dropped() {
        let session = Session::Disconnected.apply(SessionEvent::CharacterFound(xander()));
        assert_eq!(session, Session::Disconnected);
    }
}
