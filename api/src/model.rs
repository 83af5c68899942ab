use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 20-byte account address, displayed as 0x-prefixed hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid address: {0}")]
pub struct AddressParseError(String);

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| AddressParseError(s.to_string()))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressParseError(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Read-only mirror of the character NFT owned by the connected wallet.
/// Created remotely on mint and mutated only by remote attack resolution;
/// the client re-fetches instead of computing hp deltas itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub name: String,
    pub image_uri: String,
    pub hp: u64,
    pub max_hp: u64,
    pub attack_damage: u64,
}

impl CharacterSnapshot {
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }
}

/// Read-only mirror of the single shared boss. Re-fetched after every
/// settled attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossSnapshot {
    pub name: String,
    pub image_uri: String,
    pub hp: u64,
    pub max_hp: u64,
    pub attack_damage: u64,
}

impl BossSnapshot {
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

/// A mintable character archetype. The deploy tool pushes these as
/// constructor arguments; the app renders the same catalog on the
/// character-selection screen, so both sides agree by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterTemplate {
    pub name: &'static str,
    pub class: &'static str,
    pub image_uri: &'static str,
    pub hp: u64,
    pub attack_damage: u64,
}

pub const CHARACTER_TEMPLATES: [CharacterTemplate; 4] = [
    CharacterTemplate {
        name: "Xander",
        class: "Warrior",
        image_uri: "https://images.outlookindia.com/public/uploads/newsimages/Alien_630_630.jpg",
        hp: 300,
        attack_damage: 200,
    },
    CharacterTemplate {
        name: "Amora",
        class: "Healer",
        image_uri: "https://i.pinimg.com/originals/5b/2a/5e/5b2a5e9d95549f531efde702ac50b857.jpg",
        hp: 200,
        attack_damage: 120,
    },
    CharacterTemplate {
        name: "Morpheus",
        class: "Shapeshifter",
        image_uri:
            "https://topicimages.mrowl.com/large/joshbwilliams/aliens_ufos/allegedextrate/alienhumanhybr_1.jpg",
        hp: 260,
        attack_damage: 150,
    },
    CharacterTemplate {
        name: "Pythora",
        class: "Reptile",
        image_uri:
            "https://3.bp.blogspot.com/-myLieYsD-qc/Tnsx6vezozI/AAAAAAAACXs/aGZ6cVIlW10/s1600/hybrid1.jpg",
        hp: 220,
        attack_damage: 140,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossTemplate {
    pub name: &'static str,
    pub image_uri: &'static str,
    pub hp: u64,
    pub attack_damage: u64,
}

pub const BOSS_TEMPLATE: BossTemplate = BossTemplate {
    name: "Triton",
    image_uri: "https://i.imgur.com/MfuSeoA.mp4",
    hp: 1000,
    attack_damage: 50,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_roundtrip() {
        let s = "0x00000000000000000000000000000000deadbeef";
        let address = Address::from_str(s).unwrap();
        assert_eq!(address.to_string(), s);
    }

    #[test]
    fn address_accepts_unprefixed_hex() {
        let address = Address::from_str("00000000000000000000000000000000deadbeef").unwrap();
        assert_eq!(address.as_bytes()[16..], [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn address_rejects_wrong_length() {
        assert!(Address::from_str("0xdeadbeef").is_err());
        assert!(Address::from_str("not hex").is_err());
    }
}
