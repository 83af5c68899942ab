//! Typed binding for the game contract's five entry points.

use crate::abi::{self, Reader, Token, WORD};
use crate::error::{AbiError, Error};
use crate::model::{Address, BossSnapshot, CharacterSnapshot, BOSS_TEMPLATE, CHARACTER_TEMPLATES};
use crate::rpc::EthProvider;

const SIG_CHECK_NFT: &str = "checkIfUserHasNFT()";
const SIG_GET_BOSS: &str = "getBigBoss()";
const SIG_TOKEN_URI: &str = "tokenURI(uint256)";
const SIG_MINT: &str = "mintSapienNFT(uint256)";
const SIG_ATTACK: &str = "attackBoss()";

/// Local proxy translating method calls into remote contract invocations.
/// Reads resolve through a borrowed provider; writes are handed back as
/// calldata for whichever signer the caller has (browser wallet or dev
/// node).
#[derive(Clone, Debug)]
pub struct GameContract {
    address: Address,
}

impl GameContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn mint_calldata(&self, template_index: u64) -> Vec<u8> {
        abi::encode_call(SIG_MINT, &[Token::Uint(template_index)])
    }

    pub fn attack_calldata(&self) -> Vec<u8> {
        abi::encode_call(SIG_ATTACK, &[])
    }

    /// Constructor argument block for the deploy transaction: the template
    /// catalog as parallel arrays, then the boss template. Appended to the
    /// creation bytecode by the deploy tool.
    pub fn constructor_args() -> Vec<u8> {
        let names = CHARACTER_TEMPLATES.iter().map(|t| t.name.to_string());
        let classes = CHARACTER_TEMPLATES.iter().map(|t| t.class.to_string());
        let images = CHARACTER_TEMPLATES.iter().map(|t| t.image_uri.to_string());
        let hp = CHARACTER_TEMPLATES.iter().map(|t| t.hp);
        let damage = CHARACTER_TEMPLATES.iter().map(|t| t.attack_damage);
        abi::encode(&[
            Token::StrArray(names.collect()),
            Token::StrArray(classes.collect()),
            Token::StrArray(images.collect()),
            Token::UintArray(hp.collect()),
            Token::UintArray(damage.collect()),
            Token::Str(BOSS_TEMPLATE.name.to_string()),
            Token::Str(BOSS_TEMPLATE.image_uri.to_string()),
            Token::Uint(BOSS_TEMPLATE.hp),
            Token::Uint(BOSS_TEMPLATE.attack_damage),
        ])
    }

    /// Does `owner` hold a character NFT? The contract answers for the
    /// caller, so the query goes out with `from` set to the owner.
    pub async fn character_of(
        &self,
        provider: &EthProvider,
        owner: &Address,
    ) -> Result<Option<CharacterSnapshot>, Error> {
        let calldata = abi::encode_call(SIG_CHECK_NFT, &[]);
        let data = provider.call(&self.address, Some(owner), &calldata).await?;
        Ok(decode_character(&data)?)
    }

    pub async fn big_boss(&self, provider: &EthProvider) -> Result<BossSnapshot, Error> {
        let calldata = abi::encode_call(SIG_GET_BOSS, &[]);
        let data = provider.call(&self.address, None, &calldata).await?;
        Ok(decode_boss(&data)?)
    }

    pub async fn token_uri(
        &self,
        provider: &EthProvider,
        token_id: u64,
    ) -> Result<String, Error> {
        let calldata = abi::encode_call(SIG_TOKEN_URI, &[Token::Uint(token_id)]);
        let data = provider.call(&self.address, None, &calldata).await?;
        Ok(decode_string(&data)?)
    }
}

// Return layout: one head word pointing at the attributes tuple
// (uint256 index, string name, string imageURI, uint256 hp,
// uint256 maxHp, uint256 attackDamage). String offsets are relative to the
// tuple base. An empty name means the caller owns no character.
fn decode_character(data: &[u8]) -> Result<Option<CharacterSnapshot>, AbiError> {
    let reader = Reader::new(data);
    let tuple = reader.at(reader.offset_at(0)?)?;
    let name = tuple.string_at(tuple.offset_at(WORD)?)?;
    if name.is_empty() {
        return Ok(None);
    }
    Ok(Some(CharacterSnapshot {
        name,
        image_uri: tuple.string_at(tuple.offset_at(2 * WORD)?)?,
        hp: tuple.uint_at(3 * WORD)?,
        max_hp: tuple.uint_at(4 * WORD)?,
        attack_damage: tuple.uint_at(5 * WORD)?,
    }))
}

// Boss tuple: (string name, string imageURI, uint256 hp, uint256 maxHp,
// uint256 attackDamage).
fn decode_boss(data: &[u8]) -> Result<BossSnapshot, AbiError> {
    let reader = Reader::new(data);
    let tuple = reader.at(reader.offset_at(0)?)?;
    Ok(BossSnapshot {
        name: tuple.string_at(tuple.offset_at(0)?)?,
        image_uri: tuple.string_at(tuple.offset_at(WORD)?)?,
        hp: tuple.uint_at(2 * WORD)?,
        max_hp: tuple.uint_at(3 * WORD)?,
        attack_damage: tuple.uint_at(4 * WORD)?,
    })
}

fn decode_string(data: &[u8]) -> Result<String, AbiError> {
    let reader = Reader::new(data);
    reader.string_at(reader.offset_at(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: u64) -> [u8; WORD] {
        let mut out = [0u8; WORD];
        out[WORD - 8..].copy_from_slice(&value.to_be_bytes());
        out
    }

    fn string_tail(s: &str) -> Vec<u8> {
        let mut out = word(s.len() as u64).to_vec();
        out.extend(s.as_bytes());
        let rem = out.len() % WORD;
        if rem != 0 {
            out.resize(out.len() + WORD - rem, 0);
        }
        out
    }

    // Lay out the character return blob by hand, independent of the
    // encoder under api::abi.
    fn character_blob(name: &str, uri: &str, hp: u64, max_hp: u64, damage: u64) -> Vec<u8> {
        let mut data = word(WORD as u64).to_vec(); // head: tuple at 0x20
        let name_tail = string_tail(name);
        data.extend(word(0)); // characterIndex
        data.extend(word(6 * WORD as u64)); // name offset
        data.extend(word((6 * WORD + name_tail.len()) as u64)); // imageURI offset
        data.extend(word(hp));
        data.extend(word(max_hp));
        data.extend(word(damage));
        data.extend(&name_tail);
        data.extend(string_tail(uri));
        data
    }

    #[test]
    fn decodes_owned_character() {
        let data = character_blob("Xander", "ipfs://xander", 300, 300, 200);
        let character = decode_character(&data).unwrap().unwrap();
        assert_eq!(character.name, "Xander");
        assert_eq!(character.image_uri, "ipfs://xander");
        assert_eq!(character.hp, 300);
        assert_eq!(character.max_hp, 300);
        assert_eq!(character.attack_damage, 200);
        assert!(!character.is_fainted());
    }

    #[test]
    fn empty_name_means_no_character() {
        let data = character_blob("", "", 0, 0, 0);
        assert_eq!(decode_character(&data).unwrap(), None);
    }

    #[test]
    fn decodes_boss() {
        let mut data = word(WORD as u64).to_vec();
        let name_tail = string_tail("Triton");
        data.extend(word(5 * WORD as u64)); // name offset
        data.extend(word((5 * WORD + name_tail.len()) as u64)); // imageURI offset
        data.extend(word(950));
        data.extend(word(1000));
        data.extend(word(50));
        data.extend(&name_tail);
        data.extend(string_tail("https://i.imgur.com/MfuSeoA.mp4"));

        let boss = decode_boss(&data).unwrap();
        assert_eq!(boss.name, "Triton");
        assert_eq!(boss.hp, 950);
        assert_eq!(boss.max_hp, 1000);
        assert_eq!(boss.attack_damage, 50);
        assert!(!boss.is_defeated());
    }

    #[test]
    fn decodes_token_uri() {
        let mut data = word(WORD as u64).to_vec();
        data.extend(string_tail("data:application/json;base64,eyJ9"));
        assert_eq!(
            decode_string(&data).unwrap(),
            "data:application/json;base64,eyJ9"
        );
    }

    #[test]
    fn truncated_return_data_is_rejected() {
        let data = word(WORD as u64).to_vec(); // head only, no tuple
        assert!(decode_character(&data).is_err());
        assert!(decode_boss(&data).is_err());
    }

    #[test]
    fn mint_calldata_shape() {
        let contract = GameContract::new(Address::default());
        let data = contract.mint_calldata(3);
        assert_eq!(data.len(), 4 + WORD);
        assert_eq!(data[..4], abi::selector("mintSapienNFT(uint256)"));
        assert_eq!(data[4 + WORD - 1], 3);
    }

    #[test]
    fn attack_calldata_is_bare_selector() {
        let contract = GameContract::new(Address::default());
        assert_eq!(
            contract.attack_calldata(),
            abi::selector("attackBoss()").to_vec()
        );
    }

    #[test]
    fn constructor_args_carry_the_full_catalog() {
        let data = GameContract::constructor_args();
        let reader = Reader::new(&data);

        // nine parameters: five dynamic heads, then the boss
        let names = reader.at(reader.offset_at(0).unwrap()).unwrap();
        assert_eq!(names.uint_at(0).unwrap(), CHARACTER_TEMPLATES.len() as u64);
        let elements = names.at(WORD).unwrap();
        let first = elements.offset_at(0).unwrap();
        assert_eq!(elements.string_at(first).unwrap(), "Xander");

        let hp = reader.at(reader.offset_at(3 * WORD).unwrap()).unwrap();
        assert_eq!(hp.uint_at(WORD).unwrap(), 300);

        let boss_name = reader.at(reader.offset_at(5 * WORD).unwrap()).unwrap();
        assert_eq!(boss_name.uint_at(0).unwrap(), "Triton".len() as u64);
        assert_eq!(reader.uint_at(7 * WORD).unwrap(), BOSS_TEMPLATE.hp);
        assert_eq!(reader.uint_at(8 * WORD).unwrap(), BOSS_TEMPLATE.attack_damage);
    }
}
