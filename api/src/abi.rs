//! Hand-rolled 32-byte-word call encoding for the game contract.
//!
//! The binding consumes five fixed entry points, so there is no runtime ABI
//! interpretation here: selectors are derived from the Solidity signatures
//! and argument blocks are laid out directly. The artifact's ABI JSON is
//! carried by the deploy tool as an opaque blob and never parsed.

use sha3::{Digest, Keccak256};

use crate::error::AbiError;

pub const WORD: usize = 32;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of the Keccak-256 of the canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex(payload: &str) -> Result<Vec<u8>, AbiError> {
    let stripped = payload.strip_prefix("0x").unwrap_or(payload);
    hex::decode(stripped).map_err(|_| AbiError::InvalidHex(payload.to_string()))
}

/// Parse a JSON-RPC quantity ("0x1", "0x4a2") into a u64.
pub fn from_hex_quantity(payload: &str) -> Result<u64, AbiError> {
    let stripped = payload.strip_prefix("0x").unwrap_or(payload);
    u64::from_str_radix(stripped, 16).map_err(|_| AbiError::InvalidHex(payload.to_string()))
}

fn uint_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn padded(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    let rem = out.len() % WORD;
    if rem != 0 {
        out.resize(out.len() + WORD - rem, 0);
    }
    out
}

/// One argument in a call or constructor block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Uint(u64),
    Str(String),
    UintArray(Vec<u64>),
    StrArray(Vec<String>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        !matches!(self, Token::Uint(_))
    }

    // Tail layout per the Solidity ABI: strings are length + padded bytes,
    // arrays are length + an inner head/tail block whose offsets are
    // relative to the word right after the length.
    fn tail(&self) -> Vec<u8> {
        match self {
            Token::Uint(_) => Vec::new(),
            Token::Str(s) => {
                let mut out = uint_word(s.len() as u64).to_vec();
                out.extend(padded(s.as_bytes()));
                out
            }
            Token::UintArray(values) => {
                let mut out = uint_word(values.len() as u64).to_vec();
                for value in values {
                    out.extend(uint_word(*value));
                }
                out
            }
            Token::StrArray(strings) => {
                let elements: Vec<Token> =
                    strings.iter().map(|s| Token::Str(s.clone())).collect();
                let mut out = uint_word(strings.len() as u64).to_vec();
                out.extend(encode(&elements));
                out
            }
        }
    }
}

/// Encode an argument block: one head word per token (value for static
/// tokens, offset into the tail section for dynamic ones), tails appended
/// in order.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut heads = Vec::with_capacity(head_len);
    let mut tails = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            heads.extend(uint_word((head_len + tails.len()) as u64));
            tails.extend(token.tail());
        } else if let Token::Uint(value) = token {
            heads.extend(uint_word(*value));
        }
    }
    heads.extend(tails);
    heads
}

/// Selector plus encoded arguments.
pub fn encode_call(signature: &str, tokens: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend(encode(tokens));
    out
}

/// Bounds-checked word reader over returned call data.
///
/// Offsets inside tuples and arrays are relative to the enclosing block, so
/// `at` rebases the reader instead of tracking positions by hand.
#[derive(Clone, Copy)]
pub struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], AbiError> {
        let end = offset.checked_add(len).ok_or(AbiError::Truncated(offset))?;
        self.data.get(offset..end).ok_or(AbiError::Truncated(offset))
    }

    /// Rebase on the block starting at `offset`.
    pub fn at(&self, offset: usize) -> Result<Reader<'a>, AbiError> {
        Ok(Reader {
            data: self.data.get(offset..).ok_or(AbiError::Truncated(offset))?,
        })
    }

    /// Read a uint word. Values beyond 64 bits are rejected rather than
    /// silently wrapped.
    pub fn uint_at(&self, offset: usize) -> Result<u64, AbiError> {
        let word = self.slice(offset, WORD)?;
        if word[..WORD - 8].iter().any(|&b| b != 0) {
            return Err(AbiError::UintOverflow);
        }
        Ok(u64::from_be_bytes(word[WORD - 8..].try_into().unwrap()))
    }

    /// Read a head word holding an offset into this block.
    pub fn offset_at(&self, offset: usize) -> Result<usize, AbiError> {
        let value = self.uint_at(offset)?;
        usize::try_from(value).map_err(|_| AbiError::UintOverflow)
    }

    /// Read a string whose length word sits at `offset`.
    pub fn string_at(&self, offset: usize) -> Result<String, AbiError> {
        let len = self.offset_at(offset)?;
        let bytes = self.slice(offset + WORD, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn selector_matches_known_signatures() {
        assert_eq!(hex::encode(selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
    }

    #[test]
    fn encode_static_uint() {
        let data = encode(&[Token::Uint(3)]);
        assert_eq!(data.len(), WORD);
        assert_eq!(data[WORD - 1], 3);
        assert!(data[..WORD - 1].iter().all(|&b| b == 0));
    }

    #[test]
    fn encode_uint_then_string() {
        let data = encode(&[Token::Uint(5), Token::Str("Xander".into())]);
        // head 0: value, head 1: offset to the tail (0x40)
        let reader = Reader::new(&data);
        assert_eq!(reader.uint_at(0).unwrap(), 5);
        assert_eq!(reader.offset_at(WORD).unwrap(), 2 * WORD);
        assert_eq!(reader.string_at(2 * WORD).unwrap(), "Xander");
        // "Xander" pads to one word
        assert_eq!(data.len(), 4 * WORD);
    }

    #[test]
    fn encode_string_array_offsets() {
        let data = encode(&[
            Token::StrArray(vec!["ab".into(), "cd".into()]),
            Token::Uint(7),
        ]);
        let reader = Reader::new(&data);
        let array_base = reader.offset_at(0).unwrap();
        assert_eq!(array_base, 2 * WORD);
        assert_eq!(reader.uint_at(WORD).unwrap(), 7);

        let array = reader.at(array_base).unwrap();
        assert_eq!(array.uint_at(0).unwrap(), 2);
        // element offsets are relative to the word after the length
        let elements = array.at(WORD).unwrap();
        let first = elements.offset_at(0).unwrap();
        let second = elements.offset_at(WORD).unwrap();
        assert_eq!(elements.string_at(first).unwrap(), "ab");
        assert_eq!(elements.string_at(second).unwrap(), "cd");
    }

    #[test]
    fn encode_uint_array() {
        let data = encode(&[Token::UintArray(vec![300, 200])]);
        let reader = Reader::new(&data);
        let base = reader.offset_at(0).unwrap();
        let array = reader.at(base).unwrap();
        assert_eq!(array.uint_at(0).unwrap(), 2);
        assert_eq!(array.uint_at(WORD).unwrap(), 300);
        assert_eq!(array.uint_at(2 * WORD).unwrap(), 200);
    }

    #[test]
    fn encode_call_prepends_selector() {
        let data = encode_call("tokenURI(uint256)", &[Token::Uint(1)]);
        assert_eq!(data.len(), 4 + WORD);
        assert_eq!(data[..4], selector("tokenURI(uint256)"));
        assert_eq!(data[4 + WORD - 1], 1);
    }

    #[test]
    fn reader_rejects_truncated_data() {
        let reader = Reader::new(&[0u8; 16]);
        assert_eq!(reader.uint_at(0), Err(AbiError::Truncated(0)));
    }

    #[test]
    fn reader_rejects_wide_uints() {
        let mut word = [0u8; WORD];
        word[0] = 1;
        let reader = Reader::new(&word);
        assert_eq!(reader.uint_at(0), Err(AbiError::UintOverflow));
    }

    #[test]
    fn hex_quantity_parsing() {
        assert_eq!(from_hex_quantity("0x1").unwrap(), 1);
        assert_eq!(from_hex_quantity("0x4a2").unwrap(), 0x4a2);
        assert!(from_hex_quantity("0xzz").is_err());
    }
}
