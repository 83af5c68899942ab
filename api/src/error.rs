use thiserror::Error;

/// Failures surfaced by the JSON-RPC provider and the contract binding.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("rpc response carried neither result nor error")]
    EmptyResponse,

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("transaction {0} reverted")]
    Reverted(String),

    #[error("transaction {hash} not settled after {polls} polls")]
    SettlementTimeout { hash: String, polls: u32 },

    #[error("node exposes no unlocked accounts")]
    NoAccounts,

    #[error("malformed address in rpc response: {0}")]
    InvalidAddress(String),
}

/// Failures while encoding or decoding 32-byte-word call data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("invalid hex payload: {0}")]
    InvalidHex(String),

    #[error("return data truncated at byte {0}")]
    Truncated(usize),

    #[error("uint value does not fit in 64 bits")]
    UintOverflow,

    #[error("string payload is not valid utf-8")]
    InvalidUtf8,
}
