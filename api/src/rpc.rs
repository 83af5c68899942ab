use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::abi;
use crate::error::Error;
use crate::model::Address;

#[derive(Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Vec<Value>,
}

#[derive(Deserialize, Debug)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Deserialize, Debug)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Settlement record for a submitted transaction. `status` is "0x1" on
/// success, "0x0" on revert; `contract_address` is set for deployments.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status
            .as_deref()
            .and_then(|s| abi::from_hex_quantity(s).ok())
            == Some(1)
    }
}

/// JSON-RPC handle to one chain endpoint. Reads go through `eth_call`;
/// `eth_sendTransaction` is only meaningful against a node that manages the
/// sending account (the deploy tool's dev node) — browser-side writes are
/// signed by the wallet instead.
#[derive(Clone)]
pub struct EthProvider {
    url: String,
    client: reqwest::Client,
}

impl EthProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn raw<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<RpcResponse<T>, Error> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response = self.client.post(&self.url).json(&request).send().await?;
        Ok(response.json().await?)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<T, Error> {
        let response = self.raw(method, params).await?;
        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response.result.ok_or(Error::EmptyResponse)
    }

    /// Read-only contract query. `from` matters for caller-sensitive
    /// queries like the character-ownership check.
    pub async fn call(
        &self,
        to: &Address,
        from: Option<&Address>,
        data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let mut call = json!({
            "to": to.to_string(),
            "data": abi::to_hex(data),
        });
        if let Some(from) = from {
            call["from"] = json!(from.to_string());
        }
        let payload: String = self.request("eth_call", vec![call, json!("latest")]).await?;
        Ok(abi::from_hex(&payload)?)
    }

    /// Submit a node-signed transaction. `to` is absent for deployments.
    pub async fn send_transaction(
        &self,
        from: &Address,
        to: Option<&Address>,
        data: &[u8],
    ) -> Result<String, Error> {
        let mut tx = json!({
            "from": from.to_string(),
            "data": abi::to_hex(data),
        });
        if let Some(to) = to {
            tx["to"] = json!(to.to_string());
        }
        self.request("eth_sendTransaction", vec![tx]).await
    }

    /// Accounts the node itself can sign for.
    pub async fn accounts(&self) -> Result<Vec<Address>, Error> {
        let accounts: Vec<String> = self.request("eth_accounts", vec![]).await?;
        accounts
            .iter()
            .map(|s| s.parse().map_err(|_| Error::InvalidAddress(s.clone())))
            .collect()
    }

    /// None until the transaction is mined.
    pub async fn transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionReceipt>, Error> {
        let response: RpcResponse<TransactionReceipt> = self
            .raw("eth_getTransactionReceipt", vec![json!(hash)])
            .await?;
        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(status: Option<&str>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: "0xabc".into(),
            status: status.map(String::from),
            contract_address: None,
            block_number: None,
        }
    }

    #[test]
    fn receipt_status_interpretation() {
        assert!(receipt(Some("0x1")).succeeded());
        assert!(!receipt(Some("0x0")).succeeded());
        assert!(!receipt(None).succeeded());
    }

    #[test]
    fn receipt_deserializes_camel_case() {
        let parsed: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": "0x1234",
            "status": "0x1",
            "contractAddress": "0x00000000000000000000000000000000deadbeef",
            "blockNumber": "0x2a",
        }))
        .unwrap();
        assert_eq!(parsed.transaction_hash, "0x1234");
        assert!(parsed.succeeded());
        assert!(parsed.contract_address.is_some());
    }
}
