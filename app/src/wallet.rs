//! `window.ethereum` interop.
//!
//! The injected provider is the only signing capability the client has:
//! account discovery and authorization go through `request`, and writes are
//! handed over as unsigned transaction objects for the extension to sign
//! and submit. Everything degrades to an error string off the web target.

#[cfg(feature = "web")]
mod web {
    use std::str::FromStr;

    use js_sys::{Array, Function, Object, Promise, Reflect};
    use sapiens_api::abi;
    use sapiens_api::model::Address;
    use wasm_bindgen::prelude::*;

    fn ethereum() -> Option<JsValue> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() {
            None
        } else {
            Some(ethereum)
        }
    }

    /// Is a wallet extension injected at all?
    pub fn capability_present() -> bool {
        ethereum().is_some()
    }

    /// Blocking native alert; the only user-facing error surface for
    /// explicit actions without a wallet.
    pub fn alert_missing_wallet() {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message("Get MetaMask!");
        }
    }

    async fn request(method: &str, params: JsValue) -> Result<JsValue, String> {
        let ethereum = ethereum().ok_or("no wallet capability in window")?;

        let request_fn = Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(|_| "no request method")?;
        let request_fn: Function = request_fn
            .dyn_into()
            .map_err(|_| "request is not a function")?;

        let args = Object::new();
        Reflect::set(
            &args,
            &JsValue::from_str("method"),
            &JsValue::from_str(method),
        )
        .map_err(|_| "failed to set method")?;
        if !params.is_undefined() {
            Reflect::set(&args, &JsValue::from_str("params"), &params)
                .map_err(|_| "failed to set params")?;
        }

        let promise = request_fn
            .call1(&ethereum, &args.into())
            .map_err(|e| format!("request call failed: {e:?}"))?;
        let promise: Promise = promise.dyn_into().map_err(|_| "not a promise")?;

        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("request rejected: {e:?}"))
    }

    fn first_account(result: JsValue) -> Result<Option<Address>, String> {
        let accounts: Array = result.dyn_into().map_err(|_| "accounts is not an array")?;
        if accounts.length() == 0 {
            return Ok(None);
        }
        let account = accounts
            .get(0)
            .as_string()
            .ok_or("account is not a string")?;
        Address::from_str(&account)
            .map(Some)
            .map_err(|e| e.to_string())
    }

    /// Non-interactive: accounts already authorized for this origin.
    pub async fn authorized_accounts() -> Result<Option<Address>, String> {
        first_account(request("eth_accounts", JsValue::undefined()).await?)
    }

    /// Interactive: may prompt the user, who may deny.
    pub async fn request_accounts() -> Result<Option<Address>, String> {
        first_account(request("eth_requestAccounts", JsValue::undefined()).await?)
    }

    /// Sign and submit a contract call; returns the transaction hash.
    pub async fn send_transaction(
        from: &Address,
        to: &Address,
        data: &[u8],
    ) -> Result<String, String> {
        let tx = Object::new();
        Reflect::set(
            &tx,
            &JsValue::from_str("from"),
            &JsValue::from_str(&from.to_string()),
        )
        .map_err(|_| "failed to set from")?;
        Reflect::set(
            &tx,
            &JsValue::from_str("to"),
            &JsValue::from_str(&to.to_string()),
        )
        .map_err(|_| "failed to set to")?;
        Reflect::set(
            &tx,
            &JsValue::from_str("data"),
            &JsValue::from_str(&abi::to_hex(data)),
        )
        .map_err(|_| "failed to set data")?;

        let params = Array::new();
        params.push(&tx.into());

        let result = request("eth_sendTransaction", params.into()).await?;
        result
            .as_string()
            .ok_or("transaction hash is not a string".to_string())
    }
}

#[cfg(feature = "web")]
pub use web::*;

#[cfg(not(feature = "web"))]
mod native {
    use sapiens_api::model::Address;

    pub fn capability_present() -> bool {
        false
    }

    pub fn alert_missing_wallet() {}

    pub async fn authorized_accounts() -> Result<Option<Address>, String> {
        Err("wallet only available in web mode".to_string())
    }

    pub async fn request_accounts() -> Result<Option<Address>, String> {
        Err("wallet only available in web mode".to_string())
    }

    pub async fn send_transaction(
        _from: &Address,
        _to: &Address,
        _data: &[u8],
    ) -> Result<String, String> {
        Err("wallet only available in web mode".to_string())
    }
}

#[cfg(not(feature = "web"))]
pub use native::*;
