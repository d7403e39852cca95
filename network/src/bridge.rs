// Copyright(C) Mundis.
use {
    crate::error::{SdkError, SdkResult},
    log::debug,
    reqwest::Client,
    serde::{de::DeserializeOwned, Deserialize, Serialize},
    serde_json::Value,
    std::{
        sync::atomic::{AtomicU64, Ordering},
        time::Duration,
    },
};

#[derive(Serialize, Debug)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct JsonRpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct JsonRpcEnvelope {
    result: Option<Value>,
    error: Option<JsonRpcErrorBody>,
}

/// JSON-RPC 2.0 channel to an SDK core. Methods are the SDK function names
/// (`abi.encode_message`, `processing.process_message`) and params/results are
/// the SDK's JSON shapes.
pub struct JsonRpcBridge {
    http: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcBridge {
    pub fn new(url: &str, timeout: Duration) -> SdkResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn call<P, R>(&self, method: &str, params: P) -> SdkResult<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("SDK call {} #{}", method, request.id);
        let resp = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(SdkError::Http {
                status: status.as_u16(),
                body,
            });
        }
        decode_envelope(&body)
    }
}

fn decode_envelope<R: DeserializeOwned>(body: &str) -> SdkResult<R> {
    let invalid = |error: serde_json::Error| SdkError::InvalidJson {
        error: error.to_string(),
        body: body.to_string(),
    };
    let envelope: JsonRpcEnvelope = serde_json::from_str(body).map_err(invalid)?;
    if let Some(err) = envelope.error {
        return Err(SdkError::Sdk {
            code: err.code,
            message: err.message,
        });
    }
    serde_json::from_value(envelope.result.unwrap_or(Value::Null)).map_err(invalid)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::stub_server::serve_once};

    #[test]
    fn decodes_result() {
        let value: Vec<u32> = decode_envelope(r#"{"jsonrpc":"2.0","id":1,"result":[1,2]}"#).unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn decodes_sdk_error() {
        let err = decode_envelope::<Value>(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":407,"message":"Account not found"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SdkError::Sdk { code: 407, .. }));
        assert_eq!(err.to_string(), "SDK error 407: Account not found");
    }

    #[test]
    fn result_of_wrong_shape() {
        let err = decode_envelope::<Vec<u32>>(r#"{"jsonrpc":"2.0","id":1,"result":"x"}"#).unwrap_err();
        assert!(matches!(err, SdkError::InvalidJson { .. }));
    }

    #[test]
    fn request_shape() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "abi.encode_message",
            params: serde_json::json!({ "signer": { "type": "None" } }),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "abi.encode_message",
                "params": { "signer": { "type": "None" } }
            })
        );
    }

    #[tokio::test]
    async fn truncated_body_is_a_transport_error() {
        let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"jsonrpc\"").await;
        let bridge = JsonRpcBridge::new(&url, Duration::from_secs(2)).unwrap();
        let err = bridge
            .call::<_, Value>("abi.encode_message", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Transport(_)), "{}", err);
        assert!(err.is_transport());
    }
}
