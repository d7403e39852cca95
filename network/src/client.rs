// Copyright(C) Mundis.
use {
    crate::{
        abi::{ParamsOfEncodeMessage, ResultOfEncodeMessage},
        bridge::JsonRpcBridge,
        error::{SdkError, SdkResult},
        graphql::GraphqlClient,
        net::{ParamsOfQueryCollection, ResultOfQueryCollection},
        processing::{ParamsOfProcessMessage, ResultOfProcessMessage},
        Sdk,
    },
    async_trait::async_trait,
    log::info,
    msig_config::ClientConfig,
    std::time::Duration,
};

pub const ENCODE_MESSAGE: &str = "abi.encode_message";
pub const PROCESS_MESSAGE: &str = "processing.process_message";

/// `Sdk` implementation built from an explicit `ClientConfig`: collection
/// reads go to the GraphQL endpoints, everything else to the SDK binding.
pub struct EverClient {
    net: GraphqlClient,
    binding: Option<JsonRpcBridge>,
}

impl EverClient {
    pub fn new(config: &ClientConfig) -> SdkResult<Self> {
        let net = GraphqlClient::new(&config.network)?;
        // processing waits for the transaction, so allow for both phases
        let timeout = Duration::from_millis(
            config.network.query_timeout_ms + config.network.wait_for_timeout_ms,
        );
        let binding = config
            .binding
            .sdk_url
            .as_deref()
            .map(|url| JsonRpcBridge::new(url, timeout))
            .transpose()?;
        info!(
            "SDK client on {} (binding: {})",
            net.urls().join(", "),
            binding.as_ref().map_or("none", |b| b.url())
        );
        Ok(Self { net, binding })
    }

    fn binding(&self, method: &str) -> SdkResult<&JsonRpcBridge> {
        self.binding
            .as_ref()
            .ok_or_else(|| SdkError::BindingUnavailable(method.to_string()))
    }
}

#[async_trait]
impl Sdk for EverClient {
    async fn encode_message(
        &self,
        params: ParamsOfEncodeMessage,
    ) -> SdkResult<ResultOfEncodeMessage> {
        self.binding(ENCODE_MESSAGE)?
            .call(ENCODE_MESSAGE, params)
            .await
    }

    async fn query_collection(
        &self,
        params: ParamsOfQueryCollection,
    ) -> SdkResult<ResultOfQueryCollection> {
        self.net.query_collection(&params).await
    }

    async fn process_message(
        &self,
        params: ParamsOfProcessMessage,
    ) -> SdkResult<ResultOfProcessMessage> {
        self.binding(PROCESS_MESSAGE)?
            .call(PROCESS_MESSAGE, params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::abi::{Abi, Signer},
        msig_config::ConfigError,
    };

    fn config(endpoint: &str) -> ClientConfig {
        ClientConfig::default()
            .with_endpoint(Some(endpoint.to_string()))
            .unwrap()
    }

    #[test]
    fn requires_an_endpoint() {
        let err = EverClient::new(&ClientConfig::default()).err().unwrap();
        assert!(matches!(err, SdkError::Config(ConfigError::MissingEndpoint)));
    }

    #[tokio::test]
    async fn abi_calls_need_a_binding() {
        let client = EverClient::new(&config("devnet.example")).unwrap();
        let params = ParamsOfEncodeMessage {
            abi: Abi::Json("{}".to_string()),
            address: None,
            deploy_set: None,
            call_set: None,
            signer: Signer::None,
            processing_try_index: None,
        };
        let err = client.encode_message(params).await.unwrap_err();
        assert!(matches!(err, SdkError::BindingUnavailable(ref m) if m == ENCODE_MESSAGE));
    }
}
