// Copyright(C) Mundis.
use {
    crate::contract::ContractError,
    log::info,
    msig_model::{account::AccountRecord, address::Address, tokens::Tokens},
    msig_network::{
        abi::ParamsOfEncodeMessage,
        net::ParamsOfQueryCollection,
        processing::{ParamsOfProcessMessage, TransactionFees},
        Sdk, SdkError,
    },
    serde_json::json,
    thiserror::Error,
};

pub mod guard;

pub use guard::{DeployGuard, GuardError};

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error(transparent)]
    Sdk(#[from] SdkError),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error("Invalid account record: {0}")]
    InvalidAccount(serde_json::Error),
    #[error("Processing result has no transaction id")]
    MissingTransactionId,
}

/// Outcome of a successful deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub address: Address,
    pub transaction_id: String,
    pub fees: TransactionFees,
}

/// Derives the address a deploy message with `params` would create.
pub async fn deploy_address<S: Sdk + ?Sized>(
    sdk: &S,
    params: &ParamsOfEncodeMessage,
) -> Result<Address, SdkError> {
    Ok(sdk.encode_message(params.clone()).await?.address)
}

/// Reads the `accounts` row of `address`, if the network has one.
pub async fn fetch_account<S: Sdk + ?Sized>(
    sdk: &S,
    address: &Address,
) -> Result<Option<AccountRecord>, DeployError> {
    let rows = sdk
        .query_collection(ParamsOfQueryCollection {
            collection: "accounts".to_string(),
            filter: Some(json!({ "id": { "eq": address.to_string() } })),
            result: "acc_type balance code".to_string(),
            order: None,
            limit: Some(1),
        })
        .await?
        .rows::<AccountRecord>()
        .map_err(DeployError::InvalidAccount)?;
    Ok(rows.into_iter().next())
}

/// Runs the deploy flow: derive the address, check the account, send the
/// constructor message.
pub struct Deployer<'a, S: Sdk + ?Sized> {
    sdk: &'a S,
    guard: DeployGuard,
}

impl<'a, S: Sdk + ?Sized> Deployer<'a, S> {
    pub fn new(sdk: &'a S, required: Tokens) -> Self {
        Self {
            sdk,
            guard: DeployGuard::new(required),
        }
    }

    pub async fn deploy(&self, params: ParamsOfEncodeMessage) -> Result<DeployReport, DeployError> {
        let address = deploy_address(self.sdk, &params).await?;
        self.deploy_to(address, params).await
    }

    /// Same as `deploy` for an `address` already derived from `params`.
    pub async fn deploy_to(
        &self,
        address: Address,
        params: ParamsOfEncodeMessage,
    ) -> Result<DeployReport, DeployError> {
        info!("Deploy address is {}", address);

        let account = fetch_account(self.sdk, &address).await?;
        self.guard.check(&address, account.as_ref())?;

        let result = self
            .sdk
            .process_message(ParamsOfProcessMessage {
                message_encode_params: params,
                send_events: false,
            })
            .await?;
        let transaction_id = result
            .transaction_id()
            .ok_or(DeployError::MissingTransactionId)?
            .to_string();
        info!("Deployed {} in transaction {}", address, transaction_id);
        Ok(DeployReport {
            address,
            transaction_id,
            fees: result.fees,
        })
    }
}

#[cfg(test)]
#[path = "tests/deploy_tests.rs"]
mod deploy_tests;
