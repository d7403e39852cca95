// Copyright(C) Mundis.
//! Client side of the blockchain SDK: the `Sdk` trait the flows are written
//! against, its request/response types, and `EverClient`, which reaches the
//! GraphQL API directly and the SDK core through a JSON-RPC binding.

pub mod abi;
pub mod bridge;
pub mod client;
pub mod error;
pub mod graphql;
pub mod net;
pub mod processing;

#[cfg(test)]
#[path = "tests/stub_server.rs"]
mod stub_server;

pub use {
    client::EverClient,
    error::{SdkError, SdkResult},
};

use {
    crate::{
        abi::{ParamsOfEncodeMessage, ResultOfEncodeMessage},
        net::{ParamsOfQueryCollection, ResultOfQueryCollection},
        processing::{ParamsOfProcessMessage, ResultOfProcessMessage},
    },
    async_trait::async_trait,
};

/// The operations of the external SDK used by the deploy and enumeration flows.
#[async_trait]
pub trait Sdk: Send + Sync {
    /// Encodes a message and derives the destination address. For a deploy
    /// message the address is a pure function of code, initial data and key.
    async fn encode_message(
        &self,
        params: ParamsOfEncodeMessage,
    ) -> SdkResult<ResultOfEncodeMessage>;

    /// Reads at most `limit` rows of a collection. There is no continuation
    /// token; callers page by tightening the filter.
    async fn query_collection(
        &self,
        params: ParamsOfQueryCollection,
    ) -> SdkResult<ResultOfQueryCollection>;

    /// Encodes, sends and waits for the transaction of a message.
    async fn process_message(
        &self,
        params: ParamsOfProcessMessage,
    ) -> SdkResult<ResultOfProcessMessage>;
}
