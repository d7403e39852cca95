// Copyright(C) Mundis.
use {
    msig_model::{address::Address, keypair::KeyPairHex},
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

/// A contract ABI, either already parsed or as raw JSON text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "value")]
pub enum Abi {
    Contract(Value),
    Json(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DeploySet {
    /// base64 encoded contract image
    pub tvc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workchain_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_pubkey: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CallSet {
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Signer {
    None,
    External { public_key: String },
    Keys { keys: KeyPairHex },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParamsOfEncodeMessage {
    pub abi: Abi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_set: Option<DeploySet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_set: Option<CallSet>,
    pub signer: Signer,
    /// Retry number; the SDK uses it to derive a fresh expiration time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_try_index: Option<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultOfEncodeMessage {
    /// base64 BOC of the message
    pub message: String,
    #[serde(default)]
    pub data_to_sign: Option<String>,
    pub address: Address,
    pub message_id: String,
}
