// Copyright(C) Mundis.
use {
    base64::{engine::general_purpose::STANDARD, Engine},
    msig_config::ContractConfig,
    msig_model::keypair::Keypair,
    msig_network::abi::{Abi, CallSet, DeploySet, ParamsOfEncodeMessage, Signer},
    serde_json::{json, Value},
    std::{fs, path::Path},
    thiserror::Error,
};

pub const CONSTRUCTOR: &str = "constructor";

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid contract ABI: {0}")]
    InvalidAbi(#[from] serde_json::Error),
    #[error("Contract ABI has no `constructor` function")]
    MissingConstructor,
    #[error("Contract image {0} is empty")]
    EmptyTvc(String),
}

/// ABI and code of the SafeMultisig wallet, ready to be put in a deploy message.
#[derive(Debug, Clone, PartialEq)]
pub struct MultisigPackage {
    abi: Value,
    /// base64 encoded TVC
    tvc: String,
}

impl MultisigPackage {
    pub fn load(config: &ContractConfig) -> Result<Self, ContractError> {
        let abi = fs::read_to_string(&config.abi_path).map_err(|source| ContractError::Io {
            path: config.abi_path.display().to_string(),
            source,
        })?;
        let tvc = read(&config.tvc_path)?;
        if tvc.is_empty() {
            return Err(ContractError::EmptyTvc(config.tvc_path.display().to_string()));
        }
        Self::from_parts(&abi, &tvc)
    }

    pub fn from_parts(abi_json: &str, tvc: &[u8]) -> Result<Self, ContractError> {
        let abi: Value = serde_json::from_str(abi_json)?;
        let has_constructor = abi
            .get("functions")
            .and_then(Value::as_array)
            .map_or(false, |functions| {
                functions
                    .iter()
                    .any(|f| f.get("name").and_then(Value::as_str) == Some(CONSTRUCTOR))
            });
        if !has_constructor {
            return Err(ContractError::MissingConstructor);
        }
        Ok(Self {
            abi,
            tvc: STANDARD.encode(tvc),
        })
    }

    pub fn tvc(&self) -> &str {
        &self.tvc
    }

    /// Deploy message parameters for a wallet with `keys` as its only custodian.
    /// The same parameters yield the same address, so they double as the
    /// address derivation input.
    pub fn deploy_params(&self, keys: &Keypair, req_confirms: u8) -> ParamsOfEncodeMessage {
        ParamsOfEncodeMessage {
            abi: Abi::Contract(self.abi.clone()),
            address: None,
            deploy_set: Some(DeploySet {
                tvc: Some(self.tvc.clone()),
                initial_data: Some(json!({})),
                ..DeploySet::default()
            }),
            call_set: Some(CallSet {
                function_name: CONSTRUCTOR.to_string(),
                header: None,
                input: Some(json!({
                    "owners": [format!("0x{}", keys.public_hex())],
                    "reqConfirms": req_confirms,
                })),
            }),
            signer: Signer::Keys { keys: keys.to_hex() },
            processing_try_index: Some(1),
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ContractError> {
    fs::read(path).map_err(|source| ContractError::Io {
        path: path.display().to_string(),
        source,
    })
}
