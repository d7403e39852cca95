// Copyright(C) Mundis.
use {
    serde::{Deserialize, Serialize},
    std::path::PathBuf,
};

/// Nano tokens the deploy address must hold before the deploy is attempted.
pub const CONTRACT_REQUIRED_DEPLOY_TOKENS: u64 = 500_000_000;

/// Artifacts and parameters of the multisig wallet being deployed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContractConfig {
    /// JSON ABI of the wallet
    pub abi_path: PathBuf,
    /// compiled contract image (TVC)
    pub tvc_path: PathBuf,
    /// key pair of the single custodian
    pub keys_path: PathBuf,
    pub required_deploy_tokens: u64,
    /// confirmations needed per transfer once deployed
    pub req_confirms: u8,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            abi_path: PathBuf::from("contracts/SafeMultisigWallet.abi.json"),
            tvc_path: PathBuf::from("contracts/SafeMultisigWallet.tvc"),
            keys_path: PathBuf::from("keys/msig.keys.json"),
            required_deploy_tokens: CONTRACT_REQUIRED_DEPLOY_TOKENS,
            req_confirms: 0,
        }
    }
}
