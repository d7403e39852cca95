// Copyright(C) Mundis.
use {
    anyhow::Context,
    clap::*,
    colored::Colorize,
    log::info,
    msig_config::{ConfigError, ToolConfig},
    msig_core::{
        contract::MultisigPackage,
        deploy::{deploy_address, Deployer},
        messages::for_each_withdrawal,
    },
    msig_model::{address::Address, keypair::read_keypair_file, tokens::Tokens},
    msig_network::{abi::ParamsOfEncodeMessage, EverClient},
    std::path::PathBuf,
};

/// Arguments shared by the commands that talk to the wallet.
#[derive(Args, Debug, Clone, Default)]
pub struct WalletArgs {
    #[clap(help = "GraphQL endpoint of the network, e.g. net.example.com")]
    pub endpoint: Option<String>,

    #[clap(long, help = "JSON config file with network, binding and contract sections")]
    pub config: Option<PathBuf>,

    #[clap(long, help = "Custodian key pair file")]
    pub keys: Option<PathBuf>,

    #[clap(long, help = "Wallet ABI file")]
    pub abi: Option<PathBuf>,

    #[clap(long, help = "Wallet TVC file")]
    pub tvc: Option<PathBuf>,

    #[clap(long, help = "URL of the JSON-RPC SDK binding")]
    pub sdk_url: Option<String>,
}

impl WalletArgs {
    /// The config file (or defaults) with the command line applied on top.
    pub fn resolve(self) -> Result<ToolConfig, ConfigError> {
        let mut config = ToolConfig::load_or_default(self.config.as_ref())?;
        config.client = config
            .client
            .with_endpoint(self.endpoint)?
            .with_sdk_url(self.sdk_url);
        if let Some(keys) = self.keys {
            config.contract.keys_path = keys;
        }
        if let Some(abi) = self.abi {
            config.contract.abi_path = abi;
        }
        if let Some(tvc) = self.tvc {
            config.contract.tvc_path = tvc;
        }
        Ok(config)
    }
}

fn deploy_params(config: &ToolConfig) -> anyhow::Result<ParamsOfEncodeMessage> {
    let contract = &config.contract;
    let keys = read_keypair_file(&contract.keys_path).with_context(|| {
        format!("Unable to read keys {}", contract.keys_path.display())
    })?;
    let package = MultisigPackage::load(contract)?;
    Ok(package.deploy_params(&keys, contract.req_confirms))
}

pub async fn deploy(wallet: WalletArgs, req_confirms: Option<u8>) -> anyhow::Result<()> {
    let mut config = wallet.resolve()?;
    if let Some(req_confirms) = req_confirms {
        config.contract.req_confirms = req_confirms;
    }
    let client = EverClient::new(&config.client)?;
    let params = deploy_params(&config)?;

    let address = deploy_address(&client, &params).await?;
    println!("Address: {}", address.to_string().bold());

    let deployer = Deployer::new(
        &client,
        Tokens::from_nano(config.contract.required_deploy_tokens),
    );
    let report = deployer.deploy_to(address, params).await?;
    println!("Transaction id is {}", report.transaction_id.bold());
    println!("Deploy fees are {}", serde_json::to_string_pretty(&report.fees)?);
    println!(
        "{}",
        format!(
            "Contract is successfully deployed. You can play with your multisig wallet now at {}",
            report.address
        )
        .green()
    );
    Ok(())
}

pub async fn print_messages(
    wallet: WalletArgs,
    address: Option<Address>,
    page_size: u32,
) -> anyhow::Result<()> {
    let config = wallet.resolve()?;
    let client = EverClient::new(&config.client)?;

    let address = match address {
        Some(address) => address,
        None => deploy_address(&client, &deploy_params(&config)?).await?,
    };
    info!("Listing withdrawals of {}", address);
    println!("Address: {}", address.to_string().bold());

    let summary = for_each_withdrawal(&client, address, page_size, |message| {
        println!(
            "Withdraw {} to {} at {} (message id: {})",
            message.value,
            message.dst,
            message.created_at_utc(),
            message.short_id()
        );
    })
    .await?;
    println!("Total messages: {}", summary.count);
    println!("Total withdrawn: {} tokens", summary.total.to_coins());
    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, msig_config::contract::CONTRACT_REQUIRED_DEPLOY_TOKENS};

    #[test]
    fn endpoint_is_required() {
        let err = WalletArgs::default().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEndpoint));
        assert_eq!(err.to_string(), "HTTPS endpoint required");
    }

    #[test]
    fn command_line_overrides_defaults() {
        let config = WalletArgs {
            endpoint: Some("devnet.example".to_string()),
            keys: Some(PathBuf::from("owner.keys.json")),
            sdk_url: Some("http://127.0.0.1:8080/rpc".to_string()),
            ..WalletArgs::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(config.client.network.endpoints[0], "devnet.example");
        assert_eq!(
            config.client.binding.sdk_url.as_deref(),
            Some("http://127.0.0.1:8080/rpc")
        );
        assert_eq!(config.contract.keys_path, PathBuf::from("owner.keys.json"));
        assert_eq!(
            config.contract.required_deploy_tokens,
            CONTRACT_REQUIRED_DEPLOY_TOKENS
        );
    }

    #[test]
    fn bad_key_file_reports_the_cause() {
        let dir = std::env::temp_dir().join(format!("msig-cli-keys-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let keys_path = dir.join("msig.keys.json");
        let mut keys = msig_model::keypair::Keypair::new().to_hex();
        keys.public = "00".repeat(32);
        std::fs::write(&keys_path, serde_json::to_string(&keys).unwrap()).unwrap();

        let config = WalletArgs {
            endpoint: Some("devnet.example".to_string()),
            keys: Some(keys_path.clone()),
            ..WalletArgs::default()
        }
        .resolve()
        .unwrap();
        let err = deploy_params(&config).unwrap_err();
        let message = crate::main_commands::error_message(&err);
        assert!(message.starts_with(&format!("Unable to read keys {}", keys_path.display())));
        assert!(message.ends_with("Public key does not match the secret key"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = WalletArgs {
            endpoint: Some("devnet.example".to_string()),
            config: Some(PathBuf::from("/nonexistent/msig.json")),
            ..WalletArgs::default()
        }
        .resolve()
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
