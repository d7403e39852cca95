// Copyright(C) Mundis.
use {
    crate::{
        keytool_commands::KeytoolCommand,
        wallet_commands::{deploy, print_messages, WalletArgs},
    },
    clap::*,
    msig_core::messages::PAGE_SIZE,
    msig_model::address::Address,
};

#[allow(clippy::large_enum_variant)]
#[derive(Parser)]
#[clap(
    name = "msig-cli",
    about = "SafeMultisig wallet command-line tool",
    version,
    rename_all = "kebab-case"
)]
pub enum MsigCommand {
    #[clap(
        name = "deploy",
        about = "Deploy the multisig wallet to the network behind ENDPOINT"
    )]
    Deploy {
        #[clap(flatten)]
        wallet: WalletArgs,

        #[clap(long, help = "Confirmations required for each transfer")]
        req_confirms: Option<u8>,
    },

    #[clap(
        name = "print-messages",
        about = "List the withdrawals made by the multisig wallet"
    )]
    PrintMessages {
        #[clap(flatten)]
        wallet: WalletArgs,

        #[clap(
            long,
            help = "Wallet address; derived from the keys and contract when omitted"
        )]
        address: Option<Address>,

        #[clap(long, default_value_t = PAGE_SIZE, help = "Messages requested per page")]
        page_size: u32,
    },

    #[clap(name = "keytool", about = "Key management commands")]
    Keytool {
        #[clap(subcommand)]
        cmd: KeytoolCommand,
    },
}

impl MsigCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            MsigCommand::Deploy {
                wallet,
                req_confirms,
            } => deploy(wallet, req_confirms).await,
            MsigCommand::PrintMessages {
                wallet,
                address,
                page_size,
            } => print_messages(wallet, address, page_size).await,
            MsigCommand::Keytool { cmd } => cmd.execute().await,
        }
    }
}

/// The error and every cause under it, outermost first, on one line.
pub fn error_message(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}
