// Copyright(C) Mundis.
use {
    clap::Parser,
    colored::Colorize,
    msig_cli::main_commands::{error_message, MsigCommand},
};

#[tokio::main]
async fn main() {
    msig_logger::setup();

    let command = MsigCommand::parse();
    match command.execute().await {
        Ok(_) => (),
        Err(err) => {
            println!("{}", error_message(&err).bold().red());
            std::process::exit(1);
        }
    }
}
