// Copyright(C) Mundis.
use {
    anyhow::anyhow,
    bip39::{Language, Mnemonic, MnemonicType, Seed},
    clap::*,
    colored::Colorize,
    msig_model::keypair::{
        keypair_from_seed, keypair_from_seed_phrase_and_passphrase, read_keypair_file,
        write_keypair, write_keypair_file, Keypair,
    },
    rpassword::prompt_password,
    std::{
        io::{stderr, stdin, stdout, Write},
        path::{Path, PathBuf},
    },
};

#[allow(clippy::large_enum_variant)]
#[derive(Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum KeytoolCommand {
    #[clap(
        name = "new",
        about = "Generate a custodian key pair file from a random seed phrase and optional BIP39 passphrase"
    )]
    New {
        #[clap(help = "Path to generated file, `-` for stdout", required = true)]
        outfile: PathBuf,
        #[clap(long, help = "Overwrite the output file if it exists")]
        force: bool,
        #[clap(long, help = "Do not prompt for a BIP39 passphrase")]
        no_passphrase: bool,
        #[clap(
            long,
            help = "Do not display seed phrase. Useful when piping output to other programs that prompt for user input, like gpg"
        )]
        silent: bool,
    },

    #[clap(name = "pubkey", about = "Display the public key from a key pair file")]
    Pubkey {
        #[clap(help = "Path to a key pair file", required = true)]
        keypair_file: PathBuf,
    },

    #[clap(
        name = "recover",
        about = "Recover a key pair from a seed phrase and an optional passphrase"
    )]
    Recover {
        #[clap(help = "Path to generated file, `-` for stdout", required = true)]
        outfile: PathBuf,
        #[clap(long, help = "Overwrite the output file if it exists")]
        force: bool,
    },
}

impl KeytoolCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            KeytoolCommand::New {
                outfile,
                force,
                no_passphrase,
                silent,
            } => {
                check_overwrite(&outfile, force)?;

                let mnemonic = Mnemonic::new(MnemonicType::Words12, Language::English);
                let (passphrase, passphrase_message) =
                    Self::acquire_passphrase_and_message(no_passphrase)?;
                let seed = Seed::new(&mnemonic, &passphrase);
                let keypair = keypair_from_seed(seed.as_bytes())?;

                Self::output_keypair(&keypair, &outfile, "new", &mut stdout())
                    .map_err(|err| anyhow!("Unable to write {}: {}", outfile.display(), err))?;

                if !silent {
                    let banner = seed_phrase_banner(&keypair, mnemonic.phrase(), &passphrase_message);
                    // stdout carries the key pair itself when writing to `-`
                    if is_stdout(&outfile) {
                        eprintln!("{}", banner);
                    } else {
                        println!("{}", banner);
                    }
                }
            }
            KeytoolCommand::Pubkey { keypair_file } => {
                if !keypair_file.exists() {
                    return Err(anyhow!(
                        "The provided key pair {} does not exist",
                        keypair_file.display()
                    ));
                }

                let keypair = read_keypair_file(keypair_file.as_path())?;
                println!("{}", keypair.public_hex());
            }
            KeytoolCommand::Recover { outfile, force } => {
                check_overwrite(&outfile, force)?;

                let seed_phrase = prompt_password("Enter seed phrase: ")?;
                let passphrase = Self::prompt_passphrase(
                    "If this seed phrase has an associated passphrase, enter it now. Otherwise, press ENTER to continue:"
                )?;

                let keypair =
                    keypair_from_seed_phrase_and_passphrase(seed_phrase.trim(), &passphrase)?;
                let prompt = format!("Recovered public key `{}`. Continue? (y/n): ", keypair.public_hex());
                if is_stdout(&outfile) {
                    eprint!("{}", prompt);
                    let _ignored = stderr().flush();
                } else {
                    print!("{}", prompt);
                    let _ignored = stdout().flush();
                }
                let mut input = String::new();
                stdin().read_line(&mut input)?;
                if input.to_lowercase().trim() != "y" {
                    return Err(anyhow!("Recovery aborted"));
                }

                Self::output_keypair(&keypair, &outfile, "recovered", &mut stdout())
                    .map_err(|err| anyhow!("Unable to write {}: {}", outfile.display(), err))?;
            }
        }

        Ok(())
    }

    fn acquire_passphrase_and_message(no_passphrase: bool) -> anyhow::Result<(String, String)> {
        if no_passphrase {
            return Ok((String::new(), String::new()));
        }
        let passphrase = Self::prompt_passphrase(
            "\nFor added security, enter a passphrase\n\
             \nNOTE: \n\
             - This passphrase improves security of the recovery seed phrase. \n\
             - It does NOT improve the security of the key pair file itself, which is stored as insecure plain text\n\
             \nPassphrase (empty for none): ",
        )?;
        eprintln!();
        Ok((passphrase, " and your passphrase".to_string()))
    }

    /// Prompts user for a passphrase and then asks for confirmation to check for mistakes
    fn prompt_passphrase(prompt: &str) -> anyhow::Result<String> {
        let passphrase = prompt_password(prompt)?;
        if !passphrase.is_empty() {
            let confirmed = prompt_password("Enter same passphrase again: ")?;
            if confirmed != passphrase {
                return Err(anyhow!("Passphrases did not match"));
            }
        }
        Ok(passphrase)
    }

    fn output_keypair<W: Write>(
        keypair: &Keypair,
        outfile: &Path,
        source: &str,
        stdout: &mut W,
    ) -> anyhow::Result<()> {
        if is_stdout(outfile) {
            write_keypair(keypair, stdout)?;
            writeln!(stdout)?;
        } else {
            write_keypair_file(keypair, outfile)?;
            println!("Wrote {} key pair to {}", source, outfile.display());
        }
        Ok(())
    }
}

fn is_stdout(outfile: &Path) -> bool {
    outfile == Path::new("-")
}

fn seed_phrase_banner(keypair: &Keypair, phrase: &str, passphrase_message: &str) -> String {
    let divider = "=".repeat(phrase.len());
    format!(
        "\n{}\npublic: {}\n{}\n{}:\n{}\n{}",
        &divider,
        keypair.public_hex().bold(),
        &divider,
        format!(
            "Save this seed phrase{} to recover your new key pair",
            passphrase_message
        )
        .red(),
        phrase.bold(),
        &divider
    )
}

fn check_overwrite(outfile: &Path, force: bool) -> anyhow::Result<()> {
    if !force && !is_stdout(outfile) && outfile.exists() {
        return Err(anyhow!(
            "Refusing to overwrite {} without --force flag",
            outfile.display()
        ));
    }
    Ok(())
}
