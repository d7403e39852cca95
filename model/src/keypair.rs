// Copyright(C) Mundis.
use {
    anyhow::anyhow,
    hmac::Hmac,
    rand::{rngs::OsRng, CryptoRng, RngCore},
    serde::{Deserialize, Serialize},
    std::{
        fs,
        fs::{File, OpenOptions},
        io::{Read, Write},
        path::Path,
    },
};

/// An Ed25519 signing key pair, the signer of deploy messages and the
/// custodian of the multisig wallet.
pub struct Keypair(ed25519_dalek::Keypair);

/// On-disk form of a key pair: hex encoded halves, as consumed by the SDK signer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeyPairHex {
    pub public: String,
    pub secret: String,
}

impl Keypair {
    /// Constructs a new, random `Keypair` using a caller-provided RNG
    pub fn generate<R>(csprng: &mut R) -> Self
    where
        R: CryptoRng + RngCore,
    {
        Self(ed25519_dalek::Keypair::generate(csprng))
    }

    /// Constructs a new, random `Keypair` using `OsRng`
    pub fn new() -> Self {
        let mut rng = OsRng::default();
        Self::generate(&mut rng)
    }

    /// Recovers a `Keypair` from the 64 byte secret||public form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ed25519_dalek::SignatureError> {
        ed25519_dalek::Keypair::from_bytes(bytes).map(Self)
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }

    /// Public key as lowercase hex, the form used for wallet custodians.
    pub fn public_hex(&self) -> String {
        hex::encode(self.0.public.as_bytes())
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.0.secret.as_bytes())
    }

    pub fn to_hex(&self) -> KeyPairHex {
        KeyPairHex {
            public: self.public_hex(),
            secret: self.secret_hex(),
        }
    }

    pub fn from_hex(keys: &KeyPairHex) -> anyhow::Result<Self> {
        let secret = hex::decode(keys.secret.trim())
            .map_err(|e| anyhow!("Secret key is not valid hex: {}", e))?;
        let keypair = keypair_from_seed(&secret)?;
        if keypair.public_hex() != keys.public.trim().to_lowercase() {
            return Err(anyhow!("Public key does not match the secret key"));
        }
        Ok(keypair)
    }
}

impl Default for Keypair {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        let secret = ed25519_dalek::SecretKey::from_bytes(self.0.secret.as_bytes())
            .expect("secret key bytes are always valid");
        Keypair(ed25519_dalek::Keypair {
            secret,
            public: self.0.public,
        })
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.0.public == other.0.public
    }
}

/// Writes a `Keypair` to a file with JSON-encoding
pub fn write_keypair_file<F: AsRef<Path>>(keypair: &Keypair, outfile: F) -> anyhow::Result<String> {
    let outfile = outfile.as_ref();

    if let Some(outdir) = outfile.parent() {
        fs::create_dir_all(outdir)?;
    }

    let mut f = {
        #[cfg(not(unix))]
        {
            OpenOptions::new()
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            OpenOptions::new().mode(0o600)
        }
    }
    .write(true)
    .truncate(true)
    .create(true)
    .open(outfile)?;

    write_keypair(keypair, &mut f)
}

/// Writes a `Keypair` to a `Write` implementor with JSON-encoding
pub fn write_keypair<W: Write>(keypair: &Keypair, writer: &mut W) -> anyhow::Result<String> {
    let serialized = serde_json::to_string_pretty(&keypair.to_hex())?;
    writer.write_all(serialized.as_bytes())?;
    Ok(serialized)
}

/// Reads a JSON-encoded `Keypair` from a `Reader` implementor
pub fn read_keypair<R: Read>(reader: &mut R) -> anyhow::Result<Keypair> {
    let keys: KeyPairHex = serde_json::from_reader(reader)?;
    Keypair::from_hex(&keys)
}

/// Reads a `Keypair` from a file
pub fn read_keypair_file<F: AsRef<Path>>(path: F) -> anyhow::Result<Keypair> {
    let mut file = File::open(path.as_ref())?;
    read_keypair(&mut file)
}

/// Constructs a `Keypair` from caller-provided seed entropy
pub fn keypair_from_seed(seed: &[u8]) -> anyhow::Result<Keypair> {
    if seed.len() < ed25519_dalek::SECRET_KEY_LENGTH {
        return Err(anyhow!("Seed is too short"));
    }
    let secret = ed25519_dalek::SecretKey::from_bytes(&seed[..ed25519_dalek::SECRET_KEY_LENGTH])
        .map_err(|e| anyhow!(e.to_string()))?;
    let public = ed25519_dalek::PublicKey::from(&secret);
    Ok(Keypair(ed25519_dalek::Keypair { secret, public }))
}

pub fn generate_seed_from_seed_phrase_and_passphrase(
    seed_phrase: &str,
    passphrase: &str,
) -> Vec<u8> {
    const PBKDF2_ROUNDS: u32 = 2048;
    const PBKDF2_BYTES: usize = 64;

    let salt = format!("mnemonic{}", passphrase);

    let mut seed = vec![0u8; PBKDF2_BYTES];
    pbkdf2::pbkdf2::<Hmac<sha2::Sha512>>(
        seed_phrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut seed,
    );
    seed
}

pub fn keypair_from_seed_phrase_and_passphrase(
    seed_phrase: &str,
    passphrase: &str,
) -> anyhow::Result<Keypair> {
    keypair_from_seed(&generate_seed_from_seed_phrase_and_passphrase(
        seed_phrase,
        passphrase,
    ))
}
