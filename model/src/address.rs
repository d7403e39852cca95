// Copyright(C) Mundis.
use {
    crate::base_types::Workchain,
    serde::{Deserialize, Deserializer, Serialize},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// Number of bytes in an account id
pub const ACCOUNT_ID_BYTES: usize = 32;

/// A raw `workchain:account_id` account address.
#[derive(Default, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address {
    workchain: Workchain,
    account_id: [u8; ACCOUNT_ID_BYTES],
}

impl Address {
    pub fn new(workchain: Workchain, account_id: [u8; ACCOUNT_ID_BYTES]) -> Self {
        Self {
            workchain,
            account_id,
        }
    }

    pub fn workchain(&self) -> Workchain {
        self.workchain
    }

    pub fn account_id(&self) -> &[u8; ACCOUNT_ID_BYTES] {
        &self.account_id
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.account_id))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Address>().map_err(serde::de::Error::custom)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("Address must have the form <workchain>:<account id>")]
    MissingSeparator,
    #[error("Invalid workchain id `{0}`")]
    InvalidWorkchain(String),
    #[error("Account id is not valid hex")]
    InvalidHex,
    #[error("Account id must be 32 bytes, got {0}")]
    WrongSize(usize),
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (workchain, account_id) = s
            .trim()
            .split_once(':')
            .ok_or(ParseAddressError::MissingSeparator)?;
        let workchain = workchain
            .parse::<Workchain>()
            .map_err(|_| ParseAddressError::InvalidWorkchain(workchain.to_string()))?;
        let bytes = hex::decode(account_id).map_err(|_| ParseAddressError::InvalidHex)?;
        let account_id = <[u8; ACCOUNT_ID_BYTES]>::try_from(bytes.as_slice())
            .map_err(|_| ParseAddressError::WrongSize(bytes.len()))?;
        Ok(Self::new(workchain, account_id))
    }
}
