use {
    crate::tokens::Tokens,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Lifecycle state of an account as reported by the `acc_type` field.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccountType {
    /// Funded, but no contract code deployed yet.
    Uninit,
    /// Contract code is deployed.
    Active,
    Frozen,
    NonExist,
}

impl TryFrom<u8> for AccountType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AccountType::Uninit),
            1 => Ok(AccountType::Active),
            2 => Ok(AccountType::Frozen),
            3 => Ok(AccountType::NonExist),
            other => Err(format!("unknown account type {}", other)),
        }
    }
}

impl From<AccountType> for u8 {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Uninit => 0,
            AccountType::Active => 1,
            AccountType::Frozen => 2,
            AccountType::NonExist => 3,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AccountType::Uninit => "uninitialized",
            AccountType::Active => "active",
            AccountType::Frozen => "frozen",
            AccountType::NonExist => "non-existent",
        };
        f.write_str(name)
    }
}

/// The subset of an `accounts` row needed to decide whether a deploy can go ahead.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct AccountRecord {
    pub acc_type: AccountType,
    /// nano tokens held by the account
    pub balance: Tokens,
    /// base64 BOC of the deployed code, absent until the account is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
