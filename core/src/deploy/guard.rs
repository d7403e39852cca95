// Copyright(C) Mundis.
use {
    log::{debug, warn},
    msig_model::{
        account::{AccountRecord, AccountType},
        address::Address,
        tokens::Tokens,
    },
    thiserror::Error,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuardError {
    #[error("You need to transfer at least {} tokens for deploy to {}", .required.to_coins(), .address)]
    NotFunded { address: Address, required: Tokens },
    #[error("Contract {address} is already deployed")]
    AlreadyDeployed { address: Address },
    #[error(
        "Balance of {} is too low for deploy: {} tokens, more than {} required",
        .address, .balance.to_coins(), .required.to_coins()
    )]
    InsufficientFunds {
        address: Address,
        balance: Tokens,
        required: Tokens,
    },
}

/// Decides whether a deploy message may be sent to an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployGuard {
    required: Tokens,
}

impl DeployGuard {
    /// `required` is the balance the address must strictly exceed.
    pub fn new(required: Tokens) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &Tokens {
        &self.required
    }

    /// `record` is the `accounts` row of `address`, `None` when the address has
    /// never received anything.
    pub fn check(&self, address: &Address, record: Option<&AccountRecord>) -> Result<(), GuardError> {
        let record = match record {
            Some(record) => record,
            None => {
                return Err(GuardError::NotFunded {
                    address: *address,
                    required: self.required.clone(),
                })
            }
        };
        debug!(
            "Account {} is {} with balance {}",
            address, record.acc_type, record.balance
        );
        match record.acc_type {
            AccountType::Active => Err(GuardError::AlreadyDeployed { address: *address }),
            AccountType::Uninit if record.balance <= self.required => {
                Err(GuardError::InsufficientFunds {
                    address: *address,
                    balance: record.balance.clone(),
                    required: self.required.clone(),
                })
            }
            AccountType::Uninit => Ok(()),
            other => {
                warn!("Deploying to {} account {}", other, address);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: u64 = 500_000_000;

    fn guard() -> DeployGuard {
        DeployGuard::new(Tokens::from_nano(REQUIRED))
    }

    fn record(acc_type: AccountType, balance: u64) -> AccountRecord {
        AccountRecord {
            acc_type,
            balance: Tokens::from_nano(balance),
            code: None,
        }
    }

    fn address() -> Address {
        Address::new(0, [0xab; 32])
    }

    #[test]
    fn no_record_means_not_funded() {
        let err = guard().check(&address(), None).unwrap_err();
        assert!(matches!(err, GuardError::NotFunded { .. }));
        assert_eq!(
            err.to_string(),
            format!("You need to transfer at least 0.5 tokens for deploy to {}", address())
        );
    }

    #[test]
    fn active_means_already_deployed() {
        let err = guard()
            .check(&address(), Some(&record(AccountType::Active, 10 * REQUIRED)))
            .unwrap_err();
        assert_eq!(err, GuardError::AlreadyDeployed { address: address() });
    }

    #[test]
    fn threshold_is_exclusive() {
        let err = guard()
            .check(&address(), Some(&record(AccountType::Uninit, REQUIRED)))
            .unwrap_err();
        assert!(matches!(err, GuardError::InsufficientFunds { .. }));
        assert!(guard()
            .check(&address(), Some(&record(AccountType::Uninit, 0)))
            .is_err());
        assert!(guard()
            .check(&address(), Some(&record(AccountType::Uninit, REQUIRED + 1)))
            .is_ok());
    }

    #[test]
    fn other_states_are_left_to_the_network() {
        assert!(guard()
            .check(&address(), Some(&record(AccountType::Frozen, 0)))
            .is_ok());
        assert!(guard()
            .check(&address(), Some(&record(AccountType::NonExist, 0)))
            .is_ok());
    }
}
