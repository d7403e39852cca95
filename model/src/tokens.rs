// Copyright(C) Mundis.
use {
    crate::base_types::NANO_PER_COIN,
    num_bigint::BigUint,
    num_traits::Zero,
    serde::{de, Deserialize, Deserializer, Serialize},
    std::{fmt, ops::Add, str::FromStr},
    thiserror::Error,
};

/// An amount of nano tokens. Balances and message values are unbounded integers
/// on the wire, so they are never narrowed to a machine word.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tokens(BigUint);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseTokensError {
    #[error("Empty token amount")]
    Empty,
    #[error("Invalid token amount `{0}`")]
    Invalid(String),
}

impl Tokens {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_nano(nano: u64) -> Self {
        Self(BigUint::from(nano))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Formats the amount in whole coins, e.g. `500000000` becomes `0.5`.
    pub fn to_coins(&self) -> String {
        let nano = BigUint::from(NANO_PER_COIN);
        let whole = &self.0 / &nano;
        let frac = (&self.0 % &nano).to_string();
        if frac == "0" {
            return whole.to_string();
        }
        let frac = format!("{:0>9}", frac);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

impl From<u64> for Tokens {
    fn from(nano: u64) -> Self {
        Self::from_nano(nano)
    }
}

impl From<BigUint> for Tokens {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl Add<&Tokens> for Tokens {
    type Output = Tokens;

    fn add(self, rhs: &Tokens) -> Self::Output {
        Tokens(self.0 + &rhs.0)
    }
}

impl FromStr for Tokens {
    type Err = ParseTokensError;

    /// Accepts `0x`-prefixed hex (the default GraphQL format for big integers)
    /// as well as plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseTokensError::Empty);
        }
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some("") => None,
            Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
            None => BigUint::parse_bytes(s.as_bytes(), 10),
        };
        parsed
            .map(Tokens)
            .ok_or_else(|| ParseTokensError::Invalid(s.to_string()))
    }
}

impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tokens({})", self.0)
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Tokens {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Tokens {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TokensVisitor;

        impl<'de> de::Visitor<'de> for TokensVisitor {
            type Value = Tokens;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal or 0x-prefixed hex token amount")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Tokens, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Tokens, E> {
                Ok(Tokens::from_nano(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Tokens, E> {
                u64::try_from(v)
                    .map(Tokens::from_nano)
                    .map_err(|_| E::custom(format!("negative token amount {}", v)))
            }
        }

        deserializer.deserialize_any(TokensVisitor)
    }
}
