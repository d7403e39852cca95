// Copyright(C) Mundis.
use {
    crate::{address::Address, base_types::UnixTimestamp, tokens::Tokens},
    chrono::{TimeZone, Utc},
    serde::{de, Deserialize, Deserializer, Serialize},
    std::fmt,
};

/// Logical creation time of a message. Monotonic per source account, it breaks
/// ties between messages created within the same second.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LogicalTime(pub u64);

impl fmt::Debug for LogicalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for LogicalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Serialize for LogicalTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&format!("{:#x}", self.0))
    }
}

impl<'de> Deserialize<'de> for LogicalTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LtVisitor;

        impl<'de> de::Visitor<'de> for LtVisitor {
            type Value = LogicalTime;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a logical time as number, decimal or 0x-prefixed hex")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<LogicalTime, E> {
                let parsed = match v.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => v.parse::<u64>(),
                };
                parsed
                    .map(LogicalTime)
                    .map_err(|_| E::custom(format!("invalid logical time `{}`", v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<LogicalTime, E> {
                Ok(LogicalTime(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<LogicalTime, E> {
                u64::try_from(v)
                    .map(LogicalTime)
                    .map_err(|_| E::custom(format!("negative logical time {}", v)))
            }
        }

        deserializer.deserialize_any(LtVisitor)
    }
}

/// Sort key of a message within its source account: creation second first,
/// logical time second. Strictly increasing along the account's outbound queue.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MessagePosition {
    pub created_at: UnixTimestamp,
    pub created_lt: LogicalTime,
}

/// A row of the `messages` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub src: Address,
    pub dst: Address,
    #[serde(default)]
    pub msg_type: u8,
    pub value: Tokens,
    pub created_at: UnixTimestamp,
    pub created_lt: LogicalTime,
}

impl Message {
    /// Fields requested from the server for every message row.
    pub const RESULT_FIELDS: &'static str =
        "id src dst msg_type value(format:DEC) created_at created_lt";

    pub fn position(&self) -> MessagePosition {
        MessagePosition {
            created_at: self.created_at,
            created_lt: self.created_lt,
        }
    }

    /// Creation time in the `Tue, 14 Mar 2023 12:00:00 GMT` form.
    pub fn created_at_utc(&self) -> String {
        match Utc.timestamp_opt(i64::from(self.created_at), 0).single() {
            Some(at) => at.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            None => self.created_at.to_string(),
        }
    }

    /// The first characters of the message id, used in compact listings.
    pub fn short_id(&self) -> &str {
        self.id.get(..4).unwrap_or(&self.id)
    }
}

/// A single-field comparison in the GraphQL filter dialect.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cmp<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<T>,
}

impl<T: Ord> Cmp<T> {
    pub fn equal_to(value: T) -> Self {
        Self {
            eq: Some(value),
            gt: None,
        }
    }

    pub fn greater_than(value: T) -> Self {
        Self {
            eq: None,
            gt: Some(value),
        }
    }

    pub fn matches(&self, value: &T) -> bool {
        self.eq.as_ref().map_or(true, |eq| value == eq)
            && self.gt.as_ref().map_or(true, |gt| value > gt)
    }
}

/// Filter over the `messages` collection. Serializes to exactly the object the
/// server expects; the `OR` branch is a full alternative filter, so
/// `{a, OR: b}` selects rows matching `a` or `b`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageFilter {
    pub src: Cmp<Address>,
    pub msg_type: Cmp<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Cmp<UnixTimestamp>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_lt: Option<Cmp<LogicalTime>>,
    #[serde(rename = "OR", default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Box<MessageFilter>>,
}

impl MessageFilter {
    /// All messages of `msg_type` sent by `src`.
    pub fn outbound(src: Address, msg_type: u8) -> Self {
        Self {
            src: Cmp::equal_to(src),
            msg_type: Cmp::equal_to(msg_type),
            created_at: None,
            created_lt: None,
            or: None,
        }
    }

    /// Narrows the filter to messages strictly after `last`:
    /// `created_at > T OR (created_at == T AND created_lt > S)`.
    pub fn after(&self, last: MessagePosition) -> Self {
        let base = Self {
            created_at: None,
            created_lt: None,
            or: None,
            ..self.clone()
        };
        let same_second = Self {
            created_at: Some(Cmp::equal_to(last.created_at)),
            created_lt: Some(Cmp::greater_than(last.created_lt)),
            ..base.clone()
        };
        Self {
            created_at: Some(Cmp::greater_than(last.created_at)),
            or: Some(Box::new(same_second)),
            ..base
        }
    }

    pub fn matches(&self, message: &Message) -> bool {
        let own = self.src.matches(&message.src)
            && self.msg_type.matches(&message.msg_type)
            && self
                .created_at
                .as_ref()
                .map_or(true, |c| c.matches(&message.created_at))
            && self
                .created_lt
                .as_ref()
                .map_or(true, |c| c.matches(&message.created_lt));
        own || self.or.as_ref().map_or(false, |or| or.matches(message))
    }
}
