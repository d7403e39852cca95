// Copyright(C) Mundis.
use {
    serde::{de::DeserializeOwned, Deserialize, Serialize},
    serde_json::Value,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub path: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(path: &str) -> Self {
        Self {
            path: path.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(path: &str) -> Self {
        Self {
            path: path.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ParamsOfQueryCollection {
    /// e.g. `accounts`, `messages`
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Selection set, e.g. `acc_type balance code`
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<OrderBy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResultOfQueryCollection {
    pub result: Vec<Value>,
}

impl ResultOfQueryCollection {
    /// Decodes every row into `T`.
    pub fn rows<T: DeserializeOwned>(self) -> serde_json::Result<Vec<T>> {
        self.result.into_iter().map(serde_json::from_value).collect()
    }
}
