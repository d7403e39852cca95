// Copyright(C) Mundis.
use {
    crate::abi::ParamsOfEncodeMessage,
    msig_model::tokens::Tokens,
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParamsOfProcessMessage {
    pub message_encode_params: ParamsOfEncodeMessage,
    /// Intermediate processing events are not consumed here, so this stays false.
    pub send_events: bool,
}

/// Fee breakdown of a processed transaction, in nano tokens.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TransactionFees {
    pub in_msg_fwd_fee: Tokens,
    pub storage_fee: Tokens,
    pub gas_fee: Tokens,
    pub out_msgs_fwd_fee: Tokens,
    pub total_account_fees: Tokens,
    pub total_output: Tokens,
    pub ext_in_msg_fee: Tokens,
    pub total_fwd_fees: Tokens,
    pub account_fees: Tokens,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultOfProcessMessage {
    /// The transaction row, as returned by the `transactions` collection.
    pub transaction: Value,
    #[serde(default)]
    pub out_messages: Vec<String>,
    #[serde(default)]
    pub decoded: Option<Value>,
    pub fees: TransactionFees,
}

impl ResultOfProcessMessage {
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction.get("id").and_then(Value::as_str)
    }
}
