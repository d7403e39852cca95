// Copyright(C) Mundis.
use {
    async_trait::async_trait,
    msig_model::{
        account::AccountRecord,
        address::Address,
        base_types::MSG_TYPE_INTERNAL,
        keypair::Keypair,
        message::{LogicalTime, Message, MessageFilter},
        tokens::Tokens,
    },
    msig_network::{
        abi::{ParamsOfEncodeMessage, ResultOfEncodeMessage},
        net::{ParamsOfQueryCollection, ResultOfQueryCollection},
        processing::{ParamsOfProcessMessage, ResultOfProcessMessage, TransactionFees},
        Sdk, SdkError, SdkResult,
    },
    rand::{rngs::StdRng, SeedableRng},
    serde_json::{json, Value},
    std::{collections::HashMap, sync::Mutex},
};

pub fn wallet() -> Address {
    Address::new(0, [0x11; 32])
}

pub fn stranger() -> Address {
    Address::new(0, [0x22; 32])
}

pub fn test_keys() -> Keypair {
    Keypair::generate(&mut StdRng::from_seed([0; 32]))
}

pub fn multisig_abi() -> String {
    json!({
        "ABI version": 2,
        "header": ["pubkey", "time", "expire"],
        "functions": [
            {
                "name": "constructor",
                "inputs": [
                    { "name": "owners", "type": "uint256[]" },
                    { "name": "reqConfirms", "type": "uint8" }
                ],
                "outputs": []
            }
        ],
        "events": [],
        "data": []
    })
    .to_string()
}

/// An outbound internal message of `wallet()`.
pub fn withdrawal(created_at: u32, lt: u64) -> Message {
    Message {
        id: format!("{:08x}{:056x}", created_at, lt),
        src: wallet(),
        dst: stranger(),
        msg_type: MSG_TYPE_INTERNAL,
        value: Tokens::from_nano(1_000 + lt),
        created_at,
        created_lt: LogicalTime(lt),
    }
}

/// In-memory stand-in for the SDK: a fixed ledger of accounts and messages,
/// and a record of every call made against it.
#[derive(Default)]
pub struct MemoryLedger {
    pub deploy_address: Address,
    pub accounts: HashMap<Address, AccountRecord>,
    pub messages: Vec<Message>,
    /// Served instead of the ledger contents when set, one page per query.
    pub scripted_pages: Mutex<Vec<Vec<Message>>>,
    pub queries: Mutex<Vec<ParamsOfQueryCollection>>,
    pub processed: Mutex<Vec<ParamsOfProcessMessage>>,
    pub encoded: Mutex<usize>,
}

impl MemoryLedger {
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn message_queries(&self) -> Vec<ParamsOfQueryCollection> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.collection == "messages")
            .cloned()
            .collect()
    }

    pub fn encode_count(&self) -> usize {
        *self.encoded.lock().unwrap()
    }

    pub fn process_count(&self) -> usize {
        self.processed.lock().unwrap().len()
    }

    fn accounts(&self, filter: &Value) -> Vec<Value> {
        let id = filter["id"]["eq"].as_str().unwrap_or_default();
        self.accounts
            .iter()
            .filter(|(address, _)| address.to_string() == id)
            .map(|(address, record)| {
                let mut row = serde_json::to_value(record).unwrap();
                row["id"] = json!(address.to_string());
                row
            })
            .collect()
    }

    fn messages(&self, params: &ParamsOfQueryCollection) -> SdkResult<Vec<Value>> {
        let mut scripted = self.scripted_pages.lock().unwrap();
        if !scripted.is_empty() {
            let page = scripted.remove(0);
            return Ok(page.iter().map(|m| serde_json::to_value(m).unwrap()).collect());
        }
        let filter: MessageFilter =
            serde_json::from_value(params.filter.clone().unwrap_or(Value::Null))
                .map_err(|e| SdkError::UnexpectedResponse(e.to_string()))?;
        let mut matching: Vec<&Message> =
            self.messages.iter().filter(|m| filter.matches(m)).collect();
        matching.sort_by_key(|m| m.position());
        Ok(matching
            .into_iter()
            .take(params.limit.unwrap_or(u32::MAX) as usize)
            .map(|m| serde_json::to_value(m).unwrap())
            .collect())
    }
}

#[async_trait]
impl Sdk for MemoryLedger {
    async fn encode_message(
        &self,
        _params: ParamsOfEncodeMessage,
    ) -> SdkResult<ResultOfEncodeMessage> {
        *self.encoded.lock().unwrap() += 1;
        Ok(ResultOfEncodeMessage {
            message: "te6ccg==".to_string(),
            data_to_sign: None,
            address: self.deploy_address,
            message_id: "00".repeat(32),
        })
    }

    async fn query_collection(
        &self,
        params: ParamsOfQueryCollection,
    ) -> SdkResult<ResultOfQueryCollection> {
        self.queries.lock().unwrap().push(params.clone());
        let filter = params.filter.clone().unwrap_or(Value::Null);
        let result = match params.collection.as_str() {
            "accounts" => self.accounts(&filter),
            "messages" => self.messages(&params)?,
            other => {
                return Err(SdkError::Graphql(vec![format!(
                    "unknown collection {}",
                    other
                )]))
            }
        };
        Ok(ResultOfQueryCollection { result })
    }

    async fn process_message(
        &self,
        params: ParamsOfProcessMessage,
    ) -> SdkResult<ResultOfProcessMessage> {
        self.processed.lock().unwrap().push(params);
        Ok(ResultOfProcessMessage {
            transaction: json!({ "id": "c0ffee", "aborted": false }),
            out_messages: Vec::new(),
            decoded: None,
            fees: TransactionFees {
                gas_fee: Tokens::from_nano(9_000_000),
                storage_fee: Tokens::from_nano(1),
                total_account_fees: Tokens::from_nano(9_000_001),
                ..TransactionFees::default()
            },
        })
    }
}
