// Copyright(C) Mundis.
use {
    futures::{Stream, TryStreamExt},
    msig_model::{address::Address, message::Message, tokens::Tokens},
    msig_network::{Sdk, SdkError},
    thiserror::Error,
};

mod cursor;

pub use cursor::{MessageCursor, PAGE_SIZE};

#[derive(Error, Debug)]
pub enum CursorError {
    #[error(transparent)]
    Sdk(#[from] SdkError),
    #[error("Invalid message row: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Message {id} is out of order: server ignored the requested sort order")]
    OutOfOrder { id: String },
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}

/// Running totals over enumerated withdrawals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawalSummary {
    pub count: usize,
    pub total: Tokens,
}

impl WithdrawalSummary {
    pub fn record(&mut self, message: &Message) {
        self.count += 1;
        self.total = std::mem::take(&mut self.total) + &message.value;
    }
}

/// Every value-transfer message sent by `address`, oldest first.
pub fn withdrawals<'a, S: Sdk + ?Sized>(
    sdk: &'a S,
    address: Address,
) -> impl Stream<Item = Result<Message, CursorError>> + 'a {
    MessageCursor::withdrawals(sdk, address, PAGE_SIZE).into_stream()
}

/// Feeds each withdrawal of `address` to `on_message` and returns the totals.
pub async fn for_each_withdrawal<S, F>(
    sdk: &S,
    address: Address,
    page_size: u32,
    mut on_message: F,
) -> Result<WithdrawalSummary, CursorError>
where
    S: Sdk + ?Sized,
    F: FnMut(&Message),
{
    let stream = MessageCursor::withdrawals(sdk, address, page_size).into_stream();
    futures::pin_mut!(stream);
    let mut summary = WithdrawalSummary::default();
    while let Some(message) = stream.try_next().await? {
        on_message(&message);
        summary.record(&message);
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod cursor_tests;
