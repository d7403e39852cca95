// Copyright(C) Mundis.
use {
    super::CursorError,
    futures::{stream, Stream, TryStreamExt},
    log::debug,
    msig_model::{
        address::Address,
        base_types::MSG_TYPE_INTERNAL,
        message::{Message, MessageFilter, MessagePosition},
    },
    msig_network::{
        net::{OrderBy, ParamsOfQueryCollection},
        Sdk,
    },
};

/// Rows requested per page.
pub const PAGE_SIZE: u32 = 50;

/// Forward-only reader over the outbound messages of one account.
///
/// The collection has no continuation token, so every page is requested with a
/// filter that starts strictly after the last row already returned. Rows are
/// ordered by `(created_at, created_lt)`; several rows may share a
/// `created_at`, which is why the lower bound also carries the logical time.
pub struct MessageCursor<'a, S: Sdk + ?Sized> {
    sdk: &'a S,
    filter: MessageFilter,
    page_size: u32,
    last: Option<MessagePosition>,
    exhausted: bool,
}

impl<'a, S: Sdk + ?Sized> MessageCursor<'a, S> {
    pub fn new(sdk: &'a S, filter: MessageFilter, page_size: u32) -> Self {
        Self {
            sdk,
            filter,
            page_size,
            last: None,
            exhausted: false,
        }
    }

    /// Internal (value transfer) messages sent by `address`.
    pub fn withdrawals(sdk: &'a S, address: Address, page_size: u32) -> Self {
        Self::new(
            sdk,
            MessageFilter::outbound(address, MSG_TYPE_INTERNAL),
            page_size,
        )
    }

    /// Filter the next page will be requested with.
    pub fn filter(&self) -> &MessageFilter {
        &self.filter
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetches the next page. `None` once the sequence is exhausted; a page
    /// shorter than the page size is the last one.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Message>>, CursorError> {
        if self.page_size == 0 {
            return Err(CursorError::ZeroPageSize);
        }
        if self.exhausted {
            return Ok(None);
        }
        let rows = self
            .sdk
            .query_collection(ParamsOfQueryCollection {
                collection: "messages".to_string(),
                filter: Some(serde_json::to_value(&self.filter)?),
                result: Message::RESULT_FIELDS.to_string(),
                order: Some(vec![OrderBy::asc("created_at"), OrderBy::asc("created_lt")]),
                limit: Some(self.page_size),
            })
            .await?;
        let page = rows.rows::<Message>()?;
        debug!("Fetched {} messages after {:?}", page.len(), self.last);

        let last = match page.last() {
            Some(last) => last.position(),
            None => {
                self.exhausted = true;
                return Ok(None);
            }
        };
        self.check_order(&page)?;
        if page.len() < self.page_size as usize {
            self.exhausted = true;
        }
        self.filter = self.filter.after(last);
        self.last = Some(last);
        Ok(Some(page))
    }

    /// Every row must be strictly after its predecessor, including the last
    /// row of the previous page; anything else would duplicate or skip rows.
    fn check_order(&self, page: &[Message]) -> Result<(), CursorError> {
        let mut previous = self.last;
        for message in page {
            let position = message.position();
            if previous.map_or(false, |p| position <= p) {
                return Err(CursorError::OutOfOrder {
                    id: message.id.clone(),
                });
            }
            previous = Some(position);
        }
        Ok(())
    }

    /// Turns the cursor into a lazy stream of messages. Pages are fetched one
    /// at a time, only when the previous page has been consumed.
    pub fn into_stream(self) -> impl Stream<Item = Result<Message, CursorError>> + 'a {
        stream::try_unfold(self, |mut cursor| async move {
            let page = cursor.next_page().await?;
            Ok::<_, CursorError>(page.map(|page| (page, cursor)))
        })
        .map_ok(|page| stream::iter(page.into_iter().map(Ok::<_, CursorError>)))
        .try_flatten()
    }
}
