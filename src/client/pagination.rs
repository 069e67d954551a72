//! Following `has_more` / `last_id` cursors across list pages.

use std::future::Future;

use futures::stream::BoxStream;

use crate::error::Result;
use crate::types::{ListOptions, ListPage};

/// Stream every item of a list endpoint, fetching pages lazily.
///
/// `fetch` receives the options for the next page; `after` is advanced to
/// the previous page's `last_id` until the service reports no more pages.
pub(crate) fn paginate<'a, T, F, Fut>(first: ListOptions, mut fetch: F) -> BoxStream<'a, Result<T>>
where
    T: Send + 'a,
    F: FnMut(ListOptions) -> Fut + Send + 'a,
    Fut: Future<Output = Result<ListPage<T>>> + Send + 'a,
{
    Box::pin(async_stream::try_stream! {
        let mut options = first;
        loop {
            let page = fetch(options.clone()).await?;
            let next = page.next_cursor().map(str::to_string);
            for item in page.data {
                yield item;
            }
            match next {
                Some(cursor) => options.after = Some(cursor),
                None => break,
            }
        }
    })
}
