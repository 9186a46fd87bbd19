//! Concurrent batch processing utilities.

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Processes items with at most `concurrency` futures in flight.
///
/// Items may finish in any order; the returned results are put back into input order.
///
/// # Arguments
///
/// * `items` - Vector of items to process
/// * `processor` - Async function that processes each item, taking the item and its index
/// * `concurrency` - Maximum number of concurrent operations
pub async fn process_in_batches<T, F, Fut, R>(items: Vec<T>, processor: F, concurrency: usize) -> Vec<R>
where
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = R>,
{
    let mut indexed: Vec<(usize, R)> = stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| {
            let fut = processor(item, index);
            async move { (index, fut.await) }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
