//! Settle-and-keep-successes concurrency helper.
//!
//! The feed tolerates individual entity fetch failures: every page-level
//! fan-out goes through [`only_fulfilled`], which drives all operations
//! concurrently, waits for every one to settle, and silently drops the
//! failures. Callers must tolerate a result shorter than the input.

use futures::future::join_all;
use std::future::Future;

/// Apply `map` to every input concurrently and return the successful
/// results in input order, with failed entries removed.
///
/// No retries, and no failure affects any other operation. If every
/// operation fails, the result is empty.
pub async fn only_fulfilled<I, T, E, F, Fut>(items: Vec<I>, map: F) -> Vec<T>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let settled = join_all(items.into_iter().map(map)).await;
    settled.into_iter().filter_map(Result::ok).collect()
}
