//! Optimistic apply, confirm-or-rollback
//!
//! Every optimistic kitchen mutation goes through [`run`]: the local change is
//! applied first, then the backend call is awaited, and on failure the
//! rollback step runs before the error is returned to the caller.

use std::future::Future;

pub async fn run<T, E, C, R, RF>(apply: impl FnOnce(), confirm: C, rollback: R) -> Result<T, E>
where
    C: Future<Output = Result<T, E>>,
    R: FnOnce() -> RF,
    RF: Future<Output = ()>,
{
    apply();
    match confirm.await {
        Ok(value) => Ok(value),
        Err(err) => {
            rollback().await;
            Err(err)
        }
    }
}
