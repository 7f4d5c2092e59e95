//! Fail-fast joining of worker tasks.

use crate::error::EngineError;
use tokio::task::JoinSet;

/// Wait for every task of `set`, returning their outputs in completion order.
///
/// The first task that fails aborts all remaining tasks and its error is
/// returned.
pub(crate) async fn join_fail_fast<T: 'static>(
    mut set: JoinSet<Result<T, EngineError>>,
) -> Result<Vec<T>, EngineError> {
    let mut outputs = Vec::with_capacity(set.len());

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(output)) => outputs.push(output),
            Ok(Err(e)) => {
                set.abort_all();
                return Err(e);
            }
            Err(e) => {
                set.abort_all();
                return Err(EngineError::Worker(e.to_string()));
            }
        }
    }

    Ok(outputs)
}
