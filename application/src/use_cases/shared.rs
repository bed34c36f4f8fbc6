//! Shared utilities for use cases.
//!
//! Contains cancellation helpers used by the council pipeline.

use crate::use_cases::run_council::RunCouncilError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(RunCouncilError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), RunCouncilError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(RunCouncilError::Cancelled);
    }
    Ok(())
}

/// Drive `operation` to completion unless the token fires first.
///
/// On cancellation the operation future is dropped, which abandons any
/// provider calls still in flight.
pub(crate) async fn run_cancellable<T, F>(
    token: &Option<CancellationToken>,
    operation: F,
) -> Result<T, RunCouncilError>
where
    F: Future<Output = Result<T, RunCouncilError>>,
{
    check_cancelled(token)?;
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(RunCouncilError::Cancelled),
            result = operation => result,
        },
        None => operation.await,
    }
}
