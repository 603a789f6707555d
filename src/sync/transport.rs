//! Transport trait - Abstraction for the copy backend.

use super::SyncPlan;
use crate::error::Result;

/// Result of a push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Number of files copied
    pub files_pushed: usize,
    /// Number of connections opened
    pub sessions: usize,
}

/// Copies a sync plan to the remote.
///
/// Implementations must stop at the first failure; there is no retry.
pub trait Transport {
    /// Transport name (scp, ...)
    fn name(&self) -> &'static str;

    /// Copy every transfer of the plan.
    fn push(&self, plan: &SyncPlan) -> Result<PushReport>;
}
