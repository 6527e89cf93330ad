use async_trait::async_trait;

use fintrack_core::AppResult;
use fintrack_domain::AuditLogEntry;

use super::filter::AuditLogPredicate;

/// Repository port for reading the audit trail.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Returns up to `fetch` entries matching `predicate`, ordered by
    /// `(performed_at DESC, id DESC)`.
    async fn list_entries(
        &self,
        predicate: &AuditLogPredicate,
        fetch: usize,
    ) -> AppResult<Vec<AuditLogEntry>>;
}
