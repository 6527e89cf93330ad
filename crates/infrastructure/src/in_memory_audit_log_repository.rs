use async_trait::async_trait;
use fintrack_application::{AuditLogPredicate, AuditLogRepository};
use fintrack_core::AppResult;
use fintrack_domain::AuditLogEntry;
use tokio::sync::RwLock;

/// In-memory audit log repository implementation.
///
/// Entries are appended explicitly with [`Self::append`]; there are no
/// triggers outside PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryAuditLogRepository {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    pub async fn append(&self, entry: AuditLogEntry) {
        self.entries.write().await.push(entry);
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn list_entries(
        &self,
        predicate: &AuditLogPredicate,
        fetch: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.read().await;

        let mut matching: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|entry| predicate.matches(entry))
            .cloned()
            .collect();
        matching.sort_by(|left, right| right.sort_key().cmp(&left.sort_key()));
        matching.truncate(fetch);

        Ok(matching)
    }
}

#[cfg(test)]
mod tests;
