use std::sync::Arc;

use fintrack_core::{AppError, AppResult, UserIdentity};
use fintrack_domain::AuditLogEntry;
use serde::Serialize;

use super::cursor::AuditCursor;
use super::filter::{AuditLogFilter, AuditLogPredicate};
use super::ports::AuditLogRepository;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_AUDIT_PAGE_LIMIT: u32 = 50;

/// Largest page size a caller may request.
pub const MAX_AUDIT_PAGE_LIMIT: u32 = 100;

/// Query parameters for audit log listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogListQuery {
    /// Optional filters.
    pub filter: AuditLogFilter,
    /// Opaque continuation token from a previous page.
    pub cursor: Option<String>,
    /// Requested page size.
    pub limit: Option<u32>,
}

/// One page of audit entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLogPage {
    /// Entries, newest first.
    pub entries: Vec<AuditLogEntry>,
    /// Whether another page follows.
    pub has_more: bool,
    /// Token for the next page when `has_more` is set.
    pub next_cursor: Option<String>,
    /// Effective page size.
    pub limit: u32,
}

/// Application service for reading the audit trail.
#[derive(Clone)]
pub struct AuditLogService {
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditLogService {
    /// Creates a new audit log service.
    #[must_use]
    pub fn new(repository: Arc<dyn AuditLogRepository>) -> Self {
        Self { repository }
    }

    /// Lists one page of the actor's audit entries.
    pub async fn list(
        &self,
        actor: &UserIdentity,
        query: AuditLogListQuery,
    ) -> AppResult<AuditLogPage> {
        let limit = effective_limit(query.limit)?;
        let after = query
            .cursor
            .as_deref()
            .map(AuditCursor::decode)
            .transpose()?;

        let predicate = AuditLogPredicate {
            owner: actor.user_id(),
            filter: query.filter,
            after,
        };

        let page_size = limit as usize;
        let mut entries = self
            .repository
            .list_entries(&predicate, page_size + 1)
            .await?;

        if let Some(foreign) = entries.iter().find(|entry| entry.user_id != actor.user_id()) {
            tracing::error!(
                entry_id = %foreign.id,
                "audit log repository returned an entry of another owner"
            );
            return Err(AppError::Internal(
                "audit log owner scoping violated".to_owned(),
            ));
        }

        let has_more = entries.len() > page_size;
        entries.truncate(page_size);
        let next_cursor = if has_more {
            entries
                .last()
                .map(|entry| AuditCursor::from_entry(entry).encode())
        } else {
            None
        };

        Ok(AuditLogPage {
            entries,
            has_more,
            next_cursor,
            limit,
        })
    }
}

fn effective_limit(requested: Option<u32>) -> AppResult<u32> {
    match requested {
        None => Ok(DEFAULT_AUDIT_PAGE_LIMIT),
        Some(limit) if (1..=MAX_AUDIT_PAGE_LIMIT).contains(&limit) => Ok(limit),
        Some(limit) => Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_AUDIT_PAGE_LIMIT}; got {limit}"
        ))),
    }
}
