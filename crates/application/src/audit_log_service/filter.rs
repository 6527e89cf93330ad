use chrono::{DateTime, Utc};
use fintrack_core::{AppError, AppResult, UserId};
use fintrack_domain::{AuditAction, AuditEntityType, AuditLogEntry};
use uuid::Uuid;

use super::cursor::AuditCursor;

/// Optional conjunctive filters over audit entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    entity_type: Option<AuditEntityType>,
    entity_id: Option<Uuid>,
    action: Option<AuditAction>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl AuditLogFilter {
    /// Builds a filter; `from` and `to` are both inclusive.
    pub fn new(
        entity_type: Option<AuditEntityType>,
        entity_id: Option<Uuid>,
        action: Option<AuditAction>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(AppError::Validation(
                "from_date must not be after to_date".to_owned(),
            ));
        }

        Ok(Self {
            entity_type,
            entity_id,
            action,
            from,
            to,
        })
    }

    /// Entity type filter.
    #[must_use]
    pub fn entity_type(&self) -> Option<AuditEntityType> {
        self.entity_type
    }

    /// Entity identifier filter.
    #[must_use]
    pub fn entity_id(&self) -> Option<Uuid> {
        self.entity_id
    }

    /// Action filter.
    #[must_use]
    pub fn action(&self) -> Option<AuditAction> {
        self.action
    }

    /// Inclusive lower bound on `performed_at`.
    #[must_use]
    pub fn from_date(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    /// Inclusive upper bound on `performed_at`.
    #[must_use]
    pub fn to_date(&self) -> Option<DateTime<Utc>> {
        self.to
    }
}

/// Full row predicate handed to repositories: owner, filters and continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditLogPredicate {
    /// Only entries of this owner match.
    pub owner: UserId,
    /// Optional filters.
    pub filter: AuditLogFilter,
    /// Continue strictly after this position.
    pub after: Option<AuditCursor>,
}

impl AuditLogPredicate {
    /// Evaluates the predicate against one entry.
    #[must_use]
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        let filter = &self.filter;

        entry.user_id == self.owner
            && filter.entity_type.is_none_or(|value| entry.entity_type == value)
            && filter.entity_id.is_none_or(|value| entry.entity_id == value)
            && filter.action.is_none_or(|value| entry.action == value)
            && filter.from.is_none_or(|from| entry.performed_at >= from)
            && filter.to.is_none_or(|to| entry.performed_at <= to)
            && self.after.is_none_or(|cursor| cursor.precedes(entry))
    }
}
