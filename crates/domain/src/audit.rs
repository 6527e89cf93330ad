use std::str::FromStr;

use chrono::{DateTime, Utc};
use fintrack_core::{AppError, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Kinds of records tracked by the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityType {
    /// A row in `transactions`.
    Transaction,
    /// A row in `goals`.
    Goal,
    /// A row in `goal_events`.
    GoalEvent,
}

impl AuditEntityType {
    /// Returns a stable storage value for this entity type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Goal => "goal",
            Self::GoalEvent => "goal_event",
        }
    }
}

impl FromStr for AuditEntityType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "transaction" => Ok(Self::Transaction),
            "goal" => Ok(Self::Goal),
            "goal_event" => Ok(Self::GoalEvent),
            _ => Err(AppError::Validation(format!(
                "entity_type must be one of transaction, goal, goal_event; got '{value}'"
            ))),
        }
    }
}

/// Mutation recorded by an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Row inserted.
    Create,
    /// Row updated.
    Update,
    /// Row deleted.
    Delete,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "action must be one of CREATE, UPDATE, DELETE; got '{value}'"
            ))),
        }
    }
}

/// Immutable record of a past mutation, written by database triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Entry identifier; breaks ties between equal timestamps.
    pub id: Uuid,
    /// Owner of the mutated record.
    pub user_id: UserId,
    /// Kind of the mutated record.
    pub entity_type: AuditEntityType,
    /// Identifier of the mutated record.
    pub entity_id: Uuid,
    /// Mutation kind.
    pub action: AuditAction,
    /// Row state before the mutation; absent for creates.
    pub old_data: Option<Value>,
    /// Row state after the mutation; absent for deletes.
    pub new_data: Option<Value>,
    /// When the mutation happened.
    pub performed_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Composite ordering key; listings sort by it descending.
    #[must_use]
    pub fn sort_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.performed_at, self.id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AuditAction, AuditEntityType};

    #[test]
    fn action_storage_values_are_upper_case() {
        assert_eq!(AuditAction::Delete.as_str(), "DELETE");
        assert!(AuditAction::from_str("delete").is_err());
    }

    #[test]
    fn entity_type_rejects_unknown_values() {
        assert!(AuditEntityType::from_str("category").is_err());
        assert!(matches!(
            AuditEntityType::from_str("goal_event"),
            Ok(AuditEntityType::GoalEvent)
        ));
    }
}
