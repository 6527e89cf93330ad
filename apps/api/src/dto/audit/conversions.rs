use chrono::SecondsFormat;
use fintrack_application::AuditLogPage;
use fintrack_domain::AuditLogEntry;

use super::types::{AuditLogEntryResponse, AuditLogPageResponse, AuditLogPaginationResponse};

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            id: value.id.to_string(),
            entity_type: value.entity_type.as_str().to_owned(),
            entity_id: value.entity_id.to_string(),
            action: value.action.as_str().to_owned(),
            old_data: value.old_data,
            new_data: value.new_data,
            performed_at: value
                .performed_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

impl From<AuditLogPage> for AuditLogPageResponse {
    fn from(value: AuditLogPage) -> Self {
        Self {
            data: value
                .entries
                .into_iter()
                .map(AuditLogEntryResponse::from)
                .collect(),
            pagination: AuditLogPaginationResponse {
                next_cursor: value.next_cursor,
                has_more: value.has_more,
                limit: value.limit,
            },
        }
    }
}
