use serde::Serialize;
use ts_rs::TS;

/// API representation of one audit entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-entry-response.ts"
)]
pub struct AuditLogEntryResponse {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub performed_at: String,
}

/// Continuation metadata for an audit page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-pagination-response.ts"
)]
pub struct AuditLogPaginationResponse {
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub limit: u32,
}

/// One page of audit entries, newest first.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-page-response.ts"
)]
pub struct AuditLogPageResponse {
    pub data: Vec<AuditLogEntryResponse>,
    pub pagination: AuditLogPaginationResponse,
}
