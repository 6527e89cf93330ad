mod conversions;
mod types;

pub use types::{AuditLogEntryResponse, AuditLogPageResponse, AuditLogPaginationResponse};
