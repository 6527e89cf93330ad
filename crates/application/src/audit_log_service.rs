//! Audit trail listing with keyset pagination.

mod cursor;
mod filter;
mod ports;
mod service;

pub use cursor::{AuditCursor, CursorDecodeError};
pub use filter::{AuditLogFilter, AuditLogPredicate};
pub use ports::AuditLogRepository;
pub use service::{
    AuditLogListQuery, AuditLogPage, AuditLogService, DEFAULT_AUDIT_PAGE_LIMIT,
    MAX_AUDIT_PAGE_LIMIT,
};
