use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use fintrack_core::AppError;
use fintrack_domain::AuditLogEntry;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Position in the `(performed_at DESC, id DESC)` ordering of one owner's entries.
///
/// The wire form is URL-safe base64 over a two-field JSON object. Callers treat
/// it as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AuditCursor {
    /// Timestamp of the last entry on the previous page.
    pub performed_at: DateTime<Utc>,
    /// Identifier of the last entry on the previous page.
    pub id: Uuid,
}

/// Every way an opaque cursor token can fail to decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorDecodeError {
    /// The token is not URL-safe base64.
    #[error("cursor is not valid base64")]
    Encoding,
    /// The decoded bytes are not a cursor object.
    #[error("cursor payload is malformed: {0}")]
    Payload(String),
}

impl From<CursorDecodeError> for AppError {
    fn from(error: CursorDecodeError) -> Self {
        Self::InvalidCursor(error.to_string())
    }
}

impl AuditCursor {
    /// Cursor positioned at `entry`.
    #[must_use]
    pub fn from_entry(entry: &AuditLogEntry) -> Self {
        Self {
            performed_at: entry.performed_at,
            id: entry.id,
        }
    }

    /// Encodes the cursor as an opaque token.
    #[must_use]
    pub fn encode(&self) -> String {
        let payload = serde_json::json!({
            "performed_at": self.performed_at,
            "id": self.id,
        });
        URL_SAFE_NO_PAD.encode(payload.to_string())
    }

    /// Decodes a token produced by [`Self::encode`].
    pub fn decode(token: &str) -> Result<Self, CursorDecodeError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CursorDecodeError::Encoding)?;

        serde_json::from_slice(&bytes).map_err(|error| CursorDecodeError::Payload(error.to_string()))
    }

    /// Keyset continuation test: strictly after this cursor in descending order.
    #[must_use]
    pub fn precedes(&self, entry: &AuditLogEntry) -> bool {
        entry.sort_key() < (self.performed_at, self.id)
    }
}
