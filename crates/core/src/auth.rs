use serde::{Deserialize, Serialize};

use crate::UserId;

/// User information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    email: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from data vouched for by the auth provider.
    #[must_use]
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }

    /// Returns the owner key for every resource this user touches.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
