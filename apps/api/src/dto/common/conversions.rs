use fintrack_core::UserIdentity;

use super::types::UserIdentityResponse;

impl From<UserIdentity> for UserIdentityResponse {
    fn from(identity: UserIdentity) -> Self {
        Self {
            user_id: identity.user_id().to_string(),
            email: identity.email().map(ToOwned::to_owned),
        }
    }
}
