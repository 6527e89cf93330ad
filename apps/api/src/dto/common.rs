mod conversions;
mod types;

pub use types::{
    ForgotPasswordRequest, GenericMessageResponse, HealthDependencyStatus, HealthResponse,
    OpenSessionRequest, UserIdentityResponse,
};
