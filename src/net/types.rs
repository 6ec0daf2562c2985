//! Wire types returned by the identity service.
//!
//! These are deserialized from service responses and never constructed
//! field-by-field by UI code; unknown response fields are ignored.

/// Authenticated user record embedded in a session.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    /// Unique user identifier assigned by the identity service.
    pub id: String,
    /// Email address the account was registered with.
    #[serde(default)]
    pub email: String,
}

/// Token bundle issued by the identity service on successful
/// authentication. Opaque to this app beyond presence and the embedded
/// user; token contents and refresh policy belong to the service.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}
