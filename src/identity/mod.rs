/// Identity provider adapter.
///
/// - `firebase` - Google sign-in through the Firebase web SDK popup
mod firebase;

pub use firebase::FirebaseIdentity;

use crate::error::AuthError;
use crate::types::UserProfile;
use async_trait::async_trait;

/// Result of a successful interactive sign-in.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    pub user: UserProfile,
    /// Opaque ID token presented as the bearer credential.
    pub token: String,
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn sign_in(&self) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}
