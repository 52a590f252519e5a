use async_trait::async_trait;

use super::{AuthError, AuthRequest, Authenticator, Identity};

/// Authenticator that accepts every request.
///
/// The caller's `X-Pubkey` header is passed through when present, otherwise
/// the identity is anonymous. Must be explicitly configured.
pub struct NoneAuthenticator;

impl NoneAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for NoneAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let mut identity = Identity::anonymous();
        if let Some(pubkey) = request.pubkey() {
            identity.pubkey = pubkey.to_string();
        }
        Ok(identity)
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}
