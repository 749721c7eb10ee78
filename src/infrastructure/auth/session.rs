/// Credentials attached to outgoing API requests.
///
/// Obtaining the access token (Google sign-in, cookie session) happens
/// outside this crate; the session only carries it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    access_token: Option<String>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            access_token: (!token.trim().is_empty()).then_some(token),
        }
    }

    pub fn from_optional(token: Option<String>) -> Self {
        token.map(Self::with_token).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Value for the Authorization header, if signed in
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }
}
