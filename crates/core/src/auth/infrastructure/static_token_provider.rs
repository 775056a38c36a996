use crate::auth::domain::access_token_provider::{AccessTokenProvider, AuthError};

/// Hands out a token supplied up front (flag, environment or config file).
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(Self { token })
    }
}

impl AccessTokenProvider for StaticTokenProvider {
    fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_trimmed_token() {
        let provider = StaticTokenProvider::new("  ya29.token\n").unwrap();
        assert_eq!(provider.access_token().unwrap(), "ya29.token");
    }

    #[test]
    fn test_rejects_blank_token() {
        assert!(matches!(
            StaticTokenProvider::new("   "),
            Err(AuthError::EmptyToken)
        ));
    }
}
