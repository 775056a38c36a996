use std::process::Command;
use std::sync::Mutex;

use crate::auth::domain::access_token_provider::{AccessTokenProvider, AuthError};
use crate::shared::constants::GCLOUD_PROGRAM;

const PRINT_TOKEN_ARGS: &[&str] = &["auth", "application-default", "print-access-token"];

/// Obtains application-default credentials through the `gcloud` CLI.
///
/// The command runs on first use only; the token is cached for the lifetime
/// of the provider, which matches the lifetime of a single CLI invocation.
pub struct GcloudTokenProvider {
    program: String,
    cached: Mutex<Option<String>>,
}

impl GcloudTokenProvider {
    pub fn new() -> Self {
        Self::with_program(GCLOUD_PROGRAM)
    }

    /// Uses a different executable, e.g. an absolute path to `gcloud`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cached: Mutex::new(None),
        }
    }

    fn fetch(&self) -> Result<String, AuthError> {
        log::debug!("Requesting access token from {}", self.program);
        let output = Command::new(&self.program)
            .args(PRINT_TOKEN_ARGS)
            .output()
            .map_err(|source| AuthError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AuthError::Command {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(token)
    }
}

impl Default for GcloudTokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessTokenProvider for GcloudTokenProvider {
    fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        let token = self.fetch()?;
        *cached = Some(token.clone());
        Ok(token)
    }
}
