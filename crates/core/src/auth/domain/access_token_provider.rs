use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("access token is empty")]
    EmptyToken,
}

/// Supplies OAuth bearer tokens to the HTTP adapters.
///
/// Adapters receive a provider at construction time instead of looking up
/// ambient credentials themselves, so tests can hand in a fixed token.
pub trait AccessTokenProvider: Send + Sync {
    fn access_token(&self) -> Result<String, AuthError>;
}
