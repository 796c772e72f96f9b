//! Credential resolution.
//!
//! Providers turn "I need a token" into a token string. They compose: the
//! usual setup tries an environment variable first and falls back to asking
//! the user.
//!
//! # Example
//!
//! ```ignore
//! use hqs_hal::auth::{ChainTokenProvider, EnvTokenProvider, PromptTokenProvider};
//!
//! let provider = ChainTokenProvider::new()
//!     .with(EnvTokenProvider::new("HQS_API_KEY"))
//!     .with(PromptTokenProvider::stdin("API Key:"));
//!
//! let token = provider.get_token().await?;
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::error::{HalError, HalResult};

/// Token provider trait for backends.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get a valid access token.
    async fn get_token(&self) -> HalResult<String>;

    /// Check if a token is available without user interaction.
    fn has_valid_token(&self) -> bool;
}

/// Environment variable token provider.
///
/// Simple provider that reads token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    env_var: String,
}

impl EnvTokenProvider {
    /// Create a new environment variable token provider.
    pub fn new(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
        }
    }

    /// Name of the variable this provider reads.
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Current value of the variable, if set and non-empty.
    pub fn lookup(&self) -> Option<String> {
        std::env::var(&self.env_var).ok().filter(|v| !v.is_empty())
    }
}

#[async_trait::async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn get_token(&self) -> HalResult<String> {
        self.lookup()
            .ok_or_else(|| HalError::Auth(format!("Environment variable {} not set", self.env_var)))
    }

    fn has_valid_token(&self) -> bool {
        self.lookup().is_some()
    }
}

/// A prompt function: shows a label and returns what the user typed.
pub type PromptFn = dyn Fn(&str) -> io::Result<String> + Send + Sync;

/// Token provider that asks for the token through a prompt function.
///
/// The prompt runs on tokio's blocking pool, so a console read does not
/// stall the runtime.
#[derive(Clone)]
pub struct PromptTokenProvider {
    label: String,
    prompt: Arc<PromptFn>,
}

impl PromptTokenProvider {
    /// Provider using a custom prompt function.
    pub fn new(
        label: impl Into<String>,
        prompt: impl Fn(&str) -> io::Result<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            prompt: Arc::new(prompt),
        }
    }

    /// Provider reading from standard input.
    pub fn stdin(label: impl Into<String>) -> Self {
        Self::new(label, stdin_prompt)
    }
}

impl std::fmt::Debug for PromptTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptTokenProvider")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TokenProvider for PromptTokenProvider {
    async fn get_token(&self) -> HalResult<String> {
        let prompt = Arc::clone(&self.prompt);
        let label = self.label.clone();

        let answer = tokio::task::spawn_blocking(move || prompt(&label))
            .await
            .map_err(|e| HalError::Auth(format!("Prompt task failed: {e}")))?
            .map_err(|e| HalError::Auth(format!("Failed to read token: {e}")))?;

        Ok(answer.trim().to_string())
    }

    fn has_valid_token(&self) -> bool {
        false
    }
}

/// Tries a list of providers in order; the first token obtained wins.
#[derive(Default)]
pub struct ChainTokenProvider {
    providers: Vec<Box<dyn TokenProvider>>,
}

impl ChainTokenProvider {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider.
    pub fn with(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

#[async_trait::async_trait]
impl TokenProvider for ChainTokenProvider {
    async fn get_token(&self) -> HalResult<String> {
        let mut last_err = None;
        for provider in &self.providers {
            match provider.get_token().await {
                Ok(token) => return Ok(token),
                Err(e) => {
                    tracing::debug!("Token provider failed: {}", e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| HalError::Auth("No token provider configured".into())))
    }

    fn has_valid_token(&self) -> bool {
        self.providers.iter().any(|p| p.has_valid_token())
    }
}

/// Print `label` on stdout and read one line from stdin.
pub fn stdin_prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
