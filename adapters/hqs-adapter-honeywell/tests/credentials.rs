//! Credential resolution from `HQS_API_KEY`.
//!
//! Kept in its own test binary: it sets a process-wide variable.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hqs_adapter_honeywell::HoneywellClient;
use hqs_adapter_honeywell::config::{API_KEY_ENV, API_KEY_PROMPT, ClientConfig};
use hqs_hal::{ChainTokenProvider, EnvTokenProvider, PromptTokenProvider};

#[tokio::test]
async fn test_env_key_used_without_prompting() {
    // SAFETY: only this test binary touches HQS_API_KEY
    unsafe {
        std::env::set_var(API_KEY_ENV, "env-key");
    }

    // Picked up at construction.
    let client = HoneywellClient::new().unwrap();
    assert!(client.has_token());
    assert_eq!(
        client.api().session().access_token().get().as_deref(),
        Some("env-key")
    );

    // And by authenticate(), before the prompt is ever reached.
    let prompts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&prompts);
    let resolver = ChainTokenProvider::new()
        .with(EnvTokenProvider::new(API_KEY_ENV))
        .with(PromptTokenProvider::new(API_KEY_PROMPT, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok("typed".into())
        }));
    let client = HoneywellClient::with_config(ClientConfig::default(), Arc::new(resolver)).unwrap();
    assert!(!client.has_token());

    client.authenticate(None).await.unwrap();
    assert!(client.has_token());
    assert_eq!(prompts.load(Ordering::SeqCst), 0);
    assert_eq!(
        client.api().session().access_token().get().as_deref(),
        Some("env-key")
    );
}
