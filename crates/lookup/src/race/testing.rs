//! Scripted in-memory provider for exercising retry and race logic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::LookupError;
use crate::models::Address;
use crate::provider::AddressProvider;

/// What one attempt does once its latency has elapsed.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Step {
    Answer,
    Malformed,
    RateLimited,
    NotFound,
    Hang,
}

pub(crate) struct ScriptedProvider {
    id: &'static str,
    name: &'static str,
    latency: Duration,
    script: Mutex<Vec<Step>>,
    fallback: Step,
    attempts: AtomicUsize,
}

impl ScriptedProvider {
    fn new(id: &'static str, name: &'static str, latency: Duration, fallback: Step) -> Self {
        Self {
            id,
            name,
            latency,
            script: Mutex::new(Vec::new()),
            fallback,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Answers every attempt after `latency`.
    pub(crate) fn answering(id: &'static str, name: &'static str, latency: Duration) -> Self {
        Self::new(id, name, latency, Step::Answer)
    }

    /// Sends a malformed body on every attempt after `latency`.
    pub(crate) fn failing(id: &'static str, name: &'static str, latency: Duration) -> Self {
        Self::new(id, name, latency, Step::Malformed)
    }

    /// Reports the code as unknown on every attempt after `latency`.
    pub(crate) fn missing(id: &'static str, name: &'static str, latency: Duration) -> Self {
        Self::new(id, name, latency, Step::NotFound)
    }

    /// Never completes an attempt.
    pub(crate) fn hanging(id: &'static str, name: &'static str) -> Self {
        Self::new(id, name, Duration::ZERO, Step::Hang)
    }

    /// Steps played in order before falling back to the default behavior.
    pub(crate) fn with_script(self, steps: Vec<Step>) -> Self {
        let mut reversed = steps;
        reversed.reverse();
        Self {
            script: Mutex::new(reversed),
            ..self
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> Step {
        self.script
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(self.fallback)
    }
}

#[async_trait]
impl AddressProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let step = self.next_step();
        tokio::time::sleep(self.latency).await;

        match step {
            Step::Answer => Ok(Address::new(
                self.name,
                postal_code,
                "PE",
                "Recife",
                "Centro",
                "Rua X",
            )),
            Step::Malformed => Err(LookupError::Parse {
                provider: self.id.to_string(),
                message: "expected value at line 1 column 1".to_string(),
            }),
            Step::RateLimited => Err(LookupError::RateLimited {
                provider: self.id.to_string(),
            }),
            Step::NotFound => Err(LookupError::NotFound {
                provider: self.id.to_string(),
                postal_code: postal_code.to_string(),
            }),
            Step::Hang => std::future::pending().await,
        }
    }
}
