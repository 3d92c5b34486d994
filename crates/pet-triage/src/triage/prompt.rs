//! Assistant prompts and the cosmetic typing delay in front of them.
//!
//! Only one prompt may wait on the delay at a time. Scheduling a new prompt cancels
//! the pending one, so a slow prompt from an earlier step can never show up after the
//! owner has moved on. The delay never decides whether a transition is allowed.

use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

/// A follow-up message the assistant shows once the typing delay elapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub key: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingPrompt {
    pub ticket: u64,
    pub prompt: Prompt,
}

/// Single-slot record of the prompt waiting on the typing delay.
#[derive(Debug, Clone, Default)]
pub struct PromptSlot {
    next_ticket: u64,
    pending: Option<PendingPrompt>,
}

impl PromptSlot {
    /// Replaces any pending prompt and returns the ticket for the new one.
    pub fn schedule(&mut self, prompt: Prompt) -> u64 {
        self.cancel();
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(PendingPrompt { ticket, prompt });
        ticket
    }

    pub fn cancel(&mut self) -> Option<PendingPrompt> {
        self.pending.take()
    }

    /// Hands out the prompt once its delay elapsed, unless a later schedule or cancel
    /// already superseded the ticket.
    pub fn release(&mut self, ticket: u64) -> Option<Prompt> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending.take().map(|pending| pending.prompt)
            }
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingPrompt> {
        self.pending.as_ref()
    }
}

/// Tokio-backed timer that runs the delayed delivery. Holds at most one task and
/// aborts it before spawning the next.
#[derive(Debug)]
pub struct TypingTimer {
    delay: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TypingTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            handle: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, deliver: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            deliver();
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for TypingTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
