//! Exchange orchestration: one user prompt, one assistant reply, never overlapping.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mchat::{ExchangeOrchestrator, MessageRole};
//! use mprovider::{CompletionProvider, ProviderDescriptor, ProviderError, ProviderFuture, ProviderId};
//!
//! struct Echo;
//!
//! impl CompletionProvider for Echo {
//!     fn descriptor(&self) -> ProviderDescriptor {
//!         ProviderDescriptor::new(ProviderId::Ollama, "echo")
//!     }
//!
//!     fn generate<'a>(
//!         &'a self,
//!         prompt: &'a str,
//!         _context: &'a str,
//!     ) -> ProviderFuture<'a, Result<String, ProviderError>> {
//!         Box::pin(async move { Ok(prompt.to_uppercase()) })
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), mchat::ChatError> {
//! let orchestrator = ExchangeOrchestrator::builder(Arc::new(Echo)).build().await?;
//! let report = orchestrator.submit("hallo").await?;
//! assert_eq!(report.assistant_message.content, "HALLO");
//!
//! let snapshot = orchestrator.snapshot();
//! assert_eq!(snapshot.messages.len(), 2);
//! assert_eq!(snapshot.messages[1].role, MessageRole::Assistant);
//! assert!(!snapshot.busy);
//! # Ok(())
//! # }
//! ```

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Instant;

use futures_util::FutureExt;
use mcommon::SessionId;
use mprovider::{CompletionProvider, ProviderDescriptor, ProviderError};
use tokio::sync::{Mutex, watch};

use crate::{
    AccessGate, AlwaysAuthorized, ChatError, ChatMessage, ChatSnapshot, ConversationStore,
    ExchangeHooks, ExchangeIds, ExchangeOutcome, ExchangeReport, ExchangeState,
    InMemoryConversationStore, MessageRole, MessageSequencer, NoopExchangeHooks,
};

pub struct ExchangeOrchestratorBuilder {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<dyn ConversationStore>,
    gate: Arc<dyn AccessGate>,
    hooks: Arc<dyn ExchangeHooks>,
    session_id: SessionId,
}

impl ExchangeOrchestratorBuilder {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            store: Arc::new(InMemoryConversationStore::new()),
            gate: Arc::new(AlwaysAuthorized),
            hooks: Arc::new(NoopExchangeHooks),
            session_id: SessionId::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = store;
        self
    }

    pub fn gate(mut self, gate: Arc<dyn AccessGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ExchangeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Reads provider availability once and loads the store's current contents.
    ///
    /// New ids and timestamps continue after whatever the store already holds.
    pub async fn build(self) -> Result<ExchangeOrchestrator, ChatError> {
        let descriptor = self.provider.descriptor();
        let provider_available = self.provider.is_available();
        let messages = self.store.messages().await?;
        let sequencer = MessageSequencer::resuming(&messages);

        let (snapshots, _) = watch::channel(ChatSnapshot {
            messages,
            busy: false,
            provider_available,
            provider: descriptor.clone(),
        });

        Ok(ExchangeOrchestrator {
            provider: self.provider,
            store: self.store,
            gate: self.gate,
            hooks: self.hooks,
            session_id: self.session_id,
            descriptor,
            provider_available,
            sequencer,
            state: StdMutex::new(ExchangeState::Idle),
            slot: Mutex::new(ExchangeSlot::default()),
            snapshots,
        })
    }
}

#[derive(Debug, Default)]
struct ExchangeSlot {
    // Bumped by `clear`; a completion from an older generation is not stored.
    generation: u64,
}

struct PendingExchange<'a> {
    ids: ExchangeIds,
    generation: u64,
    guard: SendingGuard<'a>,
}

/// Returns the orchestrator to idle if an accepted exchange is dropped before
/// it settles, e.g. when the caller's `submit` future is cancelled.
struct SendingGuard<'a> {
    orchestrator: &'a ExchangeOrchestrator,
    exchange: ExchangeIds,
    armed: bool,
}

impl SendingGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = self
            .orchestrator
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // A later exchange may already own the slot.
        if let ExchangeState::Sending { exchange } = *state
            && exchange != self.exchange
        {
            return;
        }

        *state = ExchangeState::Idle;
        self.orchestrator
            .snapshots
            .send_if_modified(|snapshot| std::mem::replace(&mut snapshot.busy, false));
    }
}

pub struct ExchangeOrchestrator {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<dyn ConversationStore>,
    gate: Arc<dyn AccessGate>,
    hooks: Arc<dyn ExchangeHooks>,
    session_id: SessionId,
    descriptor: ProviderDescriptor,
    provider_available: bool,
    sequencer: MessageSequencer,
    // Synchronous so a cancelled exchange can reset it from `Drop`.
    state: StdMutex<ExchangeState>,
    slot: Mutex<ExchangeSlot>,
    snapshots: watch::Sender<ChatSnapshot>,
}

impl ExchangeOrchestrator {
    pub fn builder(provider: Arc<dyn CompletionProvider>) -> ExchangeOrchestratorBuilder {
        ExchangeOrchestratorBuilder::new(provider)
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    pub fn provider_available(&self) -> bool {
        self.provider_available
    }

    pub fn is_busy(&self) -> bool {
        self.snapshots.borrow().busy
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receives a fresh snapshot after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.snapshots.subscribe()
    }

    pub async fn check_provider_health(&self) -> bool {
        self.provider.check_health().await
    }

    /// Runs one exchange for `input`.
    ///
    /// Guard rejections return `Err` and change nothing. Once accepted, the
    /// exchange always settles with an assistant entry, provider failures
    /// included; only a store failure is returned as `Err` after acceptance.
    ///
    /// Dropping the returned future mid-exchange abandons the reply: the user
    /// entry stays in the transcript and the orchestrator goes back to idle.
    pub async fn submit(&self, input: &str) -> Result<ExchangeReport, ChatError> {
        let pending = self.begin(input).await?;
        self.settle(pending, input).await
    }

    /// Like [`submit`](Self::submit), but takes the text from the host's input
    /// buffer and empties it once the submission is accepted.
    pub async fn submit_buffer(&self, buffer: &mut String) -> Result<ExchangeReport, ChatError> {
        let pending = self.begin(buffer.as_str()).await?;
        let input = std::mem::take(buffer);
        self.settle(pending, &input).await
    }

    /// Empties the conversation. Allowed in any state.
    pub async fn clear(&self) -> Result<(), ChatError> {
        let mut slot = self.slot.lock().await;
        let removed = self.store.clear().await?;
        slot.generation += 1;
        let during_exchange = self.state().is_sending();
        self.publish().await;
        drop(slot);

        self.hooks.on_cleared(&self.session_id, removed, during_exchange);
        Ok(())
    }

    async fn begin(&self, input: &str) -> Result<PendingExchange<'_>, ChatError> {
        let slot = self.slot.lock().await;
        if let Err(error) = self.admit(input) {
            drop(slot);
            self.hooks.on_submit_rejected(&self.session_id, &error);
            return Err(error);
        }

        let ids = self.sequencer.reserve_exchange();
        let user = ChatMessage::new(ids.user, MessageRole::User, input, self.sequencer.stamp());
        self.store.append(user).await?;

        self.set_state(ExchangeState::Sending { exchange: ids });
        let guard = SendingGuard {
            orchestrator: self,
            exchange: ids,
            armed: true,
        };
        self.publish().await;

        Ok(PendingExchange {
            ids,
            generation: slot.generation,
            guard,
        })
    }

    fn admit(&self, input: &str) -> Result<(), ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::empty_input("input must not be empty"));
        }
        if !self.gate.is_authorized() {
            return Err(ChatError::unauthorized("sign in to send messages"));
        }
        if !self.provider_available {
            return Err(ChatError::unavailable(format!(
                "provider {} is not configured",
                self.descriptor
            )));
        }
        if self.state().is_sending() {
            return Err(ChatError::busy("an exchange is already in flight"));
        }

        Ok(())
    }

    async fn settle(
        &self,
        pending: PendingExchange<'_>,
        prompt: &str,
    ) -> Result<ExchangeReport, ChatError> {
        let PendingExchange {
            ids,
            generation,
            guard,
        } = pending;
        self.hooks.on_exchange_start(&self.session_id, ids);

        let started = Instant::now();
        let result = AssertUnwindSafe(self.provider.generate(prompt, ""))
            .catch_unwind()
            .await;
        let elapsed = started.elapsed();

        let (outcome, reply) = match result {
            Ok(Ok(reply)) => (ExchangeOutcome::Completed, reply),
            Ok(Err(error)) => (ExchangeOutcome::Failed(error), String::new()),
            Err(_) => (ExchangeOutcome::Failed(ProviderError::unclassified()), String::new()),
        };
        let content = outcome.transcript_text(reply);

        let slot = self.slot.lock().await;
        self.set_state(ExchangeState::Idle);
        let retained = slot.generation == generation;

        let assistant_message = ChatMessage::new(
            ids.assistant,
            MessageRole::Assistant,
            content,
            self.sequencer.stamp(),
        );
        let stored = if retained {
            self.store.append(assistant_message.clone()).await
        } else {
            Ok(())
        };
        self.publish().await;
        guard.disarm();
        drop(slot);

        let report = ExchangeReport {
            ids,
            outcome,
            assistant_message,
            elapsed,
            retained: retained && stored.is_ok(),
        };
        self.hooks.on_exchange_settled(&self.session_id, &report);

        stored.map(|_| report)
    }

    fn state(&self) -> ExchangeState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: ExchangeState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    async fn publish(&self) {
        let messages = match self.store.messages().await {
            Ok(messages) => messages,
            Err(_) => self.snapshots.borrow().messages.clone(),
        };

        self.snapshots.send_replace(ChatSnapshot {
            messages,
            busy: self.state().is_sending(),
            provider_available: self.provider_available,
            provider: self.descriptor.clone(),
        });
    }
}

impl std::fmt::Debug for ExchangeOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeOrchestrator")
            .field("session_id", &self.session_id)
            .field("descriptor", &self.descriptor)
            .field("provider_available", &self.provider_available)
            .finish_non_exhaustive()
    }
}
