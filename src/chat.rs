//! Chat Controller
//!
//! Owns the input buffer, the busy flag and the message history. A send is
//! split into [`ChatController::begin_send`] (optimistic user message, busy on)
//! and [`ChatController::complete`] (answer or fallback, busy off) so a UI can
//! release its borrow of the controller while the request is in flight.
//!
//! ```text
//! IDLE --begin_send--> AWAITING_RESPONSE --complete--> IDLE
//! ```

use crate::api::{AskRequest, AskResponse, QaClient};
use crate::error::ClientResult;
use crate::history::{Message, MessageHistory};
use crate::session::SessionId;
use crate::store::KeyValueStore;

/// Assistant message substituted for any failed request
pub const FALLBACK_MESSAGE: &str =
    "⚠️ Could not connect to backend. Make sure the InsightX server is running.";

/// Shortcuts offered on an empty conversation
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What are the top reasons for transaction failures during peak hours?",
    "Which age group has the highest success rate for P2M transactions above ₹5,000?",
    "How do transaction volumes vary across states on weekends?",
    "What are the fraud flag patterns across different device types?",
];

/// A request that has been started but not yet settled
///
/// Carries the controller epoch it was issued under; completing it after the
/// controller was detached is a no-op.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a pending ask must be completed or the controller stays busy"]
pub struct PendingAsk {
    epoch: u64,
    request: AskRequest,
}

impl PendingAsk {
    pub fn request(&self) -> &AskRequest {
        &self.request
    }

    pub fn question(&self) -> &str {
        &self.request.question
    }
}

/// What happened to a [`ChatController::send`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing to send
    Empty,
    /// A send was already in flight
    Busy,
    /// The backend answered
    Answered,
    /// The request failed and the fallback message was appended
    Fallback,
    /// The controller was detached before the response arrived
    Stale,
}

/// Chat state for one session
#[derive(Debug)]
pub struct ChatController<S> {
    session_id: SessionId,
    history: MessageHistory<S>,
    input: String,
    busy: bool,
    epoch: u64,
}

impl<S: KeyValueStore> ChatController<S> {
    pub fn new(session_id: SessionId, history: MessageHistory<S>) -> Self {
        Self {
            session_id,
            history,
            input: String::new(),
            busy: false,
            epoch: 0,
        }
    }

    /// Replace the input buffer (the text box contents)
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the send button should be enabled
    pub fn can_send(&self) -> bool {
        !self.busy && !self.input.trim().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn messages(&self) -> &[Message] {
        self.history.messages()
    }

    pub fn history(&self) -> &MessageHistory<S> {
        &self.history
    }

    /// Changes whenever the list or the busy flag changes; scroll to the
    /// newest message when it does
    pub fn scroll_key(&self) -> (usize, bool) {
        (self.history.len(), self.busy)
    }

    /// Start a send
    ///
    /// Uses `text` when given (suggested questions), otherwise the input
    /// buffer. Returns `None` without touching any state when the text is
    /// blank or a send is already in flight.
    pub fn begin_send(&mut self, text: Option<&str>) -> Option<PendingAsk> {
        let question = text.unwrap_or(self.input.as_str()).trim().to_string();

        if question.is_empty() {
            return None;
        }
        if self.busy {
            tracing::debug!("Send dropped: a request is already in flight");
            return None;
        }

        self.input.clear();
        self.history.push(Message::user(question.clone()));
        self.busy = true;

        Some(PendingAsk {
            epoch: self.epoch,
            request: AskRequest {
                question,
                session_id: self.session_id.clone(),
            },
        })
    }

    /// Settle a send with the backend outcome
    ///
    /// Appends the answer, or the fallback message on any error, and clears
    /// the busy flag. Returns `false` if the pending ask belongs to an epoch
    /// that was detached.
    pub fn complete(&mut self, pending: PendingAsk, outcome: ClientResult<AskResponse>) -> bool {
        if pending.epoch != self.epoch {
            tracing::debug!(
                question = %pending.request.question,
                "Ignoring response for a detached chat"
            );
            return false;
        }

        match outcome {
            Ok(response) => self.history.push(Message::assistant(response.answer)),
            Err(e) => {
                tracing::warn!("Ask failed, showing fallback: {}", e);
                self.history.push(Message::assistant(FALLBACK_MESSAGE));
            }
        }

        self.busy = false;
        true
    }

    /// Send and wait for the answer
    pub async fn send<C: QaClient + ?Sized>(&mut self, client: &C, text: Option<&str>) -> SendOutcome {
        let blank = text.unwrap_or(self.input.as_str()).trim().is_empty();
        let pending = match self.begin_send(text) {
            Some(pending) => pending,
            None if blank => return SendOutcome::Empty,
            None => return SendOutcome::Busy,
        };

        let outcome = client.ask(pending.request()).await;
        let failed = outcome.is_err();

        if !self.complete(pending, outcome) {
            SendOutcome::Stale
        } else if failed {
            SendOutcome::Fallback
        } else {
            SendOutcome::Answered
        }
    }

    /// Empty the conversation and its persisted slot
    ///
    /// An in-flight request is not cancelled; its answer lands in the
    /// cleared list.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Orphan any in-flight request; its completion will be ignored
    pub fn detach(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::store::{MemoryStore, MESSAGES_KEY};
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    /// Scripted QA backend that records every question it receives
    struct ScriptedClient {
        reply: Result<String, u16>,
        asked: RefCell<Vec<AskRequest>>,
        cleared: Cell<bool>,
    }

    impl ScriptedClient {
        fn answering(answer: &str) -> Self {
            Self {
                reply: Ok(answer.to_string()),
                asked: RefCell::new(Vec::new()),
                cleared: Cell::new(false),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                asked: RefCell::new(Vec::new()),
                cleared: Cell::new(false),
            }
        }
    }

    #[async_trait(?Send)]
    impl QaClient for ScriptedClient {
        async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse> {
            self.asked.borrow_mut().push(request.clone());
            match &self.reply {
                Ok(answer) => Ok(AskResponse {
                    answer: answer.clone(),
                    session_id: Some(request.session_id.to_string()),
                }),
                Err(status) => Err(ClientError::Status {
                    status: *status,
                    message: "Internal Server Error".to_string(),
                }),
            }
        }

        async fn clear_session(&self, _session_id: &SessionId) -> ClientResult<()> {
            self.cleared.set(true);
            Ok(())
        }
    }

    fn controller(store: &MemoryStore) -> ChatController<MemoryStore> {
        let session = SessionId::load_or_create(store);
        ChatController::new(session, MessageHistory::load(store.clone()))
    }

    #[tokio::test]
    async fn test_send_appends_turn() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);
        let client = ScriptedClient::answering("Network timeouts lead.");

        chat.set_input("  top reasons for failures  ");
        let outcome = chat.send(&client, None).await;

        assert_eq!(outcome, SendOutcome::Answered);
        assert_eq!(
            chat.messages(),
            &[
                Message::user("top reasons for failures"),
                Message::assistant("Network timeouts lead."),
            ]
        );
        assert_eq!(chat.input(), "");
        assert!(!chat.is_busy());

        let asked = client.asked.borrow();
        assert_eq!(asked.len(), 1);
        assert_eq!(asked[0].session_id, *chat.session_id());
    }

    #[tokio::test]
    async fn test_failure_appends_single_fallback() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);
        let client = ScriptedClient::failing(500);

        let outcome = chat.send(&client, Some("top reasons for failures")).await;

        assert_eq!(outcome, SendOutcome::Fallback);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1], Message::assistant(FALLBACK_MESSAGE));
        assert!(!chat.is_busy());
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);
        let client = ScriptedClient::answering("unused");

        assert_eq!(chat.send(&client, None).await, SendOutcome::Empty);
        chat.set_input(" \t\n ");
        assert_eq!(chat.send(&client, None).await, SendOutcome::Empty);

        assert!(chat.messages().is_empty());
        assert!(client.asked.borrow().is_empty());
        assert!(!store.contains(MESSAGES_KEY));
    }

    #[test]
    fn test_send_while_busy_is_dropped() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);

        let first = chat.begin_send(Some("first")).expect("first send starts");
        assert!(chat.is_busy());

        chat.set_input("second");
        assert!(chat.begin_send(None).is_none());
        assert!(chat.begin_send(Some("third")).is_none());
        assert_eq!(chat.messages().len(), 1);
        // Dropped sends leave the input alone
        assert_eq!(chat.input(), "second");
        assert!(!chat.can_send());

        assert!(chat.complete(
            first,
            Ok(AskResponse {
                answer: "done".to_string(),
                session_id: None,
            })
        ));
        assert!(!chat.is_busy());
        assert!(chat.can_send());
        assert_eq!(chat.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_length_is_twice_accepted_sends() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);
        let ok = ScriptedClient::answering("ok");
        let down = ScriptedClient::failing(503);

        let mut accepted = 0;
        for (i, text) in ["a", "", "b", "   ", "c"].iter().enumerate() {
            let client = if i % 2 == 0 { &ok } else { &down };
            match chat.send(client, Some(*text)).await {
                SendOutcome::Answered | SendOutcome::Fallback => accepted += 1,
                _ => {}
            }
        }

        assert_eq!(accepted, 3);
        assert_eq!(chat.messages().len(), 2 * accepted);
    }

    #[test]
    fn test_detach_ignores_late_completion() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);

        let pending = chat.begin_send(Some("slow question")).unwrap();
        chat.detach();
        assert!(!chat.is_busy());

        let applied = chat.complete(
            pending,
            Ok(AskResponse {
                answer: "too late".to_string(),
                session_id: None,
            }),
        );
        assert!(!applied);
        assert_eq!(chat.messages(), &[Message::user("slow question")]);
    }

    #[test]
    fn test_clear_during_flight_keeps_answer() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);

        let pending = chat.begin_send(Some("q")).unwrap();
        chat.clear();
        assert!(!store.contains(MESSAGES_KEY));

        chat.complete(pending, Err(ClientError::Timeout));
        assert_eq!(chat.messages(), &[Message::assistant(FALLBACK_MESSAGE)]);
    }

    #[test]
    fn test_scroll_key_tracks_list_and_busy() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);
        assert_eq!(chat.scroll_key(), (0, false));

        let pending = chat.begin_send(Some("q")).unwrap();
        assert_eq!(chat.scroll_key(), (1, true));

        chat.complete(pending, Err(ClientError::Timeout));
        assert_eq!(chat.scroll_key(), (2, false));
    }

    #[test]
    fn test_typing_leaves_list_untouched() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);
        let pending = chat.begin_send(Some("q")).unwrap();
        chat.complete(pending, Err(ClientError::Timeout));
        let before = chat.messages().to_vec();

        chat.set_input("How many fail");
        chat.set_input("How many failed?");

        assert_eq!(chat.messages(), before.as_slice());
        assert_eq!(chat.scroll_key(), (2, false));
        assert!(chat.can_send());
    }

    #[test]
    fn test_history_survives_reload() {
        let store = MemoryStore::new();
        {
            let mut chat = controller(&store);
            let pending = chat.begin_send(Some("persist me")).unwrap();
            chat.complete(pending, Err(ClientError::Timeout));
        }

        let chat = controller(&store);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[0], Message::user("persist me"));
    }

    #[test]
    fn test_suggested_questions_are_sendable() {
        let store = MemoryStore::new();
        let mut chat = controller(&store);
        chat.set_input("draft");

        let pending = chat.begin_send(Some(SUGGESTED_QUESTIONS[0])).unwrap();
        assert_eq!(pending.question(), SUGGESTED_QUESTIONS[0]);
        // Clearing the box happens for shortcuts too
        assert_eq!(chat.input(), "");
    }
}
