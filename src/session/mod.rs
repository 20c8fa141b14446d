//! Conversation log and session driver.
//!
//! The conversation is an append-only, in-memory log of user/agent
//! exchanges scoped to the process lifetime. The session wires the resolver
//! and the execution agent together and carries the one concurrency rule
//! this layer has: a single submission in flight at a time. Submissions
//! take `&mut self`, so exclusive ownership is the slot - concurrent
//! surfaces (the API server) serialize behind a mutex and queue in arrival
//! order. The user entry is appended before the suspending call and the
//! agent entry after it settles, so entries always pair up in submission
//! order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::command::AgentCommand;
use crate::dispatch::{ExecutionAgent, Outcome};
use crate::resolver::{Resolution, Resolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationEntry {
    /// Unique within the conversation, monotonically increasing from 1.
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub timestamp: DateTime<Utc>,
}

/// Append-only ordered log. Entries are never mutated or removed and live
/// only as long as the session.
#[derive(Debug, Default)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn append(&mut self, sender: Sender, text: impl Into<String>, outcome: Option<Outcome>) {
        let entry = ConversationEntry {
            id: self.next_id,
            text: text.into(),
            sender,
            outcome,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.entries.push(entry);
    }

    /// Ordered view over the log; re-iterable without side effects.
    pub fn entries(&self) -> impl Iterator<Item = &ConversationEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One user's interactive session: a conversation plus the resolver and
/// execution agent that service it.
pub struct Session {
    conversation: Conversation,
    resolver: Arc<dyn Resolver>,
    agent: Arc<dyn ExecutionAgent>,
}

impl Session {
    pub fn new(resolver: Arc<dyn Resolver>, agent: Arc<dyn ExecutionAgent>) -> Self {
        Self {
            conversation: Conversation::new(),
            resolver,
            agent,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Submit an already-validated command (manual mode) and return its
    /// outcome. Infallible: dispatch failures are outcome values, not
    /// faults.
    pub async fn submit_command(&mut self, command: AgentCommand) -> Outcome {
        info!("Dispatching {} via {} agent", command.kind(), self.agent.name());

        self.conversation.append(Sender::User, command.summary(), None);
        let outcome = self.agent.dispatch(&command).await;
        self.conversation
            .append(Sender::Agent, outcome.message.clone(), Some(outcome.clone()));

        outcome
    }

    /// Submit free text (chat mode): resolve, dispatch if a command came
    /// back, and record the exchange. Resolver trouble becomes an error
    /// entry in the conversation rather than a thrown fault, so no turn is
    /// ever silently dropped.
    pub async fn submit_chat(&mut self, text: &str) -> &ConversationEntry {
        self.conversation.append(Sender::User, text, None);

        match self.resolver.resolve(text).await {
            Ok(Resolution::Command(command)) => {
                info!("Resolved chat input to {}", command.kind());
                let outcome = self.agent.dispatch(&command).await;
                self.conversation
                    .append(Sender::Agent, outcome.message.clone(), Some(outcome));
            }
            Ok(Resolution::Reply(reply)) => {
                self.conversation.append(Sender::Agent, reply, None);
            }
            Err(e) => {
                self.conversation.append(
                    Sender::Agent,
                    format!("Error processing your request: {}", e),
                    None,
                );
            }
        }

        self.conversation.last().expect("entry appended above")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MockExecutionAgent;
    use crate::error::{ChainPilotError, ChainPilotResult};
    use async_trait::async_trait;
    use std::time::Duration;

    struct ScriptedResolver(Resolution);

    #[async_trait]
    impl Resolver for ScriptedResolver {
        async fn resolve(&self, _prompt: &str) -> ChainPilotResult<Resolution> {
            Ok(self.0.clone())
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl Resolver for FailingResolver {
        async fn resolve(&self, _prompt: &str) -> ChainPilotResult<Resolution> {
            Err(ChainPilotError::resolver_unavailable("connection refused"))
        }
    }

    fn session_with(resolution: Resolution) -> Session {
        Session::new(
            Arc::new(ScriptedResolver(resolution)),
            Arc::new(MockExecutionAgent::with_latency(Duration::ZERO)),
        )
    }

    #[test]
    fn conversation_ids_are_monotonic_from_one() {
        let mut conversation = Conversation::new();
        conversation.append(Sender::User, "a", None);
        conversation.append(Sender::Agent, "b", None);
        let ids: Vec<u64> = conversation.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn entries_iteration_is_restartable() {
        let mut conversation = Conversation::new();
        conversation.append(Sender::User, "a", None);
        assert_eq!(conversation.entries().count(), conversation.entries().count());
    }

    #[tokio::test]
    async fn conversational_reply_skips_dispatch() {
        let mut session = session_with(Resolution::Reply("2 + 2 equals 4.".to_string()));
        let entry = session.submit_chat("What is 2+2?").await;
        assert_eq!(entry.sender, Sender::Agent);
        assert_eq!(entry.text, "2 + 2 equals 4.");
        assert!(entry.outcome.is_none());
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test]
    async fn resolver_failure_becomes_an_error_entry() {
        let mut session = Session::new(
            Arc::new(FailingResolver),
            Arc::new(MockExecutionAgent::with_latency(Duration::ZERO)),
        );
        let entry = session.submit_chat("transfer something").await;
        assert!(entry.text.contains("Error processing your request"));
        assert!(entry.outcome.is_none());
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test]
    async fn submissions_append_strictly_paired_entries() {
        let mut session = session_with(Resolution::Reply("hello".to_string()));
        session.submit_chat("first").await;
        session.submit_chat("second").await;
        session.submit_command(AgentCommand::GetAgentAddress).await;

        let senders: Vec<Sender> = session.conversation().entries().map(|e| e.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::User,
                Sender::Agent,
                Sender::User,
                Sender::Agent,
                Sender::User,
                Sender::Agent,
            ]
        );
        let ids: Vec<u64> = session.conversation().entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}
