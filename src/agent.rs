// agent.rs

use crate::error::GenerationError;
use crate::generation::TextGenerator;
use crate::logging;
use crate::mailbox::Mailbox;
use crate::message::{Message, MessageKind};
use crate::prompt;
use crate::state::AgentState;
use std::collections::HashMap;
use std::sync::Arc;

/// Well-known agent names. The name is the addressing key for the mailbox.
pub const RESEARCHER: &str = "Researcher";
pub const WRITER: &str = "Writer";
pub const EDITOR: &str = "Editor";
pub const COORDINATOR: &str = "Coordinator";

/// A role-specialized pipeline agent.
///
/// All variants share one concrete type; what distinguishes a researcher
/// from a writer or an editor is data: the instruction template, the message
/// kind it expects, the kind it emits and the agent it forwards to. Rewiring
/// the pipeline or inserting a new role is a constructor, not a new type.
///
/// Agents never call each other. They communicate only through the shared
/// mailbox, addressed by name.
pub struct Agent {
    pub name: String,
    pub role: String,
    state: AgentState,
    pub(crate) expects: Option<MessageKind>,
    pub(crate) emits: MessageKind,
    pub(crate) forward_to: Option<String>,
    template: &'static str,
    input_var: &'static str,
    mailbox: Arc<Mailbox>,
    generator: Arc<dyn TextGenerator>,
}

impl Agent {
    /// Pipeline entry point: researches a topic and forwards notes to the
    /// writer. Expects no inbox input.
    pub fn researcher(mailbox: Arc<Mailbox>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            name: RESEARCHER.to_string(),
            role: "technology research specialist".to_string(),
            state: AgentState::Idle,
            expects: None,
            emits: MessageKind::Research,
            forward_to: Some(WRITER.to_string()),
            template: prompt::RESEARCHER,
            input_var: "topic",
            mailbox,
            generator,
        }
    }

    /// Turns research notes into an article draft for the editor.
    pub fn writer(mailbox: Arc<Mailbox>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            name: WRITER.to_string(),
            role: "technical writing specialist".to_string(),
            state: AgentState::Idle,
            expects: Some(MessageKind::Research),
            emits: MessageKind::Draft,
            forward_to: Some(EDITOR.to_string()),
            template: prompt::WRITER,
            input_var: "research",
            mailbox,
            generator,
        }
    }

    /// Polishes a draft into the final article, handed to the coordinator.
    pub fn editor(mailbox: Arc<Mailbox>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            name: EDITOR.to_string(),
            role: "review and editing specialist".to_string(),
            state: AgentState::Idle,
            expects: Some(MessageKind::Draft),
            emits: MessageKind::Final,
            forward_to: Some(COORDINATOR.to_string()),
            template: prompt::EDITOR,
            input_var: "draft",
            mailbox,
            generator,
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Deposits a message into the shared mailbox on this agent's behalf.
    pub fn send(&self, recipient: &str, content: String, kind: MessageKind) -> Message {
        self.mailbox.deposit(&self.name, recipient, content, kind)
    }

    /// Withdraws every pending message addressed to this agent.
    pub fn receive(&self) -> Vec<Message> {
        self.mailbox.withdraw(&self.name)
    }

    /// Diagnostic output, not part of the coordination contract.
    pub fn log_activity(&self, text: &str) {
        logging::info(&format!("[{}] {}", self.name, text));
    }

    /// Entry-point operation for agents with no upstream message to consume:
    /// generates from the given topic and forwards the result.
    pub async fn produce(&mut self, topic: &str) -> Result<String, GenerationError> {
        self.log_activity(&format!("working on: {}", topic));
        self.state = AgentState::Generating;

        let mut vars = HashMap::new();
        vars.insert(self.input_var.to_string(), topic.to_string());

        let text = match self.generator.generate(self.template, &vars).await {
            Ok(text) => text,
            Err(e) => {
                self.state = AgentState::Idle;
                return Err(e);
            }
        };

        if let Some(next) = &self.forward_to {
            self.send(next, text.clone(), self.emits.clone());
        }
        self.state = AgentState::Done;
        Ok(text)
    }

    /// Withdraws the inbox and scans it in delivery order for the first
    /// message of the expected kind. On a match, generates from its content
    /// and forwards the result tagged with this agent's output kind.
    ///
    /// Returns `Ok(None)` when nothing matched: an agent with no relevant
    /// work is a no-op, not a fault. Non-matching messages encountered
    /// during the scan are dropped; they were already withdrawn and nobody
    /// else will see them.
    pub async fn process_inbox(&mut self) -> Result<Option<String>, GenerationError> {
        self.state = AgentState::Scanning;
        let inbox = self.receive();
        logging::debug(&format!(
            "[{}] withdrew {} message(s)",
            self.name,
            inbox.len()
        ));

        let expected = match &self.expects {
            Some(kind) => kind.clone(),
            None => {
                self.state = AgentState::Stalled;
                return Ok(None);
            }
        };

        for message in inbox {
            if message.kind != expected {
                logging::warn(&format!(
                    "[{}] dropping {} message from {}",
                    self.name, message.kind, message.sender
                ));
                continue;
            }

            self.log_activity(&format!("processing {} from {}", message.kind, message.sender));
            self.state = AgentState::Generating;

            let mut vars = HashMap::new();
            vars.insert(self.input_var.to_string(), message.content);

            let text = match self.generator.generate(self.template, &vars).await {
                Ok(text) => text,
                Err(e) => {
                    self.state = AgentState::Idle;
                    return Err(e);
                }
            };

            if let Some(next) = &self.forward_to {
                self.send(next, text.clone(), self.emits.clone());
            }
            self.state = AgentState::Done;
            return Ok(Some(text));
        }

        self.state = AgentState::Stalled;
        Ok(None)
    }
}
