use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the different states an agent can be in during one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AgentState {
    /// The agent is inactive and waiting.
    Idle,

    /// The agent is scanning its withdrawn inbox for a matching message.
    Scanning,

    /// The agent is waiting on the external generation call.
    Generating,

    /// The agent produced its output and forwarded it.
    Done,

    /// The agent's inbox held no matching message; nothing was produced.
    Stalled,
}

impl fmt::Display for AgentState {
    /// Converts an `AgentState` into a human-readable string.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state_str = match self {
            AgentState::Idle => "Idle",
            AgentState::Scanning => "Scanning",
            AgentState::Generating => "Generating",
            AgentState::Done => "Done",
            AgentState::Stalled => "Stalled",
        };
        write!(f, "{}", state_str)
    }
}
