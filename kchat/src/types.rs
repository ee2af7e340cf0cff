//! Turn outcome types.

use std::fmt::{Display, Formatter};

use kprovider::{Message, TokenUsage};
use ktooling::ToolResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Throwaway query asking the model which tools it needs.
    Probe,
    /// Query over the stored conversation.
    Durable,
}

impl Display for TurnPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Probe => "probe",
            Self::Durable => "durable",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnTermination {
    Answered,
    FinalAnswerMarker,
    /// The last completion was still a directive when the step budget ran out.
    StepBudgetExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: Message,
    pub termination: TurnTermination,
    /// Completion round-trips spent, probe included.
    pub steps: u32,
    /// Every tool result produced during the turn, in execution order.
    pub tool_results: Vec<ToolResult>,
    pub usage: TokenUsage,
}

impl TurnOutcome {
    pub fn text(&self) -> &str {
        &self.reply.content
    }

    pub fn is_exhausted(&self) -> bool {
        self.termination == TurnTermination::StepBudgetExhausted
    }
}
