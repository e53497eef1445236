use crate::error::InternalError;
use types::SolveStatus;

/// The phases a single engine run passes through. A fresh engine always
/// starts `Idle`; reaching any of the solved states requires going through
/// `Encoded` first, and `Decoded` requires an `Optimal`/`Feasible` solve.
/// There is no way back from a terminal state — a new run needs a new
/// `EngineState::idle()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Encoded,
    Solved(SolveStatus),
    Decoded,
}

impl EngineState {
    pub fn idle() -> Self {
        EngineState::Idle
    }

    pub fn advance_to_encoded(self) -> Result<Self, InternalError> {
        match self {
            EngineState::Idle => Ok(EngineState::Encoded),
            other => Err(InternalError::PhaseOutOfOrder {
                expected: "idle",
                actual: other.label(),
            }),
        }
    }

    pub fn advance_to_solved(self, status: SolveStatus) -> Result<Self, InternalError> {
        match self {
            EngineState::Encoded => Ok(EngineState::Solved(status)),
            other => Err(InternalError::PhaseOutOfOrder {
                expected: "encoded",
                actual: other.label(),
            }),
        }
    }

    pub fn advance_to_decoded(self) -> Result<Self, InternalError> {
        match self {
            EngineState::Solved(SolveStatus::Optimal) | EngineState::Solved(SolveStatus::Feasible) => {
                Ok(EngineState::Decoded)
            }
            other => Err(InternalError::PhaseOutOfOrder {
                expected: "solved(optimal|feasible)",
                actual: other.label(),
            }),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Encoded => "encoded",
            EngineState::Solved(SolveStatus::Optimal) => "solved(optimal)",
            EngineState::Solved(SolveStatus::Feasible) => "solved(feasible)",
            EngineState::Solved(SolveStatus::Infeasible) => "solved(infeasible)",
            EngineState::Solved(SolveStatus::Unknown) => "solved(unknown)",
            EngineState::Decoded => "decoded",
        }
    }
}
