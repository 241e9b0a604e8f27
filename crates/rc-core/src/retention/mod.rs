//! Delete-by-date retention domain.
//! 按日期删除的保留策略领域。
//!
//! - `threshold`: the age cutoff and its coercion from raw input
//! - `preview`: pure candidate selection and the frozen deletion set
//! - `gate`: the confirmation dialog state machine
//! - `outcome`: decoding backend replies into a tagged outcome

mod error;
mod gate;
mod outcome;
mod preview;
mod threshold;

pub use error::ValidationError;
pub use gate::{
    ConfirmationGate, ConfirmationState, DismissSignal, GateAction, GateEvent, GateState, Ticket,
};
pub use outcome::{DeletionError, DeletionFailure, DeletionOutcome, DeletionReply, DeletionStatus};
pub use preview::{select_candidates, FrozenSelection, PreviewResult};
pub use threshold::AgeThreshold;
