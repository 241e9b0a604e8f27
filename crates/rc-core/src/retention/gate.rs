//! Confirmation gate state machine.
//!
//! Defines a pure transition function for the delete-by-date confirmation dialog.
//! Timers are requested as actions and answered with events carrying the ticket
//! they were scheduled for, so a timer from an earlier opening can never move a
//! later one.

use serde::{Deserialize, Serialize};

use super::{DeletionOutcome, FrozenSelection, ValidationError};

/// Identifies one opening of the dialog.
///
/// 标识对话框的一次打开。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Ticket(pub u64);

impl Ticket {
    pub fn next(self) -> Self {
        Ticket(self.0.wrapping_add(1))
    }
}

/// Coarse dialog phase exposed to the presentation layer.
///
/// 暴露给展示层的对话框阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationState {
    Closed,
    Opening,
    Open,
    Committing,
}

impl std::fmt::Display for ConfirmationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConfirmationState::Closed => "closed",
            ConfirmationState::Opening => "opening",
            ConfirmationState::Open => "open",
            ConfirmationState::Committing => "committing",
        };
        f.write_str(name)
    }
}

/// Gate state.
///
/// 确认门状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    /// Dialog not shown.
    ///
    /// 对话框未显示。
    Closed,
    /// Dialog appearing; every dismissal is absorbed.
    ///
    /// 对话框正在打开，忽略所有关闭信号。
    Opening { ticket: Ticket },
    /// Dialog shown and dismissible.
    ///
    /// 对话框已打开，可关闭。
    Open { ticket: Ticket },
    /// Deletion running or its outcome on display. Not dismissible.
    ///
    /// 正在删除或展示结果，不可关闭。
    Committing {
        ticket: Ticket,
        selection: FrozenSelection,
        outcome: Option<DeletionOutcome>,
    },
}

impl GateState {
    pub fn phase(&self) -> ConfirmationState {
        match self {
            GateState::Closed => ConfirmationState::Closed,
            GateState::Opening { .. } => ConfirmationState::Opening,
            GateState::Open { .. } => ConfirmationState::Open,
            GateState::Committing { .. } => ConfirmationState::Committing,
        }
    }

    /// The frozen set of an in-flight or just-finished commit.
    pub fn committing_selection(&self) -> Option<&FrozenSelection> {
        match self {
            GateState::Committing { selection, .. } => Some(selection),
            _ => None,
        }
    }
}

impl Default for GateState {
    fn default() -> Self {
        GateState::Closed
    }
}

/// Presentation-layer signals that ask the dialog to go away.
///
/// 展示层发出的关闭请求信号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissSignal {
    EscapeKey,
    PointerOutside,
    FocusOutside,
    Overlay,
    CancelButton,
}

/// Events that drive the gate.
///
/// 驱动确认门的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateEvent {
    /// User asks for confirmation. `candidates` is `None` without a preview.
    ///
    /// 用户请求确认。
    RequestOpen {
        ticket: Ticket,
        candidates: Option<usize>,
    },
    /// Guard window of `ticket` elapsed.
    ///
    /// 打开保护窗口结束。
    SettleElapsed { ticket: Ticket },
    /// Dismissal request from the presentation layer.
    ///
    /// 关闭请求。
    Dismiss(DismissSignal),
    /// User confirms. Carries the set captured from the current preview.
    ///
    /// 用户确认删除。
    Confirm { selection: Option<FrozenSelection> },
    /// The commit returned and its outcome is recorded.
    ///
    /// 提交完成，结果已记录。
    CommitRecorded { outcome: DeletionOutcome },
    /// Outcome display delay of `ticket` elapsed.
    ///
    /// 结果展示时间结束。
    CloseElapsed { ticket: Ticket },
    /// The preview behind the dialog is gone (threshold changed, workflow reset).
    ///
    /// 预览已失效。
    Invalidate,
}

impl GateEvent {
    /// Short name for logs; avoids dumping whole selections.
    pub fn name(&self) -> &'static str {
        match self {
            GateEvent::RequestOpen { .. } => "request_open",
            GateEvent::SettleElapsed { .. } => "settle_elapsed",
            GateEvent::Dismiss(_) => "dismiss",
            GateEvent::Confirm { .. } => "confirm",
            GateEvent::CommitRecorded { .. } => "commit_recorded",
            GateEvent::CloseElapsed { .. } => "close_elapsed",
            GateEvent::Invalidate => "invalidate",
        }
    }
}

/// Side-effects produced by gate transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateAction {
    /// Request refused; state unchanged.
    Reject(ValidationError),
    /// Deliver `SettleElapsed { ticket }` after the guard window.
    ScheduleSettle { ticket: Ticket },
    /// Run the deletion for exactly this set.
    StartCommit { selection: FrozenSelection },
    /// Deliver `CloseElapsed { ticket }` after the display delay.
    ScheduleClose { ticket: Ticket },
    /// Dialog closed after a commit.
    Settled { outcome: DeletionOutcome },
}

/// Pure confirmation gate.
///
/// 纯状态机：不包含副作用。
pub struct ConfirmationGate;

impl ConfirmationGate {
    pub fn transition(state: GateState, event: GateEvent) -> (GateState, Vec<GateAction>) {
        match (state, event) {
            (GateState::Closed, GateEvent::RequestOpen { ticket, candidates }) => match candidates {
                None => (
                    GateState::Closed,
                    vec![GateAction::Reject(ValidationError::NoPreview)],
                ),
                Some(0) => (
                    GateState::Closed,
                    vec![GateAction::Reject(ValidationError::EmptyCandidateSet)],
                ),
                Some(_) => (
                    GateState::Opening { ticket },
                    vec![GateAction::ScheduleSettle { ticket }],
                ),
            },
            (GateState::Opening { ticket }, GateEvent::SettleElapsed { ticket: elapsed })
                if ticket == elapsed =>
            {
                (GateState::Open { ticket }, Vec::new())
            }
            (GateState::Open { .. }, GateEvent::Dismiss(_)) => (GateState::Closed, Vec::new()),
            (GateState::Open { ticket }, GateEvent::Confirm { selection }) => match selection {
                None => (
                    GateState::Open { ticket },
                    vec![GateAction::Reject(ValidationError::NoPreview)],
                ),
                Some(selection) if selection.is_empty() => (
                    GateState::Open { ticket },
                    vec![GateAction::Reject(ValidationError::EmptyCandidateSet)],
                ),
                Some(selection) => (
                    GateState::Committing {
                        ticket,
                        selection: selection.clone(),
                        outcome: None,
                    },
                    vec![GateAction::StartCommit { selection }],
                ),
            },
            (state, GateEvent::Confirm { .. }) => {
                (state, vec![GateAction::Reject(ValidationError::DialogNotOpen)])
            }
            (
                GateState::Committing {
                    ticket,
                    selection,
                    outcome: None,
                },
                GateEvent::CommitRecorded { outcome },
            ) => (
                GateState::Committing {
                    ticket,
                    selection,
                    outcome: Some(outcome),
                },
                vec![GateAction::ScheduleClose { ticket }],
            ),
            (
                GateState::Committing {
                    ticket,
                    outcome: Some(outcome),
                    ..
                },
                GateEvent::CloseElapsed { ticket: elapsed },
            ) if ticket == elapsed => (GateState::Closed, vec![GateAction::Settled { outcome }]),
            (GateState::Opening { .. } | GateState::Open { .. }, GateEvent::Invalidate) => {
                (GateState::Closed, Vec::new())
            }
            // Dismissals while Opening or Committing, stale timers, duplicate
            // requests: absorbed.
            (state, event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(phase = %state.phase(), event = event.name(), "gate event absorbed");
                #[cfg(not(feature = "tracing"))]
                let _ = event;
                (state, Vec::new())
            }
        }
    }
}
