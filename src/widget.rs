//! Tool widget: the submit/result state machine shared by single-shot tools.
//!
//! DESIGN
//! ======
//! `Idle -> Submitting -> {Success, Failed}`, re-enterable from either end
//! state. Blank input never leaves the current phase, and a second submit
//! while one is outstanding is refused with [`ToolError::Busy`], so each
//! accepted submit sends exactly one request.
//!
//! Requests are not cancelled. Closing the dialog calls [`Widget::reset`],
//! which bumps a generation counter; a reply that arrives for an older
//! generation is dropped instead of overwriting the fresh state.

use std::time::Instant;

use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::state::AppState;
use crate::tools::{Task, ToolError, run_task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<O> {
    Idle,
    Submitting,
    Success(O),
    Failed(ToolError),
}

/// Proof of an accepted submit. Hand it back to [`Widget::finish`].
#[derive(Debug)]
pub struct Ticket {
    generation: u64,
    started: Instant,
}

impl Ticket {
    #[must_use]
    pub fn started(&self) -> Instant {
        self.started
    }
}

pub struct Widget<T: Task> {
    phase: Phase<T::Output>,
    generation: u64,
    requests_sent: u64,
    last_started: Option<Instant>,
}

impl<T: Task> Default for Widget<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Task> Widget<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { phase: Phase::Idle, generation: 0, requests_sent: 0, last_started: None }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase<T::Output> {
        &self.phase
    }

    #[must_use]
    pub fn result(&self) -> Option<&T::Output> {
        match &self.phase {
            Phase::Success(output) => Some(output),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ToolError> {
        match &self.phase {
            Phase::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the submit control should be enabled for `task`.
    #[must_use]
    pub fn can_submit(&self, task: &T) -> bool {
        !matches!(self.phase, Phase::Submitting) && task.check_input().is_ok()
    }

    #[must_use]
    pub fn requests_sent(&self) -> u64 {
        self.requests_sent
    }

    /// When the most recent accepted submit began.
    #[must_use]
    pub fn last_started(&self) -> Option<Instant> {
        self.last_started
    }

    /// Enter `Submitting` for `task`.
    ///
    /// # Errors
    ///
    /// [`ToolError::Busy`] while a request is outstanding, or the task's own
    /// input error. Neither changes the phase.
    pub fn begin(&mut self, task: &T) -> Result<Ticket, ToolError> {
        if matches!(self.phase, Phase::Submitting) {
            return Err(ToolError::Busy);
        }
        task.check_input()?;

        let started = Instant::now();
        self.phase = Phase::Submitting;
        self.requests_sent += 1;
        self.last_started = Some(started);
        Ok(Ticket { generation: self.generation, started })
    }

    /// Settle the request behind `ticket`. Returns false for a stale ticket.
    pub fn finish(&mut self, ticket: Ticket, result: Result<T::Output, ToolError>) -> bool {
        if ticket.generation != self.generation {
            info!(tool = T::KIND.id(), "widget: dropped stale result");
            return false;
        }
        self.phase = match result {
            Ok(output) => Phase::Success(output),
            Err(e) => {
                warn!(tool = T::KIND.id(), code = e.error_code(), error = %e, "widget: request failed");
                Phase::Failed(e)
            }
        };
        true
    }

    /// Dialog closed: back to `Idle`, orphaning any outstanding request.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
    }

    /// Run one full submit: guard, request, parse, and score logging.
    ///
    /// A score log write failure is logged and does not fail the submit.
    ///
    /// # Errors
    ///
    /// Whatever [`Widget::begin`] or [`run_task`] reports.
    pub async fn submit(&mut self, state: &AppState, task: &T) -> Result<&T::Output, ToolError> {
        let ticket = self.begin(task)?;
        let result = run_task(state.llm.as_ref(), task).await;

        if let Ok(output) = &result
            && let Some((log, entry)) = task.score_entry(output, ticket.started.elapsed())
            && let Err(e) = state.scores.append(log, entry).await
        {
            warn!(key = log.key(), code = e.error_code(), error = %e, "widget: score log append failed");
        }

        self.finish(ticket, result);
        match &self.phase {
            Phase::Success(output) => Ok(output),
            Phase::Failed(e) => Err(e.clone()),
            Phase::Idle | Phase::Submitting => Err(ToolError::Unexpected("widget was reset".into())),
        }
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
