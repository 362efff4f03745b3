//! Lifecycle of one import run.

use std::fmt;

use crate::processor::Phase;

/// Where a run is. States only move forward:
/// `NotStarted -> ConnectingToStore -> LoadingSnapshot -> Phase(..)* ->
/// SummaryReported -> Disconnected`. A failed run skips straight to
/// `Disconnected` once a connection was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    ConnectingToStore,
    LoadingSnapshot,
    Phase(Phase),
    SummaryReported,
    Disconnected,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => f.write_str("not-started"),
            RunState::ConnectingToStore => f.write_str("connecting"),
            RunState::LoadingSnapshot => f.write_str("loading-snapshot"),
            RunState::Phase(phase) => write!(f, "phase:{}", phase),
            RunState::SummaryReported => f.write_str("summary-reported"),
            RunState::Disconnected => f.write_str("disconnected"),
        }
    }
}
