/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the list scheduler.
//!
//! Task-level validation (names, durations) happens when a
//! [`TaskSet`](crate::task::TaskSet) is built and is reported as
//! [`TaskError`](crate::task::TaskError).  By the time a set reaches the
//! scheduler it is known to be valid, so the only remaining failure is a
//! processor configuration that cannot run anything.
//!
//! An empty task set is **not** an error: it yields one empty timeline per
//! processor.

use thiserror::Error;

/// Top-level error type returned by
/// [`ListScheduler::new()`](super::ListScheduler::new) and
/// [`schedule()`](super::schedule).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The processor count was zero.  With no processors the tick loop could
    /// never drain the task queue, so the run is refused before it starts.
    #[error("invalid processor count {count}: at least one processor is required")]
    InvalidProcessorCount { count: usize },
}
