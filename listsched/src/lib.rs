/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! listsched – greedy list scheduling of fixed-duration tasks
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – Task / TaskSet and the `name duration` parser
//! ├── config/       – YAML run configuration
//! ├── scheduler/    – LongestFirst / ShortestFirst tick simulation
//! │   └── bounds    – makespan lower bound and Graham guarantee
//! └── report        – `Processador_<n>` text rendering
//! ```

pub mod config;
pub mod report;
pub mod scheduler;
pub mod task;

pub use scheduler::{
    schedule, ListScheduler, ProcessorTimeline, ScheduleResult, ScheduledEntry, SchedulerError,
    SchedulingPolicy,
};
pub use task::{Task, TaskError, TaskSet};
