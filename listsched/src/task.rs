/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task data structures and the task-source parser.
//!
//! Two types model the input side of the scheduling pipeline:
//!
//! ```text
//! tasks.txt  ──(parse_str)──►  TaskSet [Task, Task, …]  ──(ListScheduler)──►  ScheduleResult
//!                               ↑ input order = original_position
//! ```
//!
//! # Ownership model
//! [`TaskSet`] is the only way to construct a [`Task`].  It assigns
//! `original_position` from insertion order, so positions are always exactly
//! `0..len` and never need to be re-validated by the scheduler.  Tasks are
//! immutable once pushed; the scheduler only ever borrows the set.
//!
//! # Input format
//! ```text
//! compile 5
//! link 3
//!
//! package 5
//! ```
//! One `name duration` pair per line.  Blank lines are skipped and do not
//! consume a position.

use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Reasons a task definition is rejected.
///
/// `MalformedLine` and `InvalidDuration` only come from the text parser and
/// carry the 1-based line number of the offending input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// A non-blank line did not split into exactly two fields.
    #[error("line {line}: expected `name duration`, got '{content}'")]
    MalformedLine { line: usize, content: String },

    /// The duration field is not an integer.
    #[error("line {line}: duration '{value}' of task '{name}' is not an integer")]
    InvalidDuration {
        line: usize,
        name: String,
        value: String,
    },

    /// Duration is zero or negative.  A zero-length task would be dispatched
    /// and released within the same tick, so it is rejected up front.
    #[error("task '{name}' has non-positive duration {duration}")]
    NonPositiveDuration { name: String, duration: i64 },

    /// Name is empty or contains whitespace (it would not survive a round trip
    /// through the `name duration` text format).
    #[error("invalid task name '{name}': names must be non-empty and contain no whitespace")]
    InvalidName { name: String },

    /// Adding the task would push the summed duration of the set past
    /// `u64::MAX`, the latest tick a schedule can represent.
    #[error("task '{name}' with duration {duration} overflows the total duration")]
    TotalDurationOverflow { name: String, duration: i64 },
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// A named unit of work with a fixed, strictly positive duration in ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    duration: u64,
    position: usize,
}

impl Task {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in ticks.  Always `>= 1`.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// 0-based index of this task among the non-blank input entries.
    pub fn original_position(&self) -> usize {
        self.position
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// Ordered, validated sequence of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<Task>,
    /// Sum of all durations; bounds every tick the scheduler can reach.
    total: u64,
}

impl TaskSet {
    /// Creates an empty task set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task, assigning it the next `original_position`.
    ///
    /// # Errors
    /// [`TaskError::InvalidName`], [`TaskError::NonPositiveDuration`] or
    /// [`TaskError::TotalDurationOverflow`].
    pub fn push(&mut self, name: impl Into<String>, duration: i64) -> Result<&Task, TaskError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(TaskError::InvalidName { name });
        }
        if duration <= 0 {
            return Err(TaskError::NonPositiveDuration { name, duration });
        }
        let Some(total) = self.total.checked_add(duration as u64) else {
            return Err(TaskError::TotalDurationOverflow { name, duration });
        };

        let position = self.tasks.len();
        self.tasks.push(Task {
            name,
            duration: duration as u64,
            position,
        });
        self.total = total;
        Ok(&self.tasks[position])
    }

    /// Builds a set from `(name, duration)` pairs in order.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, TaskError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, duration) in pairs {
            set.push(name, duration)?;
        }
        Ok(set)
    }

    /// Parses the `name duration` text format.
    ///
    /// Leading and trailing whitespace on a line is ignored and fields may be
    /// separated by any run of whitespace.  Blank lines are skipped without
    /// consuming a position.
    pub fn parse_str(input: &str) -> Result<Self, TaskError> {
        let mut set = Self::new();

        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let [name, value] = fields.as_slice() else {
                return Err(TaskError::MalformedLine {
                    line,
                    content: trimmed.to_string(),
                });
            };

            let duration: i64 = value.parse().map_err(|_| TaskError::InvalidDuration {
                line,
                name: name.to_string(),
                value: value.to_string(),
            })?;

            let task = set.push(*name, duration)?;
            debug!(
                line     = line,
                task     = %task.name,
                duration = task.duration,
                position = task.position,
                "task parsed"
            );
        }

        Ok(set)
    }

    /// Reads and parses a task file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or any line is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading tasks from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open task file: {}", path.display()))?;

        let set = Self::parse_str(&content)
            .with_context(|| format!("Failed to parse task file: {}", path.display()))?;

        info!(
            task_count = set.len(),
            total_duration = set.total_duration(),
            "Task file loaded"
        );
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Sum of all durations.  Never exceeds `u64::MAX`.
    pub fn total_duration(&self) -> u64 {
        self.total
    }

    /// Longest single duration, `0` for an empty set.
    pub fn max_duration(&self) -> u64 {
        self.tasks.iter().map(|t| t.duration).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
