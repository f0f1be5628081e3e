//! Greedy list scheduler.
//!
//! [`ListScheduler`] distributes a [`TaskSet`] across `P` identical
//! processors by simulating discrete ticks.  At every tick each idle
//! processor, in index order, takes the next task from the dispatch queue.
//! The result is a [`ScheduleResult`]: one chronological
//! [`ProcessorTimeline`] per processor.
//!
//! # Policies
//!
//! | Policy | Primary key | Tie-break key | Order |
//! |---|---|---|---|
//! | `LongestFirst` | duration | `N − 1 − position` | descending |
//! | `ShortestFirst` | duration | `position` | ascending |
//!
//! The two rows are mirror images: flipping the policy reverses both keys at
//! once, so among equal durations the task that appears earlier in the input
//! is dispatched first under either policy.
//!
//! # Timing
//! A processor's busy counter is decremented in the same tick it receives a
//! task.  A task of duration `d` assigned at tick `t` is recorded as
//! `t..t + d` and the processor picks up its next task at tick `t + d`.
//!
//! # Example
//! ```rust,ignore
//! let tasks = TaskSet::from_pairs([("A", 5), ("B", 3), ("C", 5)])?;
//! let scheduler = ListScheduler::new(2)?;
//! let result = scheduler.schedule(&tasks, SchedulingPolicy::LongestFirst);
//! ```

pub mod bounds;
pub mod error;

pub use error::SchedulerError;

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use crate::task::{Task, TaskSet};

use bounds::{check_makespan, list_scheduling_bound, makespan_lower_bound};

// ── Scheduling policy ─────────────────────────────────────────────────────────

/// Order in which pending tasks are offered to idle processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Longest duration first (LPT).
    LongestFirst,
    /// Shortest duration first (SPT).
    ShortestFirst,
}

impl SchedulingPolicy {
    /// Both policies, in the order the CLI runs them.
    pub const ALL: [SchedulingPolicy; 2] =
        [SchedulingPolicy::LongestFirst, SchedulingPolicy::ShortestFirst];

    /// Secondary sort key for the task at `position` in a set of `task_count`.
    ///
    /// `position` must be `< task_count`; [`TaskSet`] guarantees this for
    /// every task it hands out.
    pub(crate) fn tie_break(self, position: usize, task_count: usize) -> usize {
        match self {
            SchedulingPolicy::LongestFirst => task_count - 1 - position,
            SchedulingPolicy::ShortestFirst => position,
        }
    }

    /// Comparator placing the task that should run first at the front.
    fn dispatch_cmp(self, a: &DispatchKey<'_>, b: &DispatchKey<'_>) -> Ordering {
        match self {
            SchedulingPolicy::LongestFirst => b
                .duration
                .cmp(&a.duration)
                .then_with(|| b.tie_break.cmp(&a.tie_break)),
            SchedulingPolicy::ShortestFirst => a
                .duration
                .cmp(&b.duration)
                .then_with(|| a.tie_break.cmp(&b.tie_break)),
        }
    }

    /// File name the report for this policy is written to by default.
    pub fn default_output_file(self) -> &'static str {
        match self {
            SchedulingPolicy::LongestFirst => "maior_primeiro.txt",
            SchedulingPolicy::ShortestFirst => "menor_primeiro.txt",
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingPolicy::LongestFirst => f.write_str("longest_first"),
            SchedulingPolicy::ShortestFirst => f.write_str("shortest_first"),
        }
    }
}

// ── Result types ──────────────────────────────────────────────────────────────

/// One task placed on one processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEntry {
    pub task_name: String,
    pub start_tick: u64,
    /// Always `start_tick + duration` of the originating task.
    pub end_tick: u64,
}

impl ScheduledEntry {
    pub fn duration(&self) -> u64 {
        self.end_tick - self.start_tick
    }
}

/// Entries assigned to one processor, in assignment (chronological) order.
pub type ProcessorTimeline = Vec<ScheduledEntry>;

/// Final scheduling result: one timeline per processor, indexed `0..P`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResult {
    timelines: Vec<ProcessorTimeline>,
}

impl ScheduleResult {
    pub fn processor_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn timelines(&self) -> &[ProcessorTimeline] {
        &self.timelines
    }

    pub fn timeline(&self, processor: usize) -> Option<&ProcessorTimeline> {
        self.timelines.get(processor)
    }

    /// Total number of scheduled entries across all processors.
    pub fn entry_count(&self) -> usize {
        self.timelines.iter().map(Vec::len).sum()
    }

    /// Latest `end_tick` of any entry, `0` when nothing was scheduled.
    pub fn makespan(&self) -> u64 {
        self.timelines
            .iter()
            .filter_map(|t| t.last())
            .map(|e| e.end_tick)
            .max()
            .unwrap_or(0)
    }

    /// Sum of entry durations on `processor` (`0` for an unknown index).
    pub fn busy_ticks(&self, processor: usize) -> u64 {
        self.timeline(processor)
            .map(|t| t.iter().map(ScheduledEntry::duration).sum())
            .unwrap_or(0)
    }
}

// ── Internal state types ──────────────────────────────────────────────────────

/// Sort record for one task: primary and secondary key plus the task itself.
#[derive(Debug, Clone, Copy)]
struct DispatchKey<'a> {
    duration: u64,
    tie_break: usize,
    task: &'a Task,
}

/// Simulated processor.  `remaining` is the number of ticks still owed to
/// the current task; `0` means idle.
#[derive(Debug, Default)]
struct Processor {
    remaining: u64,
    timeline: ProcessorTimeline,
}

// ── ListScheduler ─────────────────────────────────────────────────────────────

/// Tick-driven greedy list scheduler for a fixed number of processors.
///
/// Holds no per-run state; every call to [`schedule`](Self::schedule)
/// allocates its own processors and queue, so one scheduler can serve any
/// number of independent runs.
#[derive(Debug, Clone, Copy)]
pub struct ListScheduler {
    processor_count: usize,
}

impl ListScheduler {
    /// Create a scheduler for `processor_count` processors.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidProcessorCount`] if `processor_count == 0`.
    pub fn new(processor_count: usize) -> Result<Self, SchedulerError> {
        if processor_count == 0 {
            return Err(SchedulerError::InvalidProcessorCount {
                count: processor_count,
            });
        }
        Ok(Self { processor_count })
    }

    pub fn processor_count(&self) -> usize {
        self.processor_count
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Schedule `tasks` under `policy`.
    ///
    /// Every task appears in exactly one [`ScheduledEntry`].  An empty set
    /// yields `P` empty timelines.
    pub fn schedule(&self, tasks: &TaskSet, policy: SchedulingPolicy) -> ScheduleResult {
        info!(
            policy          = %policy,
            task_count      = tasks.len(),
            processor_count = self.processor_count,
            "=== ListScheduler::schedule() ==="
        );

        let mut queue = Self::build_dispatch_queue(tasks, policy);
        let mut processors: Vec<Processor> = (0..self.processor_count)
            .map(|_| Processor::default())
            .collect();

        let mut tick: u64 = 0;
        while !queue.is_empty() {
            trace!(tick = tick, pending = queue.len(), "tick");

            for (idx, processor) in processors.iter_mut().enumerate() {
                if processor.remaining == 0 {
                    if let Some(task) = queue.pop_front() {
                        // `TaskSet` caps the total duration at `u64::MAX`, and no
                        // task can end later than the sum of all durations.
                        let entry = ScheduledEntry {
                            task_name: task.name().to_string(),
                            start_tick: tick,
                            end_tick: tick + task.duration(),
                        };
                        debug!(
                            task      = %entry.task_name,
                            processor = idx,
                            start     = entry.start_tick,
                            end       = entry.end_tick,
                            "dispatched"
                        );
                        processor.remaining = task.duration();
                        processor.timeline.push(entry);
                    }
                }
                // Also applies in the tick the task was assigned.
                processor.remaining = processor.remaining.saturating_sub(1);
            }
            tick += 1;

            // Ticks in which every processor is still busy change nothing
            // but the counters; skip straight to the next release.
            if !queue.is_empty() {
                let idle_in = processors.iter().map(|p| p.remaining).min().unwrap_or(0);
                if idle_in > 0 {
                    trace!(from = tick, to = tick + idle_in, "fast-forward");
                    for processor in processors.iter_mut() {
                        processor.remaining -= idle_in;
                    }
                    tick += idle_in;
                }
            }
        }

        let result = ScheduleResult {
            timelines: processors.into_iter().map(|p| p.timeline).collect(),
        };

        self.run_bounds_check(tasks, policy, &result);

        info!(
            policy   = %policy,
            entries  = result.entry_count(),
            makespan = result.makespan(),
            "=== Scheduling complete ==="
        );

        result
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort `tasks` into dispatch order; the front is the next task to run.
    fn build_dispatch_queue(tasks: &TaskSet, policy: SchedulingPolicy) -> VecDeque<&Task> {
        let n = tasks.len();
        let mut keys: Vec<DispatchKey<'_>> = tasks
            .iter()
            .map(|task| DispatchKey {
                duration: task.duration(),
                tie_break: policy.tie_break(task.original_position(), n),
                task,
            })
            .collect();
        keys.sort_by(|a, b| policy.dispatch_cmp(a, b));

        keys.into_iter().map(|k| k.task).collect()
    }

    /// Log the makespan against the lower bound; `warn!` when the ratio
    /// exceeds the list-scheduling guarantee.
    fn run_bounds_check(&self, tasks: &TaskSet, policy: SchedulingPolicy, result: &ScheduleResult) {
        let lower_bound = makespan_lower_bound(tasks, self.processor_count);
        let guarantee = list_scheduling_bound(policy, self.processor_count);

        match check_makespan(result, tasks, policy) {
            Some(ratio) => warn!(
                policy      = %policy,
                makespan    = result.makespan(),
                lower_bound = lower_bound,
                ratio       = ratio,
                guarantee   = guarantee,
                "makespan exceeds the list-scheduling guarantee relative to the lower bound \
                 (the optimum may itself be above the bound)"
            ),
            None => debug!(
                policy      = %policy,
                makespan    = result.makespan(),
                lower_bound = lower_bound,
                guarantee   = guarantee,
                "makespan within list-scheduling guarantee"
            ),
        }
    }
}

/// Dispatch order of `tasks` under `policy`, first-to-run first.
pub fn dispatch_order(tasks: &TaskSet, policy: SchedulingPolicy) -> Vec<&Task> {
    ListScheduler::build_dispatch_queue(tasks, policy)
        .into_iter()
        .collect()
}

/// Schedule `tasks` on `processor_count` processors under `policy`.
///
/// # Errors
/// [`SchedulerError::InvalidProcessorCount`] if `processor_count == 0`; no
/// partial result is produced.
pub fn schedule(
    tasks: &TaskSet,
    processor_count: usize,
    policy: SchedulingPolicy,
) -> Result<ScheduleResult, SchedulerError> {
    Ok(ListScheduler::new(processor_count)?.schedule(tasks, policy))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
