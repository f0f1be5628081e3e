/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Post-schedule quality analysis.
//!
//! # Status: advisory only
//!
//! The ratio between the achieved makespan and a simple lower bound is
//! **computed and logged** after every scheduling run.  A ratio above the
//! list-scheduling guarantee is reported as a warning; the schedule is still
//! returned unchanged.
//!
//! # Theory
//! **Lower bound**: no schedule on `P` identical processors can finish before
//!
//! $$C_{lb} = \max\left(\left\lceil \frac{\sum_i p_i}{P} \right\rceil, \max_i p_i\right)$$
//!
//! **Graham (1966, 1969)**: any greedy list schedule satisfies
//! `C ≤ (2 − 1/P) · C_opt`; dispatching longest-first tightens this to
//! `C ≤ (4/3 − 1/(3P)) · C_opt`.
//!
//! | P | any order | longest-first |
//! |---|---|---|
//! | 1 | 1.000 | 1.000 |
//! | 2 | 1.500 | 1.167 |
//! | 4 | 1.750 | 1.250 |
//! | ∞ | 2.000 | 1.333 |
//!
//! Because `C_lb ≤ C_opt`, a ratio `C / C_lb` above the guarantee does not
//! prove a bad schedule; it means the optimum itself may sit above the lower
//! bound and the instance deserves a closer look.

use super::{ScheduleResult, SchedulingPolicy};
use crate::task::TaskSet;

/// Tolerance for floating point comparison against the guarantee factor.
const RATIO_EPSILON: f64 = 1e-9;

/// Lower bound on the makespan of any schedule of `tasks` on
/// `processor_count` processors.
///
/// Returns `0` for an empty set or zero processors.
pub fn makespan_lower_bound(tasks: &TaskSet, processor_count: usize) -> u64 {
    if tasks.is_empty() || processor_count == 0 {
        return 0;
    }
    let spread = tasks.total_duration().div_ceil(processor_count as u64);
    spread.max(tasks.max_duration())
}

/// Graham's worst-case approximation factor for `policy` on
/// `processor_count` processors.
///
/// `LongestFirst` → `4/3 − 1/(3P)`, `ShortestFirst` → `2 − 1/P`.
pub fn list_scheduling_bound(policy: SchedulingPolicy, processor_count: usize) -> f64 {
    let p = processor_count.max(1) as f64;
    match policy {
        SchedulingPolicy::LongestFirst => 4.0 / 3.0 - 1.0 / (3.0 * p),
        SchedulingPolicy::ShortestFirst => 2.0 - 1.0 / p,
    }
}

/// Compare the makespan of `result` against the lower bound.
///
/// Returns `Some(ratio)` when `makespan / lower_bound` exceeds
/// [`list_scheduling_bound`], otherwise `None`.  Empty schedules always
/// return `None`.
pub fn check_makespan(
    result: &ScheduleResult,
    tasks: &TaskSet,
    policy: SchedulingPolicy,
) -> Option<f64> {
    let lb = makespan_lower_bound(tasks, result.processor_count());
    if lb == 0 {
        return None;
    }

    let ratio = result.makespan() as f64 / lb as f64;
    if ratio > list_scheduling_bound(policy, result.processor_count()) + RATIO_EPSILON {
        Some(ratio)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
