/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Text rendering of a [`ScheduleResult`].
//!
//! Output layout, one block per processor (1-based), blocks separated by a
//! single blank line and no trailing newline:
//!
//! ```text
//! Processador_1
//! A;0;5
//! B;5;8
//!
//! Processador_2
//! C;0;5
//! ```

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::scheduler::ScheduleResult;

/// Header prefix used when no label is configured.
pub const DEFAULT_PROCESSOR_LABEL: &str = "Processador";

/// Render `result` with processor headers `<label>_<n>`.
pub fn render(result: &ScheduleResult, label: &str) -> String {
    let mut blocks = Vec::with_capacity(result.processor_count());

    for (idx, timeline) in result.timelines().iter().enumerate() {
        let mut block = format!("{}_{}", label, idx + 1);
        for entry in timeline {
            // Writing into a String cannot fail.
            let _ = write!(
                block,
                "\n{};{};{}",
                entry.task_name, entry.start_tick, entry.end_tick
            );
        }
        blocks.push(block);
    }

    blocks.join("\n\n")
}

/// Render `result` and write it to `path`, creating parent directories.
pub fn write_report(path: &Path, result: &ScheduleResult, label: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create output directory: {}", parent.display()))?;
    }

    std::fs::write(path, render(result, label))
        .with_context(|| format!("Cannot write report: {}", path.display()))?;

    info!(
        path     = %path.display(),
        entries  = result.entry_count(),
        makespan = result.makespan(),
        "Report written"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
