//! Run configuration loading.
//!
//! Every value a scheduling run needs besides the tasks themselves can be
//! supplied in a YAML file.  Command-line flags override file values, and
//! file values override the built-in defaults.
//!
//! The expected YAML structure is:
//! ```yaml
//! processors: 4
//! input: tasks.txt
//! output_dir: out
//! processor_label: Processador
//! policies: [longest_first, shortest_first]
//! outputs:
//!   longest_first: maior_primeiro.txt
//!   shortest_first: menor_primeiro.txt
//! ```
//! Every key is optional.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::report::DEFAULT_PROCESSOR_LABEL;
use crate::scheduler::SchedulingPolicy;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Mirrors the YAML file layout.  Kept private – callers work with
/// [`RunConfig`] instead.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunConfigFile {
    processors: Option<usize>,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    processor_label: Option<String>,
    policies: Option<Vec<SchedulingPolicy>>,
    #[serde(default)]
    outputs: HashMap<SchedulingPolicy, PathBuf>,
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Resolved settings for one invocation of the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of processors.  `None` until supplied by the file or the CLI.
    pub processors: Option<usize>,
    /// Task file.  `None` until supplied by the file or the CLI.
    pub input: Option<PathBuf>,
    /// Directory the reports are written to.
    pub output_dir: PathBuf,
    /// Header prefix of each processor block (`<label>_<n>`).
    pub processor_label: String,
    /// Policies to run, in order.
    pub policies: Vec<SchedulingPolicy>,
    /// Per-policy report file names, relative to `output_dir` unless
    /// absolute.
    pub outputs: HashMap<SchedulingPolicy, PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            processors: None,
            input: None,
            output_dir: PathBuf::from("."),
            processor_label: DEFAULT_PROCESSOR_LABEL.to_string(),
            policies: SchedulingPolicy::ALL.to_vec(),
            outputs: HashMap::new(),
        }
    }
}

impl RunConfig {
    /// Parses `path` and merges its values over the defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the YAML is
    /// structurally invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading run configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        Self::parse_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
    }

    /// Parses a YAML document.  An empty document yields the defaults.
    pub fn parse_str(content: &str) -> Result<Self> {
        let file: RunConfigFile = if content.trim().is_empty() {
            RunConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let mut config = Self::default();
        config.processors = file.processors;
        config.input = file.input;
        if let Some(dir) = file.output_dir {
            config.output_dir = dir;
        }
        if let Some(label) = file.processor_label {
            config.processor_label = label;
        }
        if let Some(policies) = file.policies {
            if policies.is_empty() {
                warn!("Empty policy list in configuration, running all policies");
            } else {
                config.policies = policies;
            }
        }
        config.outputs = file.outputs;

        debug!(
            processors = ?config.processors,
            input      = ?config.input,
            output_dir = %config.output_dir.display(),
            policies   = ?config.policies,
            "Run configuration parsed"
        );
        Ok(config)
    }

    /// Report path for `policy`: the configured file name (or the policy's
    /// default) joined onto `output_dir`.
    pub fn output_path(&self, policy: SchedulingPolicy) -> PathBuf {
        let file = self
            .outputs
            .get(&policy)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(policy.default_output_file()));
        self.output_dir.join(file)
    }

    /// Checks that the required values are present and usable.
    ///
    /// # Errors
    /// Missing input path, missing or zero processor count.
    pub fn validate(&self) -> Result<()> {
        match self.processors {
            None => bail!("processor count not set (pass PROCESSORS or set `processors`)"),
            Some(0) => bail!("processor count must be at least 1"),
            Some(_) => {}
        }
        if self.input.is_none() {
            bail!("task file not set (pass INPUT or set `input`)");
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_run_both_policies_with_reference_names() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.processors, None);
        assert_eq!(cfg.processor_label, "Processador");
        assert_eq!(cfg.policies, SchedulingPolicy::ALL.to_vec());
        assert_eq!(
            cfg.output_path(SchedulingPolicy::LongestFirst),
            Path::new(".").join("maior_primeiro.txt")
        );
        assert_eq!(
            cfg.output_path(SchedulingPolicy::ShortestFirst),
            Path::new(".").join("menor_primeiro.txt")
        );
    }

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
processors: 4
input: tasks.txt
output_dir: out
processor_label: CPU
policies: [shortest_first]
outputs:
  shortest_first: spt.txt
"#;
        let f = yaml_tempfile(yaml);
        let cfg = RunConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.processors, Some(4));
        assert_eq!(cfg.input, Some(PathBuf::from("tasks.txt")));
        assert_eq!(cfg.processor_label, "CPU");
        assert_eq!(cfg.policies, vec![SchedulingPolicy::ShortestFirst]);
        assert_eq!(
            cfg.output_path(SchedulingPolicy::ShortestFirst),
            Path::new("out").join("spt.txt")
        );
        // Unconfigured policy still gets its default file inside output_dir
        assert_eq!(
            cfg.output_path(SchedulingPolicy::LongestFirst),
            Path::new("out").join("maior_primeiro.txt")
        );
        cfg.validate().unwrap();
    }

    #[test]
    fn empty_file_yields_defaults() {
        let f = yaml_tempfile("");
        let cfg = RunConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn empty_policy_list_falls_back_to_all() {
        let cfg = RunConfig::parse_str("policies: []\n").unwrap();
        assert_eq!(cfg.policies, SchedulingPolicy::ALL.to_vec());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(RunConfig::parse_str("policies: [random]\n").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(RunConfig::parse_str("procesors: 3\n").is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = RunConfig::load_from_file(Path::new("/nonexistent/path/run.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(RunConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn validate_requires_processors_and_input() {
        let mut cfg = RunConfig::default();
        assert!(cfg.validate().is_err());

        cfg.processors = Some(0);
        cfg.input = Some(PathBuf::from("tasks.txt"));
        assert!(cfg.validate().is_err(), "zero processors must be rejected");

        cfg.processors = Some(2);
        cfg.validate().unwrap();

        cfg.input = None;
        assert!(cfg.validate().is_err());
    }
}
