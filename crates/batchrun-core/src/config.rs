//! batchrun.toml configuration parser.
//!
//! A launch is parameterized entirely by a TOML file:
//!
//! ```toml
//! [account]
//! name = "mybatchaccount"
//! key = "bXliYXRjaGtleQ=="
//! url = "https://mybatchaccount.westeurope.batch.azure.com"
//!
//! [storage]
//! container_url = "https://mystorage.blob.core.windows.net/results"
//! sas_token = "?sv=2021-08-06&sig=..."
//!
//! [payload]
//! git_url = "https://github.com/example/ga-workload.git"
//! dir = "ga-workload"
//!
//! [experiment]
//! worker_counts = [1, 2, 4, 8, 16, 32]
//! ```
//!
//! `[pool]` and `[experiment]` are optional and fall back to the defaults
//! below. `[account]`, `[storage]` and `[payload]` are required.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub account: AccountConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    pub payload: PayloadConfig,
    #[serde(default)]
    pub experiment: ExperimentConfig,
}

/// Batch account credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Account name, as it appears in the endpoint hostname.
    pub name: String,
    /// Shared account key, base64 as issued by the portal.
    pub key: String,
    /// Account endpoint URL.
    pub url: String,
}

/// Blob container receiving task output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Container URL without the SAS token.
    pub container_url: String,
    /// SAS token, appended verbatim to the container URL.
    pub sas_token: String,
}

/// Compute pool parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Prefix for the derived pool id.
    #[serde(default = "default_pool_prefix")]
    pub id_prefix: String,
    /// Maximum node count, embedded in the autoscale formula.
    #[serde(default = "default_node_cap")]
    pub node_cap: u32,
    /// VM size for pool nodes.
    #[serde(default = "default_vm_size")]
    pub vm_size: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_pool_prefix(),
            node_cap: default_node_cap(),
            vm_size: default_vm_size(),
        }
    }
}

/// The worker payload cloned onto every node by the preparation task.
///
/// The repository is expected to carry `init/install.sh`,
/// `init/create_host_file.py`, and the workload script under `src/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadConfig {
    /// Public git URL cloned by the preparation task.
    pub git_url: String,
    /// Directory name the clone produces.
    pub dir: String,
    /// Workload script under the payload's `src/` directory.
    #[serde(default = "default_workload_script")]
    pub workload_script: String,
}

/// Which task series to submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// One task is submitted per entry; each entry is the `-n` worker count.
    #[serde(default = "default_worker_counts")]
    pub worker_counts: Vec<u32>,
    /// Prefix for the randomized job id.
    #[serde(default = "default_job_prefix")]
    pub job_prefix: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            worker_counts: default_worker_counts(),
            job_prefix: default_job_prefix(),
        }
    }
}

fn default_pool_prefix() -> String {
    "ga".to_string()
}

fn default_node_cap() -> u32 {
    8
}

fn default_vm_size() -> String {
    "standard_d1_v2".to_string()
}

fn default_workload_script() -> String {
    "genetic_algo.py".to_string()
}

fn default_worker_counts() -> Vec<u32> {
    vec![1, 2, 4, 8, 16, 32]
}

fn default_job_prefix() -> String {
    "ga".to_string()
}

impl LaunchConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LaunchConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[account]
name = "acct"
key = "a2V5"
url = "https://acct.westeurope.batch.azure.com"

[storage]
container_url = "https://store.blob.core.windows.net/results"
sas_token = "?sig=abc"

[payload]
git_url = "https://github.com/example/workload.git"
dir = "workload"
"#;

    #[test]
    fn test_parse_minimal_applies_defaults() {
        let config: LaunchConfig = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.account.name, "acct");
        assert_eq!(config.pool.node_cap, 8);
        assert_eq!(config.pool.vm_size, "standard_d1_v2");
        assert_eq!(config.experiment.worker_counts, vec![1, 2, 4, 8, 16, 32]);
        assert_eq!(config.payload.workload_script, "genetic_algo.py");
    }

    #[test]
    fn test_parse_overrides() {
        let toml_str = format!(
            "{MINIMAL}\n[pool]\nnode_cap = 16\n\n[experiment]\nworker_counts = [2, 64]\njob_prefix = \"bench\"\n"
        );
        let config: LaunchConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.pool.node_cap, 16);
        assert_eq!(config.experiment.worker_counts, vec![2, 64]);
        assert_eq!(config.experiment.job_prefix, "bench");
    }

    #[test]
    fn test_missing_account_is_an_error() {
        let result: Result<LaunchConfig, _> = toml::from_str(
            r#"
[storage]
container_url = "https://store.blob.core.windows.net/results"
sas_token = "?sig=abc"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let config = LaunchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.payload.dir, "workload");
    }
}
