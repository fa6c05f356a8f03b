//! Resource id derivation.
//!
//! Pool ids are deterministic (derived from the node cap) so repeated runs
//! reuse the same pool. Job and task ids carry a random suffix so repeated
//! runs do not collide on the service side.

use rand::Rng;

/// Upper bound (exclusive) for random id suffixes.
pub const ID_SUFFIX_RANGE: u32 = 1_000_000;

/// Pool id for a given prefix and node cap, e.g. `ga_8_nodes_pool`.
pub fn pool_id(prefix: &str, node_cap: u32) -> String {
    format!("{prefix}_{node_cap}_nodes_pool")
}

/// Randomized job id, e.g. `ga_job_73512`.
pub fn job_id(prefix: &str) -> String {
    format!("{prefix}_job_{}", suffix())
}

/// Randomized task id tagged with its worker count, e.g. `task_4021_16`.
pub fn task_id(workers: u32) -> String {
    format!("task_{}_{workers}", suffix())
}

fn suffix() -> u32 {
    rand::thread_rng().gen_range(0..ID_SUFFIX_RANGE)
}
