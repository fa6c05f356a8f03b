//! Command lines executed on pool nodes.
//!
//! Three command lines make up a launch, all built from the payload
//! configuration and executed remotely by the Batch service:
//!
//! - the job preparation command, run once per node, which clones the
//!   payload repository and runs its install script;
//! - the coordination command, run on every instance of a multi-instance
//!   task, which writes the MPI-style hostfile and copies the prepared
//!   payload into the node shared directory;
//! - the workload command, run on the primary instance, which launches the
//!   parallel workload with the requested worker count.
//!
//! The `$AZ_BATCH_*` variables are expanded by the node agent, not here.

use crate::config::PayloadConfig;

/// Working directory of the running task.
pub const TASK_DIR: &str = "$AZ_BATCH_TASK_DIR";

/// Working directory left behind by the job preparation task.
pub const JOB_PREP_DIR: &str = "$AZ_BATCH_JOB_PREP_DIR";

/// Directory shared between all instances scheduled on a node.
pub const SHARED_DIR: &str = "$AZ_BATCH_NODE_SHARED_DIR";

/// Hostfile written by the coordination command, consumed by the workload.
pub const HOSTFILE: &str = "$AZ_BATCH_NODE_SHARED_DIR/hostfile";

/// Workers are packed four to a node; one instance per started node.
const WORKERS_PER_INSTANCE: u32 = 4;

/// Number of task instances needed for `workers` worker processes.
pub fn instance_count(workers: u32) -> u32 {
    workers.div_ceil(WORKERS_PER_INSTANCE)
}

/// Job preparation command: clone the payload and run its install script.
pub fn preparation_command(payload: &PayloadConfig) -> String {
    format!(
        "bash -c 'git clone {url}; cd {dir}/init; chmod +x install.sh; ./install.sh'",
        url = payload.git_url,
        dir = payload.dir,
    )
}

/// Coordination command: write the hostfile, then copy the prepared payload
/// sources into the node shared directory.
pub fn coordination_command(payload: &PayloadConfig) -> String {
    format!(
        "bash -c 'python3 {prep}/wd/{dir}/init/create_host_file.py; \
         cp -r {prep}/wd/{dir}/src {shared}'",
        prep = JOB_PREP_DIR,
        dir = payload.dir,
        shared = SHARED_DIR,
    )
}

/// Workload command for `workers` worker processes.
pub fn workload_command(payload: &PayloadConfig, workers: u32) -> String {
    format!(
        "bash -c 'python3 -m scoop --hostfile {HOSTFILE} -vv -n {workers} \
         {SHARED_DIR}/src/{script}'",
        script = payload.workload_script,
    )
}
