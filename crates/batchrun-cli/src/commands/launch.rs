//! `launch` — create the job, then one multi-instance task per worker count.

use std::path::Path;

use serde_json::json;
use tracing::info;

use batchrun_batch::models::{
    JobAddParameter, JobPreparationTask, MultiInstanceSettings, OutputFile,
    OutputFileBlobContainerDestination, OutputFileDestination, OutputFileUploadOptions,
    PoolInformation, TaskAddParameter, UploadCondition, UserIdentity,
};
use batchrun_batch::{BatchClient, SharedKeyCredentials};
use batchrun_core::{LaunchConfig, command, ids, output};

pub async fn run(config_path: &Path, dry_run: bool) -> anyhow::Result<()> {
    let config = LaunchConfig::from_file(config_path)?;
    let pool_id = ids::pool_id(&config.pool.id_prefix, config.pool.node_cap);
    let job_id = ids::job_id(&config.experiment.job_prefix);

    let job = build_job(&config, &job_id, &pool_id);
    let tasks: Vec<TaskAddParameter> = config
        .experiment
        .worker_counts
        .iter()
        .map(|&workers| build_task(&config, &job_id, workers))
        .collect();

    if dry_run {
        let plan = json!({ "job": job, "tasks": tasks });
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let credentials = SharedKeyCredentials::new(&config.account.name, &config.account.key)?;
    let client = BatchClient::new(&config.account.url, credentials)?;

    client.add_job(&job).await?;
    info!(job = %job_id, pool = %pool_id, "job created");

    for task in &tasks {
        client.add_task(&job_id, task).await?;
        let instances = task
            .multi_instance_settings
            .as_ref()
            .map_or(1, |m| m.number_of_instances);
        info!(task = %task.id, instances, "task submitted");
    }
    info!(tasks = tasks.len(), "launch complete");
    Ok(())
}

fn build_job(config: &LaunchConfig, job_id: &str, pool_id: &str) -> JobAddParameter {
    JobAddParameter {
        id: job_id.to_string(),
        pool_info: PoolInformation {
            pool_id: pool_id.to_string(),
        },
        job_preparation_task: Some(JobPreparationTask {
            command_line: command::preparation_command(&config.payload),
            user_identity: UserIdentity::admin_task_user(),
        }),
    }
}

fn build_task(config: &LaunchConfig, job_id: &str, workers: u32) -> TaskAddParameter {
    let task_id = ids::task_id(workers);
    let upload = OutputFile {
        file_pattern: format!("{}/*", command::TASK_DIR),
        destination: OutputFileDestination {
            container: OutputFileBlobContainerDestination {
                container_url: format!(
                    "{}{}",
                    config.storage.container_url, config.storage.sas_token
                ),
                path: output::upload_path_now(job_id, &task_id),
            },
        },
        upload_options: OutputFileUploadOptions {
            upload_condition: UploadCondition::TaskCompletion,
        },
    };
    TaskAddParameter {
        id: task_id,
        command_line: command::workload_command(&config.payload, workers),
        multi_instance_settings: Some(MultiInstanceSettings {
            coordination_command_line: command::coordination_command(&config.payload),
            number_of_instances: command::instance_count(workers),
        }),
        output_files: vec![upload],
    }
}
