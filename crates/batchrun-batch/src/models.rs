//! Batch REST resource bodies.
//!
//! Wire-faithful request models for the pool-add, job-add and task-add
//! operations, serialized with the service's camelCase field names. Only
//! the fields a launch actually sets are modeled; optional settings the
//! service defaults are omitted from the payload entirely.

use serde::{Deserialize, Serialize};

// ── Pool ──────────────────────────────────────────────────────────

/// Marketplace VM image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

impl ImageReference {
    /// The fixed Ubuntu 18.04 LTS image pool nodes run.
    pub fn ubuntu_1804() -> Self {
        Self {
            publisher: "Canonical".to_string(),
            offer: "UbuntuServer".to_string(),
            sku: "18.04-LTS".to_string(),
            version: "latest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineConfiguration {
    pub image_reference: ImageReference,
    #[serde(rename = "nodeAgentSKUId")]
    pub node_agent_sku_id: String,
}

impl VirtualMachineConfiguration {
    pub fn ubuntu_1804() -> Self {
        Self {
            image_reference: ImageReference::ubuntu_1804(),
            node_agent_sku_id: "batch.node.ubuntu 18.04".to_string(),
        }
    }
}

/// Body of `POST /pools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolAddParameter {
    pub id: String,
    pub vm_size: String,
    pub virtual_machine_configuration: VirtualMachineConfiguration,
    pub enable_inter_node_communication: bool,
    pub enable_auto_scale: bool,
    pub auto_scale_formula: String,
    /// ISO-8601 interval, e.g. `PT5M`.
    pub auto_scale_evaluation_interval: String,
}

// ── Job ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElevationLevel {
    NonAdmin,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoUserScope {
    Task,
    Pool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoUserSpecification {
    pub scope: AutoUserScope,
    pub elevation_level: ElevationLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub auto_user: AutoUserSpecification,
}

impl UserIdentity {
    /// Task-scoped auto-user with admin elevation, as the preparation task
    /// needs to install packages.
    pub fn admin_task_user() -> Self {
        Self {
            auto_user: AutoUserSpecification {
                scope: AutoUserScope::Task,
                elevation_level: ElevationLevel::Admin,
            },
        }
    }
}

/// Runs once per node before any task of the job is scheduled there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPreparationTask {
    pub command_line: String,
    pub user_identity: UserIdentity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInformation {
    pub pool_id: String,
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAddParameter {
    pub id: String,
    pub pool_info: PoolInformation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_preparation_task: Option<JobPreparationTask>,
}

// ── Task ──────────────────────────────────────────────────────────

/// Coordinated execution across several nodes before the primary command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiInstanceSettings {
    pub coordination_command_line: String,
    pub number_of_instances: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadCondition {
    TaskSuccess,
    TaskFailure,
    TaskCompletion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFileUploadOptions {
    pub upload_condition: UploadCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFileBlobContainerDestination {
    /// Container URL with the SAS token appended.
    pub container_url: String,
    /// Blob prefix inside the container.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFileDestination {
    pub container: OutputFileBlobContainerDestination,
}

/// One upload rule: which files, where to, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFile {
    pub file_pattern: String,
    pub destination: OutputFileDestination,
    pub upload_options: OutputFileUploadOptions,
}

/// Body of `POST /jobs/{id}/tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAddParameter {
    pub id: String,
    pub command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_instance_settings: Option<MultiInstanceSettings>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub output_files: Vec<OutputFile>,
}
