//! `create-pool` — provision the autoscaling compute pool.

use std::path::Path;

use tracing::info;

use batchrun_batch::models::{PoolAddParameter, VirtualMachineConfiguration};
use batchrun_batch::{BatchClient, SharedKeyCredentials};
use batchrun_core::{LaunchConfig, formula, ids};

pub async fn create(config_path: &Path) -> anyhow::Result<()> {
    let config = LaunchConfig::from_file(config_path)?;
    let pool = build_pool(&config);

    let credentials = SharedKeyCredentials::new(&config.account.name, &config.account.key)?;
    let client = BatchClient::new(&config.account.url, credentials)?;
    client.add_pool(&pool).await?;
    info!(pool = %pool.id, node_cap = config.pool.node_cap, "pool created");
    Ok(())
}

fn build_pool(config: &LaunchConfig) -> PoolAddParameter {
    PoolAddParameter {
        id: ids::pool_id(&config.pool.id_prefix, config.pool.node_cap),
        vm_size: config.pool.vm_size.clone(),
        virtual_machine_configuration: VirtualMachineConfiguration::ubuntu_1804(),
        enable_inter_node_communication: true,
        enable_auto_scale: true,
        auto_scale_formula: formula::autoscale_formula(config.pool.node_cap),
        auto_scale_evaluation_interval: formula::AUTOSCALE_EVALUATION_INTERVAL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchrun_core::config::{
        AccountConfig, ExperimentConfig, PayloadConfig, PoolConfig, StorageConfig,
    };

    fn config() -> LaunchConfig {
        LaunchConfig {
            account: AccountConfig {
                name: "acct".to_string(),
                key: "a2V5".to_string(),
                url: "https://acct.westeurope.batch.azure.com".to_string(),
            },
            storage: StorageConfig {
                container_url: "https://store.blob.core.windows.net/results".to_string(),
                sas_token: "?sig=abc".to_string(),
            },
            pool: PoolConfig {
                id_prefix: "ga".to_string(),
                node_cap: 8,
                vm_size: "standard_d1_v2".to_string(),
            },
            payload: PayloadConfig {
                git_url: "https://github.com/example/workload.git".to_string(),
                dir: "workload".to_string(),
                workload_script: "genetic_algo.py".to_string(),
            },
            experiment: ExperimentConfig::default(),
        }
    }

    #[test]
    fn pool_id_and_cap_come_from_config() {
        let pool = build_pool(&config());
        assert_eq!(pool.id, "ga_8_nodes_pool");
        assert!(pool.auto_scale_formula.contains("cappedPoolSize = 8;"));
    }

    #[test]
    fn pool_enables_autoscale_and_internode_traffic() {
        let pool = build_pool(&config());
        assert!(pool.enable_auto_scale);
        assert!(pool.enable_inter_node_communication);
        assert_eq!(pool.auto_scale_evaluation_interval, "PT5M");
    }
}
