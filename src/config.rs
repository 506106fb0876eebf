use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::external::{AutoscalingPolicy, FirewallRule, InstanceGroupSpec};

/// Main configuration structure for migctl
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigctlConfig {
    /// Instance group and firewall settings
    pub provisioner: ProvisionerConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvisionerConfig {
    /// Zone the group and its instances live in
    pub zone: String,
    /// Managed instance group name; must be unique within the zone
    pub group_name: String,
    /// Pre-existing instance template the group boots from
    pub template: String,
    /// Autoscaler upper bound; the lower bound is fixed at zero
    pub max_replicas: u32,
    /// Average CPU utilization fraction the autoscaler steers toward
    pub target_cpu_utilization: f64,
    /// Seconds the autoscaler waits between scaling actions
    pub cooldown_seconds: u32,
    /// Address admitted by the HTTP firewall rule, used as a /32 source
    /// range. The default is a documentation placeholder; replace it with
    /// your own address before provisioning.
    pub source_ip: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl ProvisionerConfig {
    /// The instance group this configuration provisions, created empty.
    /// Instance count is the autoscaler's job from then on.
    pub fn group_spec(&self) -> InstanceGroupSpec {
        InstanceGroupSpec {
            zone: self.zone.clone(),
            name: self.group_name.clone(),
            template: self.template.clone(),
            initial_size: 0,
        }
    }

    pub fn autoscaling_policy(&self) -> AutoscalingPolicy {
        AutoscalingPolicy {
            zone: self.zone.clone(),
            group: self.group_name.clone(),
            min_replicas: 0,
            max_replicas: self.max_replicas,
            target_cpu_utilization: self.target_cpu_utilization,
            cooldown_seconds: self.cooldown_seconds,
        }
    }

    pub fn firewall_rule(&self) -> FirewallRule {
        FirewallRule {
            name: format!("{}-allow-http", self.group_name),
            network: "default".to_string(),
            priority: 1000,
            rules: "tcp:80".to_string(),
            source_range: format!("{}/32", self.source_ip),
        }
    }
}

impl Default for MigctlConfig {
    fn default() -> Self {
        Self {
            provisioner: ProvisionerConfig {
                zone: "us-central1-a".to_string(),
                group_name: "web-server-group".to_string(),
                template: "web-server-template".to_string(),
                max_replicas: 5,
                target_cpu_utilization: 0.6,
                cooldown_seconds: 90,
                source_ip: "203.0.113.10".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
            },
        }
    }
}

impl MigctlConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (migctl.toml)
    /// 3. Environment variables (prefixed with MIGCTL_)
    pub fn load() -> Result<Self> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&MigctlConfig::default())?);

        if Path::new("migctl.toml").exists() {
            builder = builder.add_source(File::with_name("migctl"));
        }

        builder = builder.add_source(
            Environment::with_prefix("MIGCTL")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<MigctlConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = MigctlConfig::load_env_file();
        MigctlConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static MigctlConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_match_fixed_provisioning_parameters() {
        let config = MigctlConfig::default();

        assert_eq!(config.provisioner.max_replicas, 5);
        assert_eq!(config.provisioner.target_cpu_utilization, 0.6);
        assert_eq!(config.provisioner.cooldown_seconds, 90);
        assert_eq!(config.provisioner.zone, "us-central1-a");
    }

    #[test]
    fn test_group_spec_is_created_empty() {
        let spec = MigctlConfig::default().provisioner.group_spec();

        assert_eq!(spec.initial_size, 0);
        assert_eq!(spec.name, "web-server-group");
        assert_eq!(spec.template, "web-server-template");
    }

    #[test]
    fn test_autoscaling_policy_floor_is_zero() {
        let policy = MigctlConfig::default().provisioner.autoscaling_policy();

        assert_eq!(policy.min_replicas, 0);
        assert_eq!(policy.max_replicas, 5);
    }

    #[test]
    fn test_firewall_rule_derivation() {
        let rule = MigctlConfig::default().provisioner.firewall_rule();

        assert_eq!(rule.name, "web-server-group-allow-http");
        assert_eq!(rule.rules, "tcp:80");
        assert_eq!(rule.source_range, "203.0.113.10/32");
        assert_eq!(rule.priority, 1000);
        assert_eq!(rule.network, "default");
    }

    #[test]
    fn test_file_values_override_defaults() {
        let toml = r#"
            [provisioner]
            zone = "europe-west1-b"
            max_replicas = 12
        "#;

        let config = Config::builder()
            .add_source(Config::try_from(&MigctlConfig::default()).unwrap())
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        let loaded: MigctlConfig = config.try_deserialize().unwrap();

        assert_eq!(loaded.provisioner.zone, "europe-west1-b");
        assert_eq!(loaded.provisioner.max_replicas, 12);
        // Untouched fields keep their defaults.
        assert_eq!(loaded.provisioner.cooldown_seconds, 90);
        assert_eq!(loaded.provisioner.group_name, "web-server-group");
    }
}
