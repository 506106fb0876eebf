//! Google Cloud CLI abstractions
//!
//! Trait-based wrapper around the `gcloud` binary. The four control-plane
//! operations migctl needs are expressed on [`ComputeOperations`], so the
//! provisioning workflow can be exercised against a scripted control plane
//! in tests while production code shells out to the real CLI.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use super::command::{CommandError, CommandExecutor};

/// Parameters for creating a managed instance group.
#[derive(Debug, Clone)]
pub struct InstanceGroupSpec {
    pub zone: String,
    pub name: String,
    /// Instance template the group boots instances from. Must already exist.
    pub template: String,
    pub initial_size: u32,
}

/// Autoscaler settings applied to an existing managed instance group.
#[derive(Debug, Clone)]
pub struct AutoscalingPolicy {
    pub zone: String,
    pub group: String,
    pub min_replicas: u32,
    pub max_replicas: u32,
    /// Fraction in (0,1] the autoscaler steers average CPU toward.
    pub target_cpu_utilization: f64,
    /// Seconds between successive scaling actions.
    pub cooldown_seconds: u32,
}

/// An ingress allow rule restricted to a single source range.
#[derive(Debug, Clone)]
pub struct FirewallRule {
    pub name: String,
    pub network: String,
    pub priority: u32,
    /// Protocol/port selector, e.g. `tcp:80`.
    pub rules: String,
    /// CIDR the rule admits, e.g. `198.51.100.7/32`.
    pub source_range: String,
}

#[derive(Debug, Error)]
pub enum GcloudError {
    #[error("gcloud is not authenticated; run `gcloud auth login`")]
    AuthenticationRequired,
    #[error("resource not found: {message}")]
    NotFound { message: String },
    #[error("resource already exists: {message}")]
    AlreadyExists { message: String },
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },
    #[error("command execution error: {source}")]
    Command {
        #[from]
        source: CommandError,
    },
    #[error("gcloud call failed: {message}")]
    Failed { message: String },
}

/// Trait for the control-plane operations the provisioning workflow issues.
///
/// The workflow sequences these calls; it never inspects cloud state beyond
/// each call's own success or failure.
#[async_trait]
pub trait ComputeOperations: Send + Sync {
    /// Create a managed instance group from a pre-existing template.
    async fn create_instance_group(&self, spec: &InstanceGroupSpec) -> Result<(), GcloudError>;

    /// Attach or replace the autoscaling policy of a managed instance group.
    async fn set_autoscaling(&self, policy: &AutoscalingPolicy) -> Result<(), GcloudError>;

    /// Create an ingress firewall rule.
    async fn create_firewall_rule(&self, rule: &FirewallRule) -> Result<(), GcloudError>;

    /// Delete a managed instance group without prompting for confirmation.
    async fn delete_instance_group(&self, zone: &str, group: &str) -> Result<(), GcloudError>;
}

/// Real implementation shelling out to `gcloud`.
pub struct GcloudClient {
    executor: Arc<dyn CommandExecutor>,
}

impl GcloudClient {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    async fn run_gcloud(&self, args: &[&str]) -> Result<String, GcloudError> {
        tracing::debug!(args = ?args, "invoking gcloud");
        let output = self.executor.execute("gcloud", args).await?;

        if !output.success() {
            return Err(classify_gcloud_error(&output.stderr));
        }

        Ok(output.stdout)
    }
}

fn classify_gcloud_error(stderr: &str) -> GcloudError {
    let lowered = stderr.to_lowercase();
    if lowered.contains("gcloud auth login") || lowered.contains("credential") {
        GcloudError::AuthenticationRequired
    } else if lowered.contains("already exists") {
        GcloudError::AlreadyExists {
            message: stderr.trim().to_string(),
        }
    } else if lowered.contains("was not found") || lowered.contains("not found") {
        GcloudError::NotFound {
            message: stderr.trim().to_string(),
        }
    } else if lowered.contains("permission") || lowered.contains("forbidden") {
        GcloudError::PermissionDenied {
            message: stderr.trim().to_string(),
        }
    } else {
        GcloudError::Failed {
            message: stderr.trim().to_string(),
        }
    }
}

#[async_trait]
impl ComputeOperations for GcloudClient {
    async fn create_instance_group(&self, spec: &InstanceGroupSpec) -> Result<(), GcloudError> {
        let size = spec.initial_size.to_string();
        let args = [
            "compute",
            "instance-groups",
            "managed",
            "create",
            &spec.name,
            "--zone",
            &spec.zone,
            "--template",
            &spec.template,
            "--size",
            &size,
        ];

        self.run_gcloud(&args).await?;
        Ok(())
    }

    async fn set_autoscaling(&self, policy: &AutoscalingPolicy) -> Result<(), GcloudError> {
        let min = policy.min_replicas.to_string();
        let max = policy.max_replicas.to_string();
        let target = policy.target_cpu_utilization.to_string();
        let cooldown = policy.cooldown_seconds.to_string();
        let args = [
            "compute",
            "instance-groups",
            "managed",
            "set-autoscaling",
            &policy.group,
            "--zone",
            &policy.zone,
            "--min-num-replicas",
            &min,
            "--max-num-replicas",
            &max,
            "--target-cpu-utilization",
            &target,
            "--cool-down-period",
            &cooldown,
        ];

        self.run_gcloud(&args).await?;
        Ok(())
    }

    async fn create_firewall_rule(&self, rule: &FirewallRule) -> Result<(), GcloudError> {
        let priority = rule.priority.to_string();
        let args = [
            "compute",
            "firewall-rules",
            "create",
            &rule.name,
            "--direction",
            "INGRESS",
            "--priority",
            &priority,
            "--network",
            &rule.network,
            "--action",
            "ALLOW",
            "--rules",
            &rule.rules,
            "--source-ranges",
            &rule.source_range,
        ];

        self.run_gcloud(&args).await?;
        Ok(())
    }

    async fn delete_instance_group(&self, zone: &str, group: &str) -> Result<(), GcloudError> {
        // --quiet suppresses the interactive confirmation prompt.
        let args = [
            "compute",
            "instance-groups",
            "managed",
            "delete",
            group,
            "--zone",
            zone,
            "--quiet",
        ];

        self.run_gcloud(&args).await?;
        Ok(())
    }
}
