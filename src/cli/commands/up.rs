use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::ProvisionerConfig;
use crate::external::{ComputeOperations, GcloudError};

/// Create path: instance group, then autoscaler, then firewall rule.
///
/// The first two steps are mandatory and abort the workflow on failure; the
/// firewall step is tolerated because the rule routinely already exists from
/// an earlier run. Nothing is rolled back on a partial failure, and the
/// command returns without waiting for the group to become ready.
pub struct UpCommand {
    config: ProvisionerConfig,
    ops: Arc<dyn ComputeOperations>,
}

impl UpCommand {
    pub fn new(config: ProvisionerConfig, ops: Arc<dyn ComputeOperations>) -> Self {
        Self { config, ops }
    }

    pub async fn execute(&self) -> Result<()> {
        println!(
            "🚀 Provisioning managed instance group '{}' in {}",
            self.config.group_name, self.config.zone
        );
        println!();

        let spec = self.config.group_spec();
        print!(
            "🔄 Creating instance group from template '{}' (size 0)... ",
            spec.template
        );
        std::io::Write::flush(&mut std::io::stdout()).unwrap();
        match self.ops.create_instance_group(&spec).await {
            Ok(()) => println!("✅"),
            Err(e) => {
                println!("❌");
                tracing::error!(error = %e, group = %spec.name, "instance group creation failed");
                return Err(e).context(format!("failed to create instance group '{}'", spec.name));
            }
        }

        let policy = self.config.autoscaling_policy();
        print!(
            "🔄 Configuring autoscaling (0-{} replicas, {:.0}% CPU target, {}s cooldown)... ",
            policy.max_replicas,
            policy.target_cpu_utilization * 100.0,
            policy.cooldown_seconds
        );
        std::io::Write::flush(&mut std::io::stdout()).unwrap();
        match self.ops.set_autoscaling(&policy).await {
            Ok(()) => println!("✅"),
            Err(e) => {
                println!("❌");
                tracing::error!(error = %e, group = %policy.group, "autoscaling configuration failed");
                return Err(e).context(format!(
                    "failed to configure autoscaling for '{}'",
                    policy.group
                ));
            }
        }

        let rule = self.config.firewall_rule();
        print!(
            "🔄 Opening HTTP ingress from {} (rule '{}')... ",
            rule.source_range, rule.name
        );
        std::io::Write::flush(&mut std::io::stdout()).unwrap();
        match self.ops.create_firewall_rule(&rule).await {
            Ok(()) => println!("✅"),
            Err(GcloudError::AlreadyExists { .. }) => {
                println!("↩️  already exists, keeping it");
            }
            Err(e) => {
                // Tolerated: the group is usable without the rule.
                println!("⚠️  skipped");
                tracing::warn!(error = %e, rule = %rule.name, "firewall rule creation failed, continuing");
            }
        }

        println!();
        println!("✅ Provisioning complete:");
        println!("   📦 Group: {} (zone {})", self.config.group_name, self.config.zone);
        println!(
            "   📈 Autoscaler: 0-{} replicas targeting {:.0}% CPU",
            self.config.max_replicas,
            self.config.target_cpu_utilization * 100.0
        );
        println!("   🔓 Ingress: tcp:80 from {}/32", self.config.source_ip);
        println!();
        println!("🎯 The autoscaler grows the group on demand. Tear down with 'migctl close'.");
        Ok(())
    }
}
