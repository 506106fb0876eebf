use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::ProvisionerConfig;
use crate::external::ComputeOperations;

/// Delete path: remove the managed instance group, nothing else.
///
/// The firewall rule created during provisioning is left in place. Deletion
/// is forced; there is no confirmation prompt and no retry.
pub struct DownCommand {
    config: ProvisionerConfig,
    ops: Arc<dyn ComputeOperations>,
}

impl DownCommand {
    pub fn new(config: ProvisionerConfig, ops: Arc<dyn ComputeOperations>) -> Self {
        Self { config, ops }
    }

    pub async fn execute(&self) -> Result<()> {
        print!(
            "🔄 Deleting instance group '{}' in {}... ",
            self.config.group_name, self.config.zone
        );
        std::io::Write::flush(&mut std::io::stdout()).unwrap();

        match self
            .ops
            .delete_instance_group(&self.config.zone, &self.config.group_name)
            .await
        {
            Ok(()) => {
                println!("✅");
                println!();
                println!("✅ Instance group '{}' deleted.", self.config.group_name);
                Ok(())
            }
            Err(e) => {
                println!("❌");
                println!();
                println!("❌ Could not delete instance group '{}'.", self.config.group_name);
                tracing::error!(error = %e, group = %self.config.group_name, "instance group deletion failed");
                Err(e).context(format!(
                    "failed to delete instance group '{}'",
                    self.config.group_name
                ))
            }
        }
    }
}
