// migctl library - managed instance group provisioning over the gcloud CLI
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod external;
pub mod telemetry;

// Re-export key types for easy access
pub use cli::{Action, Cli};
pub use config::{config, MigctlConfig, ObservabilityConfig, ProvisionerConfig};
pub use external::{
    AutoscalingPolicy, CommandError, CommandExecutor, CommandOutput, ComputeOperations,
    FirewallRule, GcloudClient, GcloudError, InstanceGroupSpec, ProcessCommandExecutor,
};
pub use telemetry::init_telemetry;
