//! External tool abstractions
//!
//! Trait-based seams for the cloud CLI migctl drives, enabling testable code
//! through dependency injection. Pure decision making (which call to make
//! next, what counts as fatal) lives in the command layer; the impure effects
//! (actually spawning `gcloud`) live here behind traits.

pub mod command;
pub mod gcloud;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use gcloud::{
    AutoscalingPolicy, ComputeOperations, FirewallRule, GcloudClient, GcloudError,
    InstanceGroupSpec,
};
