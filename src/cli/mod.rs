use clap::Parser;

pub mod commands;

#[derive(Parser)]
#[command(name = "migctl")]
#[command(about = "Provision and tear down an autoscaled managed instance group")]
#[command(long_about = "migctl stands up a managed instance group from an existing instance \
                       template, attaches a CPU-based autoscaler, and opens HTTP ingress from a \
                       single source address. Run with no argument to provision, or pass 'close' \
                       to delete the group.")]
#[command(version)]
pub struct Cli {
    /// Pass the literal 'close' to delete the instance group; anything else
    /// (or nothing) runs the provisioning sequence
    pub action: Option<String>,
}

/// The two workflows migctl knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Provision,
    Teardown,
}

impl Action {
    /// Only the literal `close` selects teardown. Every other invocation,
    /// including an unrecognized argument, provisions.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("close") => Action::Teardown,
            _ => Action::Provision,
        }
    }
}
