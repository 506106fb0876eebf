use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use migctl::cli::commands::{DownCommand, UpCommand};
use migctl::cli::{Action, Cli};
use migctl::config;
use migctl::external::{ComputeOperations, GcloudClient, ProcessCommandExecutor};
use migctl::telemetry::init_telemetry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::config()?;
    init_telemetry(&config.observability)?;

    let ops: Arc<dyn ComputeOperations> =
        Arc::new(GcloudClient::new(Arc::new(ProcessCommandExecutor)));

    match Action::from_arg(cli.action.as_deref()) {
        Action::Provision => tokio::runtime::Runtime::new()?.block_on(async {
            UpCommand::new(config.provisioner.clone(), ops).execute().await
        }),
        Action::Teardown => tokio::runtime::Runtime::new()?.block_on(async {
            DownCommand::new(config.provisioner.clone(), ops).execute().await
        }),
    }
}
