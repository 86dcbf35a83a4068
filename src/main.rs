use clap::Parser;
use file_records::storage::DiskStore;
use file_records::FileRecordService;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{execute_command, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = DiskStore::new(cli.data_dir()).await?;
    let service = FileRecordService::new(store).with_formats(cli.formats());

    execute_command(&service, cli.command).await
}
