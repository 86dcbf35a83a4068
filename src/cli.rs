use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::fs;

use file_records::{FileCandidate, FileRecordService, FormatSet, RecordKey};

#[derive(Parser)]
#[command(name = "file-records")]
#[command(about = "Manage metadata records for stored files", long_about = None)]
pub struct Cli {
    /// Directory holding the record documents
    #[arg(long, env = "FILE_RECORDS_DIR")]
    data_dir: Option<PathBuf>,

    /// Accepted file formats, comma separated
    #[arg(long, env = "FILE_RECORDS_FORMATS", value_delimiter = ',', default_value = "pdf")]
    formats: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("file-records"))
                .unwrap_or_else(|| PathBuf::from("file-records"))
        })
    }

    pub fn formats(&self) -> FormatSet {
        FormatSet::new(&self.formats)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a record from a JSON document
    Create {
        #[arg(long)]
        json: String,
    },

    /// Replace an existing record with a JSON document
    Update {
        #[arg(long)]
        json: String,
    },

    /// Describe a local file and create its record
    Register {
        file: PathBuf,

        #[arg(short, long)]
        tenant: String,

        #[arg(long, default_value_t = 30)]
        ttl_days: i64,
    },

    /// Print a record, or null when absent
    Get { checksum: String, format: String },

    /// Delete a record
    Delete { checksum: String, format: String },

    /// List all records
    List,
}

pub async fn execute_command(service: &FileRecordService, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Create { json } => {
            let candidate = parse_candidate(&json)?;
            print_json(&service.create(&candidate).await?)?;
        }
        Commands::Update { json } => {
            let candidate = parse_candidate(&json)?;
            print_json(&service.update(&candidate).await?)?;
        }
        Commands::Register { file, tenant, ttl_days } => {
            if tenant.is_empty() {
                bail!("tenant must not be empty");
            }
            let ttl = Duration::try_days(ttl_days).context("ttl is out of range")?;
            let data = fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let candidate = FileCandidate::describe(
                &data,
                &tenant,
                Utc::now().timestamp_millis(),
                ttl,
            );
            print_json(&service.create(&candidate).await?)?;
        }
        Commands::Get { checksum, format } => {
            let record = service.get(&RecordKey::new(checksum, format)).await?;
            print_json(&record)?;
        }
        Commands::Delete { checksum, format } => {
            service.destroy(&RecordKey::new(checksum, format)).await?;
        }
        Commands::List => {
            print_json(&service.list().await?)?;
        }
    }

    Ok(())
}

fn parse_candidate(json: &str) -> anyhow::Result<FileCandidate> {
    FileCandidate::from_json(json).context("record is not a valid JSON document")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
