// src/bin/profile_vault.rs
//! Operator tool: export the public key, mint secrets, seal, submit and search

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use encrypted_profile_vault::keys::generate_operator_secret;
use encrypted_profile_vault::{
    seal_for_transport, search_profiles, submit_request, Config, CryptoService, IdentifierRule,
    SqliteProfileStore, SubmitRequest,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "profile-vault", about = "Encrypted profile intake and blind-index search")]
struct Cli {
    /// Config file (defaults to $EPV_CONFIG or ./profile-vault.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the transport public key (SPKI PEM)
    PublicKey,
    /// Print a fresh random operator secret
    GenerateSecret,
    /// Encrypt an identifier for transport and print the submit JSON
    Seal { identifier: String },
    /// Submit a sealed request read from a JSON file, or stdin with "-"
    Submit { request: String },
    /// Look up stored profiles by plaintext identifier
    Search { identifier: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::GenerateSecret => {
            println!("{}", generate_operator_secret().expose_secret());
        }
        Command::PublicKey => {
            let (_, crypto) = load(cli.config)?;
            print!("{}", crypto.export_public_key());
        }
        Command::Seal { identifier } => {
            let (_, crypto) = load(cli.config)?;
            let envelope = seal_for_transport(&crypto.public_key(), &identifier)?;
            println!("{}", serde_json::to_string_pretty(&SubmitRequest::from(&envelope))?);
        }
        Command::Submit { request } => {
            let (config, crypto) = load(cli.config)?;
            let raw = if request == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&request)
                    .with_context(|| format!("Failed to read {request}"))?
            };
            let request: SubmitRequest =
                serde_json::from_str(&raw).context("Submit request is not valid JSON")?;

            let store = SqliteProfileStore::open(&config.paths.database)
                .context("Failed to open profile database")?;
            let receipt = submit_request(
                &crypto,
                &store,
                &IdentifierRule::from_config(&config),
                &request,
            )?;
            info!(id = receipt.id, "submitted");
            println!("{}", serde_json::to_string(&receipt)?);
        }
        Command::Search { identifier } => {
            let (config, crypto) = load(cli.config)?;
            let store = SqliteProfileStore::open(&config.paths.database)
                .context("Failed to open profile database")?;
            let results = search_profiles(&crypto, &store, &identifier)?;
            for failed in &results.unreadable {
                eprintln!("record {} unreadable: {}", failed.id, failed.error);
            }
            println!("{}", serde_json::to_string_pretty(&results.matches)?);
        }
    }

    Ok(())
}

fn load(config_path: Option<PathBuf>) -> Result<(Config, CryptoService)> {
    let config = match config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    let crypto = CryptoService::from_config(&config)
        .context("Failed to load key material (are EPV_STORAGE_SECRET and EPV_INDEX_SECRET set?)")?;
    Ok((config, crypto))
}
