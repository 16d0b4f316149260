//! Loomledger main entry point

use clap::Parser;
use loomledger_api::{start_server, AppState};
use loomledger_backend::{BackendRef, MemoryBackend};
use loomledger_catalog::Catalog;
use loomledger_config::Config;
use loomledger_core::{Ledger, LocationRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "loomledger")]
#[command(version = "0.1.0")]
#[command(about = "Ledger and catalog service for a handloom weaving business", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = Config::load(args.config.clone()).expect("Failed to load configuration");

        eprintln!(
            "[INFO] Config loaded: {} location(s), default={}",
            config.locations.names.len(),
            config.locations.default
        );

        let mut backend = MemoryBackend::with_locations(&config.locations.names);
        if let Some(admin) = &config.server.admin {
            backend = backend.with_admin(&admin.username, &admin.password);
        }
        let backend: BackendRef = Arc::new(backend);

        let ledger = Arc::new(Ledger::new(backend.clone(), &config.locations.default));
        let catalog = Catalog::new(backend.clone());
        let locations = Arc::new(LocationRegistry::new(
            backend.clone(),
            &config.locations.default,
        ));

        if let Err(e) = locations.load().await {
            eprintln!("[ERROR] Failed to load locations: {:?}", e);
        }
        match ledger.load().await {
            Ok(_) => eprintln!("[INFO] Ledger loaded for {}", ledger.active_location()),
            Err(e) => eprintln!("[ERROR] Failed to load ledger: {:?}", e),
        }
        if let Err(e) = catalog.load().await {
            eprintln!("[ERROR] Failed to load catalog: {:?}", e);
        }

        let state = AppState {
            ledger,
            catalog,
            locations,
            backend,
            config,
        };

        start_server(state).await
    })?;

    Ok(())
}
