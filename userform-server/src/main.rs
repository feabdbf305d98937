//! userform-server binary
//!
//! Parses arguments, picks the datastore from the `DATABASE_URL`
//! scheme, runs startup migrations, and serves the API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use userform_core::{MemoryStore, RecordService, UserStore};
use userform_server::db::{mysql, postgres};
use userform_server::{run_server, AppState, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "userform-server", about = "User registration API server")]
struct Args {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Database URL; the scheme selects the backend (postgres:// or
    /// mysql://). The literal "memory" runs a throwaway in-process
    /// store for development.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Origin allowed by CORS
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:3000")]
    cors_origin: String,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    cors_permissive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();

    let args = Args::parse();

    let database_url = args.database_url.context(
        "DATABASE_URL not set. Set via --database-url or the DATABASE_URL environment variable",
    )?;

    let store: Arc<dyn UserStore> = if database_url == "memory" {
        tracing::warn!("using in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        let pool = postgres::create_pool(&database_url)
            .await
            .context("failed to create postgres pool")?;
        postgres::run_migrations(&pool)
            .await
            .context("postgres migrations failed")?;
        Arc::new(postgres::PgUserStore::new(pool))
    } else if database_url.starts_with("mysql://") {
        let pool = mysql::create_pool(&database_url)
            .await
            .context("failed to create mysql pool")?;
        mysql::run_migrations(&pool)
            .await
            .context("mysql migrations failed")?;
        Arc::new(mysql::MySqlUserStore::new(pool))
    } else {
        bail!("unsupported DATABASE_URL scheme: expected postgres://, mysql://, or \"memory\"");
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_origin: if args.cors_permissive {
            None
        } else {
            Some(args.cors_origin)
        },
    };

    let state = AppState {
        service: RecordService::new(store),
    };

    run_server(state, config).await.context("server error")?;
    Ok(())
}
