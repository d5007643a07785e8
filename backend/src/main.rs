//! Backend entry-point: loads settings, connects storage, and serves the API.

mod server;

use std::ffi::OsString;
use std::io;
use std::path::Path;

use actix_web::web;
use argon2::password_hash::rand_core::{OsRng, RngCore};
use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use petapedia::inbound::http::health::HealthState;
use petapedia::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use petapedia::outbound::security::MIN_SECRET_LEN;
use petapedia::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Read the token signing secret, trimming a trailing newline.
fn read_secret_file(path: &Path) -> io::Result<Zeroizing<Vec<u8>>> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "secret path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    let mut bytes = Zeroizing::new(directory.read(Path::new(file_name))?);
    while bytes.last().is_some_and(u8::is_ascii_whitespace) {
        bytes.pop();
    }
    Ok(bytes)
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; MIN_SECRET_LEN * 2]);
    OsRng.fill_bytes(&mut bytes);
    bytes
}

fn load_jwt_secret(settings: &ServerSettings) -> io::Result<Zeroizing<Vec<u8>>> {
    match settings.jwt_secret_file.as_deref() {
        Some(path) => read_secret_file(path).map_err(|e| {
            io::Error::other(format!(
                "failed to read token secret at {}: {e}",
                path.display()
            ))
        }),
        None if cfg!(debug_assertions) => {
            warn!("using temporary token secret (dev only); tokens die with the process");
            Ok(ephemeral_secret())
        }
        None => Err(io::Error::other(
            "PETAPEDIA_JWT_SECRET_FILE must be set in release builds",
        )),
    }
}

/// Merge CLI arguments, `PETAPEDIA_*` variables, and config files.
fn load_settings<I>(args: I) -> io::Result<ServerSettings>
where
    I: IntoIterator<Item = OsString>,
{
    ServerSettings::load_from_iter(args)
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))
}

async fn build_config(settings: &ServerSettings) -> io::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr(), load_jwt_secret(settings)?)
        .with_store_deadline(settings.store_deadline())
        .with_jwt_ttl(settings.jwt_ttl());

    let Some(database_url) = settings.database_url() else {
        warn!("no database configured; serving from in-memory stores");
        return Ok(config);
    };

    if settings.run_migrations {
        run_pending_migrations(database_url)
            .await
            .map_err(|e| io::Error::other(format!("database migrations failed: {e}")))?;
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
    )
    .await
    .map_err(|e| io::Error::other(format!("create database pool: {e}")))?;
    info!(max_size = settings.pool_max_size(), "database pool ready");
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let config = build_config(&settings).await?;
    let bind_addr = settings.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await
}
