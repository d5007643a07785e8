//! Load a GeoJSON feature collection into the roads or regions table.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use geojson::{FeatureCollection, GeoJson};
use petapedia::domain::ports::SpatialIngestionRepository;
use petapedia::domain::{FeatureKind, GeoJsonIngestionOutcome, GeoJsonIngestionService};
use petapedia::outbound::memory::InMemorySpatialStore;
use petapedia::outbound::persistence::{DbPool, DieselSpatialIngestionRepository, PoolConfig};
use tokio::runtime::Builder;

/// `ingest-geojson` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ingest-geojson",
    about = "Load GeoJSON roads or regions into the spatial store",
    version
)]
struct CliArgs {
    /// Which table the features belong to: `roads` or `regions`.
    #[arg(long, value_name = "kind")]
    kind: FeatureKind,
    /// Path to a GeoJSON `FeatureCollection` file.
    #[arg(long, value_name = "path")]
    file: PathBuf,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Validate and count features without touching the database.
    #[arg(long = "dry-run")]
    dry_run: bool,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let collection = read_collection(&args.file)?;

    let outcome = if args.dry_run {
        ingest(Arc::new(InMemorySpatialStore::new()), args.kind, &collection).await?
    } else {
        let database_url = resolve_database_url(args.database_url)?;
        let pool = DbPool::new(PoolConfig::new(&database_url))
            .await
            .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
        ingest(
            Arc::new(DieselSpatialIngestionRepository::new(pool)),
            args.kind,
            &collection,
        )
        .await?
    };

    print!("{}", summary(&outcome));
    Ok(())
}

async fn ingest<R>(
    repo: Arc<R>,
    kind: FeatureKind,
    collection: &FeatureCollection,
) -> io::Result<GeoJsonIngestionOutcome>
where
    R: SpatialIngestionRepository + 'static,
{
    GeoJsonIngestionService::new(repo)
        .ingest(kind, collection)
        .await
        .map_err(|error| io::Error::other(format!("ingestion failed: {error}")))
}

fn read_collection(path: &Path) -> io::Result<FeatureCollection> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open input parent directory '{}': {error}",
            parent.display()
        ))
    })?;
    let text = directory.read_to_string(Path::new(file_name)).map_err(|error| {
        io::Error::other(format!("read input file '{}': {error}", path.display()))
    })?;
    let parsed: GeoJson = text.parse().map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("parse GeoJSON '{}': {error}", path.display()),
        )
    })?;
    FeatureCollection::try_from(parsed).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("'{}' is not a FeatureCollection: {error}", path.display()),
        )
    })
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}

fn summary(outcome: &GeoJsonIngestionOutcome) -> String {
    let mut lines = vec![
        format!("kind={}", outcome.kind),
        format!("written={}", outcome.written),
        format!("skipped={}", outcome.skipped.len()),
    ];
    lines.extend(
        outcome
            .skipped
            .iter()
            .map(|skip| format!("skipped[{}]={}", skip.index, skip.reason)),
    );
    lines.iter().map(|line| format!("{line}\n")).collect()
}
