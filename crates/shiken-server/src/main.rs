use crate::opt::{Commands, Db, Run};
use anyhow::{Result, anyhow};
use axum::serve;
use clap::Parser;
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use url::Url;

mod app;
mod opt;
mod routes;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3030;

async fn run(opt: Run) -> Result<()> {
    let _guard = shiken_utils::tracing::setup(
        shiken_utils::tracing::TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .otlp_endpoint(opt.otlp_endpoint.clone())
            .env(opt.env.clone())
            .build(),
    )?;

    let db_url = database_url(&opt)?;
    let scheme = db_url.scheme().split('+').next().unwrap_or_default();
    if !matches!(scheme, "sqlite" | "postgres" | "postgresql") {
        return Err(anyhow!("unsupported database scheme: {scheme}"));
    }

    let pool_options = build_connect_options(&opt.db, db_url);
    let conn = Database::connect(pool_options).await?;

    shiken_db::migration::migrate(&conn)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn std::error::Error, "failed to run migrations"))?;

    let Run {
        host,
        port,
        origins,
        deletable,
        ..
    } = opt;

    let app = app::create_app(origins, deletable, conn)?;

    let listener = shiken_utils::net::create_listener((host, port), (DEFAULT_HOST, DEFAULT_PORT)).await?;

    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve::serve(listener, app.into_make_service()).await?;
    Ok(())
}

fn database_url(opt: &Run) -> Result<Url> {
    if let Some(url) = &opt.database_url {
        return Ok(url.clone());
    }
    let url = env::var("DATABASE_URL").map_err(|_| anyhow!("neither --database-url nor DATABASE_URL is set"))?;
    Ok(Url::parse(&url)?)
}

fn build_connect_options(db_options: &Db, db_url: Url) -> ConnectOptions {
    let mut pool_options = ConnectOptions::new(db_url);
    if let Some(min_connections) = db_options.db_min_connections {
        pool_options.min_connections(min_connections);
    }
    if let Some(max_connections) = db_options.db_max_connections {
        pool_options.max_connections(max_connections);
    }
    pool_options.sqlx_logging_level(log::LevelFilter::Debug);
    pool_options
}

fn main() -> Result<()> {
    let main = async {
        let opt = opt::Cli::parse();

        match opt.command {
            Commands::Run(o) => run(o).await?,
        }
        Ok(())
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(main)
}
