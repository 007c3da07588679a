use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "shiken", about = "Run the adaptive quiz structure service")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
}

#[derive(Debug, Clone, Args)]
#[group(multiple = true, required = false)]
pub(crate) struct Db {
    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(long, help = "The database url. Falls back to the DATABASE_URL env var")]
    pub(crate) database_url: Option<Url>,

    #[command(flatten)]
    pub(crate) db: Db,

    #[arg(long, help = "Allowed CORS origins")]
    pub(crate) origins: Vec<String>,

    #[arg(long, help = "If set it is possible to delete a quiz and all its slots")]
    pub(crate) deletable: bool,

    #[arg(long)]
    pub(crate) otlp_endpoint: Option<String>,

    #[arg(
        long,
        default_value = "dev",
        help = "Deployment environment reported to the tracing backend"
    )]
    pub(crate) env: String,
}
