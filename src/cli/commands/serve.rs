use clap::Args;

use crate::config::AppConfig;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Address to bind (overrides ONLYSAID_API_HOST)")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides ONLYSAID_API_PORT / PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    crate::serve(config).await
}
