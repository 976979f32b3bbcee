//! Serve command handler.

use askdocs_core::{AppResult, ServiceConfig};
use clap::Args;

/// Run the question-answering HTTP server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    /// Execute the serve command.
    pub async fn execute(&self, config: &ServiceConfig) -> AppResult<()> {
        let mut config = config.clone();

        if let Some(ref host) = self.host {
            config.bind_host = host.clone();
        }
        if let Some(port) = self.port {
            config.bind_port = port;
        }

        askdocs_server::run(&config).await
    }
}
