use ccommits_lsp::{CommitLanguageServer, Config};
use tower_lsp::{LspService, Server};
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    if let Err(err) = config.init_logging() {
        eprintln!("ccommits-lsp: {:#}, logging to stderr", err);
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .init();
    }

    if let Some(err) = config_error {
        warn!("Ignoring config: {:#}", err);
    }

    info!("Starting Conventional Commits Language Server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| CommitLanguageServer::new(client, config));

    Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    info!("Conventional Commits Language Server stopped");
}
