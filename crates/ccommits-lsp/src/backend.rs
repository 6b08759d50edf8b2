use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{info, warn};

use crate::buffer::Edit;
use crate::config::Config;
use crate::diagnostics::analyze_with;
use crate::document::DocumentStore;

/// The part of the client connection the server talks to.
#[async_trait]
pub trait LspClient: Send + Sync + Clone + 'static {
    async fn publish_diagnostics(&self, uri: Url, diags: Vec<Diagnostic>, version: Option<i32>);
    async fn log_message(&self, typ: MessageType, message: String);
}

#[async_trait]
impl LspClient for Client {
    async fn publish_diagnostics(&self, uri: Url, diags: Vec<Diagnostic>, version: Option<i32>) {
        self.publish_diagnostics(uri, diags, version).await;
    }

    async fn log_message(&self, typ: MessageType, message: String) {
        self.log_message(typ, message).await;
    }
}

pub struct CommitLanguageServer<C = Client> {
    client: C,
    config: Config,
    documents: Arc<RwLock<DocumentStore>>,
}

impl<C: LspClient> CommitLanguageServer<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self {
            client,
            config,
            documents: Arc::new(RwLock::new(DocumentStore::new())),
        }
    }

    async fn validate(&self, uri: Url, text: &str, version: i32) {
        let diagnostics = analyze_with(text, self.config.severity.to_lsp());
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }
}

pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::INCREMENTAL),
                ..Default::default()
            },
        )),
        ..Default::default()
    }
}

#[async_trait]
impl<C: LspClient> LanguageServer for CommitLanguageServer<C> {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        info!("Initializing Conventional Commits Language Server");

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "ccommits-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("Conventional Commits Language Server initialized");
        self.client
            .log_message(MessageType::INFO, "ccommits LSP ready".to_string())
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down Conventional Commits Language Server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri, text, version, ..
        } = params.text_document;
        info!("Document opened: {}", uri);

        // Stored before publishing so a change that races the publish finds it.
        self.documents
            .write()
            .await
            .open(uri.clone(), text.clone(), version);

        if self.config.diagnose_on_open {
            self.validate(uri, &text, version).await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let VersionedTextDocumentIdentifier { uri, version } = params.text_document;
        info!("Document changed: {} (version {})", uri, version);

        let edits: Vec<Edit> = params.content_changes.into_iter().map(Edit::from).collect();

        let text = {
            let mut documents = self.documents.write().await;
            match documents.change(&uri, version, edits) {
                Ok(Some(text)) => text,
                Ok(None) => {
                    warn!("Change for unknown document {}", uri);
                    return;
                }
                Err(err) => {
                    warn!("Rejected edit for {}: {}", uri, err);
                    match documents.get(&uri) {
                        Some(document) => document.text().to_string(),
                        None => return,
                    }
                }
            }
        };

        self.validate(uri, &text, version).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        info!("Document closed: {}", uri);

        let closed = self.documents.write().await.close(&uri);
        if closed.is_some() {
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
        }
    }
}
