use serde::de::DeserializeOwned;
use tracing::debug;

use lodestone_core::models::{
    CreateEngineRequest, DeleteDocumentResult, DocumentIndexResult, DocumentListResponse, Engine,
    EngineListResponse, ErrorResponse, Page, Schema, SearchQuery, SearchResponse,
};
use lodestone_core::ClientConfig;

use crate::transport::{
    classify, ConnectionErrorHandler, Handler, Method, ReqwestHandler, TransportRequest,
    TransportResponse,
};
use crate::{ClientError, Result};

/// Lodestone REST API Client
///
/// Holds the composed transport stack: the classification middleware wrapped
/// around the native engine. Cheap to share behind an `Arc`; all operations
/// take `&self`.
pub struct Client {
    config: ClientConfig,
    handler: Box<dyn Handler>,
}

impl Client {
    /// Create a new client for the given endpoint and API key
    pub fn new(api_endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::assemble(ClientConfig::new(api_endpoint, api_key), ReqwestHandler::new())
    }

    /// Create a client from a full configuration
    pub fn from_config(config: ClientConfig) -> anyhow::Result<Self> {
        let engine = ReqwestHandler::from_config(&config)?;
        Ok(Self::assemble(config, engine))
    }

    fn assemble<H: Handler + 'static>(config: ClientConfig, engine: H) -> Self {
        Self {
            config,
            handler: Box::new(ConnectionErrorHandler::new(engine)),
        }
    }

    // ---- Engines ----

    /// List engines
    pub async fn list_engines(&self, page: Option<Page>) -> Result<EngineListResponse> {
        let url = self.url("engines");
        debug!(%url, "listing engines");
        self.call(Method::Get, &url, page_body(page)).await
    }

    /// Get an engine by name
    pub async fn get_engine(&self, engine: &str) -> Result<Engine> {
        let url = self.url(&format!("engines/{engine}"));
        debug!(%url, "fetching engine");
        self.call(Method::Get, &url, None).await
    }

    /// Create an engine, optionally with an analysis language
    pub async fn create_engine(&self, name: &str, language: Option<&str>) -> Result<Engine> {
        let url = self.url("engines");
        debug!(%url, engine = name, "creating engine");
        let request = CreateEngineRequest {
            name: name.to_string(),
            language: language.map(str::to_string),
        };
        self.call(Method::Post, &url, Some(serde_json::to_value(&request)?))
            .await
    }

    /// Delete an engine and all of its documents
    pub async fn delete_engine(&self, engine: &str) -> Result<()> {
        let url = self.url(&format!("engines/{engine}"));
        debug!(%url, "deleting engine");
        let _: serde_json::Value = self.call(Method::Delete, &url, None).await?;
        Ok(())
    }

    // ---- Documents ----

    /// Index documents into an engine.
    ///
    /// Documents are schemaless JSON objects; the service assigns an id to
    /// any document that does not carry one. The per-document result reports
    /// indexing errors without failing the whole batch.
    pub async fn index_documents(
        &self,
        engine: &str,
        documents: Vec<serde_json::Value>,
    ) -> Result<Vec<DocumentIndexResult>> {
        let url = self.url(&format!("engines/{engine}/documents"));
        debug!(%url, count = documents.len(), "indexing documents");
        self.call(Method::Post, &url, Some(serde_json::Value::Array(documents)))
            .await
    }

    /// Get documents by id; ids with no matching document yield `None`
    pub async fn get_documents(
        &self,
        engine: &str,
        ids: &[&str],
    ) -> Result<Vec<Option<serde_json::Value>>> {
        let url = self.url(&format!("engines/{engine}/documents"));
        debug!(%url, count = ids.len(), "fetching documents");
        self.call(Method::Get, &url, Some(serde_json::json!(ids)))
            .await
    }

    /// List documents page by page
    pub async fn list_documents(
        &self,
        engine: &str,
        page: Option<Page>,
    ) -> Result<DocumentListResponse> {
        let url = self.url(&format!("engines/{engine}/documents/list"));
        debug!(%url, "listing documents");
        self.call(Method::Get, &url, page_body(page)).await
    }

    /// Apply partial updates to existing documents
    pub async fn update_documents(
        &self,
        engine: &str,
        updates: Vec<serde_json::Value>,
    ) -> Result<Vec<DocumentIndexResult>> {
        let url = self.url(&format!("engines/{engine}/documents"));
        debug!(%url, count = updates.len(), "updating documents");
        self.call(Method::Patch, &url, Some(serde_json::Value::Array(updates)))
            .await
    }

    /// Delete documents by id
    pub async fn delete_documents(
        &self,
        engine: &str,
        ids: &[&str],
    ) -> Result<Vec<DeleteDocumentResult>> {
        let url = self.url(&format!("engines/{engine}/documents"));
        debug!(%url, count = ids.len(), "deleting documents");
        self.call(Method::Delete, &url, Some(serde_json::json!(ids)))
            .await
    }

    // ---- Schema ----

    /// Get the active schema of an engine
    pub async fn get_schema(&self, engine: &str) -> Result<Schema> {
        let url = self.url(&format!("engines/{engine}/schema"));
        debug!(%url, "fetching schema");
        self.call(Method::Get, &url, None).await
    }

    /// Declare or change field types; returns the full updated schema
    pub async fn update_schema(&self, engine: &str, schema: Schema) -> Result<Schema> {
        let url = self.url(&format!("engines/{engine}/schema"));
        debug!(%url, fields = schema.len(), "updating schema");
        self.call(Method::Post, &url, Some(serde_json::to_value(&schema)?))
            .await
    }

    // ---- Search ----

    /// Search an engine
    pub async fn search(&self, engine: &str, query: SearchQuery) -> Result<SearchResponse> {
        let url = self.url(&format!("engines/{engine}/search"));
        debug!(%url, query = %query.query, "searching");
        self.call(Method::Post, &url, Some(serde_json::to_value(&query)?))
            .await
    }

    // ---- Plumbing ----

    fn url(&self, path: &str) -> String {
        format!("{}/api/as/v1/{}", self.config.base_url(), path)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let mut request = TransportRequest::new(method, url).with_header(
            "Authorization",
            format!("Bearer {}", self.config.api_key),
        );
        if let Some(body) = body {
            request = request.with_body(body);
        }

        let (status, body) = match self.handler.perform(request).await? {
            TransportResponse::Success { status, body } => (status, body),
            // a failure marker must never surface as success, even if the
            // stack was assembled without the classifier
            TransportResponse::Failure(failure) => return Err(classify(failure).into()),
        };

        if status >= 400 {
            return Err(error_for_status(status, &body));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Map an application-level error status onto a typed client error
fn error_for_status(status: u16, body: &[u8]) -> ClientError {
    let message = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.message(),
        _ => String::from_utf8_lossy(body).into_owned(),
    };
    match status {
        400 => ClientError::BadRequest(message),
        401 | 403 => ClientError::Authentication(message),
        404 => ClientError::NotFound(message),
        429 => ClientError::TooManyRequests(message),
        _ => ClientError::Server { status, message },
    }
}

fn page_body(page: Option<Page>) -> Option<serde_json::Value> {
    page.map(|page| serde_json::json!({ "page": page }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status_mapping() {
        let body = br#"{"errors":["engine not found"]}"#;
        assert!(matches!(
            error_for_status(404, body),
            ClientError::NotFound(message) if message == "engine not found"
        ));
        assert!(matches!(
            error_for_status(400, body),
            ClientError::BadRequest(_)
        ));
        assert!(matches!(
            error_for_status(401, body),
            ClientError::Authentication(_)
        ));
        assert!(matches!(
            error_for_status(403, body),
            ClientError::Authentication(_)
        ));
        assert!(matches!(
            error_for_status(429, body),
            ClientError::TooManyRequests(_)
        ));
        assert!(matches!(
            error_for_status(502, body),
            ClientError::Server { status: 502, .. }
        ));
    }

    #[test]
    fn test_error_for_status_falls_back_to_raw_body() {
        let error = error_for_status(500, b"upstream exploded");
        assert!(matches!(
            error,
            ClientError::Server { status: 500, message } if message == "upstream exploded"
        ));
    }

    #[test]
    fn test_url_building() {
        let client = Client::new("https://search.example.com/", "key");
        assert_eq!(
            client.url("engines/foo/documents"),
            "https://search.example.com/api/as/v1/engines/foo/documents"
        );
    }
}
