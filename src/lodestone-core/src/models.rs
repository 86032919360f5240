use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Page selects a slice of a paginated listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    #[serde(default = "default_page_current")]
    pub current: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
}

fn default_page_current() -> usize {
    1
}

fn default_page_size() -> usize {
    25
}

impl Default for Page {
    fn default() -> Self {
        Self {
            current: default_page_current(),
            size: default_page_size(),
        }
    }
}

impl Page {
    pub fn new(current: usize, size: usize) -> Self {
        Self { current, size }
    }
}

/// Pagination block echoed back inside list and search responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub current: usize,
    pub size: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub total_results: usize,
}

/// ListMeta wraps the response metadata of paginated endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMeta {
    pub page: PageMeta,
}

/// Engine represents a named document collection on the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_count: Option<i64>,
}

/// CreateEngineRequest is the body of an engine creation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEngineRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// EngineListResponse is the paginated engine listing
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineListResponse {
    pub meta: ListMeta,
    pub results: Vec<Engine>,
}

/// Per-document outcome of an index or update call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentIndexResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl DocumentIndexResult {
    /// True when the service accepted the document
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Per-document outcome of a delete call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDocumentResult {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
}

/// DocumentListResponse is the paginated document listing.
///
/// Documents are schemaless JSON objects owned by the caller, so results
/// are surfaced as raw values.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub meta: ListMeta,
    pub results: Vec<serde_json::Value>,
}

/// FieldType is the closed set of types a schema field can take
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Geolocation,
}

/// Schema maps field names to their declared types
pub type Schema = HashMap<String, FieldType>;

/// SearchQuery represents a search against an engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub filters: HashMap<String, serde_json::Value>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: None,
            filters: HashMap::new(),
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.filters.insert(field.into(), value);
        self
    }
}

/// SearchResponse carries matched documents and their pagination metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub meta: ListMeta,
    pub results: Vec<serde_json::Value>,
}

/// ErrorResponse is the error body returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// Collapse the error list into a single printable message
    pub fn message(&self) -> String {
        self.errors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let page: Page = serde_json::from_str("{}").unwrap();
        assert_eq!(page.current, 1);
        assert_eq!(page.size, 25);
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_index_result_parses_service_envelope() {
        let body = r#"[{"id":"doc-1","errors":[]},{"id":null,"errors":["content is required"]}]"#;
        let results: Vec<DocumentIndexResult> = serde_json::from_str(body).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert_eq!(results[0].id.as_deref(), Some("doc-1"));
        assert!(!results[1].is_ok());
    }

    #[test]
    fn test_field_type_wire_names() {
        let schema: Schema =
            serde_json::from_str(r#"{"title":"text","year":"number","location":"geolocation"}"#)
                .unwrap();
        assert_eq!(schema["title"], FieldType::Text);
        assert_eq!(schema["year"], FieldType::Number);
        assert_eq!(schema["location"], FieldType::Geolocation);
        assert_eq!(serde_json::to_string(&FieldType::Date).unwrap(), "\"date\"");
    }

    #[test]
    fn test_search_query_skips_empty_optionals() {
        let query = SearchQuery::new("moon base");
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body, serde_json::json!({"query": "moon base"}));

        let paged = SearchQuery::new("moon base").with_page(Page::new(2, 10));
        let body = serde_json::to_value(&paged).unwrap();
        assert_eq!(body["page"]["current"], 2);
        assert_eq!(body["page"]["size"], 10);
    }

    #[test]
    fn test_error_response_message() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"errors":["engine not found","check the name"]}"#).unwrap();
        assert_eq!(body.message(), "engine not found, check the name");
    }
}
