//! Basic Usage Example
//!
//! Creates an engine, declares a schema, indexes a few documents and runs a
//! search against a Lodestone deployment.
//!
//! Run with: cargo run --example basic_usage

use serde_json::json;

use lodestone_rs::{Client, FieldType, SearchQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let endpoint =
        std::env::var("LODESTONE_ENDPOINT").unwrap_or_else(|_| "http://localhost:3002".into());
    let api_key = std::env::var("LODESTONE_API_KEY").unwrap_or_default();

    let client = Client::new(endpoint, api_key);

    // Create an engine for this run
    let engine = client.create_engine("books", Some("en")).await?;
    println!("✅ Engine ready: {}", engine.name);

    // Declare the fields we search on
    let schema = client
        .update_schema(
            "books",
            [
                ("title".to_string(), FieldType::Text),
                ("year".to_string(), FieldType::Number),
            ]
            .into_iter()
            .collect(),
        )
        .await?;
    println!("✅ Schema has {} fields", schema.len());

    // Index a few documents
    let results = client
        .index_documents(
            "books",
            vec![
                json!({"id": "moon", "title": "The Moon Is a Harsh Mistress", "year": 1966}),
                json!({"id": "dune", "title": "Dune", "year": 1965}),
                json!({"id": "left-hand", "title": "The Left Hand of Darkness", "year": 1969}),
            ],
        )
        .await?;
    for result in &results {
        match &result.id {
            Some(id) if result.is_ok() => println!("📝 Indexed {}", id),
            _ => println!("⚠️  Rejected: {:?}", result.errors),
        }
    }

    // Search for them
    let response = client.search("books", SearchQuery::new("moon")).await?;
    println!("🔍 {} results for 'moon':", response.meta.page.total_results);
    for hit in &response.results {
        println!("   {}", hit);
    }

    // Clean up
    client.delete_engine("books").await?;
    Ok(())
}
