//! Error Handling Example
//!
//! Shows how callers discriminate between transport failure kinds to pick a
//! policy: retry timeouts, fail fast on resolution failures, and treat the
//! base connection error as "the request never completed".
//!
//! Run with: cargo run --example error_handling

use lodestone_rs::{Client, ClientError, TransportError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A host that cannot resolve, to provoke a transport failure
    let client = Client::new("https://nonexistent.invalid", "api-key");

    match client.get_engine("books").await {
        Ok(engine) => println!("engine: {:?}", engine),

        // Transport failures: the exchange never completed
        Err(ClientError::Transport(error)) => match &error {
            TransportError::OperationTimeout { .. } => {
                println!("⏱  timed out ({error}); safe to retry with backoff");
            }
            TransportError::CouldNotResolveHost { .. } => {
                println!("🚫 cannot resolve host ({error}); retrying will not help");
            }
            TransportError::CouldNotConnectToHost { .. } => {
                println!("🔌 connect failed ({error}); may be transient");
            }
            TransportError::Connection { .. } => {
                println!("❓ transport failure ({error})");
            }
        },

        // Application errors: the service answered and said no
        Err(ClientError::NotFound(message)) => println!("missing: {message}"),
        Err(other) => println!("request failed: {other}"),
    }

    Ok(())
}
