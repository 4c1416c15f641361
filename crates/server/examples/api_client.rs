//! Walk through the facemate API against a running server.
//!
//! ```text
//! cargo run -p facemate-server --example api_client -- alice.jpg probe.jpg
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(train_path), Some(probe_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: api_client <train-image> <probe-image>");
    };

    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Train a person
    println!("2. Train:");
    let image = STANDARD.encode(std::fs::read(&train_path)?);
    let resp = client
        .post(format!("{SERVER_URL}/train"))
        .json(&json!({ "image": image, "person_id": "alice" }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: Compare a probe image
    println!("3. Compare:");
    let image = STANDARD.encode(std::fs::read(&probe_path)?);
    let resp = client
        .post(format!("{SERVER_URL}/compare"))
        .json(&json!({ "image": format!("data:image/jpeg;base64,{image}") }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 4: Look up the trained identity
    println!("4. Lookup:");
    let resp = client
        .get(format!("{SERVER_URL}/faces/alice"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 5: Metrics
    println!("5. Prometheus Metrics:");
    let resp = client.get(format!("{SERVER_URL}/metrics")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("All examples completed!");
    Ok(())
}
