//! Basic usage example for the Cloud Storage XML API client
//!
//! This example demonstrates:
//! - Creating a bucket with a location constraint
//! - Setting and reading CORS configuration
//! - Uploading, copying and downloading objects
//! - Reading object metadata
//! - Deleting objects and buckets
//!
//! Run with: cargo run --example basic_usage

use gcs_client::{Config, CorsRule, InsertObjectOptions, LocationConstraint, Storage, XmlClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🚀 Cloud Storage XML API - Basic Usage Example\n");

    // Create client configuration
    let config = Config::new("your-project-id-here")
        .with_token("ya29.your-access-token-here"); // Replace with actual credentials

    // Create the client
    let client = XmlClient::new(config)?;

    // ==================== Bucket Operations ====================

    println!("📦 Creating bucket 'my-test-bucket' in the EU...");
    match client
        .insert_bucket("my-test-bucket", Some("private"), Some(LocationConstraint::Eu))
        .await
    {
        Ok(_) => println!("   ✅ Bucket created successfully"),
        Err(e) => println!("   ⚠️  {}", e),
    }

    // List all buckets
    println!("\n📋 Listing all buckets...");
    let listing = client.get_buckets().await?;
    println!("{}", String::from_utf8_lossy(&listing));

    // Configure CORS for browser access
    println!("\n🌐 Setting CORS configuration...");
    let rule = CorsRule {
        origins: vec!["http://example.com".to_string()],
        methods: vec!["GET".to_string(), "HEAD".to_string()],
        response_headers: vec!["x-goog-meta-owner".to_string()],
        max_age_sec: None, // Falls back to the configured default
    };
    client.set_bucket_cors("my-test-bucket", &rule).await?;
    println!("   ✅ CORS set");

    println!("\n🌐 Reading CORS configuration back...");
    let cors = client.get_bucket_cors("my-test-bucket").await?;
    println!("{}", String::from_utf8_lossy(&cors));

    println!("\n🗺  Reading bucket location...");
    let location = client.get_bucket_location("my-test-bucket").await?;
    println!("{}", String::from_utf8_lossy(&location));

    // ==================== Object Operations ====================

    // Upload a text file; the content type is inferred from the name
    println!("\n📤 Uploading 'hello.txt'...");
    client
        .insert_object(
            "my-test-bucket",
            "hello.txt",
            "Hello, Cloud Storage!".into(),
            &InsertObjectOptions::new().with_acl("private"),
        )
        .await?;
    println!("   ✅ Uploaded");

    // Read the metadata back
    println!("\n🔍 Reading metadata for 'hello.txt'...");
    let envelope = client.get_object_metadata("my-test-bucket", "hello.txt").await?;
    println!("   {} {}", envelope.status, envelope.reason);
    for (name, value) in &envelope.headers {
        println!("   {}: {}", name, value);
    }

    // Copy an object
    println!("\n📋 Copying 'hello.txt' to 'hello-copy.txt'...");
    client
        .copy_object(
            "my-test-bucket",
            "hello.txt",
            "my-test-bucket",
            Some("hello-copy.txt"),
            None,
        )
        .await?;
    println!("   ✅ Copied");

    // Download an object
    println!("\n📥 Downloading 'hello-copy.txt'...");
    let data = client.get_object("my-test-bucket", "hello-copy.txt").await?;
    println!("   Content: {}", String::from_utf8_lossy(&data));

    // ==================== Cleanup ====================

    println!("\n🧹 Cleaning up...");
    client.delete_object("my-test-bucket", "hello.txt").await?;
    client.delete_object("my-test-bucket", "hello-copy.txt").await?;
    client.delete_bucket("my-test-bucket").await?;
    println!("   ✅ Bucket deleted");

    println!("\n✨ Example completed successfully!");

    Ok(())
}
