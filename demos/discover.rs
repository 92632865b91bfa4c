//! Discover a few namespaces and call into them
//!
//! Reads `FLICKR_API_KEY`, `FLICKR_API_SECRET` and `FLICKR_APIS` from the
//! environment. Run with: cargo run --example discover

use flickr_reflect::{CallOptions, ClientBuilder, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flickr_reflect=info")),
        )
        .init();
    let _ = dotenv::dotenv();

    let mut builder = ClientBuilder::from_env()?;
    if std::env::var(flickr_reflect::ENV_APIS).is_err() {
        builder = builder.apis(["test", "photos"]);
    }
    let surface = builder.connect().await?;

    println!("=== Discovered {} methods ===", surface.len());
    for name in surface.method_names() {
        let method = surface.method(&name).ok_or("missing method")?;
        println!(
            "{:<40} signed={:<5} login={:<5} perms={:?}",
            name,
            method.needs_signing(),
            method.needs_login(),
            method.descriptor().required_perms
        );
    }
    for (name, err) in &surface.report().failures {
        println!("could not describe {}: {}", name, err);
    }

    if surface.method("test.echo").is_some() {
        println!("\n=== test.echo ===");
        let body = surface
            .call("test.echo", CallOptions::new().param("hello", "world"))
            .await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    }

    if surface.method("test.login").is_some() {
        println!("\n=== test.login ===");
        match surface.call("test.login", CallOptions::new()).await {
            Ok(body) => println!("{}", serde_json::to_string_pretty(&body)?),
            Err(Error::ManualAuthorizationRequired { url }) => {
                println!("Open this URL, approve the application and run again:\n{}", url)
            }
            Err(Error::MissingSharedSecret) => println!("Set FLICKR_API_SECRET to log in"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
