use std::error::Error;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use armlive::LiveValidator;

/// Index a specification directory and optionally match one request against
/// it: `armlive <directory> [url] [method]`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(directory) = args.next() else {
        eprintln!("usage: armlive <directory> [url] [method]");
        std::process::exit(2);
    };
    let url = args.next();
    let method = args.next().unwrap_or_else(|| "get".to_string());

    let mut validator = LiveValidator::new(Some(&json!({ "directory": directory })))?;
    validator.initialize().await?;
    println!(
        "indexed {} operations across {} providers",
        validator.cache().len(),
        validator.cache().provider_count()
    );

    if let Some(url) = url {
        let operations = validator.get_potential_operations(&url, &method);
        if operations.is_empty() {
            println!("no declared operation matches {method} {url}");
        }
        for operation in operations {
            println!(
                "{} {}  ({})",
                operation.method,
                operation.template.raw(),
                operation.id.as_deref().unwrap_or("unnamed")
            );
        }
    }

    Ok(())
}
