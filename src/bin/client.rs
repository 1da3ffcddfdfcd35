use std::time::Duration;

use clap::Parser;
use poll_rest_api::client::{ApiClient, NewProduct, DEFAULT_ENDPOINT};
use poll_rest_api::middleware::init_cli_tracing;

/// Post a product to the API and print the JSON it sends back.
#[derive(Debug, Parser)]
#[command(name = "client", version)]
struct Cli {
    /// Endpoint that accepts product submissions
    #[arg(long, env = "API_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, default_value = "hello World")]
    title: String,

    #[arg(long, default_value = "I do not like you")]
    content: String,

    /// Decimal price, e.g. 10 or 12.50
    #[arg(long, default_value = "10")]
    price: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn product(&self) -> NewProduct {
        // Send numbers as numbers, anything else verbatim for the server to judge
        let price = serde_json::from_str::<serde_json::Number>(&self.price)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|_| serde_json::Value::String(self.price.clone()));

        NewProduct {
            title: self.title.clone(),
            content: Some(self.content.clone()),
            price,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_cli_tracing(cli.verbose);

    let result = async {
        let client = ApiClient::new(cli.endpoint.clone(), Duration::from_secs(cli.timeout))?;
        tracing::info!("Posting product to {}", client.endpoint());
        let body = client.create_product(&cli.product()).await?;
        anyhow::Ok(serde_json::to_string_pretty(&body)?)
    }
    .await;

    match result {
        Ok(body) => println!("{}", body),
        Err(e) => {
            tracing::error!("Request failed: {:#}", e);
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
