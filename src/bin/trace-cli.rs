//! Command-line client for a deployed trace-proxy server.
//!
//! Builds the `?url=` query string, calls the server, and prints the
//! response body. The target's scheme is checked locally so obviously bad
//! input never leaves the machine.

use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "trace-cli")]
#[command(about = "Client for the trace-proxy forwarding service", long_about = None)]
struct Cli {
    /// Base URL of the trace-proxy server to use.
    #[arg(short, long, default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL through the pass-through endpoint and print the body
    Fetch {
        #[arg(short, long)]
        url: String,
    },
    /// Trace a URL's redirect chain and print it as JSON
    Trace {
        #[arg(short, long)]
        url: String,
    },
    /// Check that the server is alive
    Ping,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let server = Url::parse(&cli.server)?;
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Fetch { url } => {
            let request_url = endpoint(&server, "/proxy", &validated(&url)?)?;
            let res = client.get(request_url).send().await?;
            print_body(res).await?;
        }
        Commands::Trace { url } => {
            let request_url = endpoint(&server, "/redirect", &validated(&url)?)?;
            let res = client
                .get(request_url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Ping => {
            let mut ping_url = server.clone();
            ping_url.set_path("/ping");
            let res = client.get(ping_url).send().await?;
            println!("{}", res.text().await?);
        }
    }

    Ok(())
}

/// Reject targets the server would reject anyway, before any request.
fn validated(target: &str) -> Result<Url, Box<dyn std::error::Error>> {
    let url = Url::parse(target)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err("the scheme of the target URL must be http or https".into());
    }
    Ok(url)
}

/// Compose `<server><path>?url=<target>` with proper percent-encoding.
fn endpoint(server: &Url, path: &str, target: &Url) -> Result<Url, url::ParseError> {
    let mut request_url = server.clone();
    request_url.set_path(path);
    request_url
        .query_pairs_mut()
        .clear()
        .append_pair("url", target.as_str());
    Ok(request_url)
}

async fn print_body(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }
    print!("{}", res.text().await?);
    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
