use clap::{Parser, Subcommand};
use serde_json::Value;

use api_relay::routing::RouteTable;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the API relay", long_about = None)]
struct Cli {
    /// Base URL of a running relay instance
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled-in route table
    Routes,
    /// Send a GET through the relay and print the response
    Check {
        /// Path to request, e.g. /openai/v1/models
        path: String,
    },
    /// Fetch the relay status banner
    Home,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Routes => {
            for (prefix, upstream) in RouteTable::builtin().entries() {
                println!("{:<14} -> {}", prefix, upstream);
            }
        }
        Commands::Check { path } => {
            let client = reqwest::Client::new();
            let res = client.get(format!("{}{}", cli.url, path)).send().await?;
            print_response(res).await?;
        }
        Commands::Home => {
            let client = reqwest::Client::new();
            let res = client.get(&cli.url).send().await?;
            println!("{}", res.text().await?);
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let headers = res.headers().clone();
    let is_json = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("json"))
        .unwrap_or(false);

    println!("HTTP {}", status);
    for (name, value) in headers.iter() {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    println!();

    let text = res.text().await?;
    if is_json {
        match serde_json::from_str::<Value>(&text) {
            Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
            Err(_) => println!("{}", text),
        }
    } else {
        println!("{}", text);
    }

    Ok(())
}
