use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "rpc-cli")]
#[command(about = "Send JSON-RPC 2.0 calls to an rpc-intake server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080/rpc")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call a method with optional JSON params
    Call {
        method: String,
        /// Params as JSON text, object or array
        #[arg(short, long)]
        params: Option<String>,
        #[arg(long, default_value_t = 1)]
        id: i64,
    },
    /// Send an arbitrary body, useful for probing intake errors
    Raw {
        body: String,
        #[arg(long, default_value = "POST")]
        http_method: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (http_method, body) = match cli.command {
        Commands::Call { method, params, id } => {
            let mut envelope = json!({"jsonrpc": "2.0", "id": id, "method": method});
            if let Some(params) = params {
                envelope["params"] = serde_json::from_str::<Value>(&params)?;
            }
            (Method::POST, serde_json::to_vec(&envelope)?)
        }
        Commands::Raw { body, http_method } => {
            (Method::from_bytes(http_method.to_uppercase().as_bytes())?, body.into_bytes())
        }
    };

    let res = client
        .request(http_method, &cli.url)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(body)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            let pretty = serde_json::to_string_pretty(&json)?;
            if status.is_success() && json.get("error").is_none() {
                println!("{}", pretty);
            } else {
                eprintln!("Error: server returned status {}", status);
                eprintln!("{}", pretty);
            }
        }
        Err(_) => {
            eprintln!("Error: server returned status {} with non-JSON body", status);
            eprintln!("{}", text);
        }
    }
    Ok(())
}
