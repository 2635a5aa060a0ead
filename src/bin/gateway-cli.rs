use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the Ethereum gateway", long_about = None)]
struct Cli {
    #[arg(short, long, env = "GATEWAY_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest block height
    BlockNumber,
    /// Ether balance of an address
    Balance { address: String },
    /// Whether an address has deployed bytecode
    IsContract { address: String },
    /// Generate an ephemeral wallet
    Wallet,
    /// Create an encrypted keystore account
    KeystoreAccount {
        /// Passphrase for the key file; omit to use the gateway's default
        #[arg(short, long, env = "GATEWAY_KEYSTORE_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
    },
    /// Node reachability
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::BlockNumber => client.get(format!("{}/", base)),
        Commands::Balance { address } => client
            .post(format!("{}/balance", base))
            .json(&json!({ "address": address })),
        Commands::IsContract { address } => client
            .post(format!("{}/is-contract", base))
            .json(&json!({ "address": address })),
        Commands::Wallet => client.get(format!("{}/wallet", base)),
        Commands::KeystoreAccount { passphrase: Some(passphrase) } => client
            .post(format!("{}/keystore-account", base))
            .json(&json!({ "passphrase": passphrase })),
        Commands::KeystoreAccount { passphrase: None } => {
            client.get(format!("{}/keystore-account", base))
        }
        Commands::Health => client.get(format!("{}/health", base)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
