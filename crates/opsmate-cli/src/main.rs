use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use opsmate_agent::{BedrockBackend, Dispatcher};
use opsmate_core::Config;

#[derive(Parser)]
#[command(
    name = "opsmate",
    about = "Conversational AWS assistant — natural language to AWS CLI",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8000, env = "OPSMATE_PORT")]
        port: u16,
    },

    /// Interactive terminal session against a configured profile
    Repl {
        /// AWS CLI profile to execute commands under
        #[arg(long, env = "OPSMATE_PROFILE")]
        profile: String,

        /// Bedrock model ID (defaults to the configured default model)
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Serve { port } => opsmate_server::serve(config, port).await,
        Commands::Repl { profile, model } => repl(config, profile, model).await,
    }
}

/// Read queries from stdin and answer them until `/bye` or EOF.
async fn repl(config: Config, profile: String, model: Option<String>) -> anyhow::Result<()> {
    let sdk = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let model_id = model.unwrap_or(config.default_model);
    let backend = BedrockBackend::new(aws_sdk_bedrockruntime::Client::new(&sdk), model_id);
    let dispatcher = Dispatcher::new(Arc::new(backend));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "enter your query: ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == "/bye" {
            break;
        }

        match dispatcher.ask(query, &profile).await {
            Ok(response) => writeln!(stdout, "{response}")?,
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    }

    Ok(())
}
