use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fincalc", version, about = "Financial calculator suite served over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the JSON API server.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = fincalc::api::run_http_server(port).await {
                log::error!("server error: {e}");
                std::process::exit(1);
            }
        }
    }
}
