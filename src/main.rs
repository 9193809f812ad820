use clap::Parser;
use linkstash::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Migrate => cli::admin::migrate().await,
        Command::CreateUser(args) => cli::admin::create_user(args).await,
        Command::RotateKey(args) => cli::admin::rotate_key(args).await,
        Command::Seed(args) => cli::admin::seed(args).await,
    }
}
