//! CLI module for linkstash
//!
//! Provides subcommands for running the API server and for the admin
//! maintenance tasks (schema migration, user creation, key rotation,
//! development seeding).

pub mod admin;
pub mod serve;

use clap::{Parser, Subcommand};

/// Linkstash - bookmark link API with per-user API keys
#[derive(Parser)]
#[command(name = "linkstash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Apply database migrations
    Migrate,

    /// Create a user and issue their API key
    CreateUser(admin::CreateUserArgs),

    /// Re-issue a user's API key, authenticated by the previous one
    RotateKey(admin::RotateKeyArgs),

    /// Seed the database with a sample user and links (development)
    Seed(admin::SeedArgs),
}
