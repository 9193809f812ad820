//! Admin maintenance commands
//!
//! These operate directly against the configured PostgreSQL database and
//! print issued API keys to stdout exactly once.

use anyhow::{bail, Context};
use clap::Args;

use crate::config::AppConfig;
use crate::domain::link::{LinkRepository, NewLink};
use crate::domain::user::{NewUser, UserId, UserRepository};
use crate::infrastructure::auth::ApiKeyManager;
use crate::infrastructure::link::PostgresLinkRepository;
use crate::infrastructure::user::PostgresUserRepository;

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    /// Display name for the new user
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct RotateKeyArgs {
    /// ID of the user whose key is rotated
    #[arg(long)]
    pub user_id: i64,

    /// The user's current API key
    #[arg(long)]
    pub key: String,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Display name for the sample user
    #[arg(long, default_value = "Test User")]
    pub name: String,
}

/// Sample links inserted by `seed`
const SEED_LINKS: &[(&str, &str)] = &[
    ("https://www.postgresql.org/docs/", "PostgreSQL Documentation"),
    ("https://doc.rust-lang.org/book/", "The Rust Programming Language"),
    ("https://docs.rs/axum/latest/axum/", "axum - Rust"),
    ("https://developer.mozilla.org/en-US/docs/Learn", "Learn Web Development | MDN"),
    ("https://git-scm.com/", "Git"),
];

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let url = config
        .database
        .url
        .as_deref()
        .context("database.url must be configured for admin commands")?;

    crate::connect_pool(url, config.database.max_connections).await
}

/// Apply database migrations
pub async fn migrate() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().unwrap_or_default();

    let pool = connect(&config).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("migration failed")?;

    println!("Migrations applied.");
    Ok(())
}

/// Create a user and print their API key once
pub async fn create_user(args: CreateUserArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().unwrap_or_default();

    let pool = connect(&config).await?;
    let users = PostgresUserRepository::new(pool);

    let keys = ApiKeyManager::new();
    let pair = keys.generate();

    let user = users
        .create(NewUser {
            name: args.name,
            api_key_hash: Some(pair.hash),
        })
        .await?;

    println!("Created new user! Below are the user details:");
    println!("Name: {}", user.name());
    println!("User ID: {}", user.id());
    println!("API Key: {}", pair.secret);
    println!("Please write down the API key as it will only appear once!");

    Ok(())
}

/// Rotate a user's API key after verifying the previous one
pub async fn rotate_key(args: RotateKeyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().unwrap_or_default();

    let pool = connect(&config).await?;
    let users = PostgresUserRepository::new(pool);
    let keys = ApiKeyManager::new();

    let user_id = UserId::new(args.user_id);

    if !keys.verify_user_key(&users, user_id, &args.key).await {
        bail!("API key validation failed.");
    }

    let pair = keys.generate();
    users.update_key_hash(user_id, &pair.hash).await?;

    println!("New API key is: {}", pair.secret);
    Ok(())
}

/// Seed the database with a sample user and links
pub async fn seed(args: SeedArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().unwrap_or_default();

    let pool = connect(&config).await?;
    let users = PostgresUserRepository::new(pool.clone());
    let links = PostgresLinkRepository::new(pool);

    let keys = ApiKeyManager::new();
    let pair = keys.generate();

    let user = users
        .create(NewUser {
            name: args.name,
            api_key_hash: Some(pair.hash),
        })
        .await?;

    for (url, title) in SEED_LINKS {
        links
            .create(NewLink {
                user_id: user.id(),
                url: (*url).to_string(),
                title: Some((*title).to_string()),
                read: false,
            })
            .await?;
    }

    println!("Seeded user '{}' (ID: {})", user.name(), user.id());
    println!("API Key: {}", pair.secret);
    println!("Inserted {} sample links.", SEED_LINKS.len());

    Ok(())
}
