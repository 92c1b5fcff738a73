/// Cadence Server - music streaming backend
use cadence_core::{CreateUser, Role, StorageContext};
use cadence_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use cadence_storage::LocalStorageContext;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-server")]
#[command(about = "Cadence music streaming server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CADENCE_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a listener account
    AddUser {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        password: String,
        #[arg(long, default_value = "")]
        photo: String,
    },
    /// Create an artist account
    AddArtist {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        password: String,
        #[arg(long, default_value = "")]
        photo: String,
    },
    /// List all accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cadence_server=info,cadence_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(&cli.config)?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            name,
            password,
            photo,
        } => add_account(&config, name, &password, photo, Role::User).await?,
        Commands::AddArtist {
            name,
            password,
            photo,
        } => add_account(&config, name, &password, photo, Role::Artist).await?,
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Cadence Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = AppState::from_config(&config).await?;
    let app = create_router(app_state, config.max_upload_bytes());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn add_account(
    config: &ServerConfig,
    name: String,
    password: &str,
    photo: String,
    role: Role,
) -> anyhow::Result<()> {
    let db = LocalStorageContext::connect(&config.storage.database_url).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
    .with_hash_cost(config.auth.bcrypt_cost);
    let password_hash = auth_service.hash_password(password)?;

    let user = db
        .create_user(CreateUser {
            name,
            photo,
            password_hash,
            role,
        })
        .await?;

    println!("Created {} '{}'", user.role, user.name);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let db = LocalStorageContext::connect(&config.storage.database_url).await?;

    let users = db.get_all_users().await?;
    let artists = db.get_all_artists().await?;

    println!("Users:");
    for user in users {
        println!("  {} (since {})", user.name, user.register_date);
    }

    println!("Artists:");
    for artist in artists {
        println!(
            "  {} - {} uploaded songs",
            artist.user.name,
            artist.uploaded_songs.len()
        );
    }

    Ok(())
}
