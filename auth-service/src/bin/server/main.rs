use std::sync::Arc;

use auth::PasswordHasher;
use auth::StaticKeyProvider;
use auth::SystemClock;
use auth::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::bootstrap::AdminAccount;
use auth_service::domain::bootstrap::BootstrapSeeder;
use auth_service::domain::login::service::LoginService;
use auth_service::domain::token::service::TokenService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryCredentialStore;
use auth_service::outbound::repositories::PostgresCredentialStore;
use auth_service::principal::ports::CredentialStore;
use auth_service::principal::service::AuthenticationService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.url.is_some(),
        token_ttl_seconds = config.jwt.ttl_seconds,
        "Configuration loaded"
    );

    match config.database.url.clone() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(config, Arc::new(PostgresCredentialStore::new(pg_pool))).await
        }
        None => {
            tracing::warn!("No database configured, principals are kept in memory");
            serve(config, Arc::new(InMemoryCredentialStore::new())).await
        }
    }
}

async fn serve<CS>(config: Config, store: Arc<CS>) -> Result<(), anyhow::Error>
where
    CS: CredentialStore,
{
    let key_provider = StaticKeyProvider::new(config.jwt.secret.clone());
    let codec = TokenCodec::from_provider(&key_provider)?;
    let ttl = TokenService::lifetime_from_seconds(config.jwt.ttl_seconds)?;
    let tokens = TokenService::new(codec, Arc::new(SystemClock), ttl)?;
    let password_hasher = Arc::new(PasswordHasher::with_params(config.password)?);

    let admin = AdminAccount::new(
        &config.bootstrap.admin_username,
        config.bootstrap.admin_password.clone(),
    )?;
    let seeder = BootstrapSeeder::new(Arc::clone(&store), Arc::clone(&password_hasher), admin);
    seeder.ensure_admin_exists().await?;

    let authentication = AuthenticationService::new(store, password_hasher)?;
    let login_service = Arc::new(LoginService::new(authentication, tokens));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(login_service)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
