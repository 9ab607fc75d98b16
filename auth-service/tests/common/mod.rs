use std::sync::Arc;

use auth::ManualClock;
use auth::PasswordHasher;
use auth::PasswordParams;
use auth::StaticKeyProvider;
use auth::TokenCodec;
use auth_service::domain::bootstrap::AdminAccount;
use auth_service::domain::bootstrap::BootstrapSeeder;
use auth_service::domain::login::service::LoginService;
use auth_service::domain::token::service::TokenService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryCredentialStore;
use auth_service::principal::service::AuthenticationService;
use chrono::DateTime;

pub const TTL_SECONDS: i64 = 3600;

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryCredentialStore>,
    pub clock: Arc<ManualClock>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryCredentialStore::new());
        let password_hasher = Arc::new(
            PasswordHasher::with_params(PasswordParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .expect("Failed to build password hasher"),
        );

        let seeder = BootstrapSeeder::new(
            Arc::clone(&store),
            Arc::clone(&password_hasher),
            AdminAccount::new("admin", "Admin1").expect("Invalid admin account"),
        );
        seeder
            .ensure_admin_exists()
            .await
            .expect("Failed to seed admin");

        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let codec = TokenCodec::from_provider(&StaticKeyProvider::new(
            "test-secret-key-for-jwt-signing-at-least-32-bytes",
        ))
        .expect("Failed to build token codec");
        let tokens = TokenService::new(
            codec,
            clock.clone(),
            chrono::Duration::seconds(TTL_SECONDS),
        )
        .expect("Failed to build token service");
        let authentication = AuthenticationService::new(Arc::clone(&store), password_hasher)
            .expect("Failed to build authentication service");

        let app = create_router(Arc::new(LoginService::new(authentication, tokens)));

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server failed to start");
        });

        Self {
            address,
            port,
            store,
            clock,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Log in and return the raw token, panicking on failure
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Token missing from response")
            .to_string()
    }

    pub async fn validate(&self, username: &str, token: &str) -> bool {
        let response = self
            .post("/api/auth/validate")
            .json(&serde_json::json!({ "username": username, "token": token }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["valid"].as_bool().expect("Missing verdict")
    }
}
