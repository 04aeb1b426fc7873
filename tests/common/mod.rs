use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tokio::sync::OnceCell;

use threadstore_api::app;
use threadstore_api::config::{
    AppConfig, DatabaseConfig, MailerConfig, SecurityConfig, ServerConfig,
};
use threadstore_api::database;
use threadstore_api::services::mailer::Mailer;
use threadstore_api::state::AppState;

static SERVER: OnceCell<TestServer> = OnceCell::const_new();

pub struct TestServer {
    pub base_url: String,
}

#[allow(dead_code)]
pub const TEST_SECRET: &str = "integration-test-secret";

/// Signing config matching the one the test server runs with, for minting
/// tokens inside tests.
#[allow(dead_code)]
pub fn security_config() -> SecurityConfig {
    test_config().security
}

/// Config pointing at a database that is not there. The pool is lazy, so
/// every storage-free path (validation, token checks, envelope shapes)
/// still runs; paths that do reach for the database report a storage
/// fault.
fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            user: "threadstore".to_string(),
            password: "threadstore".to_string(),
            host: "127.0.0.1".to_string(),
            port: 1,
            name: "threadstore_test".to_string(),
            max_connections: 2,
            acquire_timeout_secs: 1,
        },
        security: SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            token_expiry_hours: 4,
            cors_origins: vec!["http://localhost:3000".to_string()],
        },
        mailer: MailerConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: None,
            sender_name: "Threadstore".to_string(),
            sender_email: "noreply@threadstore.example".to_string(),
            timeout_secs: 1,
        },
    }
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        let config = test_config();

        let (tx, rx) = std::sync::mpsc::channel::<Result<String>>();

        // Host the server on a dedicated runtime on its own thread so it
        // outlives the per-test `#[tokio::test]` runtimes that share this
        // `OnceCell`. A `tokio::spawn` task would be tied to whichever
        // test first initialized the cell and would be aborted when that
        // test's runtime drops, leaving later tests with a refused
        // connection.
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    let _ = tx.send(Err(anyhow::Error::new(e).context("building test runtime")));
                    return;
                }
            };
            rt.block_on(async move {
                let result = async {
                    let pool = database::connect_lazy(&config.database)
                        .context("building lazy pool")?;
                    let mailer =
                        Mailer::new(config.mailer.clone()).context("building mail client")?;
                    let state = AppState {
                        config: Arc::new(config),
                        pool,
                        mailer,
                    };
                    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                        .await
                        .context("binding test listener")?;
                    let base_url = format!("http://{}", listener.local_addr()?);
                    Ok::<_, anyhow::Error>((listener, state, base_url))
                }
                .await;

                match result {
                    Ok((listener, state, base_url)) => {
                        let _ = tx.send(Ok(base_url));
                        let _ = axum::serve(listener, app(state)).await;
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                    }
                }
            });
        });

        let base_url = rx
            .recv()
            .context("test server thread dropped before reporting readiness")??;

        let server = Self { base_url };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // 503 means the router answered without a database, which
                // is all readiness needs.
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    SERVER.get_or_try_init(TestServer::spawn).await
}
