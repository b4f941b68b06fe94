//! Server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: database init, migrations,
//! demo seeding, the REST API, metrics and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::seed_demo_data;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, SeaOrmRepositoryProvider};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Insert demo data into empty tables when `seed.enabled` is set (default: true).
    pub seed: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running API server.
///
/// ```rust,no_run
/// use mottu_api::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is bound to (resolved when port 0 was requested)
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global metrics recorder can only be installed once per process;
/// later starts in the same process reuse it.
fn prometheus_handle() -> Result<PrometheusHandle, BuildError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

impl ServerHandle {
    /// Start the server:
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Seed demo data (if enabled)
    /// 4. Serve the REST API with Swagger UI
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting Mottu API...");

        let prometheus = prometheus_handle()?;

        // ── Database ───────────────────────────────────────────
        let db_config = app_cfg.database_config();
        info!(url = %db_config.url, "Database configured");
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if opts.seed && app_cfg.seed.enabled {
            seed_demo_data(repos.as_ref(), &app_cfg.seed, app_cfg.security.bcrypt_cost).await?;
        }

        if !app_cfg.security.protect_resources {
            warn!("security.protect_resources is off: moto and maintenance routes are public");
        }

        // ── REST API ───────────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_router = create_api_router(repos.clone(), db.clone(), &app_cfg, prometheus);

        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(
            listener,
            api_router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for in-flight requests to drain (bounded by
    /// `server.shutdown_timeout`), then close the database.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                timeout_secs = timeout.as_secs(),
                "REST API server did not stop in time"
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Mottu API shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down Mottu API...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config. `RUST_LOG` wins over
/// `logging.level`.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
