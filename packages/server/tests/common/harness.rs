//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container is shared by every test; each test gets its own
//! freshly migrated database inside it, so row counts never leak between tests.

use anyhow::{Context, Result};
use axum::Router;
use portal_core::common::{Actor, Role};
use portal_core::domains::accounts::User;
use portal_core::domains::auth::JwtService;
use portal_core::kernel::{BaseNotifier, MediaStore, NotificationHub, ServerDeps};
use portal_core::server::{build_app, AxumAppState};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const TEST_JWT_ISSUER: &str = "portal-tests";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    /// Host/port part of the connection string, without a database name
    server_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;

        Ok(Self {
            server_url: format!("postgresql://postgres:postgres@{}:{}", pg_host, pg_port),
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }

    /// Create and migrate an empty database for one test.
    async fn fresh_database(&self) -> Result<PgPool> {
        let name = format!("portal_test_{}", Uuid::new_v4().simple());

        let admin = PgPool::connect(&format!("{}/postgres", self.server_url))
            .await
            .context("Failed to connect to Postgres")?;
        sqlx::query(&format!("CREATE DATABASE {}", name))
            .execute(&admin)
            .await
            .context("Failed to create test database")?;
        admin.close().await;

        let pool = PgPool::connect(&format!("{}/{}", self.server_url, name))
            .await
            .context("Failed to connect to test database")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(pool)
    }
}

/// Test harness that manages test infrastructure.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let chair = ctx.user("chair", Role::Chairperson).await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    /// Deps wired to `hub`, like the real server
    pub deps: Arc<ServerDeps>,
    pub hub: NotificationHub,
    pub jwt_service: Arc<JwtService>,
    pub media_root: PathBuf,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        let _ = tokio::fs::remove_dir_all(&self.media_root).await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;
        let db_pool = infra.fresh_database().await?;
        let media_root = std::env::temp_dir().join(format!("portal-media-{}", Uuid::new_v4()));
        let hub = NotificationHub::new();

        let deps = ServerDeps::new(
            db_pool.clone(),
            Arc::new(hub.clone()),
            MediaStore::new(media_root.clone()),
            "Test Savings Group".to_string(),
        );

        Ok(Self {
            db_pool,
            deps: Arc::new(deps),
            hub,
            jwt_service: Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
            media_root,
        })
    }

    /// Same database and media root, different real-time notifier.
    pub fn deps_with_notifier(&self, notifier: Arc<dyn BaseNotifier>) -> ServerDeps {
        ServerDeps {
            notifier,
            ..(*self.deps).clone()
        }
    }

    /// The full HTTP router over this harness's database.
    pub fn app(&self) -> Router {
        build_app(
            AxumAppState {
                deps: self.deps.clone(),
                jwt_service: self.jwt_service.clone(),
                hub: self.hub.clone(),
            },
            &[],
        )
    }

    /// Bearer token for `user`.
    pub fn token_for(&self, user: &User) -> String {
        self.jwt_service
            .create_token(user.id, user.username.clone(), user.role)
            .expect("Failed to create token")
    }

    pub fn actor(&self, user: &User) -> Actor {
        Actor::new(user.id, user.role)
    }

    /// Insert a user with the fixture password.
    pub async fn user(&self, username: &str, role: Role) -> User {
        super::fixtures::create_user(&self.db_pool, username, role)
            .await
            .expect("Failed to create user")
    }
}
