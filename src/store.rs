use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

use crate::order::Order;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("database query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

/// Persistence capability for orders. The service runs with either a
/// Postgres-backed store or the no-op [`NullStore`], chosen at startup.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store the order, assigning its id and creation timestamp.
    async fn create(&self, order: Order) -> Result<Order, StoreError>;

    /// All stored orders in insertion order.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Whether `create` actually persists; drives the acknowledgement text.
    fn persists(&self) -> bool;
}

#[derive(Clone)]
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    pub async fn connect(
        dbname: &str,
        user: &str,
        password: &str,
        host: &str,
        port: &str,
    ) -> Result<Self, StoreError> {
        let mut cfg = Config::new();
        cfg.dbname = Some(dbname.to_string());
        cfg.user = Some(user.to_string());
        cfg.password = Some(password.to_string());
        cfg.host = Some(host.to_string());
        cfg.port = Some(
            port.parse()
                .map_err(|e| StoreError::Unavailable(format!("invalid port '{port}': {e}")))?,
        );
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = PostgresStore { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "
                CREATE TABLE IF NOT EXISTS orders (
                    id BIGSERIAL PRIMARY KEY,
                    customer_name VARCHAR(255) NOT NULL,
                    email VARCHAR(255) NOT NULL,
                    item_description TEXT NOT NULL,
                    quantity INTEGER NOT NULL,
                    price DOUBLE PRECISION NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                )
                ",
                &[],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn create(&self, mut order: Order) -> Result<Order, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO orders (customer_name, email, item_description, quantity, price)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id, created_at",
                &[
                    &order.customer_name,
                    &order.email,
                    &order.item_description,
                    &order.quantity,
                    &order.price,
                ],
            )
            .await?;
        order.id = Some(row.get("id"));
        order.created_at = Some(row.get("created_at"));
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare(
                "SELECT id, customer_name, email, item_description, quantity, price, created_at
                 FROM orders ORDER BY id",
            )
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        let orders = rows
            .iter()
            .map(|row| Order {
                id: Some(row.get("id")),
                customer_name: row.get("customer_name"),
                email: row.get("email"),
                item_description: row.get("item_description"),
                quantity: row.get("quantity"),
                price: row.get("price"),
                created_at: Some(row.get("created_at")),
            })
            .collect();
        Ok(orders)
    }

    fn persists(&self) -> bool {
        true
    }
}

/// Store used when no database is configured: create is a pass-through that
/// never assigns an id or timestamp, list always comes back empty.
#[derive(Clone, Default)]
pub struct NullStore;

#[async_trait]
impl OrderStore for NullStore {
    async fn create(&self, order: Order) -> Result<Order, StoreError> {
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Ok(Vec::new())
    }

    fn persists(&self) -> bool {
        false
    }
}
