//! Local SQLite storage for the cart and placed orders.
//!
//! Lines and orders are stored as JSON payloads next to the few columns we
//! query on. Every mutation runs in its own transaction, so a reader always
//! sees either the old or the new cart, never a half-applied checkout.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

use crate::domain::{AppError, Order, OrderLine, OrderStatus, Result};

/// Local storage repository using SQLite.
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    /// Opens or creates the local storage database.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create storage directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::database)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(AppError::database)?;

        let storage = Self { conn };
        storage.init_schema()?;

        tracing::debug!(path = %path.display(), "Opened local storage");

        Ok(storage)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    /// Returns error if schema creation fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(AppError::database)?;
        let storage = Self { conn };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            -- Cart lines, in the order they were added
            CREATE TABLE IF NOT EXISTS cart_lines (
                id TEXT PRIMARY KEY,
                position INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                payload TEXT NOT NULL
            );

            -- Placed orders
            CREATE TABLE IF NOT EXISTS orders (
                order_id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                total_minor INTEGER NOT NULL,
                payload TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cart_lines_position
                ON cart_lines(position);
            CREATE INDEX IF NOT EXISTS idx_orders_status
                ON orders(status);
            CREATE INDEX IF NOT EXISTS idx_orders_created
                ON orders(created_at DESC);
            ",
            )
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Append a line to the cart.
    ///
    /// # Errors
    /// Returns error if a line with the same id exists or the write fails.
    pub fn add_line(&self, line: &OrderLine) -> Result<()> {
        let payload = serde_json::to_string(line).map_err(AppError::json_parse)?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(AppError::database)?;
        tx.execute(
            r"
            INSERT INTO cart_lines (id, position, created_at, payload)
            VALUES (?1, (SELECT COALESCE(MAX(position), 0) + 1 FROM cart_lines), ?2, ?3)
            ",
            params![&line.id, line.created_at.to_rfc3339(), payload],
        )
        .map_err(AppError::database)?;
        tx.commit().map_err(AppError::database)?;

        tracing::info!(id = %line.id, amount = %line.price.amount, "Added line to cart");

        Ok(())
    }

    /// All cart lines in insertion order.
    ///
    /// # Errors
    /// Returns error if the query fails or a payload is corrupt.
    pub fn cart_lines(&self) -> Result<Vec<OrderLine>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM cart_lines ORDER BY position ASC")
            .map_err(AppError::database)?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(AppError::database)?;

        let mut lines = Vec::new();
        for row in rows {
            let payload = row.map_err(AppError::database)?;
            lines.push(serde_json::from_str(&payload).map_err(AppError::json_parse)?);
        }

        Ok(lines)
    }

    /// Remove one cart line. Returns whether it existed.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub fn remove_line(&self, id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM cart_lines WHERE id = ?1", [id])
            .map_err(AppError::database)?;

        if removed > 0 {
            tracing::info!(id, "Removed line from cart");
        }

        Ok(removed > 0)
    }

    /// Empty the cart. Returns the number of lines removed.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub fn clear_cart(&self) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM cart_lines", [])
            .map_err(AppError::database)?;

        tracing::info!(removed, "Cleared cart");

        Ok(removed)
    }

    /// Turn the current cart into an order, atomically.
    ///
    /// The cart is read inside an immediate transaction, so no other writer
    /// can change it between the read and the removal. `build` receives the
    /// lines and returns the order to store; the lines it carries leave the
    /// cart.
    ///
    /// # Errors
    /// Returns `build`'s error, or an error if the order id is taken or any
    /// write fails. In every error case neither the orders nor the cart change.
    pub fn place_order<F>(&self, build: F) -> Result<Order>
    where
        F: FnOnce(Vec<OrderLine>) -> Result<Order>,
    {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
            .map_err(AppError::database)?;

        let order = build(self.cart_lines()?)?;

        Self::insert_order_in(&tx, &order)?;
        for line in &order.lines {
            tx.execute("DELETE FROM cart_lines WHERE id = ?1", [&line.id])
                .map_err(AppError::database)?;
        }

        tx.commit().map_err(AppError::database)?;

        tracing::info!(
            order_id = %order.order_id,
            lines = order.lines.len(),
            total = %order.total,
            "Placed order"
        );

        Ok(order)
    }

    /// Store an order without touching the cart.
    ///
    /// # Errors
    /// Returns error if the order id is taken or the write fails.
    pub fn insert_order(&self, order: &Order) -> Result<()> {
        Self::insert_order_in(&self.conn, order)
    }

    fn insert_order_in(conn: &Connection, order: &Order) -> Result<()> {
        let payload = serde_json::to_string(order).map_err(AppError::json_parse)?;

        conn.execute(
            r"
            INSERT INTO orders (order_id, status, created_at, total_minor, payload)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                &order.order_id,
                order.status.to_string(),
                order.created_at.to_rfc3339(),
                i64::try_from(order.total.minor_units()).unwrap_or(i64::MAX),
                payload,
            ],
        )
        .map_err(AppError::database)?;

        Ok(())
    }

    /// Rewrite a stored order (status changes).
    ///
    /// Returns `false` if no order has that id.
    ///
    /// # Errors
    /// Returns error if the write fails.
    pub fn update_order(&self, order: &Order) -> Result<bool> {
        let payload = serde_json::to_string(order).map_err(AppError::json_parse)?;

        let updated = self
            .conn
            .execute(
                "UPDATE orders SET status = ?1, payload = ?2 WHERE order_id = ?3",
                params![order.status.to_string(), payload, &order.order_id],
            )
            .map_err(AppError::database)?;

        Ok(updated > 0)
    }

    /// Look up one order.
    ///
    /// # Errors
    /// Returns error if the query fails or the payload is corrupt.
    pub fn find_order(&self, order_id: &str) -> Result<Option<Order>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM orders WHERE order_id = ?1",
                [order_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(AppError::database)?;

        payload
            .map(|p| serde_json::from_str(&p).map_err(AppError::json_parse))
            .transpose()
    }

    /// Whether an order id is already used.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn order_exists(&self, order_id: &str) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM orders WHERE order_id = ?1)",
                [order_id],
                |row| row.get::<_, bool>(0),
            )
            .map_err(AppError::database)
    }

    /// Orders, newest first, optionally filtered by status.
    ///
    /// # Errors
    /// Returns error if the query fails or a payload is corrupt.
    pub fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>> {
        let query = if status.is_some() {
            "SELECT payload FROM orders WHERE status = ?1 ORDER BY created_at DESC"
        } else {
            "SELECT payload FROM orders ORDER BY created_at DESC"
        };

        let mut stmt = self.conn.prepare(query).map_err(AppError::database)?;

        // One closure value for both branches, so both yield the same `MappedRows` type.
        let payload = |row: &Row<'_>| row.get::<_, String>(0);
        let rows = if let Some(status) = status {
            stmt.query_map([status.to_string()], payload)
        } else {
            stmt.query_map([], payload)
        }
        .map_err(AppError::database)?;

        let mut orders = Vec::new();
        for row in rows {
            let payload = row.map_err(AppError::database)?;
            orders.push(serde_json::from_str(&payload).map_err(AppError::json_parse)?);
        }

        Ok(orders)
    }
}
