//! Database module: SQL client, code-first schema management and repositories.
//!
//! Layout:
//! - `connection.rs`: `ConnectionConfig` and the engine/key enums
//! - `client.rs`: `SqlClient` constructor contract and the sqlx-backed `DbClient`
//! - `schema.rs` / `code_first.rs`: table declarations and DDL (SQLite and MySQL)
//! - `context.rs`: one-shot table initialization
//! - `repository.rs` / `user_store.rs`: repository base and the user repository
//! - `registration.rs`: `add_sql_client` for the service registry

pub mod client;
pub mod code_first;
pub mod connection;
pub mod context;
pub mod registration;
pub mod repository;
pub mod schema;
pub mod user_store;

pub use client::{ClientConstructor, DbClient, SqlClient};
pub use code_first::CodeFirst;
pub use connection::{ConnectionConfig, DbType, InitKeyType};
pub use context::SqlContext;
pub use registration::SqlClientServiceCollectionExt;
pub use repository::BaseSqlRepository;
pub use schema::{ColumnSchema, ColumnType, Entity, TableSchema};
pub use user_store::UserRepository;
