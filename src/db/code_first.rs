use crate::db::client::DbClient;
use crate::db::connection::{DbType, InitKeyType};
use crate::db::schema::TableSchema;
use crate::error::BlogError;
use tracing::{debug, info};

/// Creates and updates tables from their [`TableSchema`] declarations.
pub struct CodeFirst<'a> {
    client: &'a DbClient,
}

impl<'a> CodeFirst<'a> {
    pub(crate) fn new(client: &'a DbClient) -> Self {
        Self { client }
    }

    /// Create every table that does not exist yet and add declared columns
    /// missing from tables that do. Existing columns are never altered or dropped.
    pub async fn init_tables(&self, tables: &[&TableSchema]) -> Result<(), BlogError> {
        if self.client.config().init_key_type != InitKeyType::Attribute {
            return Err(BlogError::InvalidConnectionConfig(
                "code-first table creation requires InitKeyType::Attribute".to_string(),
            ));
        }

        let db = self.client.db_type();
        for table in tables {
            let ddl = table.create_table_sql(db);
            debug!(table = table.name, sql = %ddl, "ensuring table");
            sqlx::query(&ddl).execute(self.client.pool()).await?;

            let existing = self.existing_columns(table.name).await?;
            for column in table.columns {
                if existing.iter().any(|c| c.eq_ignore_ascii_case(column.name)) {
                    continue;
                }
                let alter = table.add_column_sql(db, column);
                info!(table = table.name, column = column.name, "adding missing column");
                sqlx::query(&alter).execute(self.client.pool()).await?;
            }
            info!(table = table.name, db_type = %db, "table initialized");
        }
        Ok(())
    }

    /// Column names currently present on `table`, empty if it does not exist.
    pub async fn existing_columns(&self, table: &str) -> Result<Vec<String>, BlogError> {
        let sql = match self.client.db_type() {
            DbType::Sqlite => "SELECT name FROM pragma_table_info(?)",
            DbType::MySql => {
                "SELECT CAST(COLUMN_NAME AS CHAR) FROM information_schema.COLUMNS \
                 WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION"
            }
        };
        let columns: Vec<String> = sqlx::query_scalar(sql)
            .bind(table)
            .fetch_all(self.client.pool())
            .await?;
        Ok(columns)
    }
}
