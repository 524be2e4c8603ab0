use crate::db::client::DbClient;
use crate::db::connection::DbType;
use crate::db::repository::BaseSqlRepository;
use crate::domain::SystemUser;
use crate::error::BlogError;
use sqlx::Row;
use sqlx::any::AnyRow;
use std::sync::Arc;

const SELECT_USER: &str = "SELECT id, user_name, password, name FROM sys_user";

/// Persistence for [`SystemUser`] rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    base: BaseSqlRepository,
}

impl UserRepository {
    pub fn new(client: Arc<DbClient>) -> Self {
        Self {
            base: BaseSqlRepository::new(client),
        }
    }

    /// Insert a user and return the generated id. `user.id` is ignored.
    pub async fn insert(&self, user: &SystemUser) -> Result<i64, BlogError> {
        let db = self.base.db();
        match db.db_type() {
            // the Any driver does not carry SQLite's rowid back, ask for it explicitly
            DbType::Sqlite => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO sys_user (user_name, password, name) VALUES (?, ?, ?) RETURNING id",
                )
                .bind(user.user_name.as_deref())
                .bind(user.password.as_deref())
                .bind(user.name.as_deref())
                .fetch_one(db.pool())
                .await?;
                Ok(id)
            }
            DbType::MySql => {
                let result =
                    sqlx::query("INSERT INTO sys_user (user_name, password, name) VALUES (?, ?, ?)")
                        .bind(user.user_name.as_deref())
                        .bind(user.password.as_deref())
                        .bind(user.name.as_deref())
                        .execute(db.pool())
                        .await?;

                result.last_insert_id().ok_or_else(|| {
                    sqlx::Error::Protocol(
                        "insert into sys_user did not report a row id".to_string(),
                    )
                    .into()
                })
            }
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<SystemUser>, BlogError> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.base.db().pool())
            .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn find_by_user_name(&self, user_name: &str) -> Result<Option<SystemUser>, BlogError> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE user_name = ? ORDER BY id LIMIT 1"))
            .bind(user_name)
            .fetch_optional(self.base.db().pool())
            .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn list(&self) -> Result<Vec<SystemUser>, BlogError> {
        let rows = sqlx::query(&format!("{SELECT_USER} ORDER BY id"))
            .fetch_all(self.base.db().pool())
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn count(&self) -> Result<i64, BlogError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sys_user")
            .fetch_one(self.base.db().pool())
            .await?;
        Ok(count)
    }

    /// Update all fields by id. Returns false if no row has that id.
    pub async fn update(&self, user: &SystemUser) -> Result<bool, BlogError> {
        let result =
            sqlx::query("UPDATE sys_user SET user_name = ?, password = ?, name = ? WHERE id = ?")
                .bind(user.user_name.as_deref())
                .bind(user.password.as_deref())
                .bind(user.name.as_deref())
                .bind(user.id)
                .execute(self.base.db().pool())
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, BlogError> {
        let result = sqlx::query("DELETE FROM sys_user WHERE id = ?")
            .bind(id)
            .execute(self.base.db().pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_model(row: AnyRow) -> Result<SystemUser, BlogError> {
        Ok(SystemUser {
            id: row.try_get("id")?,
            user_name: row.try_get("user_name")?,
            password: row.try_get("password")?,
            name: row.try_get("name")?,
        })
    }
}
