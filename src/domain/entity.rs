use crate::db::schema::{ColumnSchema, ColumnType, Entity, TableSchema};
use crate::identity::IdentityUser;

/// Blog account, persisted in `sys_user`.
pub type SystemUser = IdentityUser<i64>;

impl Entity for SystemUser {
    const TABLE: TableSchema = TableSchema {
        name: "sys_user",
        columns: &[
            ColumnSchema::new("id", ColumnType::BigInt)
                .primary_key()
                .identity(),
            ColumnSchema::new("user_name", ColumnType::Varchar(64)).nullable(),
            ColumnSchema::new("password", ColumnType::Varchar(256)).nullable(),
            ColumnSchema::new("name", ColumnType::Varchar(128)).nullable(),
        ],
    };
}
