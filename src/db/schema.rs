//! Table declarations for code-first schema management.
//!
//! Entities describe their table once as a `const TableSchema`; the DDL for
//! each supported engine is generated from that declaration.

use crate::db::connection::DbType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    BigInt,
    Int,
    Bool,
    Varchar(u32),
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub is_primary_key: bool,
    /// Database-generated value (auto increment).
    pub is_identity: bool,
    pub is_nullable: bool,
}

impl ColumnSchema {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            is_primary_key: false,
            is_identity: false,
            is_nullable: false,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub const fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSchema],
}

/// A type persisted in its own table.
pub trait Entity {
    const TABLE: TableSchema;
}

pub(crate) fn quote(db: DbType, ident: &str) -> String {
    match db {
        DbType::MySql => format!("`{ident}`"),
        DbType::Sqlite => format!("\"{ident}\""),
    }
}

fn type_sql(db: DbType, column_type: ColumnType) -> String {
    match (db, column_type) {
        (DbType::MySql, ColumnType::BigInt) => "BIGINT".to_string(),
        (DbType::MySql, ColumnType::Int) => "INT".to_string(),
        (DbType::MySql, ColumnType::Bool) => "TINYINT(1)".to_string(),
        (DbType::MySql, ColumnType::Text) => "LONGTEXT".to_string(),
        (DbType::Sqlite, ColumnType::BigInt | ColumnType::Int | ColumnType::Bool) => {
            "INTEGER".to_string()
        }
        (DbType::Sqlite, ColumnType::Text) => "TEXT".to_string(),
        (_, ColumnType::Varchar(len)) => format!("VARCHAR({len})"),
    }
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn primary_keys(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// Whether the key is a single identity column, declared inline.
    fn has_inline_identity_key(&self) -> bool {
        let mut keys = self.primary_keys();
        matches!((keys.next(), keys.next()), (Some(k), None) if k.is_identity)
    }

    /// Column definition as used by CREATE TABLE and ALTER TABLE.
    pub fn column_sql(&self, db: DbType, column: &ColumnSchema) -> String {
        let name = quote(db, column.name);
        if column.is_identity && self.has_inline_identity_key() {
            return match db {
                DbType::Sqlite => format!("{name} INTEGER PRIMARY KEY AUTOINCREMENT"),
                DbType::MySql => format!(
                    "{name} {} NOT NULL AUTO_INCREMENT PRIMARY KEY",
                    type_sql(db, column.column_type)
                ),
            };
        }

        let null = if column.is_nullable { "NULL" } else { "NOT NULL" };
        format!("{name} {} {null}", type_sql(db, column.column_type))
    }

    pub fn create_table_sql(&self, db: DbType) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|c| self.column_sql(db, c))
            .collect();

        if !self.has_inline_identity_key() {
            let keys: Vec<String> = self.primary_keys().map(|c| quote(db, c.name)).collect();
            if !keys.is_empty() {
                parts.push(format!("PRIMARY KEY ({})", keys.join(", ")));
            }
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote(db, self.name),
            parts.join(", ")
        )
    }

    /// ALTER TABLE statement adding `column` to an existing table.
    ///
    /// SQLite refuses a NOT NULL column without a non-null default, so one is
    /// appended there; MySQL fills existing rows with the type's implicit default.
    pub fn add_column_sql(&self, db: DbType, column: &ColumnSchema) -> String {
        let mut definition = self.column_sql(db, column);
        if db == DbType::Sqlite && !column.is_nullable && !column.is_primary_key {
            definition.push_str(match column.column_type {
                ColumnType::BigInt | ColumnType::Int | ColumnType::Bool => " DEFAULT 0",
                ColumnType::Varchar(_) | ColumnType::Text => " DEFAULT ''",
            });
        }
        format!("ALTER TABLE {} ADD COLUMN {definition}", quote(db, self.name))
    }
}
