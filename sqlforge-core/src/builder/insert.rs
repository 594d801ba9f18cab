//! INSERT statement builder

use super::common::SqlStatement;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::value::Value;

/// INSERT statement builder
#[derive(Debug, Clone)]
pub struct InsertBuilder<D: Dialect> {
    dialect: D,
    table: Option<String>,
    columns: Vec<(String, String)>,
}

impl<D: Dialect> InsertBuilder<D> {
    /// Create a new INSERT statement builder bound to the given dialect
    pub fn new(dialect: D) -> Self {
        Self {
            dialect,
            table: None,
            columns: Vec::new(),
        }
    }

    /// Set the table being inserted into; a later call overwrites the target
    pub fn table(&mut self, table: &str) -> Result<&mut Self> {
        if table.is_empty() {
            return Err(Error::invalid_instruction("table name must be non-empty"));
        }
        self.table = Some(self.dialect.prepare_identifier(table));
        Ok(self)
    }

    /// Add a column/value pair; a second value for the same column
    /// overwrites the first (last-write-wins)
    pub fn column<V>(&mut self, column: &str, value: V) -> &mut Self
    where
        V: Into<Value>,
    {
        let column = self.dialect.prepare_identifier(column);
        let value = self.dialect.prepare_value(&value.into());
        if let Some(existing) = self.columns.iter_mut().find(|(name, _)| *name == column) {
            existing.1 = value;
        } else {
            self.columns.push((column, value));
        }
        self
    }
}

impl<D: Dialect> SqlStatement for InsertBuilder<D> {
    fn to_sql(&self, terminated: bool) -> Result<String> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| Error::invalid_instruction("INSERT requires a table"))?;
        if self.columns.is_empty() {
            return Err(Error::invalid_instruction(
                "INSERT requires at least one column",
            ));
        }

        let columns: Vec<&str> = self.columns.iter().map(|(name, _)| name.as_str()).collect();
        let values: Vec<&str> = self
            .columns
            .iter()
            .map(|(_, value)| value.as_str())
            .collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            values.join(", ")
        );

        if terminated {
            sql.push(';');
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Ansi, Mssql};
    use crate::insert;

    #[test]
    fn test_insert_statement() {
        let mut query = insert(Ansi);
        query.table("users").unwrap();
        query.column("name", "John").column("age", 30);
        assert_eq!(
            query.to_sql(true).unwrap(),
            "INSERT INTO \"users\" (\"name\", \"age\") VALUES ('John', 30);"
        );
    }

    #[test]
    fn test_insert_preserves_column_order() {
        let mut query = insert(Ansi);
        query.table("users").unwrap();
        query.column("b", 2).column("a", 1).column("c", 3);
        assert_eq!(
            query.to_sql(false).unwrap(),
            "INSERT INTO \"users\" (\"b\", \"a\", \"c\") VALUES (2, 1, 3)"
        );
    }

    #[test]
    fn test_insert_column_is_last_write_wins() {
        let mut query = insert(Ansi);
        query.table("users").unwrap();
        query.column("name", "John").column("name", "Jane");
        assert_eq!(
            query.to_sql(false).unwrap(),
            "INSERT INTO \"users\" (\"name\") VALUES ('Jane')"
        );
    }

    #[test]
    fn test_insert_without_table_fails() {
        let mut query = insert(Ansi);
        query.column("name", "John");
        assert!(query.to_sql(false).is_err());
    }

    #[test]
    fn test_insert_without_columns_fails() {
        let mut query = insert(Ansi);
        query.table("users").unwrap();
        assert!(query.to_sql(false).is_err());
    }

    #[test]
    fn test_insert_null_value() {
        let mut query = insert(Mssql);
        query.table("users").unwrap();
        query.column("name", "John").column("manager_id", Value::Null);
        assert_eq!(
            query.to_sql(false).unwrap(),
            "INSERT INTO [users] ([name], [manager_id]) VALUES ('John', NULL)"
        );
    }
}
