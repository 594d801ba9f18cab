//! UPDATE statement builder

use super::common::{
    render_chain, render_condition, render_order_by, ChainEntry, Connector, IntoCondition,
    IntoParenthesis, Nulls, SortDirection, SqlStatement,
};
use crate::dialect::{natural, Dialect, Pagination};
use crate::error::{Error, Result};
use crate::value::Value;

/// UPDATE statement builder
#[derive(Debug, Clone)]
pub struct UpdateBuilder<D: Dialect> {
    dialect: D,
    table: Option<String>,
    sets: Vec<(String, String)>,
    wheres: Vec<ChainEntry>,
    order_by: Vec<String>,
    limit: u64,
    offset: u64,
}

impl<D: Dialect> UpdateBuilder<D> {
    /// Create a new UPDATE statement builder bound to the given dialect
    pub fn new(dialect: D) -> Self {
        Self {
            dialect,
            table: None,
            sets: Vec::new(),
            wheres: Vec::new(),
            order_by: Vec::new(),
            limit: 0,
            offset: 0,
        }
    }

    /// Set the table being modified; a later call overwrites the target
    pub fn table(&mut self, table: &str) -> Result<&mut Self> {
        if table.is_empty() {
            return Err(Error::invalid_instruction("table name must be non-empty"));
        }
        self.table = Some(self.dialect.prepare_identifier(table));
        Ok(self)
    }

    /// Assign a value to a column; a second assignment to the same column
    /// overwrites the first (last-write-wins)
    pub fn set<V>(&mut self, column: &str, value: V) -> &mut Self
    where
        V: Into<Value>,
    {
        let column = self.dialect.prepare_identifier(column);
        let assignment = format!("{} = {}", column, self.dialect.prepare_value(&value.into()));
        if let Some(existing) = self.sets.iter_mut().find(|(name, _)| *name == column) {
            existing.1 = assignment;
        } else {
            self.sets.push((column, assignment));
        }
        self
    }

    /// Add a WHERE condition
    pub fn where_<C>(&mut self, condition: C) -> Result<&mut Self>
    where
        C: IntoCondition,
    {
        self.push_where(condition, Connector::And)
    }

    /// Add an OR WHERE condition
    pub fn or_where<C>(&mut self, condition: C) -> Result<&mut Self>
    where
        C: IntoCondition,
    {
        self.push_where(condition, Connector::Or)
    }

    /// Add an AND WHERE condition (same as where_)
    pub fn and_where<C>(&mut self, condition: C) -> Result<&mut Self>
    where
        C: IntoCondition,
    {
        self.where_(condition)
    }

    /// Open or close a WHERE group
    pub fn where_block<P>(&mut self, parenthesis: P) -> Result<&mut Self>
    where
        P: IntoParenthesis,
    {
        let parenthesis = parenthesis.into_parenthesis()?;
        self.wheres
            .push(ChainEntry::parenthesis(Connector::And, parenthesis));
        Ok(self)
    }

    /// Open or close a WHERE group joined with OR
    pub fn or_where_block<P>(&mut self, parenthesis: P) -> Result<&mut Self>
    where
        P: IntoParenthesis,
    {
        let parenthesis = parenthesis.into_parenthesis()?;
        self.wheres
            .push(ChainEntry::parenthesis(Connector::Or, parenthesis));
        Ok(self)
    }

    /// Add an ORDER BY clause
    pub fn order_by(&mut self, column: &str, direction: SortDirection) -> &mut Self {
        self.order_by_nulls(column, direction, Nulls::Default)
    }

    /// Add an ORDER BY ASC clause (convenience method)
    pub fn order_by_asc(&mut self, column: &str) -> &mut Self {
        self.order_by(column, SortDirection::Asc)
    }

    /// Add an ORDER BY DESC clause (convenience method)
    pub fn order_by_desc(&mut self, column: &str) -> &mut Self {
        self.order_by(column, SortDirection::Desc)
    }

    /// Add an ORDER BY clause with an explicit NULLS placement; the hint is
    /// dropped for dialects without NULLS ordering
    pub fn order_by_nulls(
        &mut self,
        column: &str,
        direction: SortDirection,
        nulls: Nulls,
    ) -> &mut Self {
        self.order_by
            .push(render_order_by(&self.dialect, column, &direction, nulls));
        self
    }

    /// Set a LIMIT constraint; zero means no limit
    pub fn limit(&mut self, limit: i64) -> Result<&mut Self> {
        self.limit = natural(limit)?;
        Ok(self)
    }

    /// Set an OFFSET constraint; accepted for parity with the other
    /// builders but rendered by no shipped dialect
    pub fn offset(&mut self, offset: i64) -> Result<&mut Self> {
        self.offset = natural(offset)?;
        Ok(self)
    }

    fn push_where<C>(&mut self, condition: C, connector: Connector) -> Result<&mut Self>
    where
        C: IntoCondition,
    {
        let (column, operator, value) = condition.into_condition()?;
        let expr = render_condition(&self.dialect, &column, operator, &value)?;
        self.wheres.push(ChainEntry::expr(connector, expr));
        Ok(self)
    }
}

impl<D: Dialect> SqlStatement for UpdateBuilder<D> {
    fn to_sql(&self, terminated: bool) -> Result<String> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| Error::invalid_instruction("UPDATE requires a table"))?;
        if self.sets.is_empty() {
            return Err(Error::invalid_instruction(
                "UPDATE requires at least one SET assignment",
            ));
        }

        let mut sql = String::from("UPDATE");

        if self.dialect.pagination() == Pagination::Top && self.limit > 0 {
            sql.push_str(&format!(" TOP {}", self.limit));
        }

        sql.push(' ');
        sql.push_str(table);

        sql.push_str(" SET ");
        let assignments: Vec<&str> = self
            .sets
            .iter()
            .map(|(_, assignment)| assignment.as_str())
            .collect();
        sql.push_str(&assignments.join(", "));

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            render_chain(&self.wheres, &mut sql);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        match self.dialect.pagination() {
            Pagination::LimitOffset if self.limit > 0 => {
                sql.push_str(&format!(" LIMIT {}", self.limit));
            }
            Pagination::FirstSkip if self.limit > 0 => {
                sql.push_str(&format!(" ROWS {}", self.limit));
            }
            _ => {}
        }

        if self.offset > 0 {
            tracing::warn!(
                offset = self.offset,
                "offset has no rendering in UPDATE statements and was dropped"
            );
        }

        if terminated {
            sql.push(';');
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Ansi, Firebird, Mssql};
    use crate::operator::op;
    use crate::update;

    #[test]
    fn test_update_statement() {
        let mut query = update(Ansi);
        query.table("USERS").unwrap();
        query.set("name", "Alice");
        query.where_(("id", "=", 5)).unwrap();
        assert_eq!(
            query.to_sql(true).unwrap(),
            "UPDATE \"USERS\" SET \"name\" = 'Alice' WHERE \"id\" = 5;"
        );
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("name", "Alice");
        query.set("age", 30);
        query.set("name", "Bob");
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"name\" = 'Bob', \"age\" = 30"
        );
    }

    #[test]
    fn test_update_without_table_fails() {
        let mut query = update(Ansi);
        query.set("name", "Alice");
        let err = query.to_sql(false).unwrap_err();
        assert!(err.to_string().contains("requires a table"));
    }

    #[test]
    fn test_update_without_set_fails() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        let err = query.to_sql(false).unwrap_err();
        assert!(err.to_string().contains("SET"));
    }

    #[test]
    fn test_between_condition() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("active", false);
        query.where_(("age", op::BETWEEN, vec![18, 65])).unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"active\" = FALSE WHERE \"age\" BETWEEN 18 AND 65"
        );
    }

    #[test]
    fn test_between_requires_pair() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("active", false);
        assert!(query.where_(("age", op::BETWEEN, 18)).is_err());
        assert!(query.where_(("age", "NOT BETWEEN", 18)).is_err());
    }

    #[test]
    fn test_in_requires_array() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("active", false);
        assert!(query.where_(("id", op::IN, 1)).is_err());
        query.where_(("id", op::IN, vec![1, 2])).unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"active\" = FALSE WHERE \"id\" IN (1, 2)"
        );
    }

    #[test]
    fn test_null_rewrites_equality() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("active", false);
        query.where_(("deleted_at", "=", Value::Null)).unwrap();
        query.or_where(("archived_at", "<>", Value::Null)).unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"active\" = FALSE WHERE \"deleted_at\" IS NULL OR \"archived_at\" IS NOT NULL"
        );
    }

    #[test]
    fn test_where_blocks() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("active", false);
        query.where_block("(").unwrap();
        query.where_(("age", op::LT, 13)).unwrap();
        query.or_where(("age", op::GT, 99)).unwrap();
        query.where_block(")").unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"active\" = FALSE WHERE (\"age\" < 13 OR \"age\" > 99)"
        );
    }

    #[test]
    fn test_limit_rendering_per_dialect() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("active", false);
        query.limit(10).unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"active\" = FALSE LIMIT 10"
        );

        let mut query = update(Mssql);
        query.table("users").unwrap();
        query.set("active", false);
        query.limit(10).unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE TOP 10 [users] SET [active] = 0"
        );

        let mut query = update(Firebird);
        query.table("users").unwrap();
        query.set("active", false);
        query.limit(10).unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"active\" = 0 ROWS 10"
        );
    }

    #[test]
    fn test_negative_limit_fails() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        assert!(query.limit(-1).is_err());
        assert!(query.offset(-3).is_err());
    }

    #[test]
    fn test_order_by() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("rank", 0);
        query.order_by_desc("score");
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"rank\" = 0 ORDER BY \"score\" DESC"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("name", "Alice");
        query.where_(("id", 5)).unwrap();
        assert_eq!(query.to_sql(true).unwrap(), query.to_sql(true).unwrap());
    }

    #[test]
    fn test_failed_where_leaves_builder_usable() {
        let mut query = update(Ansi);
        query.table("users").unwrap();
        query.set("name", "Alice");
        assert!(query.where_(("id", op::BETWEEN, 5)).is_err());
        query.where_(("id", op::BETWEEN, vec![1, 9])).unwrap();
        assert_eq!(
            query.to_sql(false).unwrap(),
            "UPDATE \"users\" SET \"name\" = 'Alice' WHERE \"id\" BETWEEN 1 AND 9"
        );
    }
}
