//! DELETE statement builder

use super::common::{
    render_chain, render_condition, render_order_by, ChainEntry, Connector, IntoCondition,
    IntoParenthesis, Nulls, SortDirection, SqlStatement,
};
use crate::dialect::{natural, Dialect, Pagination};
use crate::error::{Error, Result};

/// DELETE statement builder
#[derive(Debug, Clone)]
pub struct DeleteBuilder<D: Dialect> {
    dialect: D,
    from: Option<String>,
    wheres: Vec<ChainEntry>,
    order_by: Vec<String>,
    limit: u64,
    offset: u64,
}

impl<D: Dialect> DeleteBuilder<D> {
    /// Create a new DELETE statement builder bound to the given dialect
    pub fn new(dialect: D) -> Self {
        Self {
            dialect,
            from: None,
            wheres: Vec::new(),
            order_by: Vec::new(),
            limit: 0,
            offset: 0,
        }
    }

    /// Set the table rows are deleted from; a later call overwrites the target
    pub fn from(&mut self, table: &str) -> Result<&mut Self> {
        if table.is_empty() {
            return Err(Error::invalid_instruction("table name must be non-empty"));
        }
        self.from = Some(self.dialect.prepare_identifier(table));
        Ok(self)
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

impl<D: Dialect> SqlStatement for DeleteBuilder<D> {
    fn to_sql(&self, terminated: bool) -> Result<String> {
        let from = self
            .from
            .as_ref()
            .ok_or_else(|| Error::invalid_instruction("DELETE requires a table"))?;

        let mut sql = String::from("DELETE");

        if self.dialect.pagination() == Pagination::Top && self.limit > 0 {
            sql.push_str(&format!(" TOP {}", self.limit));
        }

        sql.push_str(" FROM ");
        sql.push_str(from);

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
                "offset has no rendering in DELETE statements and was dropped"
            );
        }

        if terminated {
            sql.push(';');
        }

        Ok(sql)
    }
}
