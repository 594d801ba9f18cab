//! SELECT statement builder

use super::common::{
    render_chain, render_condition, render_joins, render_order_by, ChainEntry, Connector,
    IntoCondition, IntoParenthesis, JoinSpec, JoinType, Nulls, SortDirection, SqlStatement,
};
use crate::dialect::{natural, Dialect, Pagination};
use crate::error::{Error, Result};
use crate::operator::{IntoOperator, IntoSetOperator};

/// SELECT statement builder
///
/// Accumulates build data through a fluent surface and renders it through
/// the bound dialect. Fallible calls leave the build data untouched on
/// error, so the builder stays usable for a corrected retry.
#[derive(Debug, Clone)]
pub struct SelectBuilder<D: Dialect> {
    dialect: D,
    from: Option<String>,
    columns: Vec<String>,
    joins: Vec<JoinSpec>,
    wheres: Vec<ChainEntry>,
    group_by: Vec<String>,
    havings: Vec<ChainEntry>,
    order_by: Vec<String>,
    limit: u64,
    offset: u64,
    combines: Vec<String>,
    distinct: bool,
}

impl<D: Dialect> SelectBuilder<D> {
    /// Create a new SELECT statement builder bound to the given dialect
    pub fn new(dialect: D) -> Self {
        Self {
            dialect,
            from: None,
            columns: Vec::new(),
            joins: Vec::new(),
            wheres: Vec::new(),
            group_by: Vec::new(),
            havings: Vec::new(),
            order_by: Vec::new(),
            limit: 0,
            offset: 0,
            combines: Vec::new(),
            distinct: false,
        }
    }

    /// Set the table being queried; a later call overwrites the target
    pub fn from(&mut self, table: &str) -> Result<&mut Self> {
        if table.is_empty() {
            return Err(Error::invalid_instruction("table name must be non-empty"));
        }
        self.from = Some(self.dialect.prepare_identifier(table));
        Ok(self)
    }

    /// Add a column to the projection; no columns renders `*`
    pub fn column(&mut self, column: &str) -> &mut Self {
        self.columns.push(self.dialect.prepare_identifier(column));
        self
    }

    /// Add an aliased column to the projection
    pub fn column_as(&mut self, column: &str, alias: &str) -> &mut Self {
        self.columns.push(format!(
            "{} AS {}",
            self.dialect.prepare_identifier(column),
            self.dialect.prepare_identifier(alias)
        ));
        self
    }

    /// Mark the query as DISTINCT
    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// Add a JOIN clause; qualifiers attach via `on` or `using`
    pub fn join(&mut self, join_type: JoinType, table: &str) -> &mut Self {
        let clause = format!("{} JOIN {}", join_type, self.dialect.prepare_identifier(table));
        self.joins.push(JoinSpec {
            clause,
            on: Vec::new(),
            using: Vec::new(),
        });
        self
    }

    /// Add an INNER JOIN clause
    pub fn inner_join(&mut self, table: &str) -> &mut Self {
        self.join(JoinType::Inner, table)
    }

    /// Add a LEFT JOIN clause
    pub fn left_join(&mut self, table: &str) -> &mut Self {
        self.join(JoinType::Left, table)
    }

    /// Add a RIGHT JOIN clause
    pub fn right_join(&mut self, table: &str) -> &mut Self {
        self.join(JoinType::Right, table)
    }

    /// Add a CROSS JOIN clause
    pub fn cross_join(&mut self, table: &str) -> &mut Self {
        self.join(JoinType::Cross, table)
    }

    /// Add an ON qualifier to the most recent join
    pub fn on<O>(&mut self, left: &str, operator: O, right: &str) -> Result<&mut Self>
    where
        O: IntoOperator,
    {
        let operator = operator.into_operator()?;
        let condition = format!(
            "{} {} {}",
            self.dialect.prepare_identifier(left),
            operator,
            self.dialect.prepare_identifier(right)
        );
        let join = self
            .joins
            .last_mut()
            .ok_or_else(|| Error::invalid_instruction("ON requires a preceding JOIN clause"))?;
        join.on.push(condition);
        Ok(self)
    }

    /// Add a USING qualifier to the most recent join
    pub fn using(&mut self, column: &str) -> Result<&mut Self> {
        let column = self.dialect.prepare_identifier(column);
        let join = self
            .joins
            .last_mut()
            .ok_or_else(|| Error::invalid_instruction("USING requires a preceding JOIN clause"))?;
        join.using.push(column);
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

    /// Add a GROUP BY column
    pub fn group_by(&mut self, column: &str) -> &mut Self {
        self.group_by.push(self.dialect.prepare_identifier(column));
        self
    }

    /// Add a HAVING condition
    pub fn having<C>(&mut self, condition: C) -> Result<&mut Self>
    where
        C: IntoCondition,
    {
        self.push_having(condition, Connector::And)
    }

    /// Add an OR HAVING condition
    pub fn or_having<C>(&mut self, condition: C) -> Result<&mut Self>
    where
        C: IntoCondition,
    {
        self.push_having(condition, Connector::Or)
    }

    /// Open or close a HAVING group
    pub fn having_block<P>(&mut self, parenthesis: P) -> Result<&mut Self>
    where
        P: IntoParenthesis,
    {
        let parenthesis = parenthesis.into_parenthesis()?;
        self.havings
            .push(ChainEntry::parenthesis(Connector::And, parenthesis));
        Ok(self)
    }

    /// Open or close a HAVING group joined with OR
    pub fn or_having_block<P>(&mut self, parenthesis: P) -> Result<&mut Self>
    where
        P: IntoParenthesis,
    {
        let parenthesis = parenthesis.into_parenthesis()?;
        self.havings
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

    /// Set an OFFSET constraint; zero means no offset
    pub fn offset(&mut self, offset: i64) -> Result<&mut Self> {
        self.offset = natural(offset)?;
        Ok(self)
    }

    /// Combine with another select statement through a set operator; the
    /// statement text is appended verbatim after ORDER BY
    pub fn combine<O>(&mut self, operator: O, statement: &str) -> Result<&mut Self>
    where
        O: IntoSetOperator,
    {
        let operator = operator.into_set_operator()?;
        self.combines.push(format!("{operator} {statement}"));
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

    fn push_having<C>(&mut self, condition: C, connector: Connector) -> Result<&mut Self>
    where
        C: IntoCondition,
    {
        let (column, operator, value) = condition.into_condition()?;
        let expr = render_condition(&self.dialect, &column, operator, &value)?;
        self.havings.push(ChainEntry::expr(connector, expr));
        Ok(self)
    }
}

impl<D: Dialect> SqlStatement for SelectBuilder<D> {
    fn to_sql(&self, terminated: bool) -> Result<String> {
        let mut sql = String::from("SELECT");

        if self.distinct {
            sql.push_str(" DISTINCT");
        }

        match self.dialect.pagination() {
            Pagination::Top if self.limit > 0 => {
                sql.push_str(&format!(" TOP {}", self.limit));
            }
            Pagination::FirstSkip => {
                if self.limit > 0 {
                    sql.push_str(&format!(" FIRST {}", self.limit));
                }
                if self.offset > 0 {
                    sql.push_str(&format!(" SKIP {}", self.offset));
                }
            }
            _ => {}
        }

        sql.push(' ');
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }

        if let Some(from) = &self.from {
            sql.push_str(" FROM ");
            sql.push_str(from);
        }

        render_joins(&self.joins, &mut sql);

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            render_chain(&self.wheres, &mut sql);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if !self.havings.is_empty() {
            sql.push_str(" HAVING ");
            render_chain(&self.havings, &mut sql);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        match self.dialect.pagination() {
            Pagination::LimitOffset => {
                if self.limit > 0 {
                    sql.push_str(&format!(" LIMIT {}", self.limit));
                }
                if self.offset > 0 {
                    sql.push_str(&format!(" OFFSET {}", self.offset));
                }
            }
            Pagination::Top if self.offset > 0 => {
                tracing::warn!(
                    offset = self.offset,
                    "offset has no rendering in this dialect and was dropped"
                );
            }
            _ => {}
        }

        for combine in &self.combines {
            sql.push(' ');
            sql.push_str(combine);
        }

        if terminated {
            sql.push(';');
        }

        Ok(sql)
    }
}
