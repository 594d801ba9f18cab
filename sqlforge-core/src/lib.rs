//! SqlForge Core - a dialect-aware SQL statement builder
//!
//! Builders accumulate structured build data through a fluent surface and
//! render dialect-correct SQL text: one call surface, per-dialect escaping,
//! pagination and locking rules. Row locks are coordinated through a
//! two-phase acquire/release protocol for engines without native lock
//! syntax.

pub mod builder;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod lock;
pub mod operator;
pub mod value;

// Re-export main types
pub use builder::{
    Connector, DeleteBuilder, InsertBuilder, IntoCondition, IntoParenthesis, JoinType, Nulls,
    Parenthesis, SelectBuilder, SortDirection, SqlStatement, UpdateBuilder,
};
pub use connection::{Connection, SqlxConnection};
pub use dialect::{Ansi, Dialect, Firebird, Mssql, Pagination};
pub use error::{Error, Result};
pub use lock::LockBuilder;
pub use operator::{op, IntoOperator, IntoSetOperator, Operator, SetOperator};
pub use value::Value;

/// Create a new SELECT statement builder for the given dialect
pub fn select<D: Dialect>(dialect: D) -> SelectBuilder<D> {
    SelectBuilder::new(dialect)
}

/// Create a new UPDATE statement builder for the given dialect
pub fn update<D: Dialect>(dialect: D) -> UpdateBuilder<D> {
    UpdateBuilder::new(dialect)
}

/// Create a new DELETE statement builder for the given dialect
pub fn delete<D: Dialect>(dialect: D) -> DeleteBuilder<D> {
    DeleteBuilder::new(dialect)
}

/// Create a new INSERT statement builder for the given dialect
pub fn insert<D: Dialect>(dialect: D) -> InsertBuilder<D> {
    InsertBuilder::new(dialect)
}

/// Create a new lock coordinator for the given dialect and connection
pub fn lock<D: Dialect, C: Connection>(dialect: D, connection: C) -> LockBuilder<D, C> {
    LockBuilder::new(dialect, connection)
}
