//! Statement builder module

pub mod common;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

// Re-export types from submodules
pub use common::{
    ChainEntry, Connector, Fragment, IntoCondition, IntoParenthesis, JoinSpec, JoinType, Nulls,
    Parenthesis, SortDirection, SqlStatement,
};
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;
