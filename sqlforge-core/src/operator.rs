//! SQL operator types and conversions

use std::fmt::{self, Display};

use crate::error::{Error, Result};

/// Type-safe comparison operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator(&'static str);

impl Operator {
    pub const EQ: Self = Operator("=");
    pub const NEQ: Self = Operator("<>");
    pub const GT: Self = Operator(">");
    pub const GTE: Self = Operator(">=");
    pub const LT: Self = Operator("<");
    pub const LTE: Self = Operator("<=");
    pub const LIKE: Self = Operator("LIKE");
    pub const NOT_LIKE: Self = Operator("NOT LIKE");
    pub const IN: Self = Operator("IN");
    pub const NOT_IN: Self = Operator("NOT IN");
    pub const BETWEEN: Self = Operator("BETWEEN");
    pub const NOT_BETWEEN: Self = Operator("NOT BETWEEN");
    pub const IS: Self = Operator("IS");
    pub const IS_NOT: Self = Operator("IS NOT");

    /// Create a custom operator for database-specific operations
    ///
    /// # Examples
    /// ```
    /// use sqlforge_core::Operator;
    ///
    /// // PostgreSQL full-text search
    /// let fts_op = Operator::custom("@@");
    /// ```
    pub const fn custom(op: &'static str) -> Self {
        Operator(op)
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &str {
        self.0
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for types that can be converted to comparison operators
pub trait IntoOperator {
    fn into_operator(self) -> Result<Operator>;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Result<Operator> {
        Ok(self)
    }
}

/// Canonical token table for string operators; unknown tokens are rejected
impl IntoOperator for &str {
    fn into_operator(self) -> Result<Operator> {
        let operator = match self.to_ascii_uppercase().as_str() {
            "=" => Operator::EQ,
            "<>" | "!=" => Operator::NEQ,
            ">" => Operator::GT,
            ">=" => Operator::GTE,
            "<" => Operator::LT,
            "<=" => Operator::LTE,
            "LIKE" => Operator::LIKE,
            "NOT LIKE" => Operator::NOT_LIKE,
            "IN" => Operator::IN,
            "NOT IN" => Operator::NOT_IN,
            "BETWEEN" => Operator::BETWEEN,
            "NOT BETWEEN" => Operator::NOT_BETWEEN,
            "IS" => Operator::IS,
            "IS NOT" => Operator::IS_NOT,
            _ => return Err(Error::unknown_token("comparison operator", self)),
        };
        Ok(operator)
    }
}

/// Set operator used to combine whole select statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOperator(&'static str);

impl SetOperator {
    pub const UNION: Self = SetOperator("UNION");
    pub const UNION_ALL: Self = SetOperator("UNION ALL");
    pub const INTERSECT: Self = SetOperator("INTERSECT");
    pub const EXCEPT: Self = SetOperator("EXCEPT");

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &str {
        self.0
    }
}

impl Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for types that can be converted to set operators
pub trait IntoSetOperator {
    fn into_set_operator(self) -> Result<SetOperator>;
}

impl IntoSetOperator for SetOperator {
    fn into_set_operator(self) -> Result<SetOperator> {
        Ok(self)
    }
}

impl IntoSetOperator for &str {
    fn into_set_operator(self) -> Result<SetOperator> {
        let normalized = self
            .to_ascii_uppercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let operator = match normalized.as_str() {
            "UNION" => SetOperator::UNION,
            "UNION ALL" => SetOperator::UNION_ALL,
            "INTERSECT" => SetOperator::INTERSECT,
            "EXCEPT" => SetOperator::EXCEPT,
            _ => return Err(Error::unknown_token("set operator", self)),
        };
        Ok(operator)
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const EQ: Operator = Operator::EQ;
    pub const NEQ: Operator = Operator::NEQ;
    pub const GT: Operator = Operator::GT;
    pub const GTE: Operator = Operator::GTE;
    pub const LT: Operator = Operator::LT;
    pub const LTE: Operator = Operator::LTE;
    pub const LIKE: Operator = Operator::LIKE;
    pub const NOT_LIKE: Operator = Operator::NOT_LIKE;
    pub const IN: Operator = Operator::IN;
    pub const NOT_IN: Operator = Operator::NOT_IN;
    pub const BETWEEN: Operator = Operator::BETWEEN;
    pub const NOT_BETWEEN: Operator = Operator::NOT_BETWEEN;
    pub const IS: Operator = Operator::IS;
    pub const IS_NOT: Operator = Operator::IS_NOT;
}
