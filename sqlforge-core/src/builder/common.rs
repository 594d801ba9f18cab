//! Common types and helpers shared across all statement builders

use std::fmt::{self, Display};

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::operator::{IntoOperator, Operator};
use crate::value::Value;

/// Core trait for rendered statements
pub trait SqlStatement {
    /// Render the SQL text; `terminated` appends the statement separator
    ///
    /// Rendering is a pure function of the accumulated build data: calling
    /// it twice on an unmodified builder yields identical text.
    fn to_sql(&self, terminated: bool) -> Result<String>;
}

/// Trait for conditions that can be used in WHERE/HAVING clauses
pub trait IntoCondition {
    fn into_condition(self) -> Result<(String, Operator, Value)>;
}

// Implementation for shorthand equality: where_(("age", 18))
impl<T> IntoCondition for (&str, T)
where
    T: Into<Value>,
{
    fn into_condition(self) -> Result<(String, Operator, Value)> {
        Ok((self.0.to_string(), Operator::EQ, self.1.into()))
    }
}

// Implementation for explicit operators: where_(("age", op::GT, 18)) or where_(("age", ">", 18))
impl<T, O> IntoCondition for (&str, O, T)
where
    T: Into<Value>,
    O: IntoOperator,
{
    fn into_condition(self) -> Result<(String, Operator, Value)> {
        Ok((self.0.to_string(), self.1.into_operator()?, self.2.into()))
    }
}

/// The boolean joiner between predicate fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl TryFrom<&str> for Connector {
    type Error = Error;

    fn try_from(token: &str) -> Result<Self> {
        match token.to_ascii_uppercase().as_str() {
            "AND" => Ok(Connector::And),
            "OR" => Ok(Connector::Or),
            _ => Err(Error::unknown_token("connector", token)),
        }
    }
}

/// A grouping parenthesis marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenthesis {
    Open,
    Close,
}

/// Trait for types that can be converted to parenthesis markers
pub trait IntoParenthesis {
    fn into_parenthesis(self) -> Result<Parenthesis>;
}

impl IntoParenthesis for Parenthesis {
    fn into_parenthesis(self) -> Result<Parenthesis> {
        Ok(self)
    }
}

impl IntoParenthesis for &str {
    fn into_parenthesis(self) -> Result<Parenthesis> {
        match self {
            "(" => Ok(Parenthesis::Open),
            ")" => Ok(Parenthesis::Close),
            _ => Err(Error::unknown_token("parenthesis", self)),
        }
    }
}

/// One fragment of a WHERE/HAVING chain
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Open,
    Close,
    Expr(String),
}

/// An entry in a WHERE/HAVING chain
#[derive(Debug, Clone, PartialEq)]
pub struct ChainEntry {
    pub connector: Connector,
    pub fragment: Fragment,
}

impl ChainEntry {
    pub(crate) fn expr(connector: Connector, expr: String) -> Self {
        Self {
            connector,
            fragment: Fragment::Expr(expr),
        }
    }

    pub(crate) fn parenthesis(connector: Connector, parenthesis: Parenthesis) -> Self {
        let fragment = match parenthesis {
            Parenthesis::Open => Fragment::Open,
            Parenthesis::Close => Fragment::Close,
        };
        Self {
            connector,
            fragment,
        }
    }
}

/// Render a connector/fragment chain into `sql`.
///
/// A connector is printed before every fragment except the first emitted one
/// and closing parentheses, and never immediately after an opening
/// parenthesis. This keeps grouped predicates free of dangling connectors
/// such as `( AND x = 1)` or `(x = 1 AND)`.
pub(crate) fn render_chain(entries: &[ChainEntry], sql: &mut String) {
    let mut append_connector = false;
    for entry in entries {
        if append_connector && entry.fragment != Fragment::Close {
            sql.push(' ');
            sql.push_str(entry.connector.as_str());
            sql.push(' ');
        }
        match &entry.fragment {
            Fragment::Open => sql.push('('),
            Fragment::Close => sql.push(')'),
            Fragment::Expr(expr) => sql.push_str(expr),
        }
        append_connector = entry.fragment != Fragment::Open;
    }
}

/// Escape and render one comparison predicate.
///
/// BETWEEN/NOT BETWEEN require a two-element array value and render as
/// `column OP lower AND upper`; IN/NOT IN require an array value. A NULL
/// value rewrites `=` to `IS` and `<>` to `IS NOT`; other operators pass
/// through unchanged.
pub(crate) fn render_condition<D: Dialect>(
    dialect: &D,
    column: &str,
    operator: Operator,
    value: &Value,
) -> Result<String> {
    if operator == Operator::BETWEEN || operator == Operator::NOT_BETWEEN {
        let pair = value
            .as_array()
            .filter(|items| items.len() == 2)
            .ok_or_else(|| {
                Error::invalid_instruction(format!(
                    "{operator} requires the value to be a two-element array"
                ))
            })?;
        return Ok(format!(
            "{} {} {} AND {}",
            dialect.prepare_identifier(column),
            operator,
            dialect.prepare_value(&pair[0]),
            dialect.prepare_value(&pair[1])
        ));
    }
    if (operator == Operator::IN || operator == Operator::NOT_IN) && value.as_array().is_none() {
        return Err(Error::invalid_instruction(format!(
            "{operator} requires the value to be an array"
        )));
    }
    let operator = if value.is_null() && operator == Operator::EQ {
        Operator::IS
    } else if value.is_null() && operator == Operator::NEQ {
        Operator::IS_NOT
    } else {
        operator
    };
    Ok(format!(
        "{} {} {}",
        dialect.prepare_identifier(column),
        operator,
        dialect.prepare_value(value)
    ))
}

/// JOIN types
#[derive(Debug, Clone, PartialEq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
            JoinType::Full => write!(f, "FULL OUTER"),
            JoinType::Cross => write!(f, "CROSS"),
        }
    }
}

/// One JOIN clause with its ON/USING qualifiers, pre-rendered
#[derive(Debug, Clone)]
pub struct JoinSpec {
    pub clause: String,
    pub on: Vec<String>,
    pub using: Vec<String>,
}

/// Render JOIN clauses in insertion order; ON takes precedence over USING
/// when both are non-empty
pub(crate) fn render_joins(joins: &[JoinSpec], sql: &mut String) {
    for join in joins {
        sql.push(' ');
        sql.push_str(&join.clause);
        if !join.on.is_empty() {
            sql.push_str(" ON (");
            sql.push_str(&join.on.join(" AND "));
            sql.push(')');
        } else if !join.using.is_empty() {
            sql.push_str(" USING (");
            sql.push_str(&join.using.join(", "));
            sql.push(')');
        }
    }
}

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// NULLS placement for ORDER BY clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nulls {
    Default,
    First,
    Last,
}

/// Render one ORDER BY expression; the NULLS hint is kept only for dialects
/// that understand it
pub(crate) fn render_order_by<D: Dialect>(
    dialect: &D,
    column: &str,
    direction: &SortDirection,
    nulls: Nulls,
) -> String {
    let mut expr = format!("{} {}", dialect.prepare_identifier(column), direction);
    if dialect.supports_nulls_ordering() {
        match nulls {
            Nulls::First => expr.push_str(" NULLS FIRST"),
            Nulls::Last => expr.push_str(" NULLS LAST"),
            Nulls::Default => {}
        }
    }
    expr
}
