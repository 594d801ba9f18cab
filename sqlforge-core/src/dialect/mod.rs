//! Dialect capabilities: escaping rules and rendering strategy
//!
//! A [`Dialect`] bundles the expression helper (identifier and value
//! escaping) with the per-dialect rendering strategy (pagination placement,
//! NULLS ordering support, locking statements). A builder is bound to one
//! dialect at construction and keeps it for its whole lifetime.

mod ansi;
mod firebird;
mod mssql;

pub use ansi::Ansi;
pub use firebird::Firebird;
pub use mssql::Mssql;

use crate::error::{Error, Result};
use crate::value::Value;

/// Where a dialect places its pagination clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `LIMIT n OFFSET m` appended after ORDER BY
    LimitOffset,
    /// `TOP n` immediately after SELECT/DISTINCT; offset has no rendering
    Top,
    /// `FIRST n SKIP m` immediately after SELECT/DISTINCT
    FirstSkip,
}

/// Per-dialect escaping and rendering rules
pub trait Dialect {
    /// Quote a single identifier segment
    fn quote_identifier(&self, part: &str) -> String;

    /// Dialect token for a boolean literal
    fn prepare_boolean(&self, value: bool) -> &'static str;

    /// Pagination strategy used by the renderers
    fn pagination(&self) -> Pagination;

    /// Whether `ORDER BY ... NULLS FIRST/LAST` is understood
    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    /// Raw locking statement for one table; hints may be ignored by
    /// dialects without hint support
    fn lock_statement(&self, table: &str, hints: &[&str]) -> String;

    /// Hex literal for a byte-string value
    fn hex_literal(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex_encode(bytes))
    }

    /// Escape a possibly qualified identifier, quoting each segment
    fn prepare_identifier(&self, raw: &str) -> String {
        raw.split('.')
            .map(|part| {
                if part == "*" {
                    part.to_string()
                } else {
                    self.quote_identifier(part)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Render a value as an escaped SQL literal
    fn prepare_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.prepare_boolean(*b).to_string(),
            Value::I32(i) => i.to_string(),
            Value::I64(i) => i.to_string(),
            Value::F32(f) => f.to_string(),
            Value::F64(f) => f.to_string(),
            Value::String(s) => quote_string(s),
            Value::Bytes(b) => self.hex_literal(b),
            Value::Json(j) => quote_string(&j.to_string()),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(|item| self.prepare_value(item)).collect();
                format!("({})", parts.join(", "))
            }
            #[cfg(feature = "uuid-support")]
            Value::Uuid(u) => quote_string(&u.to_string()),
            #[cfg(feature = "datetime-support")]
            Value::DateTime(ts) => quote_string(&ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes
pub(crate) fn quote_string(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// Validate the "natural number" rule for limit/offset values
pub(crate) fn natural(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        Error::invalid_instruction(format!("expected a non-negative integer, got {value}"))
    })
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string_doubles_quotes() {
        assert_eq!(quote_string("O'Brien"), "'O''Brien'");
        assert_eq!(quote_string("plain"), "'plain'");
    }

    #[test]
    fn test_natural_rejects_negative() {
        assert!(natural(-1).is_err());
        assert_eq!(natural(0).unwrap(), 0);
        assert_eq!(natural(5).unwrap(), 5);
    }

    #[test]
    fn test_prepare_identifier_qualified() {
        assert_eq!(Ansi.prepare_identifier("users.id"), "\"users\".\"id\"");
        assert_eq!(Ansi.prepare_identifier("users.*"), "\"users\".*");
        assert_eq!(Ansi.prepare_identifier("*"), "*");
    }

    #[test]
    fn test_prepare_value_array() {
        let value = Value::from(vec![1, 2, 3]);
        assert_eq!(Ansi.prepare_value(&value), "(1, 2, 3)");
    }

    #[test]
    fn test_prepare_value_bytes() {
        let value = Value::Bytes(vec![0xde, 0xad]);
        assert_eq!(Ansi.prepare_value(&value), "X'DEAD'");
        assert_eq!(Mssql.prepare_value(&value), "0xDEAD");
    }

    #[test]
    fn test_prepare_value_json() {
        let value = Value::Json(serde_json::json!({"a": 1}));
        assert_eq!(Ansi.prepare_value(&value), "'{\"a\":1}'");
    }
}
