//! MS SQL dialect

use super::{Dialect, Pagination};

/// MS SQL dialect: bracketed identifiers, `TOP n` pagination immediately
/// after SELECT/DISTINCT, table-hint based locking
///
/// Offset is accepted and validated but has no rendering in this dialect;
/// the renderers log a warning when a non-zero offset is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mssql;

impl Dialect for Mssql {
    fn quote_identifier(&self, part: &str) -> String {
        format!("[{}]", part.replace(']', "]]"))
    }

    fn prepare_boolean(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination::Top
    }

    fn hex_literal(&self, bytes: &[u8]) -> String {
        format!("0x{}", super::hex_encode(bytes))
    }

    fn lock_statement(&self, table: &str, hints: &[&str]) -> String {
        let hints = if hints.is_empty() {
            "TABLOCKX, HOLDLOCK".to_string()
        } else {
            hints.join(", ")
        };
        format!(
            "SELECT * FROM {} WITH ({});",
            self.prepare_identifier(table),
            hints
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(Mssql.quote_identifier("users"), "[users]");
        assert_eq!(Mssql.quote_identifier("we]ird"), "[we]]ird]");
    }

    #[test]
    fn test_boolean_tokens() {
        assert_eq!(Mssql.prepare_boolean(true), "1");
        assert_eq!(Mssql.prepare_boolean(false), "0");
    }

    #[test]
    fn test_lock_statement_default_hints() {
        assert_eq!(
            Mssql.lock_statement("accounts", &[]),
            "SELECT * FROM [accounts] WITH (TABLOCKX, HOLDLOCK);"
        );
    }

    #[test]
    fn test_lock_statement_explicit_hints() {
        assert_eq!(
            Mssql.lock_statement("accounts", &["ROWLOCK", "XLOCK"]),
            "SELECT * FROM [accounts] WITH (ROWLOCK, XLOCK);"
        );
    }
}
