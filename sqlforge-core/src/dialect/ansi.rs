//! Generic ANSI dialect

use super::{Dialect, Pagination};

/// ANSI dialect: double-quoted identifiers, `LIMIT n OFFSET m` pagination,
/// row locks via `SELECT ... FOR UPDATE`
#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Dialect for Ansi {
    fn quote_identifier(&self, part: &str) -> String {
        format!("\"{}\"", part.replace('"', "\"\""))
    }

    fn prepare_boolean(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination::LimitOffset
    }

    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    fn lock_statement(&self, table: &str, hints: &[&str]) -> String {
        // Hints such as NOWAIT or SKIP LOCKED pass through after FOR UPDATE.
        let mut sql = format!("SELECT * FROM {} FOR UPDATE", self.prepare_identifier(table));
        if !hints.is_empty() {
            sql.push(' ');
            sql.push_str(&hints.join(" "));
        }
        sql.push(';');
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(Ansi.quote_identifier("users"), "\"users\"");
        assert_eq!(Ansi.quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_boolean_tokens() {
        assert_eq!(Ansi.prepare_boolean(true), "TRUE");
        assert_eq!(Ansi.prepare_boolean(false), "FALSE");
    }

    #[test]
    fn test_lock_statement() {
        assert_eq!(
            Ansi.lock_statement("accounts", &[]),
            "SELECT * FROM \"accounts\" FOR UPDATE;"
        );
        assert_eq!(
            Ansi.lock_statement("accounts", &["NOWAIT"]),
            "SELECT * FROM \"accounts\" FOR UPDATE NOWAIT;"
        );
    }
}
