//! Firebird dialect

use super::{Dialect, Pagination};

/// Firebird dialect: double-quoted identifiers, `FIRST n SKIP m` pagination,
/// row locks emulated by forcing a read inside the surrounding transaction
#[derive(Debug, Clone, Copy, Default)]
pub struct Firebird;

impl Dialect for Firebird {
    fn quote_identifier(&self, part: &str) -> String {
        format!("\"{}\"", part.replace('"', "\"\""))
    }

    fn prepare_boolean(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination::FirstSkip
    }

    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    fn lock_statement(&self, table: &str, _hints: &[&str]) -> String {
        // No hint support; WITH LOCK relies on the engine's read locking.
        format!(
            "SELECT * FROM {} WHERE {} = 1 WITH LOCK;",
            self.prepare_identifier(table),
            self.quote_identifier("ID")
        )
    }
}
