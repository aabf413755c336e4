//! Durable transaction ledger
//!
//! SQLite-backed append-only log of authorization outcomes. Rows are never
//! mutated or deleted; insertion order (rowid) is the only ordering, there
//! is no timestamp column. Re-running the same logical authorization
//! produces a duplicate row: no uniqueness constraint and no idempotency
//! key exist at this layer.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::StoreError;
use crate::types::LedgerEntry;

/// SQLite storage for authorization outcomes
pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open the ledger at the given path, creating the table if absent
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(StoreError::OpenFailed)?;
        Self::init_schema(&conn).map_err(StoreError::OpenFailed)?;
        Ok(Self { conn })
    }

    /// Create an in-memory ledger (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::OpenFailed)?;
        Self::init_schema(&conn).map_err(StoreError::OpenFailed)?;
        Ok(Self { conn })
    }

    /// Initialize the database schema
    ///
    /// The amount column is TEXT: SQLite's NUMERIC affinity would rewrite
    /// "5.00" to 5, and the caller's decimal string must read back exactly.
    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                amount TEXT NOT NULL,
                status TEXT NOT NULL,
                reason TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Append one authorization outcome
    pub fn append(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO transactions (amount, status, reason) VALUES (?1, ?2, ?3)",
            params![entry.amount, entry.status, entry.reason],
        )?;
        Ok(())
    }

    /// The most recently inserted `count` entries, most-recent first
    pub fn recent(&self, count: usize) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT amount, status, reason FROM transactions
             ORDER BY rowid DESC LIMIT ?1",
        )?;

        let entries = stmt
            .query_map(params![count as i64], |row| {
                Ok(LedgerEntry {
                    amount: row.get(0)?,
                    status: row.get(1)?,
                    reason: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_read_back() {
        let store = LedgerStore::in_memory().unwrap();
        let entry = LedgerEntry::new("5.00", "APPROVED", "");

        store.append(&entry).unwrap();
        let recent = store.recent(1).unwrap();

        assert_eq!(recent, vec![entry]);
        assert_eq!(recent[0].reason, "");
    }

    #[test]
    fn test_amount_string_preserved_exactly() {
        let store = LedgerStore::in_memory().unwrap();
        store
            .append(&LedgerEntry::new("5.00", "APPROVED", ""))
            .unwrap();

        assert_eq!(store.recent(1).unwrap()[0].amount, "5.00");
    }

    #[test]
    fn test_recent_returns_newest_first() {
        let store = LedgerStore::in_memory().unwrap();
        for i in 1..=5 {
            let amount = format!("{i}.00");
            store
                .append(&LedgerEntry::new(&amount, "APPROVED", ""))
                .unwrap();
        }

        let recent = store.recent(3).unwrap();
        let amounts: Vec<&str> = recent.iter().map(|e| e.amount.as_str()).collect();
        assert_eq!(amounts, vec!["5.00", "4.00", "3.00"]);
    }

    #[test]
    fn test_recent_with_count_past_end() {
        let store = LedgerStore::in_memory().unwrap();
        store
            .append(&LedgerEntry::new("1.00", "DECLINED", "TIMEOUT"))
            .unwrap();

        assert_eq!(store.recent(10).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_appends_allowed() {
        let store = LedgerStore::in_memory().unwrap();
        let entry = LedgerEntry::new("9.99", "APPROVED", "");

        store.append(&entry).unwrap();
        store.append(&entry).unwrap();

        assert_eq!(store.recent(10).unwrap().len(), 2);
    }

    #[test]
    fn test_ledger_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.db");

        {
            let store = LedgerStore::open(&path).unwrap();
            store
                .append(&LedgerEntry::new("12.34", "DECLINED", "INSUFFICIENT FUNDS"))
                .unwrap();
        }

        let store = LedgerStore::open(&path).unwrap();
        let recent = store.recent(1).unwrap();
        assert_eq!(
            recent,
            vec![LedgerEntry::new("12.34", "DECLINED", "INSUFFICIENT FUNDS")]
        );
    }

    #[test]
    fn test_open_fails_on_unusable_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = LedgerStore::open(dir.path());
        assert!(matches!(result, Err(StoreError::OpenFailed(_))));
    }
}
