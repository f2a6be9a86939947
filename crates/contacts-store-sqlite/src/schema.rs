//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. There are no migrations; the schema
//! version is recorded in `PRAGMA user_version` for future use.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete.
CREATE TABLE IF NOT EXISTS people (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT    NOT NULL,
    date_of_birth TEXT    NOT NULL,   -- YYYY-MM-DD, no time of day
    married       INTEGER NOT NULL,   -- 0 | 1
    phone         TEXT    NOT NULL,
    salary        TEXT    NOT NULL,   -- fixed point, exactly 2 fractional digits
    created_at    TEXT    NOT NULL,   -- RFC 3339 UTC, microseconds; server-assigned
    updated_at    TEXT                -- NULL until the first update
);

CREATE INDEX IF NOT EXISTS people_created_idx ON people(created_at);

PRAGMA user_version = 1;
";
