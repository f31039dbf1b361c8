//! SQL schema for the Gumby SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. A write replaces the whole body.
CREATE TABLE IF NOT EXISTS documents (
    index_name  TEXT NOT NULL,
    doc_id      TEXT NOT NULL,   -- lowercase hyphenated UUID
    body        TEXT NOT NULL,   -- encoded document, compact JSON
    indexed_at  TEXT NOT NULL,   -- RFC 3339 UTC; time of the last write
    PRIMARY KEY (index_name, doc_id)
);

CREATE INDEX IF NOT EXISTS documents_indexed_idx ON documents(indexed_at);

PRAGMA user_version = 1;
";
