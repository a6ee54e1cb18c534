//! v001 -- Initial schema creation.
//!
//! Every collection lives in one `documents` table.  `seq` preserves insertion
//! order, which is the order queries return documents in.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    id         TEXT NOT NULL,               -- UUID v4, or a caller-chosen key
    body       TEXT NOT NULL,               -- JSON object
    updated_at TEXT NOT NULL,               -- ISO-8601 / RFC-3339

    UNIQUE (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection_seq
    ON documents(collection, seq);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
