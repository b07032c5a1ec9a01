//! SQL schema for the hub SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Client-side cache: one opaque JSON snapshot per partition.
CREATE TABLE IF NOT EXISTS snapshots (
    key         TEXT PRIMARY KEY,  -- 'sh_projects' | 'sh_admins' | 'sh_current_admin'
    value_json  TEXT NOT NULL,
    written_at  TEXT NOT NULL
);

-- Server-side documents.
-- Counters are only ever touched by `SET x = x + 1`.
CREATE TABLE IF NOT EXISTS projects (
    id           TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    language     TEXT NOT NULL,
    kind         TEXT NOT NULL,    -- 'CODE' | 'FILE'
    content      TEXT NOT NULL,
    notes        TEXT NOT NULL DEFAULT '',
    preview_url  TEXT NOT NULL DEFAULT '',
    likes        INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0),
    downloads    INTEGER NOT NULL DEFAULT 0 CHECK (downloads >= 0),
    author_id    TEXT NOT NULL,    -- not a foreign key; dangling is allowed
    created_at   TEXT NOT NULL     -- RFC 3339 UTC, fixed millisecond width
);

-- Profiles only; secrets never reach the server.
CREATE TABLE IF NOT EXISTS admins (
    id         TEXT PRIMARY KEY,
    username   TEXT NOT NULL UNIQUE,
    name       TEXT NOT NULL,
    role       TEXT NOT NULL,      -- 'OWNER' | 'ADMIN'
    quote      TEXT NOT NULL DEFAULT '',
    hashtags   TEXT NOT NULL DEFAULT '[]',
    photo_url  TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS projects_created_idx ON projects(created_at);

PRAGMA user_version = 1;
";
