//! SQL schema for the padron SQLite store.
//!
//! Executed once at connection startup. Future migrations will be
//! gated on the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The geography tables carry no FOREIGN KEY constraints from
/// `domicile`: in the system of record they live in a separate schema
/// and a broken canton chain is tolerated (the resolver falls back to
/// the default country). The person/domicile/phone cross-references
/// are enforced; `person.domicile_id` can be enforced despite the
/// mutual reference because a person is always inserted first with a
/// NULL domicile and linked afterwards.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Immutable reference data, read-only from the registry's perspective.
CREATE TABLE IF NOT EXISTS country (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS province (
    id         INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    country_id INTEGER NOT NULL REFERENCES country(id)
);

CREATE TABLE IF NOT EXISTS canton (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    province_id INTEGER NOT NULL REFERENCES province(id)
);

-- Person rows are never deleted; deactivation flips status.
CREATE TABLE IF NOT EXISTS person (
    id                    TEXT PRIMARY KEY,
    given_names           TEXT NOT NULL,
    family_names          TEXT NOT NULL,
    email                 TEXT,
    identification_type   TEXT NOT NULL,   -- 'national-id' | 'passport' | 'tax-id'
    identification_number TEXT NOT NULL,
    status                TEXT NOT NULL DEFAULT 'active',
    has_disability        INTEGER NOT NULL DEFAULT 0,
    family_disability     INTEGER NOT NULL DEFAULT 0,
    nationality_id        INTEGER NOT NULL,
    domicile_id           TEXT REFERENCES domicile(id),
    version               INTEGER NOT NULL DEFAULT 1,
    created_at            TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS domicile (
    id         TEXT PRIMARY KEY,
    address    TEXT NOT NULL,
    canton_id  INTEGER NOT NULL,
    country_id INTEGER NOT NULL,   -- the canton's country, captured at write time
    person_id  TEXT NOT NULL REFERENCES person(id),
    status     TEXT NOT NULL DEFAULT 'active',
    origin     TEXT NOT NULL       -- 'with-person' | 'added-later'
);

CREATE TABLE IF NOT EXISTS phone (
    id        TEXT PRIMARY KEY,
    number    TEXT NOT NULL,
    person_id TEXT NOT NULL REFERENCES person(id)
);

-- No UNIQUE constraint: uniqueness is only required among active
-- persons and is enforced by the registry's uniqueness guard.
CREATE INDEX IF NOT EXISTS person_identification_idx ON person(identification_number);
CREATE INDEX IF NOT EXISTS domicile_person_idx       ON domicile(person_id);
CREATE INDEX IF NOT EXISTS phone_person_idx          ON phone(person_id);

PRAGMA user_version = 1;
";
