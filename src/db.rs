// 🗄️ Record Store - SQLite persistence for every clinic entity
//
// One table per entity. All access goes through the Record trait, so the
// same validate-then-write path serves clients, pets, medicines, products,
// providers and vets.

use crate::entities::Record;
use crate::error::{RecordError, RecordResult};
use crate::validation::{self, field, FormData};
use rusqlite::{params_from_iter, types::Value, Connection, OptionalExtension};
use tracing::{debug, info, warn};

pub fn setup_database(conn: &Connection) -> RecordResult<()> {
    // WAL for crash recovery; in-memory databases report "memory"
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    debug!(journal_mode = %mode, "database journal mode");

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS pets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            breed TEXT NOT NULL,
            birthday TEXT NOT NULL,
            weight REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS medicines (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            dose INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            price REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS providers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS vets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            specialty TEXT NOT NULL DEFAULT 'Medicina interna'
        );",
    )?;

    Ok(())
}

// ============================================================================
// SQL
// ============================================================================

fn quoted_fields<R: Record>() -> Vec<String> {
    R::FIELDS.iter().map(|f| format!("\"{}\"", f)).collect()
}

fn insert_sql<R: Record>() -> String {
    let placeholders: Vec<String> = (1..=R::FIELDS.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        R::TABLE,
        quoted_fields::<R>().join(", "),
        placeholders.join(", ")
    )
}

fn update_sql<R: Record>() -> String {
    let assignments: Vec<String> = quoted_fields::<R>()
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{} = ?{}", f, i + 1))
        .collect();
    format!(
        "UPDATE \"{}\" SET {} WHERE id = ?{}",
        R::TABLE,
        assignments.join(", "),
        R::FIELDS.len() + 1
    )
}

// ============================================================================
// WRITES
// ============================================================================

/// Validate `data` and insert it as a new record.
///
/// Returns the stored row, read back from the database.
pub fn create<R: Record>(conn: &Connection, data: &FormData) -> RecordResult<R> {
    let errors = R::validate(data, validation::today());
    if !errors.is_empty() {
        debug!(entity = R::ENTITY, fields = ?errors.keys().collect::<Vec<_>>(), "rejected create");
        return Err(RecordError::Validation {
            entity: R::ENTITY,
            errors,
        });
    }

    let record = R::from_form(0, data);
    conn.execute(&insert_sql::<R>(), params_from_iter(record.values()))?;
    let id = conn.last_insert_rowid();

    info!(entity = R::ENTITY, id, "created");
    find(conn, id)
}

/// Merge `data` over the stored record and save it.
///
/// Blank or missing fields keep their stored value, so an update can never
/// clear a field. The merged record must still pass validation.
pub fn update<R: Record>(conn: &Connection, id: i64, data: &FormData) -> RecordResult<R> {
    let existing: R = find(conn, id)?;

    let mut merged = existing.to_form();
    for name in R::FIELDS {
        let value = field(data, name);
        if !value.is_empty() {
            merged.insert(name.to_string(), value.to_string());
        }
    }

    let errors = R::validate(&merged, validation::today());
    if !errors.is_empty() {
        debug!(entity = R::ENTITY, id, fields = ?errors.keys().collect::<Vec<_>>(), "rejected update");
        return Err(RecordError::Validation {
            entity: R::ENTITY,
            errors,
        });
    }

    let record = R::from_form(id, &merged);
    let mut values = record.values();
    values.push(Value::Integer(id));
    conn.execute(&update_sql::<R>(), params_from_iter(values))?;

    info!(entity = R::ENTITY, id, "updated");
    Ok(record)
}

/// Form-post entry point: an `id` in the data edits that record,
/// otherwise a new one is created.
pub fn save<R: Record>(conn: &Connection, data: &FormData) -> RecordResult<R> {
    match field(data, "id") {
        "" => create(conn, data),
        raw => {
            let id = raw.parse::<i64>().map_err(|_| RecordError::InvalidId {
                entity: R::ENTITY,
                value: raw.to_string(),
            })?;
            update(conn, id, data)
        }
    }
}

// ============================================================================
// READS
// ============================================================================

pub fn get<R: Record>(conn: &Connection, id: i64) -> RecordResult<Option<R>> {
    let sql = format!("SELECT * FROM \"{}\" WHERE id = ?1", R::TABLE);
    let record = conn.query_row(&sql, [id], |row| R::from_row(row)).optional()?;
    Ok(record)
}

/// Like `get`, but a missing record is an error
pub fn find<R: Record>(conn: &Connection, id: i64) -> RecordResult<R> {
    get(conn, id)?.ok_or_else(|| {
        warn!(entity = R::ENTITY, id, "record not found");
        RecordError::NotFound {
            entity: R::ENTITY,
            id,
        }
    })
}

pub fn list<R: Record>(conn: &Connection) -> RecordResult<Vec<R>> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\" ORDER BY id", R::TABLE))?;
    let records = stmt
        .query_map([], |row| R::from_row(row))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn count<R: Record>(conn: &Connection) -> RecordResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM \"{}\"", R::TABLE);
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count)
}
