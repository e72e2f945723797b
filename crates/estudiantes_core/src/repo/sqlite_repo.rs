//! SQLite-backed store shared by every entity repository.
//!
//! # Responsibility
//! - Own the borrowed connection and the clock used for record dates.
//! - Map rows to records and unique-index failures to
//!   `RepoError::ConstraintViolation`.
//!
//! The per-entity contracts are implemented for this type in their own
//! modules (`estudiante_repo`, `profesor_repo`, `curso_repo`,
//! `direccion_repo`).

use crate::model::curso::Curso;
use crate::model::direccion::Direccion;
use crate::model::estudiante::Estudiante;
use crate::model::profesor::Profesor;
use crate::model::EntityKind;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::{local_clock, Clock};
use chrono::NaiveDate;
use rusqlite::{ffi, Connection, Row};

pub(crate) const ESTUDIANTE_SELECT_SQL: &str = "SELECT
    id,
    rut,
    nombre,
    apellido,
    fecha_nac,
    activo,
    creacion_registro,
    modificacion_registro,
    creado_por
FROM estudiantes";

pub(crate) const PROFESOR_SELECT_SQL: &str = "SELECT
    id,
    rut,
    nombre,
    apellido,
    activo,
    creacion_registro,
    modificacion_registro,
    creado_por
FROM profesores";

pub(crate) const CURSO_SELECT_SQL: &str = "SELECT
    id,
    codigo,
    nombre,
    version,
    profesor_id
FROM cursos";

pub(crate) const DIRECCION_SELECT_SQL: &str = "SELECT
    id,
    calle,
    numero,
    dpto,
    comuna,
    ciudad,
    region,
    estudiante_id
FROM direcciones";

/// SQLite-backed school store.
///
/// Expects a connection returned by `open_db`/`open_db_in_memory`, so
/// foreign keys are on and the schema is current.
pub struct SqliteEscuelaRepository<'conn> {
    pub(crate) conn: &'conn Connection,
    clock: Clock,
}

impl<'conn> SqliteEscuelaRepository<'conn> {
    /// Uses the local calendar date for record timestamps.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_clock(conn, local_clock())
    }

    /// Uses `clock` for record timestamps.
    pub fn with_clock(conn: &'conn Connection, clock: Clock) -> Self {
        Self { conn, clock }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Runs a natural-key query and keeps every matching row so duplicates
    /// can be reported instead of silently picking one.
    pub(crate) fn query_records<T, P>(
        &self,
        sql: &str,
        params: P,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>>
    where
        P: rusqlite::Params,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse(row)?);
        }
        Ok(records)
    }
}

/// Converts a unique-index failure into a domain constraint error.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    entity: EntityKind,
    field: &'static str,
    value: &str,
) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::ConstraintViolation {
                entity,
                field,
                value: value.to_string(),
            }
        }
        _ => err.into(),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn parse_flag(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {table}.{column}"
        ))),
    }
}

pub(crate) fn parse_estudiante_row(row: &Row<'_>) -> RepoResult<Estudiante> {
    let estudiante = Estudiante {
        id: row.get("id")?,
        rut: row.get("rut")?,
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        fecha_nac: row.get("fecha_nac")?,
        activo: parse_flag(row, "estudiantes", "activo")?,
        creacion_registro: row.get("creacion_registro")?,
        modificacion_registro: row.get("modificacion_registro")?,
        creado_por: row.get("creado_por")?,
    };
    Ok(estudiante)
}

pub(crate) fn parse_profesor_row(row: &Row<'_>) -> RepoResult<Profesor> {
    let profesor = Profesor {
        id: row.get("id")?,
        rut: row.get("rut")?,
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        activo: parse_flag(row, "profesores", "activo")?,
        creacion_registro: row.get("creacion_registro")?,
        modificacion_registro: row.get("modificacion_registro")?,
        creado_por: row.get("creado_por")?,
    };
    Ok(profesor)
}

pub(crate) fn parse_curso_row(row: &Row<'_>) -> RepoResult<Curso> {
    Ok(Curso {
        id: row.get("id")?,
        codigo: row.get("codigo")?,
        nombre: row.get("nombre")?,
        version: row.get("version")?,
        profesor_id: row.get("profesor_id")?,
    })
}

pub(crate) fn parse_direccion_row(row: &Row<'_>) -> RepoResult<Direccion> {
    Ok(Direccion {
        id: row.get("id")?,
        calle: row.get("calle")?,
        numero: row.get("numero")?,
        dpto: row.get("dpto")?,
        comuna: row.get("comuna")?,
        ciudad: row.get("ciudad")?,
        region: row.get("region")?,
        estudiante_id: row.get("estudiante_id")?,
    })
}
