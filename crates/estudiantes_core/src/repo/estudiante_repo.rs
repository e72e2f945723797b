//! Student repository contract and its SQLite implementation.
//!
//! # Invariants
//! - `rut` is backed by a unique index; duplicates surface as
//!   `RepoError::ConstraintViolation`.
//! - Deleting a student cascades to its addresses and course links.

use crate::model::estudiante::{Estudiante, EstudianteId, NuevoEstudiante};
use crate::model::EntityKind;
use crate::repo::error::{at_most_one, RepoError, RepoResult};
use crate::repo::sqlite_repo::{
    bool_to_int, map_unique_violation, parse_estudiante_row, SqliteEscuelaRepository,
    ESTUDIANTE_SELECT_SQL,
};
use rusqlite::params;

/// Persistence contract for students.
pub trait EstudianteRepository {
    /// Inserts a student and returns the stored record.
    fn create_estudiante(&self, nuevo: &NuevoEstudiante) -> RepoResult<Estudiante>;
    /// Looks a student up by natural key.
    fn get_estudiante_by_rut(&self, rut: &str) -> RepoResult<Option<Estudiante>>;
    /// Looks a student up by store id.
    fn get_estudiante(&self, id: EstudianteId) -> RepoResult<Option<Estudiante>>;
    /// Persists every editable field and refreshes `modificacion_registro`.
    fn update_estudiante(&self, estudiante: &Estudiante) -> RepoResult<Estudiante>;
    /// Removes a student together with its addresses and course links.
    fn delete_estudiante(&self, id: EstudianteId) -> RepoResult<()>;
}

impl EstudianteRepository for SqliteEscuelaRepository<'_> {
    fn create_estudiante(&self, nuevo: &NuevoEstudiante) -> RepoResult<Estudiante> {
        nuevo.validate()?;
        let today = self.today();

        self.conn
            .execute(
                "INSERT INTO estudiantes (
                    rut,
                    nombre,
                    apellido,
                    fecha_nac,
                    activo,
                    creacion_registro,
                    modificacion_registro,
                    creado_por
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7);",
                params![
                    nuevo.rut.as_str(),
                    nuevo.nombre.as_str(),
                    nuevo.apellido.as_str(),
                    nuevo.fecha_nac,
                    bool_to_int(nuevo.activo),
                    today,
                    nuevo.creado_por.as_deref(),
                ],
            )
            .map_err(|err| map_unique_violation(err, EntityKind::Estudiante, "rut", &nuevo.rut))?;

        Ok(Estudiante {
            id: self.conn.last_insert_rowid(),
            rut: nuevo.rut.clone(),
            nombre: nuevo.nombre.clone(),
            apellido: nuevo.apellido.clone(),
            fecha_nac: nuevo.fecha_nac,
            activo: nuevo.activo,
            creacion_registro: today,
            modificacion_registro: today,
            creado_por: nuevo.creado_por.clone(),
        })
    }

    fn get_estudiante_by_rut(&self, rut: &str) -> RepoResult<Option<Estudiante>> {
        let rows = self.query_records(
            &format!("{ESTUDIANTE_SELECT_SQL} WHERE rut = ?1;"),
            [rut],
            parse_estudiante_row,
        )?;
        at_most_one(EntityKind::Estudiante, rut, rows)
    }

    fn get_estudiante(&self, id: EstudianteId) -> RepoResult<Option<Estudiante>> {
        let mut rows = self.query_records(
            &format!("{ESTUDIANTE_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_estudiante_row,
        )?;
        Ok(rows.pop())
    }

    fn update_estudiante(&self, estudiante: &Estudiante) -> RepoResult<Estudiante> {
        estudiante.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE estudiantes
                 SET
                    rut = ?1,
                    nombre = ?2,
                    apellido = ?3,
                    fecha_nac = ?4,
                    activo = ?5,
                    creado_por = ?6,
                    modificacion_registro = ?7
                 WHERE id = ?8;",
                params![
                    estudiante.rut.as_str(),
                    estudiante.nombre.as_str(),
                    estudiante.apellido.as_str(),
                    estudiante.fecha_nac,
                    bool_to_int(estudiante.activo),
                    estudiante.creado_por.as_deref(),
                    self.today(),
                    estudiante.id,
                ],
            )
            .map_err(|err| {
                map_unique_violation(err, EntityKind::Estudiante, "rut", &estudiante.rut)
            })?;

        if changed == 0 {
            return Err(RepoError::not_found(
                EntityKind::Estudiante,
                format!("id={}", estudiante.id),
            ));
        }

        self.get_estudiante(estudiante.id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "estudiante id={} missing after update",
                estudiante.id
            ))
        })
    }

    fn delete_estudiante(&self, id: EstudianteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM estudiantes WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::not_found(
                EntityKind::Estudiante,
                format!("id={id}"),
            ));
        }

        Ok(())
    }
}
