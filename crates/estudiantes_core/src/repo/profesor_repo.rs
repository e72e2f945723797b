//! Teacher repository contract and its SQLite implementation.
//!
//! # Invariants
//! - `rut` is backed by a unique index, independent from the student one.
//! - Deleting a teacher keeps its courses and clears their `profesor_id`.

use crate::model::profesor::{NuevoProfesor, Profesor, ProfesorId};
use crate::model::EntityKind;
use crate::repo::error::{at_most_one, RepoError, RepoResult};
use crate::repo::sqlite_repo::{
    bool_to_int, map_unique_violation, parse_profesor_row, SqliteEscuelaRepository,
    PROFESOR_SELECT_SQL,
};
use rusqlite::params;

/// Persistence contract for teachers.
pub trait ProfesorRepository {
    fn create_profesor(&self, nuevo: &NuevoProfesor) -> RepoResult<Profesor>;
    fn get_profesor_by_rut(&self, rut: &str) -> RepoResult<Option<Profesor>>;
    fn get_profesor(&self, id: ProfesorId) -> RepoResult<Option<Profesor>>;
    /// Persists every editable field and refreshes `modificacion_registro`.
    fn update_profesor(&self, profesor: &Profesor) -> RepoResult<Profesor>;
    /// Removes a teacher; referencing courses lose their teacher.
    fn delete_profesor(&self, id: ProfesorId) -> RepoResult<()>;
}

impl ProfesorRepository for SqliteEscuelaRepository<'_> {
    fn create_profesor(&self, nuevo: &NuevoProfesor) -> RepoResult<Profesor> {
        nuevo.validate()?;
        let today = self.today();

        self.conn
            .execute(
                "INSERT INTO profesores (
                    rut,
                    nombre,
                    apellido,
                    activo,
                    creacion_registro,
                    modificacion_registro,
                    creado_por
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?6);",
                params![
                    nuevo.rut.as_str(),
                    nuevo.nombre.as_str(),
                    nuevo.apellido.as_str(),
                    bool_to_int(nuevo.activo),
                    today,
                    nuevo.creado_por.as_deref(),
                ],
            )
            .map_err(|err| map_unique_violation(err, EntityKind::Profesor, "rut", &nuevo.rut))?;

        Ok(Profesor {
            id: self.conn.last_insert_rowid(),
            rut: nuevo.rut.clone(),
            nombre: nuevo.nombre.clone(),
            apellido: nuevo.apellido.clone(),
            activo: nuevo.activo,
            creacion_registro: today,
            modificacion_registro: today,
            creado_por: nuevo.creado_por.clone(),
        })
    }

    fn get_profesor_by_rut(&self, rut: &str) -> RepoResult<Option<Profesor>> {
        let rows = self.query_records(
            &format!("{PROFESOR_SELECT_SQL} WHERE rut = ?1;"),
            [rut],
            parse_profesor_row,
        )?;
        at_most_one(EntityKind::Profesor, rut, rows)
    }

    fn get_profesor(&self, id: ProfesorId) -> RepoResult<Option<Profesor>> {
        let mut rows = self.query_records(
            &format!("{PROFESOR_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_profesor_row,
        )?;
        Ok(rows.pop())
    }

    fn update_profesor(&self, profesor: &Profesor) -> RepoResult<Profesor> {
        profesor.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE profesores
                 SET
                    rut = ?1,
                    nombre = ?2,
                    apellido = ?3,
                    activo = ?4,
                    creado_por = ?5,
                    modificacion_registro = ?6
                 WHERE id = ?7;",
                params![
                    profesor.rut.as_str(),
                    profesor.nombre.as_str(),
                    profesor.apellido.as_str(),
                    bool_to_int(profesor.activo),
                    profesor.creado_por.as_deref(),
                    self.today(),
                    profesor.id,
                ],
            )
            .map_err(|err| map_unique_violation(err, EntityKind::Profesor, "rut", &profesor.rut))?;

        if changed == 0 {
            return Err(RepoError::not_found(
                EntityKind::Profesor,
                format!("id={}", profesor.id),
            ));
        }

        self.get_profesor(profesor.id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("profesor id={} missing after update", profesor.id))
        })
    }

    fn delete_profesor(&self, id: ProfesorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM profesores WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Profesor, format!("id={id}")));
        }

        Ok(())
    }
}
