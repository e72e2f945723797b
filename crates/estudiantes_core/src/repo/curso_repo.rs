//! Course repository contract, course/student links and the SQLite
//! implementation.
//!
//! # Invariants
//! - `codigo` is backed by a unique index.
//! - A student/course pair is linked at most once; linking again is a no-op.
//! - Course listings are ordered by course id, student listings by student id.

use crate::model::curso::{Curso, CursoId, NuevoCurso};
use crate::model::estudiante::{Estudiante, EstudianteId};
use crate::model::EntityKind;
use crate::repo::error::{at_most_one, RepoError, RepoResult};
use crate::repo::sqlite_repo::{
    map_unique_violation, parse_curso_row, parse_estudiante_row, SqliteEscuelaRepository,
    CURSO_SELECT_SQL,
};
use rusqlite::params;

/// Persistence contract for courses and their student membership.
pub trait CursoRepository {
    fn create_curso(&self, nuevo: &NuevoCurso) -> RepoResult<Curso>;
    fn get_curso_by_codigo(&self, codigo: &str) -> RepoResult<Option<Curso>>;
    fn get_curso(&self, id: CursoId) -> RepoResult<Option<Curso>>;
    /// Persists `codigo`, `nombre`, `version` and `profesor_id`.
    fn update_curso(&self, curso: &Curso) -> RepoResult<Curso>;
    /// Removes a course and its student links.
    fn delete_curso(&self, id: CursoId) -> RepoResult<()>;
    /// Links a student to a course. Returns `false` when already linked.
    fn add_estudiante_to_curso(
        &self,
        curso_id: CursoId,
        estudiante_id: EstudianteId,
    ) -> RepoResult<bool>;
    fn list_cursos_for_estudiante(&self, estudiante_id: EstudianteId) -> RepoResult<Vec<Curso>>;
    fn list_estudiantes_for_curso(&self, curso_id: CursoId) -> RepoResult<Vec<Estudiante>>;
}

impl CursoRepository for SqliteEscuelaRepository<'_> {
    fn create_curso(&self, nuevo: &NuevoCurso) -> RepoResult<Curso> {
        nuevo.validate()?;

        self.conn
            .execute(
                "INSERT INTO cursos (codigo, nombre, version, profesor_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    nuevo.codigo.as_str(),
                    nuevo.nombre.as_str(),
                    nuevo.version,
                    nuevo.profesor_id,
                ],
            )
            .map_err(|err| map_unique_violation(err, EntityKind::Curso, "codigo", &nuevo.codigo))?;

        Ok(Curso {
            id: self.conn.last_insert_rowid(),
            codigo: nuevo.codigo.clone(),
            nombre: nuevo.nombre.clone(),
            version: nuevo.version,
            profesor_id: nuevo.profesor_id,
        })
    }

    fn get_curso_by_codigo(&self, codigo: &str) -> RepoResult<Option<Curso>> {
        let rows = self.query_records(
            &format!("{CURSO_SELECT_SQL} WHERE codigo = ?1;"),
            [codigo],
            parse_curso_row,
        )?;
        at_most_one(EntityKind::Curso, codigo, rows)
    }

    fn get_curso(&self, id: CursoId) -> RepoResult<Option<Curso>> {
        let mut rows = self.query_records(
            &format!("{CURSO_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_curso_row,
        )?;
        Ok(rows.pop())
    }

    fn update_curso(&self, curso: &Curso) -> RepoResult<Curso> {
        curso.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE cursos
                 SET
                    codigo = ?1,
                    nombre = ?2,
                    version = ?3,
                    profesor_id = ?4
                 WHERE id = ?5;",
                params![
                    curso.codigo.as_str(),
                    curso.nombre.as_str(),
                    curso.version,
                    curso.profesor_id,
                    curso.id,
                ],
            )
            .map_err(|err| map_unique_violation(err, EntityKind::Curso, "codigo", &curso.codigo))?;

        if changed == 0 {
            return Err(RepoError::not_found(
                EntityKind::Curso,
                format!("id={}", curso.id),
            ));
        }

        Ok(curso.clone())
    }

    fn delete_curso(&self, id: CursoId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM cursos WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Curso, format!("id={id}")));
        }

        Ok(())
    }

    fn add_estudiante_to_curso(
        &self,
        curso_id: CursoId,
        estudiante_id: EstudianteId,
    ) -> RepoResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO curso_estudiantes (curso_id, estudiante_id)
             VALUES (?1, ?2);",
            params![curso_id, estudiante_id],
        )?;
        Ok(inserted == 1)
    }

    fn list_cursos_for_estudiante(&self, estudiante_id: EstudianteId) -> RepoResult<Vec<Curso>> {
        self.query_records(
            "SELECT c.id, c.codigo, c.nombre, c.version, c.profesor_id
             FROM cursos c
             INNER JOIN curso_estudiantes ce ON ce.curso_id = c.id
             WHERE ce.estudiante_id = ?1
             ORDER BY c.id ASC;",
            [estudiante_id],
            parse_curso_row,
        )
    }

    fn list_estudiantes_for_curso(&self, curso_id: CursoId) -> RepoResult<Vec<Estudiante>> {
        self.query_records(
            "SELECT
                e.id,
                e.rut,
                e.nombre,
                e.apellido,
                e.fecha_nac,
                e.activo,
                e.creacion_registro,
                e.modificacion_registro,
                e.creado_por
             FROM estudiantes e
             INNER JOIN curso_estudiantes ce ON ce.estudiante_id = e.id
             WHERE ce.curso_id = ?1
             ORDER BY e.id ASC;",
            [curso_id],
            parse_estudiante_row,
        )
    }
}
