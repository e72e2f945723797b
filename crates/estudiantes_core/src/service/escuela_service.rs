//! Registry use-cases: create, look up, update and delete school records.
//!
//! # Responsibility
//! - Resolve natural keys (`rut`, `codigo`) into records.
//! - Delegate persistence to an injected `EscuelaRepository`.
//!
//! # Invariants
//! - A missing natural key always yields `RepoError::NotFound`.
//! - Store errors (constraint violations included) are returned unchanged.
//! - Log events carry store ids and error codes only, never personal data.

use crate::model::curso::{Curso, NuevoCurso};
use crate::model::direccion::{Direccion, NuevaDireccion};
use crate::model::estudiante::{Estudiante, NuevoEstudiante};
use crate::model::profesor::{NuevoProfesor, Profesor};
use crate::model::EntityKind;
use crate::repo::{EscuelaRepository, RepoError, RepoResult};
use log::{info, warn};

/// Use-case facade over one store handle.
pub struct EscuelaService<R: EscuelaRepository> {
    pub(crate) repo: R,
}

/// Input for `crear_curso`. The teacher is given by `rut`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrearCursoRequest {
    pub codigo: String,
    pub nombre: String,
    pub version: Option<i32>,
    pub profesor_rut: String,
}

/// Input for `crear_direccion`. The owner is given by `rut`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrearDireccionRequest {
    pub calle: String,
    pub numero: String,
    pub dpto: Option<String>,
    pub comuna: String,
    pub ciudad: String,
    pub region: String,
    pub estudiante_rut: String,
}

impl<R: EscuelaRepository> EscuelaService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Underlying store handle.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates a student. A duplicate `rut` fails with
    /// `RepoError::ConstraintViolation` and leaves the existing row untouched.
    pub fn crear_estudiante(&self, nuevo: &NuevoEstudiante) -> RepoResult<Estudiante> {
        logged(
            "estudiante_create",
            self.repo.create_estudiante(nuevo),
            |estudiante| format!("estudiante_id={}", estudiante.id),
        )
    }

    /// Creates a teacher.
    pub fn crear_profesor(&self, nuevo: &NuevoProfesor) -> RepoResult<Profesor> {
        logged(
            "profesor_create",
            self.repo.create_profesor(nuevo),
            |profesor| format!("profesor_id={}", profesor.id),
        )
    }

    /// Creates a course taught by the teacher with `request.profesor_rut`.
    ///
    /// Nothing is written when the teacher does not exist.
    pub fn crear_curso(&self, request: &CrearCursoRequest) -> RepoResult<Curso> {
        let result = self.obtener_profesor(&request.profesor_rut).and_then(|profesor| {
            self.repo.create_curso(&NuevoCurso {
                codigo: request.codigo.clone(),
                nombre: request.nombre.clone(),
                version: request.version,
                profesor_id: Some(profesor.id),
            })
        });
        logged("curso_create", result, |curso| {
            format!(
                "curso_id={} profesor_id={}",
                curso.id,
                curso.profesor_id.unwrap_or_default()
            )
        })
    }

    /// Creates an address owned by the student with `request.estudiante_rut`.
    pub fn crear_direccion(&self, request: &CrearDireccionRequest) -> RepoResult<Direccion> {
        let result = self
            .obtener_estudiante(&request.estudiante_rut)
            .and_then(|estudiante| {
                self.repo.create_direccion(&NuevaDireccion {
                    calle: request.calle.clone(),
                    numero: request.numero.clone(),
                    dpto: request.dpto.clone(),
                    comuna: request.comuna.clone(),
                    ciudad: request.ciudad.clone(),
                    region: request.region.clone(),
                    estudiante_id: estudiante.id,
                })
            });
        logged("direccion_create", result, |direccion| {
            format!(
                "direccion_id={} estudiante_id={}",
                direccion.id, direccion.estudiante_id
            )
        })
    }

    pub fn obtener_estudiante(&self, rut: &str) -> RepoResult<Estudiante> {
        self.repo
            .get_estudiante_by_rut(rut)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Estudiante, rut))
    }

    pub fn obtener_profesor(&self, rut: &str) -> RepoResult<Profesor> {
        self.repo
            .get_profesor_by_rut(rut)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Profesor, rut))
    }

    pub fn obtener_curso(&self, codigo: &str) -> RepoResult<Curso> {
        self.repo
            .get_curso_by_codigo(codigo)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Curso, codigo))
    }

    /// Saves an edited student. The store keeps `creacion_registro` and
    /// refreshes `modificacion_registro`.
    pub fn actualizar_estudiante(&self, estudiante: &Estudiante) -> RepoResult<Estudiante> {
        logged(
            "estudiante_update",
            self.repo.update_estudiante(estudiante),
            |estudiante| format!("estudiante_id={}", estudiante.id),
        )
    }

    /// Saves an edited teacher.
    pub fn actualizar_profesor(&self, profesor: &Profesor) -> RepoResult<Profesor> {
        logged(
            "profesor_update",
            self.repo.update_profesor(profesor),
            |profesor| format!("profesor_id={}", profesor.id),
        )
    }

    /// Deletes a student, its addresses and its course links.
    pub fn eliminar_estudiante(&self, rut: &str) -> RepoResult<()> {
        let result = self.obtener_estudiante(rut).and_then(|estudiante| {
            self.repo
                .delete_estudiante(estudiante.id)
                .map(|()| estudiante.id)
        });
        logged("estudiante_delete", result, |id| format!("estudiante_id={id}")).map(drop)
    }

    /// Deletes a teacher. Courses it taught remain, without a teacher.
    pub fn eliminar_profesor(&self, rut: &str) -> RepoResult<()> {
        let result = self.obtener_profesor(rut).and_then(|profesor| {
            self.repo
                .delete_profesor(profesor.id)
                .map(|()| profesor.id)
        });
        logged("profesor_delete", result, |id| format!("profesor_id={id}")).map(drop)
    }

    /// Deletes a course and its student links.
    pub fn eliminar_curso(&self, codigo: &str) -> RepoResult<()> {
        let result = self
            .obtener_curso(codigo)
            .and_then(|curso| self.repo.delete_curso(curso.id).map(|()| curso.id));
        logged("curso_delete", result, |id| format!("curso_id={id}")).map(drop)
    }
}

/// Emits one `module=service` event for a finished use-case and passes the
/// result through.
pub(crate) fn logged<T>(
    event: &str,
    result: RepoResult<T>,
    describe: impl FnOnce(&T) -> String,
) -> RepoResult<T> {
    match &result {
        Ok(value) => info!("event={event} module=service status=ok {}", describe(value)),
        Err(err) => warn!(
            "event={event} module=service status=error error_code={}",
            err.code()
        ),
    }
    result
}
