//! Course record.
//!
//! # Invariants
//! - `codigo` is unique among courses.
//! - `profesor_id` becomes `None` when the referenced teacher is deleted; the
//!   course itself survives.
//! - Student membership lives in the `curso_estudiantes` join table and is
//!   not carried on this struct.

use crate::model::profesor::ProfesorId;
use crate::model::validation::{
    require_text, ModelValidationError, CODIGO_MAX_CHARS, NOMBRE_MAX_CHARS,
};
use serde::{Deserialize, Serialize};

/// Store-assigned course id.
pub type CursoId = i64;

/// Persisted course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curso {
    pub id: CursoId,
    pub codigo: String,
    pub nombre: String,
    pub version: Option<i32>,
    pub profesor_id: Option<ProfesorId>,
}

impl Curso {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_curso(&self.codigo, &self.nombre)
    }
}

/// Insert payload for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoCurso {
    pub codigo: String,
    pub nombre: String,
    pub version: Option<i32>,
    pub profesor_id: Option<ProfesorId>,
}

impl NuevoCurso {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_curso(&self.codigo, &self.nombre)
    }
}

fn validate_curso(codigo: &str, nombre: &str) -> Result<(), ModelValidationError> {
    require_text("codigo", codigo, CODIGO_MAX_CHARS)?;
    require_text("nombre", nombre, NOMBRE_MAX_CHARS)
}
