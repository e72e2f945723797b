//! Student record.
//!
//! # Invariants
//! - `rut` is unique among students.
//! - `creacion_registro` never changes after insert.
//! - `modificacion_registro` is refreshed by the store on every update.

use crate::model::validation::{validate_persona, ModelValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned student id.
pub type EstudianteId = i64;

/// Persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estudiante {
    pub id: EstudianteId,
    /// National id, natural key.
    pub rut: String,
    pub nombre: String,
    pub apellido: String,
    pub fecha_nac: NaiveDate,
    pub activo: bool,
    /// Set once by the store at insert.
    pub creacion_registro: NaiveDate,
    /// Refreshed by the store on every update.
    pub modificacion_registro: NaiveDate,
    /// Free-form label of whoever registered the student.
    pub creado_por: Option<String>,
}

impl Estudiante {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_persona(
            &self.rut,
            &self.nombre,
            &self.apellido,
            self.creado_por.as_deref(),
        )
    }

    /// `nombre apellido`, as shown in reports.
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Insert payload for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoEstudiante {
    pub rut: String,
    pub nombre: String,
    pub apellido: String,
    pub fecha_nac: NaiveDate,
    pub activo: bool,
    pub creado_por: Option<String>,
}

impl NuevoEstudiante {
    /// Builds a payload with `activo = false` and no creator label.
    pub fn new(
        rut: impl Into<String>,
        nombre: impl Into<String>,
        apellido: impl Into<String>,
        fecha_nac: NaiveDate,
    ) -> Self {
        Self {
            rut: rut.into(),
            nombre: nombre.into(),
            apellido: apellido.into(),
            fecha_nac,
            activo: false,
            creado_por: None,
        }
    }

    pub fn activo(mut self, activo: bool) -> Self {
        self.activo = activo;
        self
    }

    pub fn creado_por(mut self, creado_por: impl Into<String>) -> Self {
        self.creado_por = Some(creado_por.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_persona(
            &self.rut,
            &self.nombre,
            &self.apellido,
            self.creado_por.as_deref(),
        )
    }
}
