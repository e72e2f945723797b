//! Teacher record. Same shape as a student without a birth date.

use crate::model::validation::{validate_persona, ModelValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned teacher id.
pub type ProfesorId = i64;

/// Persisted teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profesor {
    pub id: ProfesorId,
    pub rut: String,
    pub nombre: String,
    pub apellido: String,
    pub activo: bool,
    pub creacion_registro: NaiveDate,
    pub modificacion_registro: NaiveDate,
    pub creado_por: Option<String>,
}

impl Profesor {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_persona(
            &self.rut,
            &self.nombre,
            &self.apellido,
            self.creado_por.as_deref(),
        )
    }
}

/// Insert payload for a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoProfesor {
    pub rut: String,
    pub nombre: String,
    pub apellido: String,
    pub activo: bool,
    pub creado_por: Option<String>,
}

impl NuevoProfesor {
    /// Builds a payload with `activo = false` and no creator label.
    pub fn new(
        rut: impl Into<String>,
        nombre: impl Into<String>,
        apellido: impl Into<String>,
    ) -> Self {
        Self {
            rut: rut.into(),
            nombre: nombre.into(),
            apellido: apellido.into(),
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
