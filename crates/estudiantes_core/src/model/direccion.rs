//! Postal address owned by a student. Deleted together with its owner.

use crate::model::estudiante::EstudianteId;
use crate::model::validation::{
    optional_text, require_text, ModelValidationError, DPTO_MAX_CHARS, LUGAR_MAX_CHARS,
    NUMERO_MAX_CHARS,
};
use serde::{Deserialize, Serialize};

/// Store-assigned address id.
pub type DireccionId = i64;

/// Persisted address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direccion {
    pub id: DireccionId,
    pub calle: String,
    pub numero: String,
    /// Apartment or unit, when there is one.
    pub dpto: Option<String>,
    pub comuna: String,
    pub ciudad: String,
    pub region: String,
    pub estudiante_id: EstudianteId,
}

/// Insert payload for an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevaDireccion {
    pub calle: String,
    pub numero: String,
    pub dpto: Option<String>,
    pub comuna: String,
    pub ciudad: String,
    pub region: String,
    pub estudiante_id: EstudianteId,
}

impl NuevaDireccion {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("calle", &self.calle, LUGAR_MAX_CHARS)?;
        require_text("numero", &self.numero, NUMERO_MAX_CHARS)?;
        optional_text("dpto", self.dpto.as_deref(), DPTO_MAX_CHARS)?;
        require_text("comuna", &self.comuna, LUGAR_MAX_CHARS)?;
        require_text("ciudad", &self.ciudad, LUGAR_MAX_CHARS)?;
        require_text("region", &self.region, LUGAR_MAX_CHARS)
    }
}
