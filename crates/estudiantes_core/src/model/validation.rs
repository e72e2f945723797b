//! Field-level validation shared by every record type.
//!
//! Lengths are counted in characters, not bytes, so accented names are
//! measured the way users type them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const RUT_MAX_CHARS: usize = 9;
pub const CODIGO_MAX_CHARS: usize = 9;
pub const NOMBRE_MAX_CHARS: usize = 50;
pub const CREADO_POR_MAX_CHARS: usize = 50;
pub const NUMERO_MAX_CHARS: usize = 10;
pub const DPTO_MAX_CHARS: usize = 10;
pub const LUGAR_MAX_CHARS: usize = 50;

/// Validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Required text is empty or whitespace only.
    Blank { field: &'static str },
    /// Text exceeds the column limit.
    TooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "field `{field}` cannot be blank"),
            Self::TooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "field `{field}` allows at most {max_chars} characters, got {actual_chars}"
            ),
        }
    }
}

impl Error for ModelValidationError {}

/// Checks a required text field.
pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::Blank { field });
    }
    check_length(field, value, max_chars)
}

/// Checks an optional text field. `None` and empty strings are accepted.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), ModelValidationError> {
    match value {
        Some(value) => check_length(field, value, max_chars),
        None => Ok(()),
    }
}

/// Checks the fields shared by students and teachers.
pub(crate) fn validate_persona(
    rut: &str,
    nombre: &str,
    apellido: &str,
    creado_por: Option<&str>,
) -> Result<(), ModelValidationError> {
    require_text("rut", rut, RUT_MAX_CHARS)?;
    require_text("nombre", nombre, NOMBRE_MAX_CHARS)?;
    require_text("apellido", apellido, NOMBRE_MAX_CHARS)?;
    optional_text("creado_por", creado_por, CREADO_POR_MAX_CHARS)
}

fn check_length(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ModelValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ModelValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{optional_text, require_text, validate_persona, ModelValidationError};

    #[test]
    fn require_text_rejects_whitespace_only() {
        let err = require_text("nombre", "   ", 50).unwrap_err();
        assert_eq!(err, ModelValidationError::Blank { field: "nombre" });
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 9 characters, 10 bytes.
        assert!(require_text("rut", "ñ2345678K", 9).is_ok());
        let err = require_text("rut", "1234567890", 9).unwrap_err();
        assert_eq!(
            err,
            ModelValidationError::TooLong {
                field: "rut",
                max_chars: 9,
                actual_chars: 10,
            }
        );
    }

    #[test]
    fn optional_text_accepts_none_and_empty() {
        assert!(optional_text("dpto", None, 10).is_ok());
        assert!(optional_text("dpto", Some(""), 10).is_ok());
        assert!(optional_text("dpto", Some("12345678901"), 10).is_err());
    }

    #[test]
    fn validate_persona_reports_first_failing_field() {
        let err = validate_persona("1-9", "", "", None).unwrap_err();
        assert_eq!(err, ModelValidationError::Blank { field: "nombre" });
    }
}
