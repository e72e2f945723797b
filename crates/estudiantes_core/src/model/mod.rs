//! Domain records for the school registry.
//!
//! # Responsibility
//! - Define the persisted shapes of students, teachers, courses and addresses.
//! - Define insert payloads (`Nuevo*`) and their field validation.
//!
//! # Invariants
//! - `rut` identifies a student or teacher within its own entity set.
//! - `codigo` identifies a course.
//! - Internal integer ids are assigned by the store and never reused.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod curso;
pub mod direccion;
pub mod estudiante;
pub mod profesor;
pub mod validation;

/// Entity set a record belongs to. Used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Estudiante,
    Profesor,
    Curso,
    Direccion,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Estudiante => "estudiante",
            Self::Profesor => "profesor",
            Self::Curso => "curso",
            Self::Direccion => "direccion",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
