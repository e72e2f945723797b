//! Text rendering for the student course listing.

use crate::service::reporte_service::EstudianteCursos;
use std::fmt::{Display, Formatter};

/// Message shown when the listing is requested for an unknown `rut`.
pub const ESTUDIANTE_NO_ENCONTRADO: &str = "Estudiante no encontrado.";

impl Display for EstudianteCursos {
    /// Header line with the student's full name, then one `- name` line per
    /// course.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encontrado {
                nombre,
                apellido,
                cursos,
                ..
            } => {
                writeln!(f, "Cursos de {nombre} {apellido}:")?;
                for curso in cursos {
                    writeln!(f, "- {curso}")?;
                }
                Ok(())
            }
            Self::NoEncontrado { .. } => writeln!(f, "{ESTUDIANTE_NO_ENCONTRADO}"),
        }
    }
}

/// Renders the listing as newline-terminated lines.
pub fn render_estudiante_cursos(report: &EstudianteCursos) -> String {
    report.to_string()
}
