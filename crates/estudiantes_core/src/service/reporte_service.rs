//! Student course listing.
//!
//! The use-case returns data; `crate::report` turns it into text.

use crate::repo::{EscuelaRepository, RepoResult};
use crate::service::escuela_service::EscuelaService;
use log::warn;
use serde::Serialize;

/// Outcome of the student course listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstudianteCursos {
    Encontrado {
        rut: String,
        nombre: String,
        apellido: String,
        /// Course names, ordered by course id.
        cursos: Vec<String>,
    },
    NoEncontrado {
        rut: String,
    },
}

impl<R: EscuelaRepository> EscuelaService<R> {
    /// Lists the names of every course the student is enrolled in.
    ///
    /// An unknown `rut` is reported as `EstudianteCursos::NoEncontrado`
    /// instead of an error. Other store failures are returned.
    pub fn imprimir_estudiante_cursos(&self, rut: &str) -> RepoResult<EstudianteCursos> {
        let estudiante = match self.obtener_estudiante(rut) {
            Ok(estudiante) => estudiante,
            Err(err) if err.is_not_found() => {
                warn!("event=estudiante_cursos_report module=service status=not_found");
                return Ok(EstudianteCursos::NoEncontrado {
                    rut: rut.to_string(),
                });
            }
            Err(err) => return Err(err),
        };

        let cursos = self
            .repo
            .list_cursos_for_estudiante(estudiante.id)?
            .into_iter()
            .map(|curso| curso.nombre)
            .collect();

        Ok(EstudianteCursos::Encontrado {
            rut: estudiante.rut,
            nombre: estudiante.nombre,
            apellido: estudiante.apellido,
            cursos,
        })
    }
}
