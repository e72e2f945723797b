//! Core domain logic for the school registry.
//! This crate is the single source of truth for the record model and its
//! business rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::curso::{Curso, CursoId, NuevoCurso};
pub use model::direccion::{Direccion, DireccionId, NuevaDireccion};
pub use model::estudiante::{Estudiante, EstudianteId, NuevoEstudiante};
pub use model::profesor::{NuevoProfesor, Profesor, ProfesorId};
pub use model::validation::ModelValidationError;
pub use model::EntityKind;
pub use repo::{
    Clock, CursoRepository, DireccionRepository, EscuelaRepository, EstudianteRepository,
    InMemoryEscuelaRepository, ProfesorRepository, RepoError, RepoResult,
    SqliteEscuelaRepository,
};
pub use report::render_estudiante_cursos;
pub use service::escuela_service::{CrearCursoRequest, CrearDireccionRequest, EscuelaService};
pub use service::reporte_service::EstudianteCursos;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
