//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one persistence contract per entity set.
//! - Isolate SQLite query details from service orchestration.
//! - Provide an in-memory store with the same contract for isolated tests.
//!
//! # Invariants
//! - Write paths validate records before touching storage.
//! - Natural-key reads return `Ok(None)` for zero matches and
//!   `RepoError::MultipleMatches` for more than one.
//! - Creation and modification dates are assigned by the store, never by
//!   callers.

use chrono::NaiveDate;

pub mod curso_repo;
pub mod direccion_repo;
pub mod error;
pub mod estudiante_repo;
pub mod memory_repo;
pub mod profesor_repo;
pub mod sqlite_repo;

pub use curso_repo::CursoRepository;
pub use direccion_repo::DireccionRepository;
pub use error::{RepoError, RepoResult};
pub use estudiante_repo::EstudianteRepository;
pub use memory_repo::InMemoryEscuelaRepository;
pub use profesor_repo::ProfesorRepository;
pub use sqlite_repo::SqliteEscuelaRepository;

/// Every contract the school services need from one store handle.
pub trait EscuelaRepository:
    EstudianteRepository + ProfesorRepository + CursoRepository + DireccionRepository
{
}

impl<T> EscuelaRepository for T where
    T: EstudianteRepository + ProfesorRepository + CursoRepository + DireccionRepository
{
}

/// Source of "today" for record timestamps.
pub type Clock = Box<dyn Fn() -> NaiveDate>;

pub(crate) fn local_clock() -> Clock {
    Box::new(|| chrono::Local::now().date_naive())
}
