//! In-memory school store.
//!
//! Mirrors the SQLite schema rules without a database: unique natural keys,
//! cascade delete of addresses and links, set-null of course teachers, and
//! idempotent course membership. Ids are per-table counters starting at 1
//! and are never reused.

use crate::model::curso::{Curso, CursoId, NuevoCurso};
use crate::model::direccion::{Direccion, DireccionId, NuevaDireccion};
use crate::model::estudiante::{Estudiante, EstudianteId, NuevoEstudiante};
use crate::model::profesor::{NuevoProfesor, Profesor, ProfesorId};
use crate::model::EntityKind;
use crate::repo::curso_repo::CursoRepository;
use crate::repo::direccion_repo::DireccionRepository;
use crate::repo::error::{at_most_one, RepoError, RepoResult};
use crate::repo::estudiante_repo::EstudianteRepository;
use crate::repo::profesor_repo::ProfesorRepository;
use crate::repo::{local_clock, Clock};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Default)]
struct MemoryState {
    last_estudiante_id: EstudianteId,
    last_profesor_id: ProfesorId,
    last_curso_id: CursoId,
    last_direccion_id: DireccionId,
    estudiantes: BTreeMap<EstudianteId, Estudiante>,
    profesores: BTreeMap<ProfesorId, Profesor>,
    cursos: BTreeMap<CursoId, Curso>,
    direcciones: BTreeMap<DireccionId, Direccion>,
    /// `(curso_id, estudiante_id)` pairs.
    inscripciones: BTreeSet<(CursoId, EstudianteId)>,
}

/// Store backed by ordered maps. Not thread-safe.
pub struct InMemoryEscuelaRepository {
    state: RefCell<MemoryState>,
    clock: Clock,
}

impl Default for InMemoryEscuelaRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEscuelaRepository {
    pub fn new() -> Self {
        Self::with_clock(local_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: RefCell::new(MemoryState::default()),
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn duplicate(entity: EntityKind, field: &'static str, value: &str) -> RepoError {
    RepoError::ConstraintViolation {
        entity,
        field,
        value: value.to_string(),
    }
}

fn missing_id(entity: EntityKind, id: i64) -> RepoError {
    RepoError::not_found(entity, format!("id={id}"))
}

impl EstudianteRepository for InMemoryEscuelaRepository {
    fn create_estudiante(&self, nuevo: &NuevoEstudiante) -> RepoResult<Estudiante> {
        nuevo.validate()?;
        let today = self.today();
        let mut state = self.state.borrow_mut();

        if state.estudiantes.values().any(|e| e.rut == nuevo.rut) {
            return Err(duplicate(EntityKind::Estudiante, "rut", &nuevo.rut));
        }

        let estudiante = Estudiante {
            id: next_id(&mut state.last_estudiante_id),
            rut: nuevo.rut.clone(),
            nombre: nuevo.nombre.clone(),
            apellido: nuevo.apellido.clone(),
            fecha_nac: nuevo.fecha_nac,
            activo: nuevo.activo,
            creacion_registro: today,
            modificacion_registro: today,
            creado_por: nuevo.creado_por.clone(),
        };
        state.estudiantes.insert(estudiante.id, estudiante.clone());
        Ok(estudiante)
    }

    fn get_estudiante_by_rut(&self, rut: &str) -> RepoResult<Option<Estudiante>> {
        let state = self.state.borrow();
        let rows = state
            .estudiantes
            .values()
            .filter(|e| e.rut == rut)
            .cloned()
            .collect();
        at_most_one(EntityKind::Estudiante, rut, rows)
    }

    fn get_estudiante(&self, id: EstudianteId) -> RepoResult<Option<Estudiante>> {
        Ok(self.state.borrow().estudiantes.get(&id).cloned())
    }

    fn update_estudiante(&self, estudiante: &Estudiante) -> RepoResult<Estudiante> {
        estudiante.validate()?;
        let today = self.today();
        let mut state = self.state.borrow_mut();

        if state
            .estudiantes
            .values()
            .any(|e| e.rut == estudiante.rut && e.id != estudiante.id)
        {
            return Err(duplicate(EntityKind::Estudiante, "rut", &estudiante.rut));
        }

        let stored = state
            .estudiantes
            .get_mut(&estudiante.id)
            .ok_or_else(|| missing_id(EntityKind::Estudiante, estudiante.id))?;
        let creacion_registro = stored.creacion_registro;
        *stored = Estudiante {
            creacion_registro,
            modificacion_registro: today,
            ..estudiante.clone()
        };
        Ok(stored.clone())
    }

    fn delete_estudiante(&self, id: EstudianteId) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        if state.estudiantes.remove(&id).is_none() {
            return Err(missing_id(EntityKind::Estudiante, id));
        }
        state.direcciones.retain(|_, d| d.estudiante_id != id);
        state.inscripciones.retain(|(_, estudiante_id)| *estudiante_id != id);
        Ok(())
    }
}

impl ProfesorRepository for InMemoryEscuelaRepository {
    fn create_profesor(&self, nuevo: &NuevoProfesor) -> RepoResult<Profesor> {
        nuevo.validate()?;
        let today = self.today();
        let mut state = self.state.borrow_mut();

        if state.profesores.values().any(|p| p.rut == nuevo.rut) {
            return Err(duplicate(EntityKind::Profesor, "rut", &nuevo.rut));
        }

        let profesor = Profesor {
            id: next_id(&mut state.last_profesor_id),
            rut: nuevo.rut.clone(),
            nombre: nuevo.nombre.clone(),
            apellido: nuevo.apellido.clone(),
            activo: nuevo.activo,
            creacion_registro: today,
            modificacion_registro: today,
            creado_por: nuevo.creado_por.clone(),
        };
        state.profesores.insert(profesor.id, profesor.clone());
        Ok(profesor)
    }

    fn get_profesor_by_rut(&self, rut: &str) -> RepoResult<Option<Profesor>> {
        let state = self.state.borrow();
        let rows = state
            .profesores
            .values()
            .filter(|p| p.rut == rut)
            .cloned()
            .collect();
        at_most_one(EntityKind::Profesor, rut, rows)
    }

    fn get_profesor(&self, id: ProfesorId) -> RepoResult<Option<Profesor>> {
        Ok(self.state.borrow().profesores.get(&id).cloned())
    }

    fn update_profesor(&self, profesor: &Profesor) -> RepoResult<Profesor> {
        profesor.validate()?;
        let today = self.today();
        let mut state = self.state.borrow_mut();

        if state
            .profesores
            .values()
            .any(|p| p.rut == profesor.rut && p.id != profesor.id)
        {
            return Err(duplicate(EntityKind::Profesor, "rut", &profesor.rut));
        }

        let stored = state
            .profesores
            .get_mut(&profesor.id)
            .ok_or_else(|| missing_id(EntityKind::Profesor, profesor.id))?;
        let creacion_registro = stored.creacion_registro;
        *stored = Profesor {
            creacion_registro,
            modificacion_registro: today,
            ..profesor.clone()
        };
        Ok(stored.clone())
    }

    fn delete_profesor(&self, id: ProfesorId) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        if state.profesores.remove(&id).is_none() {
            return Err(missing_id(EntityKind::Profesor, id));
        }
        for curso in state.cursos.values_mut() {
            if curso.profesor_id == Some(id) {
                curso.profesor_id = None;
            }
        }
        Ok(())
    }
}

impl CursoRepository for InMemoryEscuelaRepository {
    fn create_curso(&self, nuevo: &NuevoCurso) -> RepoResult<Curso> {
        nuevo.validate()?;
        let mut state = self.state.borrow_mut();

        if state.cursos.values().any(|c| c.codigo == nuevo.codigo) {
            return Err(duplicate(EntityKind::Curso, "codigo", &nuevo.codigo));
        }
        if let Some(profesor_id) = nuevo.profesor_id {
            if !state.profesores.contains_key(&profesor_id) {
                return Err(RepoError::InvalidData(format!(
                    "curso.profesor_id references missing profesor id={profesor_id}"
                )));
            }
        }

        let curso = Curso {
            id: next_id(&mut state.last_curso_id),
            codigo: nuevo.codigo.clone(),
            nombre: nuevo.nombre.clone(),
            version: nuevo.version,
            profesor_id: nuevo.profesor_id,
        };
        state.cursos.insert(curso.id, curso.clone());
        Ok(curso)
    }

    fn get_curso_by_codigo(&self, codigo: &str) -> RepoResult<Option<Curso>> {
        let state = self.state.borrow();
        let rows = state
            .cursos
            .values()
            .filter(|c| c.codigo == codigo)
            .cloned()
            .collect();
        at_most_one(EntityKind::Curso, codigo, rows)
    }

    fn get_curso(&self, id: CursoId) -> RepoResult<Option<Curso>> {
        Ok(self.state.borrow().cursos.get(&id).cloned())
    }

    fn update_curso(&self, curso: &Curso) -> RepoResult<Curso> {
        curso.validate()?;
        let mut state = self.state.borrow_mut();

        if state
            .cursos
            .values()
            .any(|c| c.codigo == curso.codigo && c.id != curso.id)
        {
            return Err(duplicate(EntityKind::Curso, "codigo", &curso.codigo));
        }

        let stored = state
            .cursos
            .get_mut(&curso.id)
            .ok_or_else(|| missing_id(EntityKind::Curso, curso.id))?;
        *stored = curso.clone();
        Ok(curso.clone())
    }

    fn delete_curso(&self, id: CursoId) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        if state.cursos.remove(&id).is_none() {
            return Err(missing_id(EntityKind::Curso, id));
        }
        state.inscripciones.retain(|(curso_id, _)| *curso_id != id);
        Ok(())
    }

    fn add_estudiante_to_curso(
        &self,
        curso_id: CursoId,
        estudiante_id: EstudianteId,
    ) -> RepoResult<bool> {
        let mut state = self.state.borrow_mut();
        if !state.cursos.contains_key(&curso_id) {
            return Err(missing_id(EntityKind::Curso, curso_id));
        }
        if !state.estudiantes.contains_key(&estudiante_id) {
            return Err(missing_id(EntityKind::Estudiante, estudiante_id));
        }
        Ok(state.inscripciones.insert((curso_id, estudiante_id)))
    }

    fn list_cursos_for_estudiante(&self, estudiante_id: EstudianteId) -> RepoResult<Vec<Curso>> {
        let state = self.state.borrow();
        Ok(state
            .inscripciones
            .iter()
            .filter(|(_, linked)| *linked == estudiante_id)
            .filter_map(|(curso_id, _)| state.cursos.get(curso_id).cloned())
            .collect())
    }

    fn list_estudiantes_for_curso(&self, curso_id: CursoId) -> RepoResult<Vec<Estudiante>> {
        let state = self.state.borrow();
        Ok(state
            .inscripciones
            .range((curso_id, EstudianteId::MIN)..=(curso_id, EstudianteId::MAX))
            .filter_map(|(_, estudiante_id)| state.estudiantes.get(estudiante_id).cloned())
            .collect())
    }
}

impl DireccionRepository for InMemoryEscuelaRepository {
    fn create_direccion(&self, nueva: &NuevaDireccion) -> RepoResult<Direccion> {
        nueva.validate()?;
        let mut state = self.state.borrow_mut();

        if !state.estudiantes.contains_key(&nueva.estudiante_id) {
            return Err(RepoError::InvalidData(format!(
                "direccion.estudiante_id references missing estudiante id={}",
                nueva.estudiante_id
            )));
        }

        let direccion = Direccion {
            id: next_id(&mut state.last_direccion_id),
            calle: nueva.calle.clone(),
            numero: nueva.numero.clone(),
            dpto: nueva.dpto.clone(),
            comuna: nueva.comuna.clone(),
            ciudad: nueva.ciudad.clone(),
            region: nueva.region.clone(),
            estudiante_id: nueva.estudiante_id,
        };
        state.direcciones.insert(direccion.id, direccion.clone());
        Ok(direccion)
    }

    fn list_direcciones_for_estudiante(
        &self,
        estudiante_id: EstudianteId,
    ) -> RepoResult<Vec<Direccion>> {
        Ok(self
            .state
            .borrow()
            .direcciones
            .values()
            .filter(|d| d.estudiante_id == estudiante_id)
            .cloned()
            .collect())
    }

    fn delete_direccion(&self, id: DireccionId) -> RepoResult<()> {
        if self.state.borrow_mut().direcciones.remove(&id).is_none() {
            return Err(missing_id(EntityKind::Direccion, id));
        }
        Ok(())
    }
}
