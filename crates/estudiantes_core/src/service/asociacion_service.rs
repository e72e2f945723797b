//! Association use-cases: teacher of a course, students of a course, and the
//! relation reads built on them.

use crate::model::curso::Curso;
use crate::model::direccion::Direccion;
use crate::model::estudiante::Estudiante;
use crate::repo::{EscuelaRepository, RepoResult};
use crate::service::escuela_service::{logged, EscuelaService};

impl<R: EscuelaRepository> EscuelaService<R> {
    /// Makes `profesor_rut` the teacher of `codigo_curso`.
    ///
    /// Any previous teacher is replaced; no history is kept.
    pub fn agregar_profesor_a_curso(
        &self,
        profesor_rut: &str,
        codigo_curso: &str,
    ) -> RepoResult<Curso> {
        let result = self.obtener_profesor(profesor_rut).and_then(|profesor| {
            let mut curso = self.obtener_curso(codigo_curso)?;
            curso.profesor_id = Some(profesor.id);
            self.repo.update_curso(&curso)
        });
        logged("curso_assign_profesor", result, |curso| {
            format!(
                "curso_id={} profesor_id={}",
                curso.id,
                curso.profesor_id.unwrap_or_default()
            )
        })
    }

    /// Enrolls the student in the course and returns the student.
    ///
    /// Enrolling twice leaves a single link.
    pub fn agregar_cursos_a_estudiante(
        &self,
        estudiante_rut: &str,
        codigo_curso: &str,
    ) -> RepoResult<Estudiante> {
        let result = self.obtener_estudiante(estudiante_rut).and_then(|estudiante| {
            let curso = self.obtener_curso(codigo_curso)?;
            let linked = self.repo.add_estudiante_to_curso(curso.id, estudiante.id)?;
            Ok((estudiante, curso.id, linked))
        });
        logged("curso_enroll_estudiante", result, |(estudiante, curso_id, linked)| {
            format!(
                "curso_id={curso_id} estudiante_id={} new_link={linked}",
                estudiante.id
            )
        })
        .map(|(estudiante, _, _)| estudiante)
    }

    /// Courses the student is enrolled in, ordered by course id.
    pub fn cursos_de_estudiante(&self, rut: &str) -> RepoResult<Vec<Curso>> {
        let estudiante = self.obtener_estudiante(rut)?;
        self.repo.list_cursos_for_estudiante(estudiante.id)
    }

    /// Students enrolled in the course, ordered by student id.
    pub fn estudiantes_de_curso(&self, codigo: &str) -> RepoResult<Vec<Estudiante>> {
        let curso = self.obtener_curso(codigo)?;
        self.repo.list_estudiantes_for_curso(curso.id)
    }

    /// Addresses owned by the student, oldest first.
    pub fn direcciones_de_estudiante(&self, rut: &str) -> RepoResult<Vec<Direccion>> {
        let estudiante = self.obtener_estudiante(rut)?;
        self.repo.list_direcciones_for_estudiante(estudiante.id)
    }
}
