//! Use-case behavior checked against both store implementations.

mod common;

use common::{curso, direccion, estudiante, profesor};
use estudiantes_core::db::open_db_in_memory;
use estudiantes_core::{
    EntityKind, EscuelaRepository, EscuelaService, InMemoryEscuelaRepository, RepoError,
    SqliteEscuelaRepository,
};

fn with_sqlite(check: impl FnOnce(&EscuelaService<SqliteEscuelaRepository<'_>>)) {
    let conn = open_db_in_memory().unwrap();
    let service = EscuelaService::new(SqliteEscuelaRepository::new(&conn));
    check(&service);
}

fn with_memory(check: impl FnOnce(&EscuelaService<InMemoryEscuelaRepository>)) {
    let service = EscuelaService::new(InMemoryEscuelaRepository::new());
    check(&service);
}

fn crear_y_obtener_estudiante<R: EscuelaRepository>(service: &EscuelaService<R>) {
    let created = service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas").creado_por("admin"))
        .unwrap();
    let loaded = service.obtener_estudiante("2-8").unwrap();
    assert_eq!(loaded, created);

    let err = service.obtener_estudiante("3-6").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: EntityKind::Estudiante, ref key } if key == "3-6"
    ));
}

fn rut_duplicado<R: EscuelaRepository>(service: &EscuelaService<R>) {
    let first = service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    let err = service
        .crear_profesor(&profesor("1-9", "Pedro", "Mora"))
        .unwrap_err();
    assert_eq!(err.code(), "constraint_violation");
    assert_eq!(service.obtener_profesor("1-9").unwrap(), first);
}

fn crear_curso_sin_profesor<R: EscuelaRepository>(service: &EscuelaService<R>) {
    let err = service
        .crear_curso(&curso("MAT101", "Matematicas", "1-9"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Profesor,
            ..
        }
    ));
    assert!(service.obtener_curso("MAT101").unwrap_err().is_not_found());
}

fn crear_curso_con_profesor<R: EscuelaRepository>(service: &EscuelaService<R>) {
    let marta = service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    let created = service
        .crear_curso(&curso("MAT101", "Matematicas", "1-9"))
        .unwrap();

    assert_eq!(created.profesor_id, Some(marta.id));
    assert_eq!(created.version, Some(1));
    assert_eq!(service.obtener_curso("MAT101").unwrap(), created);

    let err = service
        .crear_curso(&curso("MAT101", "Otra", "1-9"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::ConstraintViolation {
            entity: EntityKind::Curso,
            field: "codigo",
            ..
        }
    ));
}

fn reasignar_profesor<R: EscuelaRepository>(service: &EscuelaService<R>) {
    service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    let pedro = service
        .crear_profesor(&profesor("5-1", "Pedro", "Mora"))
        .unwrap();
    service
        .crear_curso(&curso("MAT101", "Matematicas", "1-9"))
        .unwrap();

    service.agregar_profesor_a_curso("1-9", "MAT101").unwrap();
    let updated = service.agregar_profesor_a_curso("5-1", "MAT101").unwrap();
    assert_eq!(updated.profesor_id, Some(pedro.id));
    assert_eq!(service.obtener_curso("MAT101").unwrap().profesor_id, Some(pedro.id));

    let err = service
        .agregar_profesor_a_curso("9-9", "MAT101")
        .unwrap_err();
    assert!(err.is_not_found());
    let err = service.agregar_profesor_a_curso("1-9", "XXX").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Curso,
            ..
        }
    ));
}

fn inscripcion_idempotente<R: EscuelaRepository>(service: &EscuelaService<R>) {
    service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    service
        .crear_curso(&curso("MAT101", "Matematicas", "1-9"))
        .unwrap();
    let ana = service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas"))
        .unwrap();

    let first = service.agregar_cursos_a_estudiante("2-8", "MAT101").unwrap();
    let second = service.agregar_cursos_a_estudiante("2-8", "MAT101").unwrap();
    assert_eq!(first, ana);
    assert_eq!(second, ana);

    let cursos = service.cursos_de_estudiante("2-8").unwrap();
    assert_eq!(cursos.len(), 1);
    assert_eq!(cursos[0].codigo, "MAT101");
    assert_eq!(service.estudiantes_de_curso("MAT101").unwrap(), vec![ana]);

    assert!(service
        .agregar_cursos_a_estudiante("0-0", "MAT101")
        .unwrap_err()
        .is_not_found());
    assert!(service
        .agregar_cursos_a_estudiante("2-8", "XXX")
        .unwrap_err()
        .is_not_found());
}

fn direcciones<R: EscuelaRepository>(service: &EscuelaService<R>) {
    let err = service
        .crear_direccion(&direccion("2-8", "Av. Siempre Viva"))
        .unwrap_err();
    assert!(err.is_not_found());

    let ana = service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas"))
        .unwrap();
    let casa = service
        .crear_direccion(&direccion("2-8", "Av. Siempre Viva"))
        .unwrap();
    let trabajo = service
        .crear_direccion(&direccion("2-8", "Los Leones"))
        .unwrap();

    assert_eq!(casa.estudiante_id, ana.id);
    assert_eq!(casa.dpto.as_deref(), Some("51B"));
    assert_eq!(
        service.direcciones_de_estudiante("2-8").unwrap(),
        vec![casa, trabajo]
    );
}

fn eliminar_estudiante_en_cascada<R: EscuelaRepository>(service: &EscuelaService<R>) {
    service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    service
        .crear_curso(&curso("MAT101", "Matematicas", "1-9"))
        .unwrap();
    let ana = service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas"))
        .unwrap();
    let luis = service
        .crear_estudiante(&estudiante("3-6", "Luis", "Soto"))
        .unwrap();
    service
        .crear_direccion(&direccion("2-8", "Av. Siempre Viva"))
        .unwrap();
    let de_luis = service
        .crear_direccion(&direccion("3-6", "Los Leones"))
        .unwrap();
    service.agregar_cursos_a_estudiante("2-8", "MAT101").unwrap();
    service.agregar_cursos_a_estudiante("3-6", "MAT101").unwrap();

    service.eliminar_estudiante("2-8").unwrap();

    assert!(service.obtener_estudiante("2-8").unwrap_err().is_not_found());
    assert!(service
        .repo()
        .list_direcciones_for_estudiante(ana.id)
        .unwrap()
        .is_empty());
    assert_eq!(
        service.direcciones_de_estudiante("3-6").unwrap(),
        vec![de_luis]
    );
    assert_eq!(service.estudiantes_de_curso("MAT101").unwrap(), vec![luis]);
    assert!(service.eliminar_estudiante("2-8").unwrap_err().is_not_found());
}

fn eliminar_profesor_anula_referencia<R: EscuelaRepository>(service: &EscuelaService<R>) {
    service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    let created = service
        .crear_curso(&curso("MAT101", "Matematicas", "1-9"))
        .unwrap();

    service.eliminar_profesor("1-9").unwrap();

    let curso = service.obtener_curso("MAT101").unwrap();
    assert_eq!(curso.id, created.id);
    assert_eq!(curso.nombre, "Matematicas");
    assert_eq!(curso.profesor_id, None);
    assert!(service.obtener_profesor("1-9").unwrap_err().is_not_found());
}

fn eliminar_curso_quita_inscripciones<R: EscuelaRepository>(service: &EscuelaService<R>) {
    service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    service
        .crear_curso(&curso("MAT101", "Matematicas", "1-9"))
        .unwrap();
    service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas"))
        .unwrap();
    service.agregar_cursos_a_estudiante("2-8", "MAT101").unwrap();

    service.eliminar_curso("MAT101").unwrap();

    assert!(service.cursos_de_estudiante("2-8").unwrap().is_empty());
    assert!(service.obtener_profesor("1-9").is_ok());
    assert!(service.eliminar_curso("MAT101").unwrap_err().is_not_found());
}

fn actualizar_estudiante<R: EscuelaRepository>(service: &EscuelaService<R>) {
    let mut ana = service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas"))
        .unwrap();
    ana.activo = true;
    ana.nombre = "Ana Maria".to_string();

    let updated = service.actualizar_estudiante(&ana).unwrap();
    assert!(updated.activo);
    assert_eq!(updated.creacion_registro, ana.creacion_registro);
    assert!(updated.modificacion_registro >= ana.modificacion_registro);
    assert_eq!(service.obtener_estudiante("2-8").unwrap().nombre, "Ana Maria");
}

macro_rules! against_both_stores {
    ($($name:ident),* $(,)?) => {
        mod sqlite {
            $(
                #[test]
                fn $name() {
                    super::with_sqlite(|service| super::$name(service));
                }
            )*
        }

        mod memory {
            $(
                #[test]
                fn $name() {
                    super::with_memory(|service| super::$name(service));
                }
            )*
        }
    };
}

against_both_stores!(
    crear_y_obtener_estudiante,
    rut_duplicado,
    crear_curso_sin_profesor,
    crear_curso_con_profesor,
    reasignar_profesor,
    inscripcion_idempotente,
    direcciones,
    eliminar_estudiante_en_cascada,
    eliminar_profesor_anula_referencia,
    eliminar_curso_quita_inscripciones,
    actualizar_estudiante,
);
