mod common;

use common::{curso, estudiante, profesor};
use estudiantes_core::db::open_db_in_memory;
use estudiantes_core::{
    render_estudiante_cursos, EscuelaService, EstudianteCursos, SqliteEscuelaRepository,
};

#[test]
fn report_lists_linked_course_once() {
    let conn = open_db_in_memory().unwrap();
    let service = EscuelaService::new(SqliteEscuelaRepository::new(&conn));

    service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    service
        .crear_curso(&curso("MAT101", "Matematicas I", "1-9"))
        .unwrap();
    service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas"))
        .unwrap();
    service.agregar_cursos_a_estudiante("2-8", "MAT101").unwrap();
    service.agregar_cursos_a_estudiante("2-8", "MAT101").unwrap();

    let report = service.imprimir_estudiante_cursos("2-8").unwrap();
    assert_eq!(
        report,
        EstudianteCursos::Encontrado {
            rut: "2-8".to_string(),
            nombre: "Ana".to_string(),
            apellido: "Rojas".to_string(),
            cursos: vec!["Matematicas I".to_string()],
        }
    );

    let rendered = render_estudiante_cursos(&report);
    assert_eq!(rendered, "Cursos de Ana Rojas:\n- Matematicas I\n");
    assert_eq!(rendered.matches("Matematicas I").count(), 1);
}

#[test]
fn report_orders_courses_by_creation() {
    let conn = open_db_in_memory().unwrap();
    let service = EscuelaService::new(SqliteEscuelaRepository::new(&conn));

    service
        .crear_profesor(&profesor("1-9", "Marta", "Diaz"))
        .unwrap();
    service
        .crear_curso(&curso("MAT101", "Matematicas I", "1-9"))
        .unwrap();
    service
        .crear_curso(&curso("HIS101", "Historia", "1-9"))
        .unwrap();
    service
        .crear_estudiante(&estudiante("2-8", "Ana", "Rojas"))
        .unwrap();
    service.agregar_cursos_a_estudiante("2-8", "HIS101").unwrap();
    service.agregar_cursos_a_estudiante("2-8", "MAT101").unwrap();

    let rendered = render_estudiante_cursos(&service.imprimir_estudiante_cursos("2-8").unwrap());
    assert_eq!(
        rendered,
        "Cursos de Ana Rojas:\n- Matematicas I\n- Historia\n"
    );
}

#[test]
fn report_for_unknown_student_is_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    let service = EscuelaService::new(SqliteEscuelaRepository::new(&conn));

    let report = service.imprimir_estudiante_cursos("0-0").unwrap();
    assert_eq!(
        report,
        EstudianteCursos::NoEncontrado {
            rut: "0-0".to_string()
        }
    );
    assert_eq!(render_estudiante_cursos(&report), "Estudiante no encontrado.\n");
}

#[test]
fn report_serializes_with_status_tag() {
    let report = EstudianteCursos::NoEncontrado {
        rut: "0-0".to_string(),
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "no_encontrado");
    assert_eq!(json["rut"], "0-0");
}
