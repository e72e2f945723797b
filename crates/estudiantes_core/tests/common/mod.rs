#![allow(dead_code)]

use chrono::NaiveDate;
use estudiantes_core::{CrearCursoRequest, CrearDireccionRequest, NuevoEstudiante, NuevoProfesor};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn estudiante(rut: &str, nombre: &str, apellido: &str) -> NuevoEstudiante {
    NuevoEstudiante::new(rut, nombre, apellido, date(2006, 5, 21))
}

pub fn profesor(rut: &str, nombre: &str, apellido: &str) -> NuevoProfesor {
    NuevoProfesor::new(rut, nombre, apellido).activo(true)
}

pub fn curso(codigo: &str, nombre: &str, profesor_rut: &str) -> CrearCursoRequest {
    CrearCursoRequest {
        codigo: codigo.to_string(),
        nombre: nombre.to_string(),
        version: Some(1),
        profesor_rut: profesor_rut.to_string(),
    }
}

pub fn direccion(estudiante_rut: &str, calle: &str) -> CrearDireccionRequest {
    CrearDireccionRequest {
        calle: calle.to_string(),
        numero: "1234".to_string(),
        dpto: Some("51B".to_string()),
        comuna: "Providencia".to_string(),
        ciudad: "Santiago".to_string(),
        region: "Metropolitana".to_string(),
        estudiante_rut: estudiante_rut.to_string(),
    }
}
