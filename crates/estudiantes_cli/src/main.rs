//! CLI entry point.
//!
//! # Responsibility
//! - Without arguments, print a probe of the linked core crate.
//! - With `<db-path> <rut>`, print the course listing for one student.
//!
//! File logging is enabled when `ESTUDIANTES_LOG_DIR` holds an absolute
//! path; `ESTUDIANTES_LOG_LEVEL` overrides the build-mode default.

use estudiantes_core::db::open_db;
use estudiantes_core::{
    default_log_level, init_logging, render_estudiante_cursos, EscuelaService,
    SqliteEscuelaRepository,
};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "ESTUDIANTES_LOG_DIR";
const LOG_LEVEL_ENV: &str = "ESTUDIANTES_LOG_LEVEL";
const USAGE: &str = "usage: estudiantes_cli [<db-path> <rut>]";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level =
            std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("estudiantes_core ping={}", estudiantes_core::ping());
            println!("estudiantes_core version={}", estudiantes_core::core_version());
            ExitCode::SUCCESS
        }
        [db_path, rut] => match print_estudiante_cursos(db_path, rut) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("event=cli_report module=cli status=error error={err}");
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn print_estudiante_cursos(db_path: &str, rut: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let service = EscuelaService::new(SqliteEscuelaRepository::new(&conn));
    let report = service.imprimir_estudiante_cursos(rut)?;
    print!("{}", render_estudiante_cursos(&report));
    Ok(())
}
