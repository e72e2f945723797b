//! Address repository contract and its SQLite implementation.
//!
//! Addresses have no natural key; they are reached through their owner.

use crate::model::direccion::{Direccion, DireccionId, NuevaDireccion};
use crate::model::estudiante::EstudianteId;
use crate::model::EntityKind;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sqlite_repo::{parse_direccion_row, SqliteEscuelaRepository, DIRECCION_SELECT_SQL};
use rusqlite::params;

/// Persistence contract for student addresses.
pub trait DireccionRepository {
    fn create_direccion(&self, nueva: &NuevaDireccion) -> RepoResult<Direccion>;
    fn list_direcciones_for_estudiante(
        &self,
        estudiante_id: EstudianteId,
    ) -> RepoResult<Vec<Direccion>>;
    fn delete_direccion(&self, id: DireccionId) -> RepoResult<()>;
}

impl DireccionRepository for SqliteEscuelaRepository<'_> {
    fn create_direccion(&self, nueva: &NuevaDireccion) -> RepoResult<Direccion> {
        nueva.validate()?;

        self.conn.execute(
            "INSERT INTO direcciones (
                calle,
                numero,
                dpto,
                comuna,
                ciudad,
                region,
                estudiante_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                nueva.calle.as_str(),
                nueva.numero.as_str(),
                nueva.dpto.as_deref(),
                nueva.comuna.as_str(),
                nueva.ciudad.as_str(),
                nueva.region.as_str(),
                nueva.estudiante_id,
            ],
        )?;

        Ok(Direccion {
            id: self.conn.last_insert_rowid(),
            calle: nueva.calle.clone(),
            numero: nueva.numero.clone(),
            dpto: nueva.dpto.clone(),
            comuna: nueva.comuna.clone(),
            ciudad: nueva.ciudad.clone(),
            region: nueva.region.clone(),
            estudiante_id: nueva.estudiante_id,
        })
    }

    fn list_direcciones_for_estudiante(
        &self,
        estudiante_id: EstudianteId,
    ) -> RepoResult<Vec<Direccion>> {
        self.query_records(
            &format!("{DIRECCION_SELECT_SQL} WHERE estudiante_id = ?1 ORDER BY id ASC;"),
            [estudiante_id],
            parse_direccion_row,
        )
    }

    fn delete_direccion(&self, id: DireccionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM direcciones WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Direccion, format!("id={id}")));
        }

        Ok(())
    }
}
