//! Core use-case services.
//!
//! # Responsibility
//! - Turn natural-key requests into repository calls.
//! - Keep callers decoupled from storage details; the store is injected.

pub mod asociacion_service;
pub mod escuela_service;
pub mod reporte_service;
