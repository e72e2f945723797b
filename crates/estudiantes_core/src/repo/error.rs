//! Error type returned by every repository and service call.

use crate::db::DbError;
use crate::model::validation::ModelValidationError;
use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for school record persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    /// Record rejected before reaching storage.
    Validation(ModelValidationError),
    /// Transport or SQL failure.
    Db(DbError),
    /// No record matches the given key.
    NotFound { entity: EntityKind, key: String },
    /// A write would duplicate a unique natural key.
    ConstraintViolation {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },
    /// A natural-key lookup matched more than one record.
    MultipleMatches {
        entity: EntityKind,
        key: String,
        count: usize,
    },
    /// Persisted state that cannot be mapped back to a record.
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Returns whether this error means the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Stable machine-readable code, used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_error",
            Self::NotFound { .. } => "not_found",
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::MultipleMatches { .. } => "multiple_matches",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::ConstraintViolation {
                entity,
                field,
                value,
            } => write!(f, "{entity} with {field} `{value}` already exists"),
            Self::MultipleMatches { entity, key, count } => {
                write!(f, "expected one {entity} for {key}, found {count}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Collapses a natural-key result set into zero or one record.
pub(crate) fn at_most_one<T>(
    entity: EntityKind,
    key: &str,
    mut rows: Vec<T>,
) -> RepoResult<Option<T>> {
    match rows.len() {
        0 | 1 => Ok(rows.pop()),
        count => Err(RepoError::MultipleMatches {
            entity,
            key: key.to_string(),
            count,
        }),
    }
}
