//! Conversions from external infrastructure errors into domain errors.

use flashback_domain::FlashbackError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FlashbackError);

impl From<InfraError> for FlashbackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FlashbackError> for InfraError {
    fn from(value: FlashbackError) -> Self {
        InfraError(value)
    }
}

trait IntoFlashbackError {
    fn into_flashback(self) -> FlashbackError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → FlashbackError */
/* -------------------------------------------------------------------------- */

impl IntoFlashbackError for SqlError {
    fn into_flashback(self) -> FlashbackError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => {
                        FlashbackError::QueryFailure("database is busy".into())
                    }
                    ErrorCode::DatabaseLocked => {
                        FlashbackError::QueryFailure("database is locked".into())
                    }
                    ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt => {
                        FlashbackError::QueryFailure(format!("database file is unusable: {message}"))
                    }
                    _ => FlashbackError::QueryFailure(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => FlashbackError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                FlashbackError::DecodeFailure(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                FlashbackError::DecodeFailure(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                FlashbackError::DecodeFailure("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => FlashbackError::Config(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => FlashbackError::QueryFailure(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_flashback())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → FlashbackError */
/* -------------------------------------------------------------------------- */

impl IntoFlashbackError for r2d2::Error {
    fn into_flashback(self) -> FlashbackError {
        FlashbackError::QueryFailure(format!("connection pool: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_flashback())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → FlashbackError */
/* -------------------------------------------------------------------------- */

impl IntoFlashbackError for JoinError {
    fn into_flashback(self) -> FlashbackError {
        if self.is_cancelled() {
            FlashbackError::Cancelled
        } else {
            FlashbackError::Internal(format!("blocking task failed: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_flashback())
    }
}

/// Map a rusqlite error straight into the domain error.
pub fn map_sql_error(err: SqlError) -> FlashbackError {
    FlashbackError::from(InfraError::from(err))
}

/// Map a pool checkout error straight into the domain error.
pub fn map_pool_error(err: r2d2::Error) -> FlashbackError {
    FlashbackError::from(InfraError::from(err))
}

/// Map a failed `spawn_blocking` join straight into the domain error.
pub fn map_join_error(err: JoinError) -> FlashbackError {
    FlashbackError::from(InfraError::from(err))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
