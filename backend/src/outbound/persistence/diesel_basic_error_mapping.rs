//! Pool and Diesel error mapping shared by the catalog repositories.
//!
//! Every repository port exposes the same `Connection`/`Query` pair, so the
//! adapters pass their constructors in rather than matching here.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors through the repository's connection constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors onto the repository's query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("check constraint violated")
        }
        _ => query("database error"),
    }
}

/// Serialise a JSON column, mapping failures through `query`.
pub fn encode_json<T, E>(value: &T, column: &str, query: impl FnOnce(String) -> E) -> Result<serde_json::Value, E>
where
    T: serde::Serialize,
{
    serde_json::to_value(value).map_err(|err| query(format!("encode {column}: {err}")))
}

/// Deserialise a JSON column, mapping failures through `query`.
pub fn decode_json<T, E>(value: serde_json::Value, column: &str, query: impl FnOnce(String) -> E) -> Result<T, E>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| query(format!("decode {column}: {err}")))
}
