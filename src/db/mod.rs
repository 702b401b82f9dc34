pub mod chores;
pub mod completions;
pub mod initialize;
pub mod kv;
pub mod log;
pub mod members;
pub mod migrate;
pub mod plants;
pub mod pool;
pub mod stats;
pub mod tasks;

use crate::errors::AppError;

/// Wrap a domain parsing error into the rusqlite row-mapping error type.
pub(crate) fn conversion_error(column: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}
