//! PostgreSQL repository implementations of the store traits.

pub mod permission;
pub mod product;
pub mod role;
pub mod user;

pub use permission::PermissionRepository;
pub use product::ProductRepository;
pub use role::RoleRepository;
pub use user::UserRepository;

use storefront_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning a violation of `constraint` into a conflict.
pub(crate) fn map_write_error(
    err: sqlx::Error,
    constraint: &str,
    conflict_message: impl FnOnce() -> String,
    context: &str,
) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(constraint) => {
            AppError::conflict(conflict_message())
        }
        other => AppError::with_source(ErrorKind::Database, context.to_string(), other),
    }
}

/// Map a sqlx error on a read path.
pub(crate) fn map_read_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
