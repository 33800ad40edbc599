//! Error surface of the store.
//!
//! Every operation returns one of five distinct kinds so the HTTP layer can
//! map them to responses (Validation/NotFound/Conflict are 4xx-equivalent,
//! Unavailable/Store are 5xx-equivalent). Store failures are never swallowed
//! into an empty-but-successful result.

use sqlx::error::ErrorKind;

/// SQLSTATE Postgres reports when `statement_timeout` cancels a query.
const QUERY_CANCELED: &str = "57014";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A required field was missing or malformed; caught before any query.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A row this operation depends on does not exist (e.g. a score for a
    /// nonexistent user). Absent rows on plain lookups are `Ok(None)`, not
    /// this.
    #[error("referenced row not found: {0}")]
    NotFound(String),

    /// Uniqueness violation, e.g. a duplicate Discord id on user creation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store could not be reached in time: pool exhaustion, I/O, TLS.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Any other store-reported failure, passed through for logging.
    #[error("store error: {0}")]
    Store(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation => DbError::Conflict(db.message().to_owned()),
                ErrorKind::ForeignKeyViolation => DbError::NotFound(db.message().to_owned()),
                // A tripped statement_timeout means the store did not answer
                // in time, same bucket as pool/I-O failures.
                _ if db.code().as_deref() == Some(QUERY_CANCELED) => {
                    DbError::Unavailable(sqlx::Error::Database(db))
                }
                _ => DbError::Store(sqlx::Error::Database(db)),
            },
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => DbError::Unavailable(err),
            other => DbError::Store(other),
        }
    }
}

/// Reject empty or whitespace-only required text fields before touching the
/// store.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), DbError> {
    if value.trim().is_empty() {
        Err(DbError::Validation(format!("{field} must be non-empty")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::DatabaseError;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    /// Stand-in for the Postgres error a tripped statement_timeout produces:
    /// SQLSTATE 57014 with no constraint-violation kind.
    #[derive(Debug)]
    struct CanceledStatement;

    impl fmt::Display for CanceledStatement {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("canceling statement due to statement timeout")
        }
    }

    impl StdError for CanceledStatement {}

    impl DatabaseError for CanceledStatement {
        fn message(&self) -> &str {
            "canceling statement due to statement timeout"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(QUERY_CANCELED))
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn statement_timeout_maps_to_unavailable() {
        let err = DbError::from(sqlx::Error::Database(Box::new(CanceledStatement)));
        assert!(matches!(err, DbError::Unavailable(_)));
    }

    #[test]
    fn pool_timeout_maps_to_unavailable() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Unavailable(_)));
    }

    #[test]
    fn row_not_found_stays_a_store_error() {
        // fetch_one on an id we just inserted failing is a bug, not a 404
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Store(_)));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(matches!(
            require_text("username", "   "),
            Err(DbError::Validation(_))
        ));
        assert!(require_text("username", "karen").is_ok());
    }
}
