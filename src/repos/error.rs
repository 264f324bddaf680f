/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - NotFoundOrForbidden: an ownership-scoped predicate cannot tell the two apart
 */
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[source] sqlx::Error),
    #[error("conflict")]
    Conflict,
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("{op}: no row matched id and owner")]
    NotFoundOrForbidden { op: &'static str },
    #[error("{op}: expected exactly one affected row, got {affected}")]
    Inconsistent { op: &'static str, affected: u64 },
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            match dbe.kind() {
                ErrorKind::UniqueViolation => return RepoError::Conflict,
                ErrorKind::CheckViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation => {
                    return RepoError::ConstraintViolation(dbe.message().to_string());
                }
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}

/// Inserts must add exactly one row.
pub(crate) fn expect_inserted(affected: u64, op: &'static str) -> RepoResult<()> {
    if affected == 1 {
        Ok(())
    } else {
        Err(RepoError::Inconsistent { op, affected })
    }
}

/// Ownership-scoped updates/deletes must match exactly one row.
/// Zero means "no such row" or "someone else's row"; both are reported the same way.
pub(crate) fn expect_owned_row(affected: u64, op: &'static str) -> RepoResult<()> {
    match affected {
        1 => Ok(()),
        0 => Err(RepoError::NotFoundOrForbidden { op }),
        n => Err(RepoError::Inconsistent { op, affected: n }),
    }
}
