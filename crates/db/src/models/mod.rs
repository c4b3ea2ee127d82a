pub mod game;
pub mod scoring_event;

use sea_orm::{DbErr, SqlErr};

/// Store-level integrity failures that the gateway surfaces as domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique,
    ForeignKey,
}

pub(crate) fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(_) => Some(ConstraintViolation::Unique),
        SqlErr::ForeignKeyConstraintViolation(_) => Some(ConstraintViolation::ForeignKey),
        _ => None,
    }
}
