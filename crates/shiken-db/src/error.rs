use sea_orm::DbErr;
use shiken_core::layout::error::LayoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl StructureError {
    /// Whether the error means "the referenced quiz or slot does not
    /// exist" rather than a storage failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Database(DbErr::RecordNotFound(_)) => true,
            Self::Database(_) => false,
            Self::Layout(LayoutError::SlotNotFound(_) | LayoutError::SlotNumberNotFound(_)) => true,
            Self::Layout(LayoutError::InvalidPage(_)) => false,
        }
    }
}
