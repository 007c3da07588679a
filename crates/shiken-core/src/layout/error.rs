use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no slot with id {0}")]
    SlotNotFound(Uuid),

    #[error("no slot at position {0}")]
    SlotNumberNotFound(i32),

    #[error("page {0} is outside the quiz")]
    InvalidPage(i32),
}
