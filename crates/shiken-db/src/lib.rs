pub mod error;
pub mod migration;
pub mod quiz;
pub mod slot;
pub mod util;

pub use sea_orm;
