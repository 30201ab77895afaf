pub mod index;
pub mod save;
