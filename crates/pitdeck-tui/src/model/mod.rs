pub mod edit;
pub mod status;
