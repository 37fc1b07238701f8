pub mod goals;
pub mod sleep;
