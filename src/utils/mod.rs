pub mod constants;
pub mod xml;
