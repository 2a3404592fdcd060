pub mod groups;
pub mod unites;
