pub mod detail;
pub mod selection;
