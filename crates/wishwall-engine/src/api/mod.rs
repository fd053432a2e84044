pub mod types;
pub mod wall;
