pub mod layout;
pub mod motion;
pub mod breathing;
pub mod render;
