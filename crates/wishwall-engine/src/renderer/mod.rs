pub mod instance;

pub use instance::{BubbleInstance, DetailInstance, FrameBuffer};
