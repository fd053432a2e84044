// extensions/mod.rs
//
// Animation helpers shared by the bubble systems and the detail view.
// Decoupled from Bubble/BubbleField: each owner drives its own instances.

pub mod easing;
pub mod spring;
pub mod tween;

pub use easing::{Easing, lerp};
pub use spring::{Spring, SpringParams};
pub use tween::{Tween, TweenLoop, Tweenable};
