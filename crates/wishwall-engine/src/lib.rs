pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod interaction;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::wall::{WallConfig, WishWall};
pub use api::types::{Bounds, Rect, WallEvent, Wish};
pub use components::bubble::{Breath, Bubble, Drift, InteractionScale, Tint};
pub use core::rng::Rng;
pub use core::scene::BubbleField;
pub use core::time::FrameClock;
pub use renderer::instance::{BubbleInstance, DetailInstance, FrameBuffer};
pub use input::queue::{InputEvent, InputQueue, UiAction, KEY_ESCAPE};
pub use interaction::detail::{DetailConfig, DetailPhase, DetailView};
pub use interaction::selection::{DismissReason, PointerOutcome, Selection, SelectionController};
pub use bridge::protocol::ProtocolLayout;
pub use systems::layout::{LayoutConfig, SizeBreakpoint};
pub use systems::motion::MotionConfig;
pub use systems::breathing::BreathConfig;

pub use extensions::{Easing, Spring, SpringParams, Tween, TweenLoop, Tweenable};
