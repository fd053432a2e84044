use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

/// A single submitted wish.
/// Created by the wish store, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    /// Opaque unique identifier assigned by the store. Numeric ids from
    /// database-backed stores are kept as their decimal text.
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Author name, trimmed and non-empty.
    pub name: String,
    /// Message body, trimmed and non-empty.
    pub message: String,
    /// Creation instant in milliseconds since the Unix epoch.
    pub created_at: u64,
}

fn opaque_id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(de)? {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    })
}

/// The two JSON shapes a wish list arrives in: a bare array,
/// or the store's `{"wishes": [...]}` envelope. Records stay raw so one
/// malformed entry doesn't sink the rest.
#[derive(Deserialize)]
#[serde(untagged)]
enum WishListDoc {
    Bare(Vec<serde_json::Value>),
    Envelope { wishes: Vec<serde_json::Value> },
}

impl Wish {
    /// Parse a wish list (newest first) from JSON.
    ///
    /// Only a document that is neither shape is an error. Records inside it
    /// that don't parse are skipped with a warning.
    pub fn list_from_json(json: &str) -> Result<Vec<Wish>, serde_json::Error> {
        let records = match serde_json::from_str(json)? {
            WishListDoc::Bare(records) => records,
            WishListDoc::Envelope { wishes } => wishes,
        };
        let total = records.len();
        let wishes: Vec<Wish> = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| match serde_json::from_value(record) {
                Ok(wish) => Some(wish),
                Err(e) => {
                    log::warn!("Skipping wish record {}: {}", i, e);
                    None
                }
            })
            .collect();
        if wishes.len() < total {
            log::warn!("Kept {} of {} wish records", wishes.len(), total);
        }
        Ok(wishes)
    }

    /// Parse a single wish from JSON.
    pub fn from_json(json: &str) -> Result<Wish, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Text placed on the clipboard by the detail view's copy action.
    pub fn copy_text(&self) -> String {
        format!("{}: {}", self.name, self.message)
    }
}

/// Size of the bubble container in screen pixels.
/// A zero or unknown dimension means layout has not happened yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive and finite.
    pub fn is_ready(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Axis-aligned screen rectangle (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Square rectangle enclosing a circle.
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// A wall event communicated from Rust to the JS host.
/// `kind` is one of the `WallEvent::*` constants; `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WallEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WallEvent {
    pub const FLOATS: usize = 4;

    /// A bubble was opened. `a` = bubble index, or -1 if the bubble is gone.
    pub const SELECTION_OPENED: f32 = 1.0;
    /// The selection was dismissed. `a` = dismissal reason code.
    pub const SELECTION_CLOSED: f32 = 2.0;
    /// The detail view finished animating out.
    pub const DETAIL_HIDDEN: f32 = 3.0;
    /// The copy action was triggered; the host reads the copy text.
    pub const COPY_REQUESTED: f32 = 4.0;
    /// The bubble field was rebuilt. `a` = bubble count.
    pub const FIELD_RESEEDED: f32 = 5.0;

    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }
}
