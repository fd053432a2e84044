/// Shared frame buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 10 floats]
/// [Bubbles: max_bubbles × 8 floats]
/// [Detail: 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header on every pack.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::types::{Bounds, WallEvent};
use crate::api::wall::WallConfig;
use crate::renderer::instance::{BubbleInstance, DetailInstance, FrameBuffer};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 10;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_BUBBLES: usize = 2;
pub const HEADER_BUBBLE_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_VIEW_WIDTH: usize = 6;
pub const HEADER_VIEW_HEIGHT: usize = 7;
pub const HEADER_SELECTED_INDEX: usize = 8;
pub const HEADER_DETAIL_PHASE: usize = 9;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per bubble instance (wire format — never changes).
pub const BUBBLE_FLOATS: usize = BubbleInstance::FLOATS;

/// Floats in the detail section.
pub const DETAIL_FLOATS: usize = DetailInstance::FLOATS;

/// Floats per wall event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = WallEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum bubbles per frame.
    pub max_bubbles: usize,
    /// Maximum wall events per frame.
    pub max_events: usize,

    /// Size of bubble data section in floats.
    pub bubble_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where bubble data begins.
    pub bubble_data_offset: usize,
    /// Offset (in floats) where the detail section begins.
    pub detail_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_bubbles: usize, max_events: usize) -> Self {
        let bubble_data_floats = max_bubbles * BUBBLE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let bubble_data_offset = HEADER_FLOATS;
        let detail_data_offset = bubble_data_offset + bubble_data_floats;
        let event_data_offset = detail_data_offset + DETAIL_FLOATS;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_bubbles,
            max_events,
            bubble_data_floats,
            event_data_floats,
            bubble_data_offset,
            detail_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a WallConfig.
    pub fn from_config(config: &WallConfig) -> Self {
        Self::new(config.layout.max_bubbles, config.max_events)
    }

    /// Write one frame into `out`, resizing it to the full buffer length.
    /// Bubbles and events past capacity are dropped; the header counts
    /// reflect what was actually written.
    pub fn pack(
        &self,
        out: &mut Vec<f32>,
        frame: &FrameBuffer,
        events: &[WallEvent],
        frame_counter: u64,
        bounds: Bounds,
    ) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let bubbles = &frame.bubbles[..frame.bubbles.len().min(self.max_bubbles)];
        let events = &events[..events.len().min(self.max_events)];
        let selected = bubbles
            .iter()
            .position(|b| b.selected > 0.5)
            .map(|i| i as f32)
            .unwrap_or(-1.0);

        out[HEADER_FRAME_COUNTER] = frame_counter as f32;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_MAX_BUBBLES] = self.max_bubbles as f32;
        out[HEADER_BUBBLE_COUNT] = bubbles.len() as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = events.len() as f32;
        out[HEADER_VIEW_WIDTH] = bounds.width;
        out[HEADER_VIEW_HEIGHT] = bounds.height;
        out[HEADER_SELECTED_INDEX] = selected;
        out[HEADER_DETAIL_PHASE] = frame.detail.phase;

        let bubble_floats: &[f32] = bytemuck::cast_slice(bubbles);
        out[self.bubble_data_offset..self.bubble_data_offset + bubble_floats.len()]
            .copy_from_slice(bubble_floats);

        let detail_floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame.detail));
        out[self.detail_data_offset..self.event_data_offset].copy_from_slice(detail_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);
    }
}
