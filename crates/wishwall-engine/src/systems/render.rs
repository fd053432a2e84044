use crate::core::scene::BubbleField;
use crate::interaction::selection::SelectionController;
use crate::renderer::instance::{BubbleInstance, DetailInstance, FrameBuffer};

/// Publish the current bubble transforms and detail geometry.
/// Reads state only; nothing about the bubble list is re-derived.
pub fn build_frame(field: &BubbleField, selection: &SelectionController, buffer: &mut FrameBuffer) {
    buffer.clear();

    let selected_id = selection.selected_wish().map(|w| w.id.as_str());
    for bubble in field.iter() {
        let selected = selected_id == Some(bubble.id());
        buffer.push(BubbleInstance::from_bubble(bubble, selected));
    }

    if let Some(view) = selection.detail() {
        let index = field.index_of(&view.wish().id);
        buffer.detail = DetailInstance::from_view(view, index);
    }
}
