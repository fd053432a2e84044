use glam::Vec2;

use crate::components::bubble::Bubble;

/// The live bubble set, in draw order (later bubbles render on top).
/// Flat Vec storage; the field never holds more than a few dozen bubbles.
pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new() -> Self {
        Self {
            bubbles: Vec::with_capacity(64),
        }
    }

    /// Swap in a freshly seeded set. The old bubbles, with their breathing
    /// and spring state, are dropped here.
    pub fn replace(&mut self, bubbles: Vec<Bubble>) {
        self.bubbles = bubbles;
    }

    /// Get a bubble by its wish id.
    pub fn get(&self, id: &str) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Bubble> {
        self.bubbles.iter_mut().find(|b| b.id() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.bubbles.iter().position(|b| b.id() == id)
    }

    pub fn at(&self, index: usize) -> Option<&Bubble> {
        self.bubbles.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Bubble> {
        self.bubbles.get_mut(index)
    }

    /// Topmost bubble under `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        self.bubbles.iter().rposition(|b| b.contains(point))
    }

    /// Drop every hover and press flag so all bubbles drift again.
    pub fn release_all(&mut self) {
        for b in self.bubbles.iter_mut() {
            if b.is_hovered() {
                b.set_hovered(false);
            }
            if b.is_pressed() {
                b.set_pressed(false);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bubble> {
        self.bubbles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }
}

impl Default for BubbleField {
    fn default() -> Self {
        Self::new()
    }
}
