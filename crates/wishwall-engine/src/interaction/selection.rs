//! Selection controller: which wish (if any) is open, and the single
//! detail view that goes with it.
//!
//! `Idle -> Open` on a bubble click. `Open -> Idle` on an outside click,
//! the close button, or Escape. Opening while already open replaces the
//! open wish directly; a view still animating out is replaced too, so at
//! most one detail view exists at any time.

use std::rc::Rc;

use glam::Vec2;

use crate::api::types::{Bounds, Rect, Wish};
use crate::input::queue::KEY_ESCAPE;
use super::detail::{DetailConfig, DetailView};

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Idle,
    Open(Rc<Wish>),
}

/// Why an open selection was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    OutsideClick,
    CloseAction,
    Escape,
}

impl DismissReason {
    /// Wire code carried in `WallEvent::SELECTION_CLOSED`.
    pub fn code(self) -> f32 {
        match self {
            DismissReason::OutsideClick => 0.0,
            DismissReason::CloseAction => 1.0,
            DismissReason::Escape => 2.0,
        }
    }
}

/// What a pointer press did while the controller had a say in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing open; the press belongs to the bubble field.
    PassThrough,
    /// Landed on the detail surface.
    InsideDetail,
    /// Landed outside the detail surface and closed it.
    Dismissed,
}

pub struct SelectionController {
    selection: Selection,
    detail: Option<DetailView>,
    cfg: DetailConfig,
}

impl SelectionController {
    pub fn new(cfg: DetailConfig) -> Self {
        Self {
            selection: Selection::Idle,
            detail: None,
            cfg,
        }
    }

    /// Open `wish`, growing its detail view out of `origin`.
    pub fn open(&mut self, wish: Rc<Wish>, origin: Rect, bounds: Bounds) {
        log::info!("selection: open {}", wish.id);
        self.detail = Some(DetailView::open(Rc::clone(&wish), origin, bounds, &self.cfg));
        self.selection = Selection::Open(wish);
    }

    /// Close the open selection. Returns false if nothing was open.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        if let Selection::Open(wish) = &self.selection {
            log::info!("selection: close {} ({:?})", wish.id, reason);
        } else {
            return false;
        }
        self.selection = Selection::Idle;
        if let Some(view) = self.detail.as_mut() {
            view.close(&self.cfg);
        }
        true
    }

    /// Escape closes from anywhere; other keys are ignored.
    pub fn key_down(&mut self, key_code: u32) -> Option<DismissReason> {
        if key_code == KEY_ESCAPE && self.dismiss(DismissReason::Escape) {
            Some(DismissReason::Escape)
        } else {
            None
        }
    }

    pub fn pointer_down(&mut self, point: Vec2) -> PointerOutcome {
        if !self.is_open() {
            return PointerOutcome::PassThrough;
        }
        let inside = self
            .detail
            .as_ref()
            .map(|view| view.surface_contains(point))
            .unwrap_or(false);
        if inside {
            PointerOutcome::InsideDetail
        } else {
            self.dismiss(DismissReason::OutsideClick);
            PointerOutcome::Dismissed
        }
    }

    /// Advance the detail transition. Returns true on the frame a closing
    /// view finishes and is dropped.
    pub fn tick(&mut self, dt: f32) -> bool {
        let hidden = self.detail.as_mut().map(|view| view.tick(dt)).unwrap_or(false);
        if hidden {
            self.detail = None;
        }
        hidden
    }

    pub fn resize(&mut self, bounds: Bounds) {
        if let Some(view) = self.detail.as_mut() {
            view.retarget(bounds, &self.cfg);
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_open(&self) -> bool {
        matches!(self.selection, Selection::Open(_))
    }

    pub fn selected_wish(&self) -> Option<&Rc<Wish>> {
        match &self.selection {
            Selection::Open(wish) => Some(wish),
            Selection::Idle => None,
        }
    }

    /// The visible detail view, open or still animating out.
    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Clipboard text for the open wish.
    pub fn copy_text(&self) -> Option<String> {
        self.selected_wish().map(|wish| wish.copy_text())
    }
}
