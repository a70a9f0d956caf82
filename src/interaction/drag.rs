// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Direct manipulation of photos and stickers.
//!
//! A small pointer state machine:
//!
//! ```text
//! Idle --press(target, mode)--> Dragging --move--> Dragging
//!                                   |
//!                                release (anywhere)
//!                                   v
//!                                 Idle
//! ```
//!
//! Press captures the pointer position and the target's starting values.
//! Every move recomputes the target from those starting values and the total
//! pointer delta, then writes it straight into the store. Release always
//! commits; there is no cancel. Presses while dragging are ignored.

use super::session::Session;
use crate::error::EditorResult;
use crate::models::month::{SlotUpdate, StickerId, MIN_STICKER_SCALE, MIN_ZOOM};
use crate::models::store::DesignStore;
use crate::util::geometry::{delta_to_percent, CanvasSize, Point};

/// Screen pixels per percent of photo offset.
pub const PHOTO_MOVE_DIVISOR: f64 = 5.0;
/// Screen pixels per percent of photo zoom.
pub const PHOTO_ZOOM_DIVISOR: f64 = 2.0;
/// Screen pixels per unit of sticker scale.
pub const STICKER_SCALE_DIVISOR: f64 = 200.0;

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Photo(usize),
    Sticker(StickerId),
}

/// Whether the drag repositions or rescales its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize,
}

/// Target values captured when the drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOrigin {
    Photo { offset_x: f64, offset_y: f64, zoom: f64 },
    Sticker { x: f64, y: f64, scale: f64 },
}

/// New target values computed from a pointer delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    PhotoOffset { offset_x: f64, offset_y: f64 },
    PhotoZoom(f64),
    StickerPosition { x: f64, y: f64 },
    StickerScale(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    /// Month the drag started in
    pub month: usize,
    pub target: DragTarget,
    pub mode: DragMode,
    /// Pointer position at press, screen space
    pub start: Point,
    pub origin: DragOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match self {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }
}

/// Pointer input, already reduced to what the controller needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        target: DragTarget,
        mode: DragMode,
        pos: Point,
    },
    Move {
        pos: Point,
        /// Pixel size of the photo area, used to normalize sticker moves
        canvas: CanvasSize,
    },
    Release,
}

/// Compute the target's new values for a total pointer delta.
///
/// Returns `None` when a sticker move cannot be normalized (empty canvas).
pub fn compute_update(
    origin: DragOrigin,
    mode: DragMode,
    dx: f64,
    dy: f64,
    canvas: CanvasSize,
) -> Option<DragUpdate> {
    match (origin, mode) {
        (DragOrigin::Photo { offset_x, offset_y, .. }, DragMode::Move) => Some(DragUpdate::PhotoOffset {
            offset_x: offset_x + dx / PHOTO_MOVE_DIVISOR,
            offset_y: offset_y + dy / PHOTO_MOVE_DIVISOR,
        }),
        (DragOrigin::Photo { zoom, .. }, DragMode::Resize) => {
            Some(DragUpdate::PhotoZoom((zoom + dx / PHOTO_ZOOM_DIVISOR).max(MIN_ZOOM)))
        }
        (DragOrigin::Sticker { x, y, .. }, DragMode::Move) => {
            let (px, py) = delta_to_percent(dx, dy, canvas)?;
            Some(DragUpdate::StickerPosition { x: x + px, y: y + py })
        }
        (DragOrigin::Sticker { scale, .. }, DragMode::Resize) => Some(DragUpdate::StickerScale(
            (scale + dx / STICKER_SCALE_DIVISOR).max(MIN_STICKER_SCALE),
        )),
    }
}

/// Feed one pointer event through the state machine.
pub fn handle_pointer(
    session: &mut Session,
    store: &mut DesignStore,
    event: PointerEvent,
) -> EditorResult<()> {
    match event {
        PointerEvent::Press { target, mode, pos } => press(session, store, target, mode, pos),
        PointerEvent::Move { pos, canvas } => pointer_moved(session, store, pos, canvas),
        PointerEvent::Release => {
            release(session, store);
            Ok(())
        }
    }
}

fn press(
    session: &mut Session,
    store: &mut DesignStore,
    target: DragTarget,
    mode: DragMode,
    pos: Point,
) -> EditorResult<()> {
    if session.is_dragging() {
        log::debug!("Ignoring press on {:?} while already dragging", target);
        return Ok(());
    }

    let month = session.month;
    let origin = match target {
        DragTarget::Photo(slot_index) => {
            let slot = store.document().slot(month, slot_index)?;
            let origin = DragOrigin::Photo {
                offset_x: slot.offset_x,
                offset_y: slot.offset_y,
                zoom: slot.zoom,
            };
            session.select_slot(slot_index);
            origin
        }
        DragTarget::Sticker(id) => match store.month(month)?.sticker(id) {
            Some(sticker) => DragOrigin::Sticker {
                x: sticker.x,
                y: sticker.y,
                scale: sticker.scale,
            },
            None => {
                log::debug!("Press on unknown sticker {}", id);
                return Ok(());
            }
        },
    };

    store.begin_gesture();
    session.drag = DragState::Dragging(ActiveDrag {
        month,
        target,
        mode,
        start: pos,
        origin,
    });
    log::info!("Started {:?} drag of {:?} in month {}", mode, target, month);
    Ok(())
}

fn pointer_moved(
    session: &mut Session,
    store: &mut DesignStore,
    pos: Point,
    canvas: CanvasSize,
) -> EditorResult<()> {
    let Some(drag) = session.drag.active().copied() else {
        return Ok(());
    };

    let (dx, dy) = pos.delta_from(drag.start);
    let Some(update) = compute_update(drag.origin, drag.mode, dx, dy, canvas) else {
        return Ok(());
    };

    match (drag.target, update) {
        (DragTarget::Photo(slot), DragUpdate::PhotoOffset { offset_x, offset_y }) => {
            store.adjust_slot(drag.month, slot, SlotUpdate::offset(offset_x, offset_y))
        }
        (DragTarget::Photo(slot), DragUpdate::PhotoZoom(zoom)) => {
            store.adjust_slot(drag.month, slot, SlotUpdate::zoom(zoom))
        }
        (DragTarget::Sticker(id), DragUpdate::StickerPosition { x, y }) => {
            let scale = match drag.origin {
                DragOrigin::Sticker { scale, .. } => scale,
                DragOrigin::Photo { .. } => return Ok(()),
            };
            store.place_sticker(drag.month, id, x, y, scale)
        }
        (DragTarget::Sticker(id), DragUpdate::StickerScale(scale)) => {
            let (x, y) = match drag.origin {
                DragOrigin::Sticker { x, y, .. } => (x, y),
                DragOrigin::Photo { .. } => return Ok(()),
            };
            store.place_sticker(drag.month, id, x, y, scale)
        }
        (target, update) => {
            log::error!("Drag update {:?} does not fit target {:?}", update, target);
            Ok(())
        }
    }
}

fn release(session: &mut Session, store: &mut DesignStore) {
    if let DragState::Dragging(drag) = session.drag {
        log::info!("Finished {:?} drag of {:?}", drag.mode, drag.target);
    }
    session.drag = DragState::Idle;
    store.end_gesture();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    const CANVAS: CanvasSize = CanvasSize { width: 800.0, height: 500.0 };

    fn press_at(target: DragTarget, mode: DragMode, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Press { target, mode, pos: Point::new(x, y) }
    }

    fn move_to(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { pos: Point::new(x, y), canvas: CANVAS }
    }

    #[test]
    fn photo_move_scales_delta_by_five() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(0), DragMode::Move, 100.0, 100.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(150.0, 100.0)).unwrap();

        let slot = &store.month(0).unwrap().slots[0];
        assert!((slot.offset_x - 10.0).abs() < 1e-9);
        assert_eq!(slot.offset_y, 0.0);
    }

    #[test]
    fn photo_move_is_relative_to_press_not_previous_move() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(0), DragMode::Move, 0.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(50.0, 25.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(50.0, 25.0)).unwrap();

        let slot = &store.month(0).unwrap().slots[0];
        assert!((slot.offset_x - 10.0).abs() < 1e-9);
        assert!((slot.offset_y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn photo_resize_clamps_zoom() {
        let origin = DragOrigin::Photo { offset_x: 0.0, offset_y: 0.0, zoom: 100.0 };
        assert_eq!(
            compute_update(origin, DragMode::Resize, 60.0, 0.0, CANVAS),
            Some(DragUpdate::PhotoZoom(130.0))
        );
        assert_eq!(
            compute_update(origin, DragMode::Resize, -1000.0, 0.0, CANVAS),
            Some(DragUpdate::PhotoZoom(MIN_ZOOM))
        );
    }

    #[test]
    fn sticker_resize_follows_horizontal_delta() {
        let origin = DragOrigin::Sticker { x: 50.0, y: 50.0, scale: 1.0 };
        assert_eq!(
            compute_update(origin, DragMode::Resize, 100.0, 40.0, CANVAS),
            Some(DragUpdate::StickerScale(1.5))
        );
        match compute_update(origin, DragMode::Resize, -300.0, 0.0, CANVAS) {
            Some(DragUpdate::StickerScale(scale)) => assert!((scale - 0.1).abs() < 1e-12),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn sticker_move_is_normalized_by_canvas() {
        let origin = DragOrigin::Sticker { x: 50.0, y: 50.0, scale: 1.0 };
        match compute_update(origin, DragMode::Move, 80.0, -50.0, CANVAS) {
            Some(DragUpdate::StickerPosition { x, y }) => {
                assert!((x - 60.0).abs() < 1e-9);
                assert!((y - 40.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(compute_update(origin, DragMode::Move, 5.0, 5.0, CanvasSize::default()), None);
    }

    #[test]
    fn sticker_drag_updates_store_and_may_leave_canvas() {
        let mut session = Session::default();
        let mut store = DesignStore::default();
        let id = store.add_sticker(0, "fluent-emoji:fire").unwrap();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Sticker(id), DragMode::Move, 10.0, 10.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(810.0, 10.0)).unwrap();
        handle_pointer(&mut session, &mut store, PointerEvent::Release).unwrap();

        let sticker = store.month(0).unwrap().sticker(id).unwrap();
        assert!((sticker.x - 150.0).abs() < 1e-9);
        assert_eq!(sticker.y, 50.0);
        assert_eq!(sticker.scale, 1.0);
    }

    #[test]
    fn sticker_resize_in_store_clamps_to_minimum() {
        let mut session = Session::default();
        let mut store = DesignStore::default();
        let id = store.add_sticker(0, "fluent-emoji:sun").unwrap();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Sticker(id), DragMode::Resize, 0.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(-300.0, 0.0)).unwrap();

        let sticker = store.month(0).unwrap().sticker(id).unwrap();
        assert!((sticker.scale - 0.1).abs() < 1e-12);
        assert_eq!((sticker.x, sticker.y), (50.0, 50.0));
    }

    #[test]
    fn pressing_a_photo_selects_its_slot() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(2), DragMode::Move, 0.0, 0.0)).unwrap();

        assert_eq!(session.selected_slot, 2);
        assert!(session.is_dragging());
        assert!(!session.animations_enabled());
    }

    #[test]
    fn release_returns_to_idle_and_commits() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(0), DragMode::Move, 0.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(25.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(50.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, PointerEvent::Release).unwrap();

        assert!(!session.is_dragging());
        assert!(!store.gesture_open());
        assert!((store.month(0).unwrap().slots[0].offset_x - 10.0).abs() < 1e-9);

        // Whole drag undoes in one step
        assert_eq!(store.history().len(), 1);
        store.undo();
        assert_eq!(store.month(0).unwrap().slots[0].offset_x, 0.0);
    }

    #[test]
    fn upload_finishing_mid_drag_is_undone_separately() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(0), DragMode::Move, 0.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, move_to(25.0, 0.0)).unwrap();
        let image = crate::models::month::ImageSource::new("late.png", image::RgbaImage::new(2, 2));
        store.set_slot_image(0, 1, image).unwrap();
        handle_pointer(&mut session, &mut store, move_to(50.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, PointerEvent::Release).unwrap();

        assert_eq!(store.history().len(), 3);
        store.undo();
        let month = store.month(0).unwrap();
        assert!(month.slots[1].image.is_some());
        assert!((month.slots[0].offset_x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn moves_after_release_do_nothing() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(0), DragMode::Move, 0.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, PointerEvent::Release).unwrap();
        handle_pointer(&mut session, &mut store, move_to(500.0, 500.0)).unwrap();

        assert_eq!(store.month(0).unwrap().slots[0].offset_x, 0.0);
        assert!(store.history().is_empty());
    }

    #[test]
    fn press_while_dragging_is_ignored() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(0), DragMode::Move, 0.0, 0.0)).unwrap();
        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(1), DragMode::Resize, 0.0, 0.0)).unwrap();

        let drag = session.drag.active().unwrap();
        assert_eq!(drag.target, DragTarget::Photo(0));
        assert_eq!(drag.mode, DragMode::Move);
        assert_eq!(session.selected_slot, 0);
    }

    #[test]
    fn press_on_unknown_sticker_stays_idle() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        handle_pointer(
            &mut session,
            &mut store,
            press_at(DragTarget::Sticker(StickerId::generate()), DragMode::Move, 0.0, 0.0),
        )
        .unwrap();

        assert!(!session.is_dragging());
        assert!(!store.gesture_open());
    }

    #[test]
    fn press_on_invalid_slot_is_reported() {
        let mut session = Session::default();
        let mut store = DesignStore::default();

        let err = handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(9), DragMode::Move, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidIndex { .. }));
        assert!(!session.is_dragging());
    }

    #[test]
    fn drag_stays_on_its_month_if_view_changes() {
        let mut session = Session::default();
        let mut store = DesignStore::default();
        session.select_month(3);

        handle_pointer(&mut session, &mut store, press_at(DragTarget::Photo(0), DragMode::Move, 0.0, 0.0)).unwrap();
        session.select_month(4);
        handle_pointer(&mut session, &mut store, move_to(10.0, 0.0)).unwrap();

        assert!((store.month(3).unwrap().slots[0].offset_x - 2.0).abs() < 1e-9);
        assert_eq!(store.month(4).unwrap().slots[0].offset_x, 0.0);
    }
}
