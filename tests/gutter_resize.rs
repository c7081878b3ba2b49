//! Label gutter resize tests
//!
//! Controller clamping plus full press/drag/release gestures through the
//! update loop, including abnormal termination of the drag.

mod common;

use std::time::Instant;

use common::{model_with_panel, t0};
use msaboard::gutter::{GutterResizeController, MAX_LABEL_WIDTH, MIN_LABEL_WIDTH};
use msaboard::messages::{AppMsg, Msg, PointerMsg};
use msaboard::model::{AppModel, PanelId, PointerCapture};
use msaboard::scheduler::FRAME_INTERVAL;
use msaboard::update::update;
use proptest::prelude::*;

fn stored_width(model: &AppModel, id: PanelId) -> Option<u32> {
    model.session().config(id).map(|c| c.label_width)
}

/// Press on the gutter handle of `id` and return the press x
fn press_handle(model: &mut AppModel, id: PanelId, now: Instant) -> f64 {
    let regions = model.view(id).and_then(|v| v.regions).unwrap();
    let handle = regions.gutter_handle(model.view(id).unwrap().label_width());
    let x = handle.x + handle.width / 2.0;
    update(
        model,
        Msg::Pointer(PointerMsg::Pressed {
            x,
            y: handle.y + 100.0,
            now,
        }),
    );
    x
}

fn move_to(model: &mut AppModel, x: f64, now: Instant) {
    update(model, Msg::Pointer(PointerMsg::Moved { x, y: 300.0, now }));
}

#[test]
fn test_drag_updates_live_width_and_commits_per_frame() {
    let (mut model, id) = model_with_panel();
    let now = t0();
    let depth = model.history.undo_depth();

    let x = press_handle(&mut model, id, now);
    assert_eq!(model.capture, Some(PointerCapture::Gutter(id)));

    move_to(&mut model, x + 30.0, now);
    move_to(&mut model, x + 50.0, now + FRAME_INTERVAL / 2);
    assert_eq!(model.view(id).unwrap().label_width(), 150.0);
    // Not committed before the frame elapses
    assert_eq!(stored_width(&model, id), Some(100));

    update(&mut model, Msg::App(AppMsg::Tick(now + FRAME_INTERVAL)));
    assert_eq!(stored_width(&model, id), Some(150));

    move_to(&mut model, x + 80.0, now + FRAME_INTERVAL * 2);
    update(&mut model, Msg::Pointer(PointerMsg::Released { now }));
    assert!(model.capture.is_none());
    assert_eq!(stored_width(&model, id), Some(180));
    assert_eq!(model.history.undo_depth(), depth);
}

#[test]
fn test_drag_clamps_at_both_ends() {
    let (mut model, id) = model_with_panel();
    let now = t0();
    let x = press_handle(&mut model, id, now);

    move_to(&mut model, x - 500.0, now);
    assert_eq!(model.view(id).unwrap().gutter.width(), MIN_LABEL_WIDTH);

    move_to(&mut model, x + 2000.0, now);
    assert_eq!(model.view(id).unwrap().gutter.width(), MAX_LABEL_WIDTH);

    update(&mut model, Msg::Pointer(PointerMsg::Released { now }));
    assert_eq!(stored_width(&model, id), Some(MAX_LABEL_WIDTH));
}

#[test]
fn test_pointer_leaving_window_ends_drag() {
    let (mut model, id) = model_with_panel();
    let now = t0();
    let x = press_handle(&mut model, id, now);
    move_to(&mut model, x + 20.0, now);

    update(&mut model, Msg::Pointer(PointerMsg::Left { now }));
    assert!(model.capture.is_none());
    assert!(!model.view(id).unwrap().gutter.is_dragging());
    assert_eq!(stored_width(&model, id), Some(120));

    // Later moves no longer resize
    move_to(&mut model, x + 200.0, now);
    assert_eq!(stored_width(&model, id), Some(120));
    assert_eq!(model.view(id).unwrap().label_width(), 120.0);
}

#[test]
fn test_focus_loss_ends_drag() {
    let (mut model, id) = model_with_panel();
    let now = t0();
    let x = press_handle(&mut model, id, now);
    move_to(&mut model, x - 30.0, now);

    update(&mut model, Msg::App(AppMsg::FocusLost));
    assert!(model.capture.is_none());
    assert_eq!(stored_width(&model, id), Some(70));
    assert!(model.next_deadline().is_none());
}

#[test]
fn test_width_survives_undo_of_later_panel() {
    let (mut model, id) = model_with_panel();
    let now = t0();
    let x = press_handle(&mut model, id, now);
    move_to(&mut model, x + 40.0, now);
    update(&mut model, Msg::Pointer(PointerMsg::Released { now }));

    common::open_panel(&mut model, "b.fasta", common::nucleotides(4, 10));
    update(&mut model, Msg::Session(msaboard::messages::SessionMsg::Undo));
    assert_eq!(stored_width(&model, id), Some(140));
    assert_eq!(model.view(id).unwrap().label_width(), 140.0);
}

proptest! {
    #[test]
    fn prop_width_always_within_bounds(
        start in 40u32..=400,
        moves in proptest::collection::vec(-1000.0f64..1000.0, 1..20),
    ) {
        let mut controller = GutterResizeController::new(start);
        prop_assert!(controller.press(0.0));
        let mut x = 0.0;
        for dx in moves {
            x += dx;
            controller.drag_to(x);
            prop_assert!((MIN_LABEL_WIDTH..=MAX_LABEL_WIDTH).contains(&controller.width()));
        }
        let released = controller.release();
        prop_assert_eq!(released, Some(controller.width()));
    }
}
