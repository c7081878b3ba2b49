//! Pointer mapping tests
//!
//! Pixel-to-cell mapping, its inverse, tooltip flipping and hover state
//! driven through the update loop.

mod common;

use common::{model_with_panel, t0};
use msaboard::messages::{Msg, PointerMsg};
use msaboard::msa::pointer::{cell_grid_rect, grid_to_local, RULER_HEIGHT};
use msaboard::msa::{map_pointer, place_tooltip, GridGeometry, HoverCell, CELL_SIZE};
use msaboard::update::update;
use proptest::prelude::*;

fn geometry(scroll_top: f64, scroll_left: f64, gutter: f64) -> GridGeometry {
    GridGeometry::new(scroll_top, scroll_left, gutter, 100, 200)
}

#[test]
fn test_pointer_in_gutter_has_row_but_no_column() {
    let geom = geometry(0.0, 0.0, 120.0);
    let hover = map_pointer(119.0, RULER_HEIGHT + 10.0, &geom);
    assert_eq!(
        hover,
        HoverCell {
            row: Some(0),
            col: None,
        }
    );
}

#[test]
fn test_pointer_in_ruler_has_column_but_no_row() {
    let geom = geometry(0.0, 0.0, 120.0);
    let hover = map_pointer(120.0 + CELL_SIZE * 3.5, RULER_HEIGHT, &geom);
    assert_eq!(hover.row, None);
    assert_eq!(hover.col, Some(3));
}

#[test]
fn test_scroll_offsets_shift_the_mapping() {
    let geom = geometry(CELL_SIZE * 10.0, CELL_SIZE * 4.0, 100.0);
    let hover = map_pointer(100.0 + 1.0, RULER_HEIGHT + 1.0, &geom);
    assert_eq!(hover.row, Some(10));
    assert_eq!(hover.col, Some(4));
}

#[test]
fn test_pointer_past_last_cell_maps_to_none() {
    let geom = GridGeometry::new(0.0, 0.0, 100.0, 2, 3);
    let hover = map_pointer(100.0 + CELL_SIZE * 3.0 + 1.0, RULER_HEIGHT + CELL_SIZE * 2.0, &geom);
    assert_eq!(hover, HoverCell::NONE);
}

#[test]
fn test_tooltip_flips_near_edges() {
    let open = place_tooltip(100.0, 100.0, 1000.0, 800.0);
    assert!(!open.flip_x && !open.flip_y);

    let flipped = place_tooltip(990.0, 790.0, 1000.0, 800.0);
    assert!(flipped.flip_x && flipped.flip_y);
    let (x, y) = flipped.origin(150.0, 50.0);
    assert!(x + 150.0 <= 990.0);
    assert!(y + 50.0 <= 790.0);
}

// ========================================================================
// Through the update loop
// ========================================================================

#[test]
fn test_hover_follows_pointer_moves() {
    let (mut model, id) = model_with_panel();
    let body = model.view(id).and_then(|v| v.regions).unwrap().body;
    let gutter = model.view(id).unwrap().label_width();

    let x = body.x + gutter + CELL_SIZE * 2.0 + 5.0;
    let y = body.y + RULER_HEIGHT + CELL_SIZE * 3.0 + 5.0;
    update(&mut model, Msg::Pointer(PointerMsg::Moved { x, y, now: t0() }));

    let view = model.view(id).unwrap();
    assert_eq!(view.hover.row, Some(3));
    assert_eq!(view.hover.col, Some(2));
    assert_eq!(model.hovered_panel, Some(id));
    assert!(view.tooltip(body.right(), 900.0).is_some());
}

#[test]
fn test_leaving_window_clears_hover() {
    let (mut model, id) = model_with_panel();
    let body = model.view(id).and_then(|v| v.regions).unwrap().body;
    let x = body.x + 150.0;
    let y = body.y + 40.0;
    update(&mut model, Msg::Pointer(PointerMsg::Moved { x, y, now: t0() }));
    assert_ne!(model.view(id).unwrap().hover, HoverCell::NONE);

    update(&mut model, Msg::Pointer(PointerMsg::Left { now: t0() }));
    assert_eq!(model.view(id).unwrap().hover, HoverCell::NONE);
    assert!(model.pointer.is_none());
}

#[test]
fn test_moving_onto_header_clears_cell_hover() {
    let (mut model, id) = model_with_panel();
    let regions = model.view(id).and_then(|v| v.regions).unwrap();
    update(
        &mut model,
        Msg::Pointer(PointerMsg::Moved {
            x: regions.body.x + 150.0,
            y: regions.body.y + 40.0,
            now: t0(),
        }),
    );
    update(
        &mut model,
        Msg::Pointer(PointerMsg::Moved {
            x: regions.header.x + 40.0,
            y: regions.header.y + 5.0,
            now: t0(),
        }),
    );
    assert_eq!(model.view(id).unwrap().hover, HoverCell::NONE);
    assert_eq!(model.hovered_panel, Some(id));
}

proptest! {
    #[test]
    fn prop_cell_center_maps_back_to_cell(
        row in 0usize..100,
        col in 0usize..200,
        scroll_top in 0.0f64..2000.0,
        scroll_left in 0.0f64..4000.0,
        gutter in 40.0f64..400.0,
    ) {
        let geom = geometry(scroll_top, scroll_left, gutter);
        let local = grid_to_local(cell_grid_rect(row, col, CELL_SIZE, CELL_SIZE), &geom);
        let (x, y) = local.center();
        // Only positions outside the fixed bands resolve both axes
        prop_assume!(x > gutter && y > RULER_HEIGHT);
        let hover = map_pointer(x, y, &geom);
        prop_assert_eq!(hover.row, Some(row));
        prop_assert_eq!(hover.col, Some(col));
    }

    #[test]
    fn prop_mapping_stays_in_range(
        x in -500.0f64..5000.0,
        y in -500.0f64..5000.0,
        scroll_top in 0.0f64..5000.0,
        scroll_left in 0.0f64..5000.0,
    ) {
        let geom = geometry(scroll_top, scroll_left, 100.0);
        let hover = map_pointer(x, y, &geom);
        prop_assert!(hover.row.map_or(true, |r| r < geom.row_count));
        prop_assert!(hover.col.map_or(true, |c| c < geom.col_count));
    }
}
