use venuekit_core::AreaKind;
use venuekit_designer::canvas::{DrawKey, DrawMode, DrawOutcome, DrawingEngine, Modifiers};
use venuekit_designer::model::Area;
use venuekit_designer::{DesignerState, Point};

fn finalized(outcome: DrawOutcome) -> Area {
    match outcome {
        DrawOutcome::Finalized(area) => area,
        other => panic!("expected a finished area, got {:?}", other),
    }
}

#[test]
fn test_boundary_closes_near_first_point() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    for p in [(10.0, 10.0), (60.0, 10.0), (60.0, 60.0)] {
        assert_eq!(
            engine.pointer_down(Point::new(p.0, p.1), Modifiers::NONE, &[]),
            DrawOutcome::Updated
        );
    }
    let area = finalized(engine.pointer_down(Point::new(12.0, 11.0), Modifiers::NONE, &[]));
    assert_eq!(area.kind, AreaKind::Boundary);
    assert_eq!(
        area.points,
        vec![
            Point::new(10.0, 10.0),
            Point::new(60.0, 10.0),
            Point::new(60.0, 60.0),
            Point::new(10.0, 10.0),
        ]
    );
    assert!(area.is_closed());
    assert!(!engine.is_drawing());
}

#[test]
fn test_boundary_needs_three_points() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_down(Point::new(100.0, 0.0), Modifiers::NONE, &[]);
    assert_eq!(engine.key(DrawKey::Enter), DrawOutcome::Ignored);
    assert!(engine.is_drawing());
    assert_eq!(engine.points().len(), 2);
}

#[test]
fn test_close_radius_follows_zoom() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    engine.set_scale(4.0);
    for p in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
        engine.pointer_down(Point::new(p.0, p.1), Modifiers::NONE, &[]);
    }
    // 20 px at 4x zoom is 5 world units
    assert_eq!(
        engine.pointer_down(Point::new(8.0, 0.0), Modifiers::NONE, &[]),
        DrawOutcome::Updated
    );
    assert_eq!(engine.points().len(), 4);
}

#[test]
fn test_rect_axis_snap_keeps_start_x() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Rect));
    engine.pointer_down(Point::new(100.0, 100.0), Modifiers::NONE, &[]);
    engine.pointer_move(Point::new(110.0, 300.0), Modifiers::AXIS_SNAP);
    engine.pointer_up(Point::new(110.0, 300.0), Modifiers::AXIS_SNAP);

    let points = engine.points().to_vec();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0], Point::new(100.0, 100.0));
    assert_eq!(points[2], Point::new(100.0, 300.0));

    let area = finalized(engine.key(DrawKey::Enter));
    assert_eq!(area.kind, AreaKind::Obstacle);
}

#[test]
fn test_rect_corners() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Rect));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_up(Point::new(50.0, 20.0), Modifiers::NONE);
    assert_eq!(
        engine.points(),
        &[
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 20.0),
            Point::new(0.0, 20.0),
        ]
    );
}

#[test]
fn test_freehand_is_smoothed() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Free));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_move(Point::new(40.0, 0.0), Modifiers::NONE);
    engine.pointer_move(Point::new(40.0, 0.0), Modifiers::NONE);
    engine.pointer_move(Point::new(80.0, 40.0), Modifiers::NONE);
    engine.pointer_up(Point::new(120.0, 40.0), Modifiers::NONE);
    assert_eq!(engine.points().len(), 4);

    let area = finalized(engine.double_click(Point::new(120.0, 40.0)));
    assert_eq!(area.kind, AreaKind::Freeform);
    assert_eq!(area.points.len(), 6);
    assert_eq!(area.points[0], Point::new(10.0, 0.0));
}

#[test]
fn test_kind_override() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Rect));
    engine.set_area_kind(Some(AreaKind::Door));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_up(Point::new(90.0, 20.0), Modifiers::NONE);
    assert_eq!(finalized(engine.finish()).kind, AreaKind::Door);
}

#[test]
fn test_exact_length_continues_heading() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_down(Point::new(100.0, 0.0), Modifiers::NONE, &[]);

    assert_eq!(engine.key(DrawKey::ExactLength), DrawOutcome::AwaitingLength);
    assert!(engine.is_awaiting_length());
    assert_eq!(engine.submit_length(50.0), DrawOutcome::Updated);
    assert_eq!(engine.points().last(), Some(&Point::new(150.0, 0.0)));
}

#[test]
fn test_exact_length_points_at_cursor() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_move(Point::new(0.0, 10.0), Modifiers::NONE);
    engine.key(DrawKey::ExactLength);
    engine.submit_length(300.0);
    assert_eq!(engine.points().last(), Some(&Point::new(0.0, 300.0)));
}

#[test]
fn test_exact_length_rejects_bad_input() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.key(DrawKey::ExactLength);
    assert_eq!(engine.submit_length(-4.0), DrawOutcome::Ignored);
    assert!(!engine.is_awaiting_length());
    assert_eq!(engine.points().len(), 1);
}

#[test]
fn test_typed_length_uses_configured_units() {
    let mut state = DesignerState::new();
    state.set_draw_mode(Some(DrawMode::Boundary));
    state
        .draw_pointer_down(Point::new(0.0, 0.0), Modifiers::NONE)
        .unwrap();
    state
        .draw_pointer_down(Point::new(100.0, 0.0), Modifiers::NONE)
        .unwrap();

    state.draw_key(DrawKey::ExactLength).unwrap();
    assert_eq!(
        state.draw_submit_length_text(" 2,5 m ").unwrap(),
        DrawOutcome::Updated
    );
    assert_eq!(
        state.drawing_preview().points.last(),
        Some(&Point::new(350.0, 0.0))
    );

    state.draw_key(DrawKey::ExactLength).unwrap();
    assert_eq!(
        state.draw_submit_length_text("abc").unwrap(),
        DrawOutcome::Ignored
    );
    assert_eq!(state.drawing_preview().points.len(), 3);
}

#[test]
fn test_undo_point_and_escape() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_down(Point::new(10.0, 0.0), Modifiers::NONE, &[]);
    assert_eq!(engine.key(DrawKey::UndoPoint), DrawOutcome::Updated);
    assert_eq!(engine.points().len(), 1);

    assert_eq!(engine.key(DrawKey::Escape), DrawOutcome::Canceled);
    assert!(!engine.is_drawing());
    assert!(engine.points().is_empty());
    assert_eq!(engine.key(DrawKey::Escape), DrawOutcome::Ignored);
}

#[test]
fn test_erase_picks_topmost_area() {
    let areas = vec![
        Area::new(AreaKind::Aisle, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
        Area::new(AreaKind::Freeform, vec![Point::new(50.0, -50.0), Point::new(50.0, 50.0)]),
    ];
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Erase));
    assert_eq!(
        engine.pointer_down(Point::new(50.0, 2.0), Modifiers::NONE, &areas),
        DrawOutcome::Erase(1)
    );
    assert_eq!(
        engine.pointer_down(Point::new(10.0, 2.0), Modifiers::NONE, &areas),
        DrawOutcome::Erase(0)
    );
    assert_eq!(
        engine.pointer_down(Point::new(10.0, 200.0), Modifiers::NONE, &areas),
        DrawOutcome::Ignored
    );
}

#[test]
fn test_boundary_preview() {
    let mut engine = DrawingEngine::new();
    engine.set_mode(Some(DrawMode::Boundary));
    engine.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE, &[]);
    engine.pointer_move(Point::new(30.0, 5.0), Modifiers::AXIS_SNAP);
    let preview = engine.preview();
    assert_eq!(preview.kind, Some(AreaKind::Boundary));
    assert_eq!(
        preview.cursor_segment,
        Some((Point::new(0.0, 0.0), Point::new(30.0, 0.0)))
    );
    assert!(!preview.closed);
}

#[test]
fn test_state_commits_drawn_areas() {
    let mut state = DesignerState::new();
    state.set_draw_mode(Some(DrawMode::Line));
    state
        .draw_pointer_down(Point::new(0.0, 0.0), Modifiers::NONE)
        .unwrap();
    state
        .draw_pointer_up(Point::new(200.0, 0.0), Modifiers::NONE)
        .unwrap();
    assert!(state.areas().is_empty());

    let outcome = state.draw_key(DrawKey::Enter).unwrap();
    assert!(matches!(outcome, DrawOutcome::Finalized(_)));
    assert_eq!(state.areas().len(), 1);
    assert!(state.can_undo());

    state.set_draw_mode(Some(DrawMode::Erase));
    let outcome = state
        .draw_pointer_down(Point::new(100.0, 1.0), Modifiers::NONE)
        .unwrap();
    assert_eq!(outcome, DrawOutcome::Erase(0));
    assert!(state.areas().is_empty());

    state.undo();
    assert_eq!(state.areas().len(), 1);
}

#[test]
fn test_state_drawing_uses_viewport() {
    let mut state = DesignerState::new();
    state.viewport.set_zoom(2.0);
    state.viewport.set_pan(100.0, 0.0);
    state.set_draw_mode(Some(DrawMode::Rect));
    state
        .draw_pointer_down(Point::new(100.0, 0.0), Modifiers::NONE)
        .unwrap();
    state
        .draw_pointer_up(Point::new(300.0, 100.0), Modifiers::NONE)
        .unwrap();
    state.draw_key(DrawKey::Enter).unwrap();
    let bounds = state.areas()[0].bounds().unwrap();
    assert_eq!(bounds.max_x, 100.0);
    assert_eq!(bounds.max_y, 50.0);
}
