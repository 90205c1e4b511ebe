//! Integration tests for the Engine API
//!
//! These tests drive the public surface against small in-memory drawings.

use std::fs;

use float_cmp::assert_approx_eq;
use tempfile::tempdir;

use plenum::{
    Drawing, Engine, PlenumError, Rejection, ShiftOutcome, ShiftRequest,
    config::{AppConfig, load_config},
    geometry::{Direction, Point, Rect},
    identifier::ObjectId,
    object::{ConnectorArrayList, ConnectorData, ContainerList, DrawingObject, Hook, ShapeData},
    polyline::PolyLine,
    wall::{DrawMode, DrawTrigger, EditMode, EditorCanvas, WallCanvas},
};

fn id(raw: u32) -> ObjectId {
    ObjectId::new(raw)
}

fn x_of(drawing: &Drawing, raw: u32) -> f64 {
    drawing.get(id(raw)).expect("object exists").frame().x()
}

fn link(raw: u32, from: u32, to: u32, start: Point, end: Point) -> DrawingObject {
    DrawingObject::line(id(raw), start, end)
        .with_hook(Hook::new(id(from)))
        .with_hook(Hook::new(id(to)))
}

#[test]
fn test_engine_defaults() {
    let engine = Engine::default();
    assert_approx_eq!(f64, engine.config().spacing().collision_gap(), 20.0);
    assert_eq!(engine.wall_tool().mode(), DrawMode::Idle);
}

#[test]
fn test_move_rejected_when_shapes_would_collide() {
    // Source at x=100, target 125 further than the array width allows,
    // and a shape hanging off the source that stays behind at x=100..140.
    let mut drawing: Drawing = [
        DrawingObject::shape(id(1), Rect::new(100.0, 0.0, 50.0, 40.0)),
        DrawingObject::shape(id(2), Rect::new(275.0, 0.0, 50.0, 40.0)),
        link(3, 1, 2, Point::new(150.0, 20.0), Point::new(350.0, 20.0)),
        DrawingObject::shape(id(4), Rect::new(100.0, 100.0, 40.0, 40.0)),
        link(5, 1, 4, Point::new(125.0, 40.0), Point::new(120.0, 100.0)),
    ]
    .into_iter()
    .collect();
    let before = drawing.clone();

    let engine = Engine::default();
    let request = ShiftRequest::shrink(id(1), id(2), id(3), Direction::Right);
    let outcome = engine.shift(&mut drawing, &request);

    let ShiftOutcome::Rejected(Rejection::Collision { clearance }) = outcome else {
        panic!("expected a collision, got {outcome:?}");
    };
    assert_approx_eq!(f64, clearance, 10.0);
    assert_eq!(
        drawing.objects().collect::<Vec<_>>(),
        before.objects().collect::<Vec<_>>()
    );
    assert!(drawing.take_dirty().is_empty());
}

#[test]
fn test_move_translates_whole_branch() {
    let mut drawing: Drawing = [
        DrawingObject::shape(id(1), Rect::new(0.0, 0.0, 50.0, 40.0)),
        DrawingObject::shape(id(2), Rect::new(300.0, 0.0, 50.0, 40.0)),
        DrawingObject::shape(id(3), Rect::new(400.0, 0.0, 50.0, 40.0)),
        link(10, 1, 2, Point::new(50.0, 20.0), Point::new(300.0, 20.0)),
        link(11, 2, 3, Point::new(350.0, 20.0), Point::new(400.0, 20.0)),
    ]
    .into_iter()
    .collect();

    let engine = Engine::default();
    let request = ShiftRequest::shrink(id(1), id(2), id(10), Direction::Right);
    let ShiftOutcome::Applied { moved, offset } = engine.shift(&mut drawing, &request) else {
        panic!("nothing stays behind to collide with");
    };

    assert_eq!(moved, vec![id(2), id(3)]);
    assert_approx_eq!(f64, offset.x(), -125.0);
    assert_approx_eq!(f64, x_of(&drawing, 1), 0.0);
    assert_approx_eq!(f64, x_of(&drawing, 2), 175.0);
    assert_approx_eq!(f64, x_of(&drawing, 3), 275.0);
    assert!(drawing.is_dirty(id(3)));
}

#[test]
fn test_chain_through_connector() {
    let array = ConnectorArrayList::new(None, [Some(id(1)), Some(id(3))]);
    let drawing: Drawing = [
        DrawingObject::shape(id(1), Rect::new(0.0, 0.0, 50.0, 40.0)).with_hook(Hook::new(id(2))),
        DrawingObject::connector(
            id(2),
            Rect::new(0.0, 60.0, 300.0, 10.0),
            ConnectorData::new(array),
        ),
        DrawingObject::shape(id(3), Rect::new(200.0, 0.0, 50.0, 40.0)).with_hook(Hook::new(id(2))),
    ]
    .into_iter()
    .collect();

    let engine = Engine::default();
    for start in [1, 3] {
        let mut component: Vec<_> = engine
            .component(&drawing, id(start), None)
            .into_iter()
            .collect();
        component.sort();
        assert_eq!(component, vec![id(1), id(2), id(3)], "walk from {start}");
    }
}

#[test]
fn test_dense_container_navigation() {
    let members = [1, 2, 3];
    let list = ContainerList::dense(members.map(id));
    let mut drawing: Drawing = members
        .into_iter()
        .map(|raw| {
            DrawingObject::shape(id(raw), Rect::new(10.0, 10.0, 20.0, 20.0))
                .with_hook(Hook::new(id(100)))
        })
        .collect();
    drawing.insert(DrawingObject::shape_with(
        id(100),
        Rect::new(0.0, 0.0, 200.0, 200.0),
        ShapeData::new().with_container(list),
    ));

    let engine = Engine::default();
    assert_eq!(engine.next_selection(&drawing, id(2)), Some(id(1)));
    assert_eq!(engine.next_selection(&drawing, id(1)), Some(id(2)));
    assert_eq!(engine.next_selection(&drawing, id(3)), Some(id(2)));

    let mut single: Drawing = [DrawingObject::shape(id(1), Rect::default())
        .with_hook(Hook::new(id(100)))]
    .into_iter()
    .collect();
    single.insert(DrawingObject::shape_with(
        id(100),
        Rect::new(0.0, 0.0, 200.0, 200.0),
        ShapeData::new().with_container(ContainerList::dense([id(1)])),
    ));
    assert_eq!(engine.next_selection(&single, id(1)), None);
}

#[test]
fn test_tree_top_marks_and_reports_cycles() {
    let mut drawing: Drawing = [
        DrawingObject::connector(
            id(1),
            Rect::new(0.0, 100.0, 400.0, 10.0),
            ConnectorData::new(ConnectorArrayList::default()),
        ),
        DrawingObject::shape(id(2), Rect::new(0.0, 0.0, 50.0, 40.0)).with_hook(Hook::new(id(1))),
    ]
    .into_iter()
    .collect();

    let engine = Engine::default();
    let top = engine.tree_top(&mut drawing, id(2), true).expect("acyclic");
    assert!(top.found_tree());
    assert_eq!(top.top_connector(), Some(id(1)));
    assert_eq!(top.level(), Some(1));
    assert!(drawing.is_dirty(id(1)));

    let mut looped: Drawing = [
        DrawingObject::shape(id(1), Rect::default()).with_hook(Hook::new(id(2))),
        DrawingObject::shape(id(2), Rect::default()).with_hook(Hook::new(id(1))),
    ]
    .into_iter()
    .collect();
    let result = engine.tree_top(&mut looped, id(1), true);
    assert!(matches!(result, Err(PlenumError::HookCycle(_))));
    assert!(looped.take_dirty().is_empty());
}

#[test]
fn test_config_file_drives_spacing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("plenum.toml");
    fs::write(
        &path,
        "[spacing]\nhorizontal_array_width = 100.0\n\n[walls]\nhit_tolerance = 2.0\n",
    )
    .expect("Failed to write config");

    let config = load_config(&path).expect("Failed to load config");
    assert_approx_eq!(f64, config.walls().hit_tolerance(), 2.0);
    let engine = Engine::new(config);

    let mut drawing: Drawing = [
        DrawingObject::shape(id(1), Rect::new(0.0, 0.0, 50.0, 40.0)),
        DrawingObject::shape(id(2), Rect::new(200.0, 0.0, 50.0, 40.0)),
        link(3, 1, 2, Point::new(50.0, 20.0), Point::new(200.0, 20.0)),
    ]
    .into_iter()
    .collect();
    let request = ShiftRequest::insert(id(1), id(2), id(3), Direction::Right);
    assert!(engine.shift(&mut drawing, &request).is_applied());
    assert_approx_eq!(f64, x_of(&drawing, 2), 350.0);
}

#[test]
fn test_missing_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let result = load_config(temp_dir.path().join("absent.toml"));
    assert!(matches!(result, Err(PlenumError::Config(_))));
}

#[test]
fn test_invalid_config_text() {
    let result = AppConfig::from_toml_str("[walls]\nuse_inches = \"yes\"\n");
    assert!(matches!(result, Err(PlenumError::Config(_))));
}

#[test]
fn test_wall_editing_session() {
    let room = PolyLine::closed(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ])
    .expect("valid room");
    let drawing: Drawing = [DrawingObject::wall(id(1), room)].into_iter().collect();

    let engine = Engine::default();
    let mut canvas = EditorCanvas::new(drawing, engine.config().walls());
    let mut tool = engine.wall_tool();

    // Draw one wall, then end the draw.
    tool.start_adding_walls(&mut canvas).expect("draw starts");
    let drawn = canvas
        .finish_wall(vec![Point::new(200.0, 0.0), Point::new(200.0, 100.0)])
        .expect("valid wall")
        .expect("draw in progress");
    assert_eq!(drawn, id(2));
    tool.post_object_draw(&mut canvas, DrawTrigger::Release)
        .expect("next segment starts");
    tool.post_object_draw(&mut canvas, DrawTrigger::End)
        .expect("stopping never fails");
    assert_eq!(tool.mode(), DrawMode::Idle);
    assert_eq!(canvas.edit_mode(), EditMode::Default);

    // Open the room along its top edge.
    assert_eq!(tool.start_split_wall(&mut canvas), 2);
    let changed = tool
        .complete_gesture(&mut canvas, id(1), Point::new(50.0, 2.0))
        .expect("split succeeds");
    assert!(changed);
    assert_eq!(tool.mode(), DrawMode::Idle);

    let opened = canvas
        .object(id(1))
        .and_then(DrawingObject::as_line)
        .and_then(|line| line.polyline())
        .expect("still a wall");
    assert!(!opened.is_closed());
    assert_eq!(opened.points()[0], Point::new(100.0, 0.0));

    // A foreign edit mode ends any armed gesture.
    tool.start_add_corner(&mut canvas);
    assert!(tool.notify_edit_mode(&mut canvas, EditMode::Text));
    assert_eq!(tool.mode(), DrawMode::Idle);
    assert_eq!(canvas.armed_count(), 0);
    assert!(canvas.drawing().is_dirty(id(1)));
}
