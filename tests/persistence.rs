use std::fs;

use egui::{Color32, Pos2};
use kid_studio::config::CanvasConfig;
use kid_studio::state::{DrawingSnapshot, DrawingState, DrawingStore, ToolMode};
use kid_studio::{BrushDescriptor, BrushStyle, PatternShape};

fn draw(state: &mut DrawingState, points: &[Pos2]) {
    state.begin_stroke(points[0]);
    for p in &points[1..] {
        state.continue_stroke(*p);
    }
    state.end_stroke();
}

#[test]
fn test_drawing_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = DrawingState::with_store(CanvasConfig::default(), DrawingStore::new(dir.path()));

    // single point stroke
    state.set_color(Color32::from_rgb(31, 117, 254));
    draw(&mut state, &[Pos2::new(5.0, 5.0)]);
    // zero opacity stroke
    state.set_opacity(0.0);
    draw(&mut state, &[Pos2::new(0.0, 0.0), Pos2::new(10.5, 3.25)]);
    state.set_opacity(0.6);
    state.place_stamp(Pos2::new(50.0, 60.0));
    state.set_tool(ToolMode::Eraser);
    draw(&mut state, &[Pos2::new(200.0, 200.0), Pos2::new(210.0, 200.0)]);
    state.set_background_color(Color32::from_rgb(200, 230, 255));

    let before = state.snapshot();
    let reloaded = DrawingState::with_store(CanvasConfig::default(), DrawingStore::new(dir.path()));

    assert_eq!(reloaded.strokes(), state.strokes());
    assert_eq!(reloaded.stamps().len(), 1);
    let (stamp, original) = (&reloaded.stamps()[0], &state.stamps()[0]);
    assert_eq!(stamp.emoji, original.emoji);
    assert_eq!(stamp.location, original.location);
    assert_eq!(stamp.size, original.size);
    assert_eq!(stamp.sequence, original.sequence);
    assert_eq!(reloaded.settings().background_color, Color32::from_rgb(200, 230, 255));
    assert_eq!(reloaded.snapshot(), before);
    assert_eq!(reloaded.strokes()[1].opacity(), 0.0);
}

#[test]
fn test_atomic_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = DrawingState::with_store(CanvasConfig::default(), DrawingStore::new(dir.path()));
    state.place_stamp(Pos2::new(1.0, 1.0));

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["current_drawing.json".to_owned()]);
}

#[test]
fn test_missing_or_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let state = DrawingState::with_store(CanvasConfig::default(), DrawingStore::new(dir.path()));
    assert!(state.strokes().is_empty());

    fs::write(dir.path().join("current_drawing.json"), "{ not json").unwrap();
    fs::write(dir.path().join("brush_pool.json"), "[1, 2").unwrap();
    let state = DrawingState::with_store(CanvasConfig::default(), DrawingStore::new(dir.path()));
    assert!(state.strokes().is_empty());
    assert!(state.stamps().is_empty());
    assert_eq!(state.pool().brushes().len(), BrushDescriptor::system_brushes().len());
}

#[test]
fn test_user_brushes_and_slots_persist_without_system_brushes() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = DrawingState::with_store(CanvasConfig::default(), DrawingStore::new(dir.path()));
    let brush = BrushDescriptor::new_user("Bugs", "🐞", BrushStyle::PatternStamp, Some(PatternShape::Dot), 2.0, 0.5);
    let id = brush.id;
    state.add_brush(brush);
    state.assign_brush(id, 0);
    state.assign_brush(id, 9);
    state.set_opacity(0.4);

    let json = fs::read_to_string(dir.path().join("brush_pool.json")).unwrap();
    assert!(!json.contains("\"isSystem\": true"));

    let reloaded = DrawingState::with_store(CanvasConfig::default(), DrawingStore::new(dir.path()));
    assert_eq!(reloaded.pool().user_brushes().count(), 1);
    assert_eq!(reloaded.brush_for_slot(0).map(|b| b.id), Some(id));
    assert!(reloaded.brush_for_slot(1).is_none());
    assert!((reloaded.settings().brush_opacity - 0.4).abs() < 1e-6);
    // system brushes come first
    assert!(reloaded.pool().brushes()[0].is_system);
}

#[test]
fn test_snapshot_json_shape() {
    let mut state = DrawingState::new(CanvasConfig::default());
    draw(&mut state, &[Pos2::new(1.0, 2.0), Pos2::new(3.0, 4.0)]);
    let json = state.snapshot().to_json().unwrap();
    for key in ["\"strokes\"", "\"points\"", "\"brushSize\"", "\"opacity\"", "\"backgroundColor\"", "\"stamps\""] {
        assert!(json.contains(key), "missing {key} in {json}");
    }
    let parsed = DrawingSnapshot::from_json(&json).unwrap();
    assert_eq!(parsed.restore().strokes, state.strokes());
}
