use std::fs;
use std::path::{Path, PathBuf};

use egui::{Color32, Pos2, pos2};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brush::{BrushDescriptor, BrushPool, SLOT_COUNT};
use crate::error::PersistenceResult;
use crate::stroke::{StampPlacement, Stroke};

const DRAWING_DOCUMENT: &str = "current_drawing";
const SETTINGS_DOCUMENT: &str = "brush_pool";

fn full_opacity() -> f32 {
    1.0
}

/// sRGB colour with unit-range channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl From<Color32> for ColorRecord {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let unit = |v: u8| v as f64 / 255.0;
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }
}

impl From<ColorRecord> for Color32 {
    fn from(record: ColorRecord) -> Self {
        let byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Color32::from_rgba_unmultiplied(byte(record.r), byte(record.g), byte(record.b), byte(record.a))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Pos2> for PointRecord {
    fn from(p: Pos2) -> Self {
        Self {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

impl From<PointRecord> for Pos2 {
    fn from(p: PointRecord) -> Self {
        pos2(p.x as f32, p.y as f32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub sequence: u64,
    pub points: Vec<PointRecord>,
    pub color: ColorRecord,
    pub brush_size: f32,
    pub brush: BrushDescriptor,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
}

impl From<&Stroke> for StrokeRecord {
    fn from(stroke: &Stroke) -> Self {
        Self {
            id: stroke.id(),
            sequence: stroke.sequence(),
            points: stroke.points().iter().copied().map(PointRecord::from).collect(),
            color: stroke.color().into(),
            brush_size: stroke.brush_size(),
            brush: stroke.brush().clone(),
            opacity: stroke.opacity(),
        }
    }
}

impl StrokeRecord {
    /// Strokes without points cannot be drawn and are dropped.
    fn into_stroke(self) -> Option<Stroke> {
        if self.points.is_empty() {
            return None;
        }
        Some(Stroke::from_parts(
            self.id,
            self.sequence,
            self.points.into_iter().map(Pos2::from).collect(),
            self.color.into(),
            self.brush_size,
            self.brush,
            self.opacity,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampRecord {
    pub emoji: String,
    pub x: f64,
    pub y: f64,
    pub size: f32,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub sequence: u64,
}

impl From<&StampPlacement> for StampRecord {
    fn from(stamp: &StampPlacement) -> Self {
        Self {
            emoji: stamp.emoji.clone(),
            x: stamp.location.x as f64,
            y: stamp.location.y as f64,
            size: stamp.size,
            opacity: stamp.opacity,
            sequence: stamp.sequence,
        }
    }
}

impl From<StampRecord> for StampPlacement {
    fn from(record: StampRecord) -> Self {
        StampPlacement::new(
            record.emoji,
            pos2(record.x as f32, record.y as f32),
            record.size,
            record.opacity,
            record.sequence,
        )
    }
}

/// The drawing as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingSnapshot {
    pub strokes: Vec<StrokeRecord>,
    pub stamps: Vec<StampRecord>,
    pub background_color: ColorRecord,
}

/// A restored drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredDrawing {
    pub strokes: Vec<Stroke>,
    pub stamps: Vec<StampPlacement>,
    pub background: Color32,
}

impl DrawingSnapshot {
    pub fn capture(strokes: &[Stroke], stamps: &[StampPlacement], background: Color32) -> Self {
        Self {
            strokes: strokes.iter().map(StrokeRecord::from).collect(),
            stamps: stamps.iter().map(StampRecord::from).collect(),
            background_color: background.into(),
        }
    }

    pub fn restore(self) -> RestoredDrawing {
        RestoredDrawing {
            strokes: self.strokes.into_iter().filter_map(StrokeRecord::into_stroke).collect(),
            stamps: self.stamps.into_iter().map(StampPlacement::from).collect(),
            background: self.background_color.into(),
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Brush pool and tool settings. System brushes are never written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub user_brushes: Vec<BrushDescriptor>,
    #[serde(default)]
    pub slot_assignments: Vec<Option<Uuid>>,
    #[serde(default = "full_opacity")]
    pub brush_opacity: f32,
}

impl SettingsRecord {
    pub fn capture(pool: &BrushPool, brush_opacity: f32) -> Self {
        Self {
            user_brushes: pool.user_brushes().cloned().collect(),
            slot_assignments: pool.slots().to_vec(),
            brush_opacity,
        }
    }

    /// Rebuilds the pool with system brushes prepended. A slot list of the
    /// wrong length is ignored; a non-positive opacity falls back to 1.
    pub fn restore(self) -> (BrushPool, f32) {
        let mut pool = BrushPool::with_user_brushes(self.user_brushes);
        if let Ok(slots) = <[Option<Uuid>; SLOT_COUNT]>::try_from(self.slot_assignments) {
            pool.set_slots(slots);
        }
        let opacity = if self.brush_opacity > 0.0 {
            self.brush_opacity.min(1.0)
        } else {
            1.0
        };
        (pool, opacity)
    }
}

/// JSON documents in one directory, each written atomically.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Writes to a temporary sibling then renames it over the target.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        let target = self.path(name);
        let temp = self.dir.join(format!("{name}.json.tmp"));
        fs::write(&temp, json)?;
        fs::rename(&temp, &target)?;
        Ok(())
    }

    /// `Ok(None)` when the document does not exist yet.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> PersistenceResult<Option<T>> {
        let path = self.path(name);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }
}

/// Where the coloring canvas keeps its drawing and brush settings.
#[derive(Debug, Clone)]
pub struct DrawingStore {
    store: JsonStore,
}

impl DrawingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(dir),
        }
    }

    pub fn save_drawing(&self, snapshot: &DrawingSnapshot) -> PersistenceResult<()> {
        self.store.save(DRAWING_DOCUMENT, snapshot)
    }

    pub fn load_drawing(&self) -> PersistenceResult<Option<DrawingSnapshot>> {
        self.store.load(DRAWING_DOCUMENT)
    }

    pub fn save_settings(&self, settings: &SettingsRecord) -> PersistenceResult<()> {
        self.store.save(SETTINGS_DOCUMENT, settings)
    }

    pub fn load_settings(&self) -> PersistenceResult<Option<SettingsRecord>> {
        self.store.load(SETTINGS_DOCUMENT)
    }

    pub fn dir(&self) -> &Path {
        self.store.dir()
    }
}
