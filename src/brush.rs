use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The rendering algorithm a brush uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrushStyle {
    Crayon,
    Marker,
    Chalk,
    PatternStamp,
}

impl BrushStyle {
    pub const ALL: [BrushStyle; 4] = [
        BrushStyle::Crayon,
        BrushStyle::Marker,
        BrushStyle::Chalk,
        BrushStyle::PatternStamp,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            BrushStyle::Crayon => "🖍",
            BrushStyle::Marker => "🖊",
            BrushStyle::Chalk => "🩫",
            BrushStyle::PatternStamp => "🔵",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BrushStyle::Crayon => "Crayon",
            BrushStyle::Marker => "Marker",
            BrushStyle::Chalk => "Chalk",
            BrushStyle::PatternStamp => "Pattern",
        }
    }
}

/// Shapes a pattern-stamp brush can place along a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternShape {
    Star,
    Heart,
    Dot,
    Circle,
    Square,
    Diamond,
    Flower,
    Triangle,
}

impl PatternShape {
    pub const ALL: [PatternShape; 8] = [
        PatternShape::Star,
        PatternShape::Heart,
        PatternShape::Dot,
        PatternShape::Circle,
        PatternShape::Square,
        PatternShape::Diamond,
        PatternShape::Flower,
        PatternShape::Triangle,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            PatternShape::Star => "⭐",
            PatternShape::Heart => "❤",
            PatternShape::Dot => "•",
            PatternShape::Circle => "⭕",
            PatternShape::Square => "■",
            PatternShape::Diamond => "◆",
            PatternShape::Flower => "🌸",
            PatternShape::Triangle => "▲",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PatternShape::Star => "Star",
            PatternShape::Heart => "Heart",
            PatternShape::Dot => "Dot",
            PatternShape::Circle => "Circle",
            PatternShape::Square => "Square",
            PatternShape::Diamond => "Diamond",
            PatternShape::Flower => "Flower",
            PatternShape::Triangle => "Triangle",
        }
    }
}

pub const MIN_STAMP_SPACING: f32 = 0.5;
pub const MAX_STAMP_SPACING: f32 = 3.0;

/// A reusable brush template: the style algorithm plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushDescriptor {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub base_style: BrushStyle,
    #[serde(default)]
    pub pattern_shape: Option<PatternShape>,
    /// Multiplier of brush size, 0.5 to 3.0.
    pub stamp_spacing: f32,
    /// 0.0 is uniform, 1.0 is wild.
    pub size_variation: f32,
    #[serde(default)]
    pub is_system: bool,
}

const fn system_id(n: u128) -> Uuid {
    Uuid::from_u128(0x1000_0000_0000_0000_0000_0000_0000_0000 | n)
}

pub const ERASER_ID: Uuid = Uuid::nil();

impl BrushDescriptor {
    /// Creates a user brush with a fresh id. Parameters are clamped to their valid ranges.
    pub fn new_user(
        name: impl Into<String>,
        icon: impl Into<String>,
        base_style: BrushStyle,
        pattern_shape: Option<PatternShape>,
        stamp_spacing: f32,
        size_variation: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            base_style,
            pattern_shape,
            stamp_spacing: stamp_spacing.clamp(MIN_STAMP_SPACING, MAX_STAMP_SPACING),
            size_variation: size_variation.clamp(0.0, 1.0),
            is_system: false,
        }
    }

    fn system(
        n: u128,
        name: &str,
        icon: &str,
        base_style: BrushStyle,
        pattern_shape: Option<PatternShape>,
        stamp_spacing: f32,
        size_variation: f32,
    ) -> Self {
        Self {
            id: system_id(n),
            name: name.to_owned(),
            icon: icon.to_owned(),
            base_style,
            pattern_shape,
            stamp_spacing,
            size_variation,
            is_system: true,
        }
    }

    /// The fixed set of built-in brushes. Ids are stable so slot assignments
    /// survive restarts.
    pub fn system_brushes() -> Vec<BrushDescriptor> {
        use BrushStyle::*;
        use PatternShape as S;
        vec![
            Self::system(1, "Crayon", "🖍", Crayon, None, 1.0, 0.0),
            Self::system(2, "Marker", "🖊", Marker, None, 1.0, 0.0),
            Self::system(3, "Sparkle", "✨", PatternStamp, Some(S::Star), 1.2, 0.0),
            Self::system(4, "Chalk", "🩫", Chalk, None, 1.0, 0.0),
            Self::system(5, "Hearts", "❤", PatternStamp, Some(S::Heart), 1.3, 0.0),
            Self::system(6, "Dots", "•", PatternStamp, Some(S::Dot), 0.9, 0.0),
            Self::system(7, "Flowers", "🌸", PatternStamp, Some(S::Flower), 1.4, 0.2),
            Self::system(8, "Confetti", "🎊", PatternStamp, Some(S::Square), 0.8, 0.6),
        ]
    }

    /// The eraser never enters the pool.
    pub fn eraser() -> Self {
        Self {
            id: ERASER_ID,
            name: "Eraser".to_owned(),
            icon: "⬜".to_owned(),
            base_style: BrushStyle::Marker,
            pattern_shape: None,
            stamp_spacing: 1.0,
            size_variation: 0.0,
            is_system: true,
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.id == ERASER_ID
    }

    /// Opacity multiplier for textured styles. User brushes reuse
    /// `size_variation` as a "character" knob; system brushes are fixed at 1.
    pub fn character_scale(&self) -> f32 {
        if self.is_system {
            1.0
        } else {
            (0.4 + self.size_variation * 1.2).clamp(0.1, 1.6)
        }
    }
}

pub const SLOT_COUNT: usize = 3;

/// System brushes plus user-created brushes, and the quick-access slots.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushPool {
    brushes: Vec<BrushDescriptor>,
    slots: [Option<Uuid>; SLOT_COUNT],
}

impl Default for BrushPool {
    fn default() -> Self {
        Self::with_user_brushes(Vec::new())
    }
}

impl BrushPool {
    /// Builds a pool with the system brushes first. Any system-flagged entries
    /// in `user` are dropped.
    pub fn with_user_brushes(user: Vec<BrushDescriptor>) -> Self {
        let mut brushes = BrushDescriptor::system_brushes();
        brushes.extend(user.into_iter().filter(|b| !b.is_system));
        Self {
            brushes,
            slots: [None; SLOT_COUNT],
        }
    }

    pub fn brushes(&self) -> &[BrushDescriptor] {
        &self.brushes
    }

    pub fn user_brushes(&self) -> impl Iterator<Item = &BrushDescriptor> {
        self.brushes.iter().filter(|b| !b.is_system)
    }

    pub fn get(&self, id: Uuid) -> Option<&BrushDescriptor> {
        self.brushes.iter().find(|b| b.id == id)
    }

    pub fn add(&mut self, brush: BrushDescriptor) {
        self.brushes.push(brush);
    }

    /// Removes a user brush and clears any slot holding it. Returns false for
    /// system brushes and unknown ids.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.brushes.len();
        self.brushes.retain(|b| b.id != id || b.is_system);
        if self.brushes.len() == before {
            return false;
        }
        for slot in self.slots.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        true
    }

    /// Out-of-range slots are ignored.
    pub fn assign(&mut self, id: Uuid, slot: usize) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = Some(id);
                true
            }
            None => false,
        }
    }

    pub fn slots(&self) -> [Option<Uuid>; SLOT_COUNT] {
        self.slots
    }

    pub fn set_slots(&mut self, slots: [Option<Uuid>; SLOT_COUNT]) {
        self.slots = slots;
    }

    pub fn brush_for_slot(&self, slot: usize) -> Option<&BrushDescriptor> {
        let id = (*self.slots.get(slot)?)?;
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_brush_ids_are_stable() {
        let a = BrushDescriptor::system_brushes();
        let b = BrushDescriptor::system_brushes();
        assert_eq!(a, b);
        assert_eq!(
            a[0].id.to_string(),
            "10000000-0000-0000-0000-000000000001"
        );
        assert!(a.iter().all(|b| b.is_system));
    }

    #[test]
    fn test_eraser_identity() {
        let eraser = BrushDescriptor::eraser();
        assert!(eraser.is_eraser());
        assert!(!BrushDescriptor::system_brushes()[1].is_eraser());
    }

    #[test]
    fn test_character_scale() {
        let system = &BrushDescriptor::system_brushes()[0];
        assert_eq!(system.character_scale(), 1.0);

        let wild = BrushDescriptor::new_user("Wild", "🌀", BrushStyle::Crayon, None, 1.0, 1.0);
        assert!((wild.character_scale() - 1.6).abs() < 1e-6);
        let calm = BrushDescriptor::new_user("Calm", "🌀", BrushStyle::Crayon, None, 1.0, 0.0);
        assert!((calm.character_scale() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_user_brush_clamps_parameters() {
        let brush = BrushDescriptor::new_user("x", "x", BrushStyle::PatternStamp, None, 9.0, -1.0);
        assert_eq!(brush.stamp_spacing, MAX_STAMP_SPACING);
        assert_eq!(brush.size_variation, 0.0);
    }

    #[test]
    fn test_pool_delete_only_user_brushes() {
        let user = BrushDescriptor::new_user("Mine", "🐸", BrushStyle::Chalk, None, 1.0, 0.5);
        let mut pool = BrushPool::with_user_brushes(vec![user.clone()]);
        let system_id = pool.brushes()[0].id;

        assert!(!pool.remove(system_id));
        assert!(pool.get(system_id).is_some());

        assert!(pool.assign(user.id, 2));
        assert!(pool.remove(user.id));
        assert!(pool.get(user.id).is_none());
        assert_eq!(pool.slots()[2], None);
    }

    #[test]
    fn test_pool_slot_out_of_range_is_ignored() {
        let mut pool = BrushPool::default();
        let id = pool.brushes()[1].id;
        assert!(!pool.assign(id, 3));
        assert_eq!(pool.slots(), [None; SLOT_COUNT]);
        assert!(pool.assign(id, 0));
        assert_eq!(pool.brush_for_slot(0).map(|b| b.name.as_str()), Some("Marker"));
        assert!(pool.brush_for_slot(7).is_none());
    }

    #[test]
    fn test_pool_drops_system_flagged_user_entries() {
        let mut sneaky = BrushDescriptor::system_brushes()[0].clone();
        sneaky.name = "Dup".into();
        let pool = BrushPool::with_user_brushes(vec![sneaky]);
        assert_eq!(pool.brushes().len(), BrushDescriptor::system_brushes().len());
        assert_eq!(pool.user_brushes().count(), 0);
    }
}
