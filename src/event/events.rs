use egui::Pos2;

/// Things that happened in the cores which the host may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum StudioEvent {
    StrokeCommitted {
        point_count: usize,
    },
    /// An in-progress stroke was dropped, e.g. because a pinch started.
    StrokeDiscarded,
    StampPlaced {
        emoji: String,
        location: Pos2,
    },
    StampsErased {
        count: usize,
    },
    Undone,
    Redone,
    Cleared,
    TilePopped {
        index: usize,
    },
    LetterCompleted {
        index: usize,
        letter: char,
    },
    LetterAdvanced {
        index: usize,
    },
    WordCompleted {
        word: String,
    },
    /// Request for the host's speech synthesizer.
    Speak {
        text: String,
    },
}
