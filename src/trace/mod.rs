mod difficulty;
mod layout;
mod session;
mod tile;
mod transcript;

pub use difficulty::TraceDifficulty;
pub use layout::LetterLayout;
pub use session::{TracePhase, TraceSession};
pub use tile::{DragContext, TraceTile, required_fraction};
pub use transcript::extract_word;
