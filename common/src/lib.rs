pub mod kills;
pub use kills::{KillEvent, KillLog, ParsedDemo};

pub mod highlights;
pub use highlights::{Highlight, HighlightResult, HighlightType};
