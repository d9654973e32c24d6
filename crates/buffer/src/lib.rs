//! Glyph buffer for lunar.
//!
//! Text is stored as lines of raw UTF-8 bytes ("glyphs"), each tagged with a
//! palette category and comment flags. Positions are addressed by
//! [`Coordinates`] (line, display column); the buffer converts between display
//! columns and byte indices under UTF-8 and 4-column tab stops.

mod coordinates;
mod error_markers;
mod glyph;
mod history;
mod text_buffer;
pub mod utf8;
mod words;

pub use coordinates::Coordinates;
pub use error_markers::ErrorMarkers;
pub use glyph::{Glyph, Line};
pub use history::{EditorState, UndoLog, UndoRecord};
pub use text_buffer::{next_tab_stop, TextBuffer, TAB_SIZE};
