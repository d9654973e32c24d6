//! Core types and traits for lunar panels.
//!
//! This crate provides the vocabulary shared by the editor and its hosts:
//! geometry and colors, palette categories, input keys, and the capability
//! traits (`Ui`, `Clock`) through which a panel draws itself and reads input.

pub mod clock;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod panel;
pub mod ui;

pub use clock::{Clock, ManualClock, SystemClock};
pub use geometry::{Color, Vec2};
pub use input::{Key, Modifiers, MouseButton};
pub use palette::PaletteIndex;
pub use panel::{Panel, PanelId, PanelList};
pub use ui::Ui;
