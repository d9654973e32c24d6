//! Palette color table.

use std::ops::Index;

use lunar_core::{Color, PaletteIndex};

/// One color per [`PaletteIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Theme name for display
    pub name: String,
    colors: [Color; PaletteIndex::COUNT],
}

impl Palette {
    /// Hardcoded dark palette, used as the base for partial themes and as
    /// fallback when a built-in theme fails to parse.
    pub fn fallback() -> Self {
        use PaletteIndex::*;
        let mut palette = Self {
            name: "default".to_string(),
            colors: [Color::WHITE; PaletteIndex::COUNT],
        };
        let table = [
            (Default, Color::rgb(124, 220, 240)),
            (PurpleKeyword, Color::rgb(197, 134, 192)),
            (BlueKeyword, Color::rgb(50, 122, 204)),
            (Number, Color::rgb(176, 182, 114)),
            (String, Color::rgb(214, 157, 133)),
            (CharLiteral, Color::rgb(214, 157, 133)),
            (Punctuation, Color::rgb(255, 255, 255)),
            (Identifier, Color::rgb(170, 170, 170)),
            (KnownFunction, Color::rgb(229, 235, 117)),
            (Comment, Color::rgb(87, 162, 57)),
            (MultiLineComment, Color::rgb(87, 162, 57)),
            (Background, Color::rgb(30, 30, 30)),
            (Cursor, Color::rgb(224, 224, 224)),
            (Selection, Color::rgba(58, 122, 186, 150)),
            (ErrorMarker, Color::rgba(221, 57, 50, 128)),
            (LineNumber, Color::rgb(43, 145, 175)),
            (CurrentLineFill, Color::rgba(0, 0, 0, 64)),
            (CurrentLineFillInactive, Color::rgba(128, 128, 128, 64)),
            (CurrentLineEdge, Color::rgba(160, 160, 160, 64)),
        ];
        for (index, color) in table {
            palette.set(index, color);
        }
        palette
    }

    pub fn get(&self, index: PaletteIndex) -> Color {
        self.colors[index.index()]
    }

    pub fn set(&mut self, index: PaletteIndex, color: Color) {
        self.colors[index.index()] = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Index<PaletteIndex> for Palette {
    type Output = Color;

    fn index(&self, index: PaletteIndex) -> &Color {
        &self.colors[index.index()]
    }
}
