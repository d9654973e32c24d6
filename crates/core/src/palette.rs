//! Symbolic color categories assigned to glyphs and editor chrome.

/// Palette slot used by the colorizer and the renderer.
///
/// The discriminant doubles as the index into a theme's color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PaletteIndex {
    #[default]
    Default,
    PurpleKeyword,
    BlueKeyword,
    Number,
    String,
    CharLiteral,
    Punctuation,
    Identifier,
    KnownFunction,
    Comment,
    MultiLineComment,
    Background,
    Cursor,
    Selection,
    ErrorMarker,
    LineNumber,
    CurrentLineFill,
    CurrentLineFillInactive,
    CurrentLineEdge,
}

impl PaletteIndex {
    /// Number of palette slots.
    pub const COUNT: usize = 19;

    /// All slots in table order.
    pub const ALL: [PaletteIndex; Self::COUNT] = [
        PaletteIndex::Default,
        PaletteIndex::PurpleKeyword,
        PaletteIndex::BlueKeyword,
        PaletteIndex::Number,
        PaletteIndex::String,
        PaletteIndex::CharLiteral,
        PaletteIndex::Punctuation,
        PaletteIndex::Identifier,
        PaletteIndex::KnownFunction,
        PaletteIndex::Comment,
        PaletteIndex::MultiLineComment,
        PaletteIndex::Background,
        PaletteIndex::Cursor,
        PaletteIndex::Selection,
        PaletteIndex::ErrorMarker,
        PaletteIndex::LineNumber,
        PaletteIndex::CurrentLineFill,
        PaletteIndex::CurrentLineFillInactive,
        PaletteIndex::CurrentLineEdge,
    ];

    /// Position of this slot in the color table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case key used in theme files.
    pub fn key(self) -> &'static str {
        match self {
            PaletteIndex::Default => "default",
            PaletteIndex::PurpleKeyword => "purple_keyword",
            PaletteIndex::BlueKeyword => "blue_keyword",
            PaletteIndex::Number => "number",
            PaletteIndex::String => "string",
            PaletteIndex::CharLiteral => "char_literal",
            PaletteIndex::Punctuation => "punctuation",
            PaletteIndex::Identifier => "identifier",
            PaletteIndex::KnownFunction => "known_function",
            PaletteIndex::Comment => "comment",
            PaletteIndex::MultiLineComment => "multi_line_comment",
            PaletteIndex::Background => "background",
            PaletteIndex::Cursor => "cursor",
            PaletteIndex::Selection => "selection",
            PaletteIndex::ErrorMarker => "error_marker",
            PaletteIndex::LineNumber => "line_number",
            PaletteIndex::CurrentLineFill => "current_line_fill",
            PaletteIndex::CurrentLineFillInactive => "current_line_fill_inactive",
            PaletteIndex::CurrentLineEdge => "current_line_edge",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_discriminants() {
        for (i, slot) in PaletteIndex::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = PaletteIndex::ALL.iter().map(|p| p.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), PaletteIndex::COUNT);
    }
}
