use lunar_core::PaletteIndex;

/// One stored byte with its style tag.
///
/// Multi-byte UTF-8 sequences occupy consecutive glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub byte: u8,
    pub color: PaletteIndex,
    /// Inside a single-line comment.
    pub comment: bool,
    /// Inside a multi-line comment.
    pub multi_line_comment: bool,
}

impl Glyph {
    pub fn new(byte: u8, color: PaletteIndex) -> Self {
        Self {
            byte,
            color,
            comment: false,
            multi_line_comment: false,
        }
    }

    /// Final paint category: comment flags win over the token color.
    pub fn resolved_color(&self) -> PaletteIndex {
        if self.comment {
            PaletteIndex::Comment
        } else if self.multi_line_comment {
            PaletteIndex::MultiLineComment
        } else {
            self.color
        }
    }
}

/// A line of glyphs in document order.
pub type Line = Vec<Glyph>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_color_precedence() {
        let mut glyph = Glyph::new(b'x', PaletteIndex::Identifier);
        assert_eq!(glyph.resolved_color(), PaletteIndex::Identifier);
        glyph.multi_line_comment = true;
        assert_eq!(glyph.resolved_color(), PaletteIndex::MultiLineComment);
        glyph.comment = true;
        assert_eq!(glyph.resolved_color(), PaletteIndex::Comment);
    }
}
