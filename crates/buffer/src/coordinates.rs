/// A (line, display column) position.
///
/// Ordering is lexicographic: first by line, then by column. The column is a
/// display offset, so a tab may span several columns and a multi-byte UTF-8
/// sequence counts as one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinates {
    pub line: usize,
    pub column: usize,
}

impl Coordinates {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        assert!(Coordinates::new(0, 9) < Coordinates::new(1, 0));
        assert!(Coordinates::new(2, 3) < Coordinates::new(2, 4));
        assert_eq!(
            Coordinates::new(1, 1).max(Coordinates::new(0, 7)),
            Coordinates::new(1, 1)
        );
    }
}
