use std::collections::BTreeMap;

/// Error messages keyed by 1-based line number.
///
/// Markers follow their line when lines are inserted or removed above them and
/// disappear together with a removed line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMarkers {
    markers: BTreeMap<usize, String>,
}

impl ErrorMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, line: usize, message: impl Into<String>) {
        self.markers.insert(line, message.into());
    }

    /// Message for a 1-based line number.
    pub fn get(&self, line: usize) -> Option<&str> {
        self.markers.get(&line).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.markers.iter().map(|(line, msg)| (*line, msg.as_str()))
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// A line was inserted at 0-based `index`.
    pub(crate) fn shift_for_insert(&mut self, index: usize) {
        self.markers = std::mem::take(&mut self.markers)
            .into_iter()
            .map(|(line, msg)| {
                if line.saturating_sub(1) >= index {
                    (line + 1, msg)
                } else {
                    (line, msg)
                }
            })
            .collect();
    }

    /// Move the marker of 0-based line `from` onto line `to` unless `to`
    /// already has one.
    pub(crate) fn carry(&mut self, from: usize, to: usize) {
        if self.markers.contains_key(&(to + 1)) {
            return;
        }
        if let Some(msg) = self.markers.remove(&(from + 1)) {
            self.markers.insert(to + 1, msg);
        }
    }

    /// Lines `[start, end)` (0-based) were removed.
    pub(crate) fn shift_for_remove(&mut self, start: usize, end: usize) {
        let count = end - start;
        self.markers = std::mem::take(&mut self.markers)
            .into_iter()
            .filter_map(|(line, msg)| {
                let index = line.saturating_sub(1);
                if index < start {
                    Some((line, msg))
                } else if index < end {
                    None
                } else {
                    Some((line - count, msg))
                }
            })
            .collect();
    }
}

impl FromIterator<(usize, String)> for ErrorMarkers {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        Self {
            markers: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<usize, String>> for ErrorMarkers {
    fn from(markers: BTreeMap<usize, String>) -> Self {
        Self { markers }
    }
}
