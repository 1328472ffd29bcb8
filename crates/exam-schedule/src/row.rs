//! One raw row of the schedule export.

/// A spreadsheet row as column name → cell text, in the order the columns
/// appear in the source header. Column order matters: the student roster is
/// read from the trailing columns left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. A repeated column name keeps its first value for
    /// [`RawRow::get`] but still contributes to [`RawRow::cells`].
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Cell text for `column`, if the row has that column at all.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Overwrite the first cell named `column`. Returns `false` when the row
    /// has no such column.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> bool {
        match self.cells.iter_mut().find(|(name, _)| name == column) {
            Some((_, cell)) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// All cells in column order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
