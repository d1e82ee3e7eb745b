/// One parent/child row of the composition sheet after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositionEdge {
    /// Zero-based data row index in the source sheet.
    pub row: usize,
    pub parent: String,
    pub child: String,
}

impl CompositionEdge {
    pub fn new(row: usize, parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            row,
            parent: parent.into(),
            child: child.into(),
        }
    }

    /// Spreadsheet line number of the row (header is line 1).
    pub fn line(&self) -> usize {
        self.row + 2
    }
}
