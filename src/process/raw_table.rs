/// Rows exactly as scraped from the results table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Header labels as they appear on the page.
    pub headers: Vec<String>,
    /// Each data row, one cleaned string per field. Rows may be shorter than
    /// `headers` where the page merges cells.
    pub rows: Vec<Vec<String>>,
}
