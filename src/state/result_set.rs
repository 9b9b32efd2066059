/// One row of extracted text fields
pub type Row = Vec<String>;

/// Ordered, header-first rows produced by one strategy run
///
/// Every row has the same number of fields as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Starts a result set whose first row holds the column labels
    pub fn with_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: vec![header.into_iter().map(Into::into).collect()],
        }
    }

    /// Appends a data row
    ///
    /// # Panics
    ///
    /// If the row's arity differs from the header's.
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Row = row.into_iter().map(Into::into).collect();
        assert_eq!(
            row.len(),
            self.arity(),
            "row arity must match the header"
        );
        self.rows.push(row);
    }

    pub fn header(&self) -> &Row {
        &self.rows[0]
    }

    /// Number of columns
    pub fn arity(&self) -> usize {
        self.rows[0].len()
    }

    /// All rows, header first
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Row] {
        &self.rows[1..]
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
