//! The output feature table: one row per onset, fixed column schema.

/// Ordered table of per-event feature rows.
///
/// The first two columns are always `onset` and `offset`; row `i`
/// corresponds to the `i`-th onset passed to [`assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<f32>>,
}

impl FeatureTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, each aligned with [`FeatureTable::columns`].
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// One row by index.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        self.rows.get(i).map(|r| r.as_slice())
    }

    /// Values of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<f32>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// Single cell by row index and column name.
    pub fn get(&self, row: usize, name: &str) -> Option<f32> {
        let idx = self.columns.iter().position(|c| c == name)?;
        self.rows.get(row).map(|r| r[idx])
    }
}

/// Merge per-chunk feature rows with their onsets into the final table.
///
/// Prepends the `onset` and `offset` columns (offset = onset +
/// `sample_len`) and renumbers rows contiguously from 0. `rows.len()`
/// must equal `onsets.len()`; with zero onsets the table has zero rows
/// but the complete column schema.
///
/// # Arguments
/// * `onsets` - Ascending onset times in seconds
/// * `sample_len` - Chunk duration used to derive the offset column
/// * `schema` - Feature column names, aligned with each row's values
/// * `rows` - One feature-value row per onset, in onset order
pub fn assemble(
    onsets: &[f32],
    sample_len: f32,
    schema: Vec<String>,
    rows: Vec<Vec<f32>>,
) -> crate::Result<FeatureTable> {
    if rows.len() != onsets.len() {
        return Err(crate::Error::InvalidSize {
            name: "rows",
            value: rows.len(),
            reason: "must match the number of onsets",
        });
    }

    let mut columns = Vec::with_capacity(schema.len() + 2);
    columns.push("onset".to_string());
    columns.push("offset".to_string());
    columns.extend(schema);

    let mut out_rows = Vec::with_capacity(rows.len());
    for (onset, values) in onsets.iter().zip(rows) {
        if values.len() + 2 != columns.len() {
            return Err(crate::Error::InvalidSize {
                name: "row",
                value: values.len(),
                reason: "must match the feature schema",
            });
        }
        let mut row = Vec::with_capacity(columns.len());
        row.push(*onset);
        row.push(onset + sample_len);
        row.extend(values);
        out_rows.push(row);
    }

    Ok(FeatureTable {
        columns,
        rows: out_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_column_order_starts_with_onset_offset() {
        let table = assemble(&[1.0], 0.5, schema(), vec![vec![10.0, 20.0]]).unwrap();
        assert_eq!(table.columns()[0], "onset");
        assert_eq!(table.columns()[1], "offset");
        assert_eq!(table.columns()[2], "a");
    }

    #[test]
    fn test_offset_is_onset_plus_sample_len() {
        let table = assemble(
            &[1.0, 3.0],
            1.0,
            schema(),
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
        )
        .unwrap();
        assert_eq!(table.column("offset").unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_row_onset_alignment() {
        let onsets = [0.5, 1.5, 2.5];
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let table = assemble(&onsets, 0.25, schema(), rows).unwrap();
        assert_eq!(table.len(), 3);
        for (i, &onset) in onsets.iter().enumerate() {
            assert_eq!(table.get(i, "onset"), Some(onset));
        }
        assert_eq!(table.get(1, "a"), Some(3.0));
    }

    #[test]
    fn test_empty_onsets_keep_schema() {
        let table = assemble(&[], 1.0, schema(), Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(
            table.columns(),
            &["onset", "offset", "a", "b"].map(String::from)
        );
        assert_eq!(table.column("a").unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn test_row_count_mismatch_errors() {
        assert!(assemble(&[1.0, 2.0], 1.0, schema(), vec![vec![0.0, 0.0]]).is_err());
    }

    #[test]
    fn test_row_width_mismatch_errors() {
        assert!(assemble(&[1.0], 1.0, schema(), vec![vec![0.0]]).is_err());
    }
}
