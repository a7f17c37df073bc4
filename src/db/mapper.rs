//! Result set to dataset mapping.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::dataset::DataSet;
use super::error::{DbError, DbResult};
use super::value::{Column, Value};

/// Map a raw result set into records keyed by column name.
///
/// Values are taken positionally; no type coercion happens here. A row whose
/// length differs from the column list is rejected rather than truncated.
///
/// Column names are unique within a record. When a label repeats, the column
/// keeps the position of its first occurrence and the value of its last.
pub fn map_rows(columns: &[Column], rows: Vec<Vec<Value>>) -> DbResult<DataSet> {
    if let Some((row, values)) = rows
        .iter()
        .enumerate()
        .find(|(_, values)| values.len() != columns.len())
    {
        return Err(DbError::ShapeMismatch {
            row,
            expected: columns.len(),
            found: values.len(),
        });
    }

    let (names, sources) = unique_columns(columns);
    if sources.len() == columns.len() {
        return Ok(DataSet::from_rows(names, rows));
    }

    debug!(
        columns = columns.len(),
        unique = sources.len(),
        "collapsed repeated column labels"
    );
    let rows = rows
        .into_iter()
        .map(|row| {
            let mut cells: Vec<Option<Value>> = row.into_iter().map(Some).collect();
            sources
                .iter()
                .filter_map(|&idx| cells[idx].take())
                .collect()
        })
        .collect();
    Ok(DataSet::from_rows(names, rows))
}

/// Distinct labels in first-occurrence order, each with the index of the
/// last column carrying it.
fn unique_columns(columns: &[Column]) -> (Arc<[String]>, Vec<usize>) {
    let mut names: Vec<String> = Vec::with_capacity(columns.len());
    let mut sources: Vec<usize> = Vec::with_capacity(columns.len());
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(columns.len());

    for (idx, column) in columns.iter().enumerate() {
        match slots.get(column.name.as_str()).copied() {
            Some(slot) => sources[slot] = idx,
            None => {
                slots.insert(&column.name, names.len());
                names.push(column.name.clone());
                sources.push(idx);
            }
        }
    }

    (names.into(), sources)
}
