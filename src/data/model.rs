use std::fmt;

use crate::pareto::{InvalidInput, Record};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// A loaded dataset: ordered, named columns of equal length.
///
/// Built once by the loader and never mutated; a reload replaces the whole
/// table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from a header and row-major cells. Short rows are padded
    /// with [`CellValue::Null`], surplus cells are dropped.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let n_rows = rows.len();
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(n_rows),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for col in &mut columns {
                col.values.push(cells.next().unwrap_or(CellValue::Null));
            }
        }

        Table { columns, n_rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.column(column)?.values.get(row)
    }

    /// Label for a row: its value in `id_column`, or the row number when the
    /// column is absent or null.
    pub fn row_label(&self, row: usize, id_column: &str) -> String {
        match self.cell(row, id_column) {
            Some(v) if !v.is_null() => v.to_string(),
            _ => row.to_string(),
        }
    }

    /// Validate one column as finite numbers.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, InvalidInput> {
        if self.is_empty() {
            return Err(InvalidInput::Empty);
        }
        let col = self
            .column(name)
            .ok_or_else(|| InvalidInput::UnknownColumn(name.to_string()))?;

        col.values
            .iter()
            .enumerate()
            .map(|(row, cell)| numeric_cell(row, name, cell))
            .collect()
    }

    /// The typed two-column view fed to the Pareto computation.
    ///
    /// This is the only place untyped cells are checked; every record it
    /// returns carries two finite values.
    pub fn numeric_pair(&self, x_column: &str, y_column: &str) -> Result<Vec<Record>, InvalidInput> {
        let xs = self.numeric_column(x_column)?;
        let ys = self.numeric_column(y_column)?;
        Ok(xs
            .into_iter()
            .zip(ys)
            .enumerate()
            .map(|(row, (x, y))| Record::new(row, x, y))
            .collect())
    }
}

fn numeric_cell(row: usize, column: &str, cell: &CellValue) -> Result<f64, InvalidInput> {
    let value = match cell {
        CellValue::Null => {
            return Err(InvalidInput::Missing {
                row,
                column: column.to_string(),
            });
        }
        CellValue::String(s) if s.trim().is_empty() => {
            return Err(InvalidInput::Missing {
                row,
                column: column.to_string(),
            });
        }
        other => other.as_f64().ok_or_else(|| InvalidInput::NonNumeric {
            row,
            column: column.to_string(),
            value: other.to_string(),
        })?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInput::NonFinite {
            row,
            column: column.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["index".into(), "cost".into(), "rating".into(), "name".into()],
            vec![
                vec![
                    CellValue::Integer(10),
                    CellValue::Float(1.5),
                    CellValue::Integer(3),
                    CellValue::String("a".into()),
                ],
                vec![
                    CellValue::Integer(11),
                    CellValue::Float(2.5),
                    CellValue::Float(0.5),
                ],
            ],
        )
    }

    #[test]
    fn short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "name"), Some(&CellValue::Null));
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            ["index", "cost", "rating", "name"]
        );
    }

    #[test]
    fn numeric_pair_builds_records() {
        let records = sample().numeric_pair("cost", "rating").unwrap();
        assert_eq!(
            records,
            vec![Record::new(0, 1.5, 3.0), Record::new(1, 2.5, 0.5)]
        );
    }

    #[test]
    fn numeric_pair_reports_bad_cells() {
        let table = sample();
        assert_eq!(
            table.numeric_pair("cost", "missing"),
            Err(InvalidInput::UnknownColumn("missing".into()))
        );
        assert_eq!(
            table.numeric_pair("cost", "name"),
            Err(InvalidInput::NonNumeric {
                row: 0,
                column: "name".into(),
                value: "a".into(),
            })
        );

        let with_gap = Table::from_rows(
            vec!["x".into(), "y".into()],
            vec![vec![CellValue::Float(1.0)]],
        );
        assert_eq!(
            with_gap.numeric_pair("x", "y"),
            Err(InvalidInput::Missing {
                row: 0,
                column: "y".into(),
            })
        );

        let with_nan = Table::from_rows(
            vec!["x".into(), "y".into()],
            vec![vec![CellValue::Float(f64::NAN), CellValue::Float(1.0)]],
        );
        assert!(matches!(
            with_nan.numeric_pair("x", "y"),
            Err(InvalidInput::NonFinite { row: 0, .. })
        ));
    }

    #[test]
    fn empty_table_is_invalid() {
        let table = Table::from_rows(vec!["x".into(), "y".into()], Vec::new());
        assert_eq!(table.numeric_pair("x", "y"), Err(InvalidInput::Empty));
    }

    #[test]
    fn row_label_falls_back_to_row_number() {
        let table = sample();
        assert_eq!(table.row_label(1, "index"), "11");
        assert_eq!(table.row_label(1, "name"), "1");
        assert_eq!(table.row_label(0, "nope"), "0");
    }
}
