// ============================================================
// TABLE CLEANER USE CASE
// ============================================================
// Coerce a RawTable into a numeric contingency table
//
// Order matters:
//   1. every cell -> number or missing
//   2. drop rows that are entirely missing
//   3. drop columns that are entirely missing (after step 2)
//   4. fill what is still missing with zero

use crate::domain::table::{CleaningSummary, ContingencyTable, RawTable};

pub fn clean_table(raw: &RawTable) -> (ContingencyTable, CleaningSummary) {
    let coerced: Vec<Vec<Option<f64>>> = raw
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.as_number()).collect())
        .collect();

    let kept_rows: Vec<Vec<Option<f64>>> = coerced
        .into_iter()
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    let width = raw.width();
    let kept_columns: Vec<usize> = (0..width)
        .filter(|&col| kept_rows.iter().any(|row| row[col].is_some()))
        .collect();

    let mut zero_filled_cells = 0;
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(kept_rows.len());
    for row in &kept_rows {
        let mut values = Vec::with_capacity(kept_columns.len());
        for &col in &kept_columns {
            match row[col] {
                Some(value) => values.push(value),
                None => {
                    zero_filled_cells += 1;
                    values.push(0.0);
                }
            }
        }
        rows.push(values);
    }

    let summary = CleaningSummary {
        dropped_rows: raw.height() - kept_rows.len(),
        dropped_columns: width - kept_columns.len(),
        zero_filled_cells,
    };

    (ContingencyTable::from_clean_rows(rows), summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Cell;

    fn num(value: f64) -> Cell {
        Cell::Number(value)
    }

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    fn as_raw(table: &ContingencyTable) -> RawTable {
        RawTable::from_rows(
            table
                .rows()
                .iter()
                .map(|row| row.iter().copied().map(Cell::Number).collect())
                .collect(),
        )
    }

    #[test]
    fn test_header_row_dropped() {
        let raw = RawTable::from_rows(vec![
            vec![text("A"), text("B")],
            vec![text("10"), text("20")],
            vec![text("30"), text("40")],
        ]);

        let (table, summary) = clean_table(&raw);

        assert_eq!(table.rows(), &[vec![10.0, 20.0], vec![30.0, 40.0]]);
        assert_eq!(summary.dropped_rows, 1);
        assert_eq!(summary.dropped_columns, 0);
        assert_eq!(summary.zero_filled_cells, 0);
    }

    #[test]
    fn test_header_and_label_column_dropped() {
        let raw = RawTable::from_rows(vec![
            vec![Cell::Empty, text("Sí"), text("No")],
            vec![text("Hombres"), num(12.0), num(8.0)],
            vec![text("Mujeres"), num(5.0), num(15.0)],
        ]);

        let (table, summary) = clean_table(&raw);

        assert_eq!(table.rows(), &[vec![12.0, 8.0], vec![5.0, 15.0]]);
        assert_eq!(summary.dropped_rows, 1);
        assert_eq!(summary.dropped_columns, 1);
    }

    #[test]
    fn test_partial_rows_are_zero_filled() {
        let raw = RawTable::from_rows(vec![
            vec![text("Total"), num(3.0)],
            vec![num(1.0), num(2.0)],
        ]);

        let (table, summary) = clean_table(&raw);

        assert_eq!(table.rows(), &[vec![0.0, 3.0], vec![1.0, 2.0]]);
        assert_eq!(summary.zero_filled_cells, 1);
    }

    #[test]
    fn test_text_column_dropped() {
        let raw = RawTable::from_rows(vec![
            vec![text("x"), text("y"), text("z")],
            vec![num(1.0), num(2.0), Cell::Empty],
            vec![num(3.0), num(4.0), text("n/a")],
        ]);

        let (table, summary) = clean_table(&raw);

        assert_eq!(table.rows(), &[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(summary.dropped_rows, 1);
        assert_eq!(summary.dropped_columns, 1);
    }

    #[test]
    fn test_negative_values_survive_cleaning() {
        let raw = RawTable::from_rows(vec![vec![num(-5.0), num(2.0)], vec![num(1.0), num(2.0)]]);
        let (table, _) = clean_table(&raw);
        assert!(table.has_negative());
    }

    #[test]
    fn test_all_text_yields_empty_table() {
        let raw = RawTable::from_rows(vec![vec![text("a"), text("b")], vec![text("c"), text("d")]]);

        let (table, summary) = clean_table(&raw);

        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.n_cols(), 0);
        assert_eq!(summary.dropped_rows, 2);
        assert_eq!(summary.dropped_columns, 2);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let raw = RawTable::from_rows(vec![
            vec![text("h1"), text("h2"), text("h3")],
            vec![text("r1"), num(4.0), Cell::Empty],
            vec![text("r2"), num(0.0), num(7.0)],
        ]);

        let (once, _) = clean_table(&raw);
        let (twice, summary) = clean_table(&as_raw(&once));

        assert_eq!(once, twice);
        assert_eq!(summary, CleaningSummary::default());
    }
}
