use anyhow::anyhow;

use super::model::{Point, PointSet, RawTable};
use crate::error::SourceUnreadable;

// ---------------------------------------------------------------------------
// Raw table → clean point set
// ---------------------------------------------------------------------------

/// Turn a raw table into the points it describes.
///
/// Column layout:
/// * 3 or more columns – columns 0, 1, 2 are (label, x, y); the rest are ignored.
/// * exactly 2 columns – (x, y); the label is the point's index in the output.
///
/// Rows whose x or y cannot be coerced to a finite number are dropped. The
/// surviving rows keep their input order. An empty result is not an error;
/// fewer than two columns is.
pub fn load(table: &RawTable) -> Result<PointSet, SourceUnreadable> {
    let width = table.width();
    let labelled = match width {
        0 => return Err(SourceUnreadable::new(anyhow!("table has no columns"))),
        1 => {
            return Err(SourceUnreadable::new(anyhow!(
                "table has a single column, need at least x and y"
            )))
        }
        2 => false,
        _ => true,
    };
    let (x_col, y_col) = if labelled { (1, 2) } else { (0, 1) };

    let mut points = PointSet::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        let (Some(x), Some(y)) = (
            table.cell(row, x_col).to_number(),
            table.cell(row, y_col).to_number(),
        ) else {
            continue;
        };
        let label = if labelled {
            table.cell(row, 0).to_string()
        } else {
            points.len().to_string()
        };
        points.push(Point { label, x, y });
    }

    let dropped = table.rows.len() - points.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} row(s) without numeric x/y");
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn num(v: f64) -> Cell {
        Cell::Number(v)
    }

    fn header(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{i}")).collect()
    }

    #[test]
    fn three_columns_are_label_x_y() {
        let table = RawTable::new(
            header(3),
            vec![
                vec![text("a"), num(0.0), num(0.0)],
                vec![text("b"), text("1.5"), num(2.0)],
            ],
        );
        let points = load(&table).unwrap();
        assert_eq!(points, vec![Point::new("a", 0.0, 0.0), Point::new("b", 1.5, 2.0)]);
    }

    #[test]
    fn columns_past_the_third_are_ignored() {
        let table = RawTable::new(
            header(5),
            vec![vec![text("a"), num(1.0), num(2.0), text("junk"), num(99.0)]],
        );
        assert_eq!(load(&table).unwrap(), vec![Point::new("a", 1.0, 2.0)]);
    }

    #[test]
    fn two_columns_get_dense_index_labels() {
        let table = RawTable::new(
            header(2),
            vec![
                vec![num(1.0), num(1.0)],
                vec![text("bad"), num(2.0)],
                vec![num(3.0), num(3.0)],
                vec![num(4.0), Cell::Empty],
                vec![num(5.0), num(5.0)],
            ],
        );
        let points = load(&table).unwrap();
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["0", "1", "2"]);
        assert_eq!(points[1], Point::new("1", 3.0, 3.0));
        assert_eq!(points[2], Point::new("2", 5.0, 5.0));
    }

    #[test]
    fn rows_missing_a_coordinate_are_dropped() {
        let table = RawTable::new(
            header(3),
            vec![
                vec![text("a"), text("x"), num(1.0)],
                vec![text("b"), num(2.0), num(3.0)],
                vec![text("c"), num(4.0)],
                vec![text("d"), Cell::Bool(true), num(5.0)],
            ],
        );
        assert_eq!(load(&table).unwrap(), vec![Point::new("b", 2.0, 3.0)]);
    }

    #[test]
    fn label_is_never_a_filter() {
        let table = RawTable::new(
            header(3),
            vec![
                vec![Cell::Empty, num(1.0), num(1.0)],
                vec![num(7.0), num(2.0), num(2.0)],
            ],
        );
        let points = load(&table).unwrap();
        assert_eq!(points, vec![Point::new("", 1.0, 1.0), Point::new("7", 2.0, 2.0)]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = RawTable::new(
            header(3),
            vec![
                vec![text("a"), text("?"), num(1.0)],
                vec![text("b"), num(2.0), text(" 3 ")],
                vec![text("c"), num(4.0), text("")],
            ],
        );
        let once = load(&table).unwrap();
        let rows = once
            .iter()
            .map(|p| vec![text(&p.label), num(p.x), num(p.y)])
            .collect();
        let twice = load(&RawTable::new(header(3), rows)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn all_rows_filtered_is_an_empty_result() {
        let table = RawTable::new(header(3), vec![vec![text("a"), text("-"), text("-")]]);
        assert!(load(&table).unwrap().is_empty());
        assert!(load(&RawTable::new(header(2), Vec::new())).unwrap().is_empty());
    }

    #[test]
    fn too_few_columns_is_unreadable() {
        assert!(load(&RawTable::default()).is_err());
        let one = RawTable::new(header(1), vec![vec![num(1.0)]]);
        assert!(load(&one).is_err());
    }
}
