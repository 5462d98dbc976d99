use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single raw spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from a tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Build a cell from a text field; the empty string is [`Cell::Empty`].
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    /// Coerce the cell into a finite coordinate.
    ///
    /// Text is parsed after trimming surrounding whitespace. Anything that is
    /// not a finite number (blank, words, booleans, NaN, infinities) is missing.
    pub fn to_number(&self) -> Option<f64> {
        let v = match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Empty | Cell::Bool(_) => return None,
        };
        v.is_finite().then_some(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – header + rows, exactly as the reader produced them
// ---------------------------------------------------------------------------

/// A rectangular (possibly ragged) table with its header row split off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header names, in column order.
    pub columns: Vec<String>,
    /// Data rows; a row may be shorter than the header.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Number of columns: the header length or the longest row, whichever is larger.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.columns.len())
    }

    /// Cell at (`row`, `col`); cells past the end of a ragged row are empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

// ---------------------------------------------------------------------------
// Point / PointSet – the cleaned data
// ---------------------------------------------------------------------------

/// One labelled sample that survived cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }

    /// Squared Euclidean distance to (`qx`, `qy`).
    pub fn distance_sq(&self, qx: f64, qy: f64) -> f64 {
        let dx = self.x - qx;
        let dy = self.y - qy;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: x={}, y={}", self.label, self.x, self.y)
    }
}

/// Ordered points; position is the dense row index after cleaning.
pub type PointSet = Vec<Point>;

// ---------------------------------------------------------------------------
// Bounds – padded display envelope
// ---------------------------------------------------------------------------

/// Fraction of the value range added on each side of an axis.
pub const PAD_FRACTION: f64 = 0.05;

/// Padding used when every value on an axis is identical.
pub const FLAT_PAD: f64 = 1.0;

/// Padded min/max of a point set, used for scaling the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Default for Bounds {
    /// The envelope of an empty point set.
    fn default() -> Self {
        Self {
            xmin: -1.0,
            xmax: 1.0,
            ymin: -1.0,
            ymax: 1.0,
        }
    }
}

impl Bounds {
    /// Compute the padded envelope of `points`.
    pub fn of(points: &[Point]) -> Self {
        let (xmin, xmax) = padded_range(points.iter().map(|p| p.x));
        let (ymin, ymax) = padded_range(points.iter().map(|p| p.y));
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }
}

/// Min/max of `values` widened by [`PAD_FRACTION`] of the range on each side,
/// or by [`FLAT_PAD`] when the range is zero. Empty input gives `(-1, 1)`.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return (-1.0, 1.0);
    }
    // Scaled before subtracting so ranges wider than f64::MAX stay finite.
    let pad = if max == min {
        FLAT_PAD
    } else {
        max * PAD_FRACTION - min * PAD_FRACTION
    };
    ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
}
