//! Ragged polygon corner lists as equal-length columns.

/// Corner count above which a polygon is flagged as too large.
pub const MAX_PLAIN_CORNERS: usize = 4;

/// Value marking "no corner in this column".
pub const CORNER_SENTINEL: f64 = f64::INFINITY;

/// Polygon corners laid out column by column.
///
/// Column `k` holds the `k`-th corner (as a 1-based vertex index) of every
/// polygon, padded with [`CORNER_SENTINEL`] for polygons with fewer corners.
/// There are as many columns as the largest polygon has corners, and every
/// column is as long as there are polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceTable {
    columns: Vec<Vec<f64>>,
    polygon_count: usize,
}

impl FaceTable {
    /// Corner columns, first corner first.
    #[must_use]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Number of columns (the largest corner count).
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of polygons (the length of every column).
    #[must_use]
    pub const fn polygon_count(&self) -> usize {
        self.polygon_count
    }

    /// Whether any polygon exceeds [`MAX_PLAIN_CORNERS`].
    #[must_use]
    pub fn is_too_large(&self) -> bool {
        self.columns.len() > MAX_PLAIN_CORNERS
    }
}

/// Build the face table for `polygons` (0-based corner lists).
///
/// Returns the table and whether any polygon has more than
/// [`MAX_PLAIN_CORNERS`] corners.
///
/// # Example
///
/// ```
/// use desmos_export::build_face_table;
///
/// let (table, too_large) = build_face_table(&[vec![0u32, 1, 2], vec![0, 2, 3, 4]]);
/// assert_eq!(table.column_count(), 4);
/// assert_eq!(table.columns()[3], vec![f64::INFINITY, 5.0]);
/// assert!(!too_large);
/// ```
#[must_use]
pub fn build_face_table<P: AsRef<[u32]>>(polygons: &[P]) -> (FaceTable, bool) {
    let max_corners = polygons
        .iter()
        .map(|p| p.as_ref().len())
        .max()
        .unwrap_or(0);

    let columns: Vec<Vec<f64>> = (0..max_corners)
        .map(|k| {
            polygons
                .iter()
                .map(|p| {
                    p.as_ref()
                        .get(k)
                        .map_or(CORNER_SENTINEL, |&corner| f64::from(corner) + 1.0)
                })
                .collect()
        })
        .collect();

    let table = FaceTable {
        columns,
        polygon_count: polygons.len(),
    };
    let too_large = table.is_too_large();
    (table, too_large)
}
