//! Polygon meshes with variable-arity faces.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single polygon of a mesh.
///
/// Corners are 0-based vertex indices in winding order. Unlike a triangle
/// mesh, a polygon may have any number of corners.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    /// Vertex indices in winding order.
    pub corners: Vec<u32>,
    /// Mean of the corner positions.
    pub center: Point3<f64>,
    /// Unit face normal (zero for degenerate polygons).
    pub normal: Vector3<f64>,
    /// Material slot assigned to this polygon.
    pub material_index: u32,
}

impl Polygon {
    /// Number of corners.
    #[inline]
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }
}

/// A mesh made of vertices and arbitrary polygons.
///
/// # Example
///
/// ```
/// use desmos_types::{PolygonMesh, Point3};
///
/// let mut mesh = PolygonMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 1.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// assert_eq!(mesh.add_polygon(vec![0, 1, 2, 3], 0), Some(0));
///
/// let tris = mesh.triangulated();
/// assert_eq!(tris.polygons.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Polygons referencing `vertices` by index.
    pub polygons: Vec<Polygon>,
}

impl PolygonMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            polygons: Vec::new(),
        }
    }

    /// Create a mesh from vertex positions and corner lists.
    ///
    /// Centers and normals are computed from the corners. Returns `None` if
    /// any corner references a missing vertex.
    #[must_use]
    pub fn from_polygons(vertices: Vec<Point3<f64>>, polygons: Vec<Vec<u32>>) -> Option<Self> {
        let mut mesh = Self {
            vertices,
            polygons: Vec::with_capacity(polygons.len()),
        };
        for corners in polygons {
            mesh.add_polygon(corners, 0)?;
        }
        Some(mesh)
    }

    /// Append a polygon, computing its center and normal.
    ///
    /// Returns the new polygon's index, or `None` if a corner is out of range.
    pub fn add_polygon(&mut self, corners: Vec<u32>, material_index: u32) -> Option<usize> {
        let points = self.corner_positions(&corners)?;
        self.polygons.push(Polygon {
            center: mean_center(&points),
            normal: newell_normal(&points),
            corners,
            material_index,
        });
        Some(self.polygons.len() - 1)
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of polygons.
    #[inline]
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Largest corner count over all polygons (0 for no polygons).
    #[must_use]
    pub fn max_corners(&self) -> usize {
        self.polygons
            .iter()
            .map(Polygon::corner_count)
            .max()
            .unwrap_or(0)
    }

    /// Fan-triangulate every polygon with more than 3 corners.
    ///
    /// Each n-gon `[c0, c1, .., cn-1]` becomes `[c0, ci, ci+1]` for
    /// `i in 1..n-1`. Triangles keep the polygon's normal and material; their
    /// centers are recomputed. Polygons with 3 or fewer corners are kept.
    #[must_use]
    pub fn triangulated(&self) -> Self {
        let mut polygons = Vec::with_capacity(self.polygons.len());
        for polygon in &self.polygons {
            if polygon.corners.len() <= 3 {
                polygons.push(polygon.clone());
                continue;
            }
            let first = polygon.corners[0];
            for pair in polygon.corners[1..].windows(2) {
                let corners = vec![first, pair[0], pair[1]];
                let center = self
                    .corner_positions(&corners)
                    .map_or(polygon.center, |points| mean_center(&points));
                polygons.push(Polygon {
                    corners,
                    center,
                    normal: polygon.normal,
                    material_index: polygon.material_index,
                });
            }
        }

        Self {
            vertices: self.vertices.clone(),
            polygons,
        }
    }

    fn corner_positions(&self, corners: &[u32]) -> Option<Vec<Point3<f64>>> {
        corners
            .iter()
            .map(|&c| self.vertices.get(c as usize).copied())
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_center(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

// Newell's method, valid for concave and slightly non-planar polygons.
fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for (i, cur) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        n.x += (cur.y - next.y) * (cur.z + next.z);
        n.y += (cur.z - next.z) * (cur.x + next.x);
        n.z += (cur.x - next.x) * (cur.y + next.y);
    }
    n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros)
}
