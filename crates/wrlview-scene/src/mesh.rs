#![forbid(unsafe_code)]

//! Triangle mesh storage.

use smallvec::SmallVec;

use crate::geometry::Vec3;

/// A triangle as three vertex indices.
pub type Triangle = [usize; 3];

/// An indexed triangle mesh.
///
/// Indices are not guaranteed to be in range for `vertices`; consumers must
/// skip triangles that reference missing vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// A mesh with no vertices and no triangles.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there is nothing to draw.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Append one face given as a vertex-index loop.
    ///
    /// Triangles are kept as-is, quads are split along the 0-2 diagonal into
    /// `(0,1,2)` and `(0,2,3)`, and any other arity is dropped.
    pub fn push_face(&mut self, face: &FaceLoop) {
        match face.as_slice() {
            [a, b, c] => self.triangles.push([*a, *b, *c]),
            [a, b, c, d] => {
                self.triangles.push([*a, *b, *c]);
                self.triangles.push([*a, *c, *d]);
            }
            _ => {}
        }
    }
}

/// Scratch storage for one face while its index loop is being assembled.
///
/// Faces in the wild are almost always triangles or quads, so the loop stays
/// on the stack.
pub type FaceLoop = SmallVec<[usize; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    fn face(indices: &[usize]) -> FaceLoop {
        FaceLoop::from_slice(indices)
    }

    #[test]
    fn triangle_face_is_kept() {
        let mut mesh = Mesh::empty();
        mesh.push_face(&face(&[0, 1, 2]));
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn quad_face_splits_along_0_2_diagonal() {
        let mut mesh = Mesh::empty();
        mesh.push_face(&face(&[4, 7, 11, 8]));
        assert_eq!(mesh.triangles, vec![[4, 7, 11], [4, 11, 8]]);
    }

    #[test]
    fn degenerate_and_ngon_faces_are_dropped() {
        let mut mesh = Mesh::empty();
        mesh.push_face(&face(&[]));
        mesh.push_face(&face(&[1]));
        mesh.push_face(&face(&[1, 2]));
        mesh.push_face(&face(&[0, 1, 2, 3, 4]));
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn empty_means_no_vertices_or_no_triangles() {
        let mut mesh = Mesh::empty();
        assert!(mesh.is_empty());
        mesh.vertices.push(Vec3::default());
        assert!(mesh.is_empty());
        mesh.triangles.push([0, 0, 0]);
        assert!(!mesh.is_empty());
    }
}
