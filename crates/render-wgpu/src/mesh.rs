//! Unit cube spanning `[0, 1]^3`, shared by every grid instance.

/// Corners: 0-3 on the `z = 0` face, 4-7 the same corners at `z = 1`.
#[rustfmt::skip]
pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
];

/// Twelve triangles, two per face.
#[rustfmt::skip]
pub const CUBE_TRIANGLE_INDICES: [u16; 36] = [
    0, 1, 2,  0, 2, 3, // z = 0
    4, 6, 5,  4, 7, 6, // z = 1
    0, 4, 5,  0, 5, 1, // x = 0
    2, 6, 3,  3, 6, 7, // x = 1
    0, 3, 4,  3, 7, 4, // y = 0
    1, 5, 2,  2, 5, 6, // y = 1
];

/// Twelve edges as line pairs.
#[rustfmt::skip]
pub const CUBE_LINE_INDICES: [u16; 24] = [
    0, 1,  1, 2,  2, 3,  3, 0,
    4, 5,  5, 6,  6, 7,  7, 4,
    0, 4,  1, 5,  2, 6,  3, 7,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn indices_reference_valid_vertices() {
        let n = CUBE_VERTICES.len() as u16;
        assert!(CUBE_TRIANGLE_INDICES.iter().all(|&i| i < n));
        assert!(CUBE_LINE_INDICES.iter().all(|&i| i < n));
    }

    #[test]
    fn twelve_triangles_and_twelve_edges() {
        assert_eq!(CUBE_TRIANGLE_INDICES.len() / 3, 12);
        assert_eq!(CUBE_LINE_INDICES.len() / 2, 12);
    }

    #[test]
    fn edges_are_distinct_and_axis_aligned() {
        let mut seen = HashSet::new();
        for pair in CUBE_LINE_INDICES.chunks(2) {
            let (a, b) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
            assert!(seen.insert((a, b)), "duplicate edge {a}-{b}");
            let (va, vb) = (CUBE_VERTICES[a as usize], CUBE_VERTICES[b as usize]);
            let differing = (0..3).filter(|&k| va[k] != vb[k]).count();
            assert_eq!(differing, 1, "edge {a}-{b} is not a cube edge");
        }
    }

    #[test]
    fn every_face_is_covered() {
        // Each face has one constant coordinate; both of its triangles share it.
        for tri in CUBE_TRIANGLE_INDICES.chunks(3) {
            let v: Vec<[f32; 3]> = tri.iter().map(|&i| CUBE_VERTICES[i as usize]).collect();
            let planar = (0..3).any(|k| v[0][k] == v[1][k] && v[1][k] == v[2][k]);
            assert!(planar, "triangle {tri:?} does not lie on a face");
        }
    }
}
