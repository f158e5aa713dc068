#![forbid(unsafe_code)]

//! WRL block extraction.
//!
//! Locates the first `point [ ... ]` and `coordIndex [ ... ]` blocks and
//! lexes their contents. The surrounding VRML node structure is ignored, so
//! arbitrary scene files load as long as their first coordinate node is the
//! one to display.

use memchr::{memchr, memmem};

use crate::error::WrlParseError;
use crate::geometry::Vec3;
use crate::mesh::{FaceLoop, Mesh};

/// Extract a mesh from WRL text.
///
/// `scale` is applied uniformly to every coordinate; Y is negated so that
/// model "up" maps to decreasing screen rows. Missing blocks yield an empty
/// mesh rather than an error.
pub fn parse_wrl(src: &str, scale: f32) -> Result<Mesh, WrlParseError> {
    let mut mesh = Mesh::empty();

    if let Some(block) = find_block(src, b"point") {
        let coords = parse_coordinates(block)?;
        if coords.len() % 3 != 0 {
            return Err(WrlParseError::TruncatedTriple {
                count: coords.len(),
            });
        }
        mesh.vertices = coords
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0] * scale, -c[1] * scale, c[2] * scale))
            .collect();
    }

    if let Some(block) = find_block(src, b"coordIndex") {
        let mut face = FaceLoop::new();
        for token in tokens(block) {
            let value: i64 = token
                .parse()
                .map_err(|_| WrlParseError::InvalidIndex {
                    token: token.into(),
                })?;
            if value == -1 {
                mesh.push_face(&face);
                face.clear();
            } else if value < 0 {
                return Err(WrlParseError::NegativeIndex { value });
            } else {
                face.push(value as usize);
            }
        }
        // A trailing loop without a -1 terminator is dropped.
    }

    Ok(mesh)
}

/// Find the first `keyword [ ... ]` block and return its bracket contents.
///
/// The keyword may be separated from `[` by whitespace only. An unterminated
/// block is treated as absent.
fn find_block<'a>(src: &'a str, keyword: &[u8]) -> Option<&'a str> {
    let bytes = src.as_bytes();
    for pos in memmem::find_iter(bytes, keyword) {
        let mut cursor = pos + keyword.len();
        while bytes.get(cursor).is_some_and(|b| b.is_ascii_whitespace()) {
            cursor += 1;
        }
        if bytes.get(cursor) != Some(&b'[') {
            continue;
        }
        let open = cursor + 1;
        let close = open + memchr(b']', &bytes[open..])?;
        // `[` and `]` are ASCII, so both offsets sit on char boundaries.
        return Some(&src[open..close]);
    }
    None
}

fn parse_coordinates(block: &str) -> Result<Vec<f32>, WrlParseError> {
    tokens(block)
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|_| WrlParseError::InvalidCoordinate {
                    token: token.into(),
                })
        })
        .collect()
}

/// Block contents split on whitespace and commas.
fn tokens(block: &str) -> impl Iterator<Item = &str> {
    block
        .split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    const QUAD: &str = "\
#VRML V2.0 utf8
Shape {
  geometry IndexedFaceSet {
    coord Coordinate {
      point [
        1.25 -0.0 0.0, 1.0 -0.25 0.0,
        0.75 -0.0 0.0, 1.0 0.25 0.0
      ]
    }
    coordIndex [ 0, 1, 2, 3, -1 ]
  }
}
";

    #[test]
    fn extracts_vertices_with_scale_and_y_flip() {
        let mesh = parse_wrl(QUAD, 2.0).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[0], Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(mesh.vertices[1], Vec3::new(2.0, 0.5, 0.0));
    }

    #[test]
    fn quad_face_becomes_two_triangles() {
        let mesh = parse_wrl(QUAD, 1.0).unwrap();
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn missing_blocks_yield_empty_mesh() {
        let mesh = parse_wrl("#VRML V2.0 utf8\nWorldInfo {}\n", 1.0).unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.vertices.is_empty());
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn exponent_notation_is_accepted() {
        let mesh = parse_wrl("point [ 1e2 -2.5E-1 .5 ]", 1.0).unwrap();
        assert_eq!(mesh.vertices, vec![Vec3::new(100.0, 0.25, 0.5)]);
    }

    #[test]
    fn first_block_wins() {
        let src = "point [ 1 2 3 ] point [ 4 5 6 ]";
        let mesh = parse_wrl(src, 1.0).unwrap();
        assert_eq!(mesh.vertices, vec![Vec3::new(1.0, -2.0, 3.0)]);
    }

    #[test]
    fn keyword_without_bracket_is_skipped() {
        let src = "point Coordinate point [ 1 2 3 ]";
        let mesh = parse_wrl(src, 1.0).unwrap();
        assert_eq!(mesh.vertices.len(), 1);
    }

    #[test]
    fn unterminated_block_is_treated_as_absent() {
        let mesh = parse_wrl("point [ 1 2 3", 1.0).unwrap();
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn junk_coordinate_is_an_error() {
        let err = parse_wrl("point [ 1.0 fish 3.0 ]", 1.0).unwrap_err();
        assert_eq!(
            err,
            WrlParseError::InvalidCoordinate {
                token: "fish".into()
            }
        );
    }

    #[test]
    fn non_triple_coordinate_count_is_an_error() {
        let err = parse_wrl("point [ 1 2 3 4 ]", 1.0).unwrap_err();
        assert_eq!(err, WrlParseError::TruncatedTriple { count: 4 });
    }

    #[test]
    fn negative_non_terminator_index_is_an_error() {
        let err = parse_wrl("coordIndex [ 0 1 -2 -1 ]", 1.0).unwrap_err();
        assert_eq!(err, WrlParseError::NegativeIndex { value: -2 });
    }

    #[test]
    fn trailing_unterminated_face_is_dropped() {
        let mesh = parse_wrl("coordIndex [ 0 1 2 -1 3 4 ]", 1.0).unwrap();
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn out_of_range_indices_are_kept_for_the_rasterizer_to_skip() {
        let mesh = parse_wrl("point [ 0 0 0 ]\ncoordIndex [ 0 7 9 -1 ]", 1.0).unwrap();
        assert_eq!(mesh.triangles, vec![[0, 7, 9]]);
    }

    proptest! {
        #[test]
        fn formatted_triples_roundtrip(
            triples in prop::collection::vec((-1000.0f32..1000.0, -1000.0f32..1000.0, -1000.0f32..1000.0), 1..32),
            use_commas in any::<bool>(),
        ) {
            let sep = if use_commas { ", " } else { "\n  " };
            let body: Vec<String> = triples
                .iter()
                .map(|(x, y, z)| format!("{x} {y} {z}"))
                .collect();
            let src = format!("point [ {} ]", body.join(sep));

            let mesh = parse_wrl(&src, 1.0).unwrap();
            prop_assert_eq!(mesh.vertices.len(), triples.len());
            for (vertex, (x, y, z)) in mesh.vertices.iter().zip(&triples) {
                prop_assert_eq!(vertex.x, *x);
                prop_assert_eq!(vertex.y, -*y);
                prop_assert_eq!(vertex.z, *z);
            }
        }
    }
}
