//! `f` directive decoding and polygon triangulation.

use objmesh_core::{ObjError, ObjResult, Triangulation};

use crate::index::{RawFaceIndex, RawIndex};
use crate::scanner::Scanner;

/// Reads the corners of one face line. The scanner must sit just after the
/// `f` keyword; it is left at the end of the line.
///
/// Accepted corner forms are `p`, `p/t`, `p//n` and `p/t/n`.
pub fn read_face(scanner: &mut Scanner<'_>) -> ObjResult<Vec<RawFaceIndex>> {
    let mut corners = Vec::with_capacity(4);
    loop {
        scanner.skip_whitespace();
        if scanner.at_end_of_line() {
            break;
        }
        corners.push(read_corner(scanner)?);
    }
    Ok(corners)
}

fn read_corner(scanner: &mut Scanner<'_>) -> ObjResult<RawFaceIndex> {
    let mut corner = RawFaceIndex::new(read_index(scanner, "position")?);

    if scanner.peek() == Some(b'/') {
        scanner.advance(1);
        if scanner.peek() == Some(b'/') {
            scanner.advance(1);
            corner.normal = Some(read_index(scanner, "normal")?);
        } else {
            corner.uv = Some(read_index(scanner, "texcoord")?);
            if scanner.peek() == Some(b'/') {
                scanner.advance(1);
                corner.normal = Some(read_index(scanner, "normal")?);
            }
        }
    }

    if !scanner.at_end_of_line() && !scanner.peek().is_some_and(|b| b.is_ascii_whitespace()) {
        return Err(ObjError::invalid_face(
            scanner.line(),
            format!(
                "unexpected '{}' after face corner",
                char::from(scanner.peek().unwrap_or(b'?'))
            ),
        ));
    }

    Ok(corner)
}

fn read_index(scanner: &mut Scanner<'_>, label: &str) -> ObjResult<RawIndex> {
    let line = scanner.line();
    let token = scanner.read_token();
    RawIndex::parse(token)
        .ok_or_else(|| ObjError::invalid_face(line, format!("invalid {} index '{}'", label, token)))
}

/// Appends the triangles of `polygon` to `out` and returns the number of
/// indices appended (always a multiple of 3).
pub fn triangulate(
    polygon: &[RawFaceIndex],
    mode: Triangulation,
    out: &mut Vec<RawFaceIndex>,
) -> usize {
    if polygon.len() == 3 {
        out.extend_from_slice(polygon);
        return 3;
    }

    let count = mode.triangle_count(polygon.len());
    out.reserve(count * 3);
    for i in 0..count {
        out.push(polygon[0]);
        out.push(polygon[i + 1]);
        out.push(polygon[i + 2]);
    }
    count * 3
}
