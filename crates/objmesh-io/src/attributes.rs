//! Position, normal and texture coordinate streams collected from `v`, `vn`
//! and `vt` directives.

use objmesh_core::{ObjError, ObjResult, Vec2, Vec3};

use crate::scanner::Scanner;

/// Non-numeric IEEE payload written by some MSVC-based exporters.
pub const INDETERMINATE_LITERAL: &str = "-1.#IND00";

/// Attribute lists in file definition order. The position of an element in
/// its list is the index faces refer to.
#[derive(Debug, Clone, Default)]
pub struct AttributeCollectors {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl AttributeCollectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the three components of a `v` directive.
    pub fn read_position(&mut self, scanner: &mut Scanner<'_>) -> ObjResult<()> {
        let position = read_vec3(scanner)?;
        self.positions.push(position);
        Ok(())
    }

    /// Reads the three components of a `vn` directive.
    pub fn read_normal(&mut self, scanner: &mut Scanner<'_>) -> ObjResult<()> {
        let normal = read_vec3(scanner)?;
        self.normals.push(normal);
        Ok(())
    }

    /// Reads the first two components of a `vt` directive.
    pub fn read_uv(&mut self, scanner: &mut Scanner<'_>) -> ObjResult<()> {
        let u = read_component(scanner)?;
        let v = read_component(scanner)?;
        self.uvs.push([u, v]);
        Ok(())
    }
}

fn read_vec3(scanner: &mut Scanner<'_>) -> ObjResult<Vec3> {
    let x = read_component(scanner)?;
    let y = read_component(scanner)?;
    let z = read_component(scanner)?;
    Ok([x, y, z])
}

fn read_component(scanner: &mut Scanner<'_>) -> ObjResult<f32> {
    scanner.skip_whitespace();
    let line = scanner.line();
    let token = scanner.read_numeric_token();
    parse_component(token, line)
}

/// Parses one floating point component. A missing component arrives here as
/// an empty token and fails like any other malformed literal.
pub fn parse_component(token: &str, line: usize) -> ObjResult<f32> {
    if token == INDETERMINATE_LITERAL {
        return Ok(f32::NAN);
    }
    token
        .parse::<f32>()
        .map_err(|_| ObjError::invalid_number(line, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use objmesh_core::ErrorKind;

    #[test]
    fn test_parse_component() {
        assert_eq!(parse_component("1.5", 1), Ok(1.5));
        assert_eq!(parse_component("-2e-1", 1), Ok(-0.2));
        assert!(parse_component(INDETERMINATE_LITERAL, 1).unwrap().is_nan());
    }

    #[test]
    fn test_parse_component_rejects_garbage() {
        let err = parse_component("x", 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumericLiteral);
        assert_eq!(err.line(), Some(4));
        assert!(parse_component("-1.#QNAN", 1).is_err());
        assert!(parse_component("", 1).is_err());
    }

    #[test]
    fn test_read_attributes() {
        let mut collectors = AttributeCollectors::new();
        let mut scanner = Scanner::new(" 1 2 3 0.5\n");
        collectors.read_position(&mut scanner).unwrap();
        assert_eq!(collectors.positions, vec![[1.0, 2.0, 3.0]]);

        let mut scanner = Scanner::new("\t0.25  0.75 0\n");
        collectors.read_uv(&mut scanner).unwrap();
        assert_eq!(collectors.uvs, vec![[0.25, 0.75]]);

        let mut scanner = Scanner::new(" 0 1 -1.#IND00\r\n");
        collectors.read_normal(&mut scanner).unwrap();
        assert_eq!(collectors.normals.len(), 1);
        assert!(collectors.normals[0][2].is_nan());
    }

    #[test]
    fn test_missing_component_fails() {
        let mut collectors = AttributeCollectors::new();
        let mut scanner = Scanner::new(" 1 2\n3\n");
        let err = collectors.read_position(&mut scanner).unwrap_err();
        assert_eq!(err, ObjError::invalid_number(1, ""));
        assert!(collectors.positions.is_empty());
    }
}
