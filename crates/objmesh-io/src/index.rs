//! OBJ face index conventions.
//!
//! Positive indices are one-based and absolute; negative indices count back
//! from the end of the attribute list as it stands when the whole file has
//! been scanned (`-1` is the last element). Zero is taken as already
//! zero-based and refers to the first element.

use objmesh_core::{AttributeKind, ObjError, ObjResult};

/// One index of a face corner as written in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawIndex {
    /// Zero-based absolute index (the file's one-based value minus one).
    Absolute(u32),
    /// Negative offset from the end of the attribute list.
    Relative(i32),
}

impl RawIndex {
    /// Parses a face index token. Returns `None` for empty or non-integer
    /// tokens.
    pub fn parse(token: &str) -> Option<Self> {
        let value = token.parse::<i64>().ok()?;
        if value > 0 {
            u32::try_from(value - 1).ok().map(RawIndex::Absolute)
        } else if value < 0 {
            i32::try_from(value).ok().map(RawIndex::Relative)
        } else {
            Some(RawIndex::Absolute(0))
        }
    }

    /// The index as the file wrote it, for diagnostics.
    pub fn as_written(self) -> i64 {
        match self {
            RawIndex::Absolute(i) => i as i64 + 1,
            RawIndex::Relative(offset) => offset as i64,
        }
    }
}

/// One corner of a face before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawFaceIndex {
    pub position: RawIndex,
    pub normal: Option<RawIndex>,
    pub uv: Option<RawIndex>,
}

impl RawFaceIndex {
    pub fn new(position: RawIndex) -> Self {
        Self {
            position,
            normal: None,
            uv: None,
        }
    }
}

/// Resolves a required index (positions) against the final list length.
pub fn resolve_required(index: RawIndex, count: usize, attribute: AttributeKind) -> ObjResult<u32> {
    let resolved = match index {
        RawIndex::Absolute(i) => i as i64,
        RawIndex::Relative(offset) => count as i64 + offset as i64,
    };
    if resolved < 0 || resolved >= count as i64 {
        return Err(ObjError::IndexOutOfRange {
            attribute,
            index: index.as_written(),
            count,
        });
    }
    Ok(resolved as u32)
}

/// Resolves an optional index (normals, uvs). An unused index stays `None`,
/// meaning the vertex takes the default value.
pub fn resolve_optional(
    index: Option<RawIndex>,
    count: usize,
    attribute: AttributeKind,
) -> ObjResult<Option<u32>> {
    index
        .map(|index| resolve_required(index, count, attribute))
        .transpose()
}

/// Resolved corner: indices into the collected attribute lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedCorner {
    pub position: u32,
    pub normal: Option<u32>,
    pub uv: Option<u32>,
}

/// Attribute list lengths at the end of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexResolver {
    positions: usize,
    normals: usize,
    uvs: usize,
}

impl IndexResolver {
    pub fn new(positions: usize, normals: usize, uvs: usize) -> Self {
        Self {
            positions,
            normals,
            uvs,
        }
    }

    pub fn resolve(&self, corner: &RawFaceIndex) -> ObjResult<ResolvedCorner> {
        Ok(ResolvedCorner {
            position: resolve_required(corner.position, self.positions, AttributeKind::Position)?,
            normal: resolve_optional(corner.normal, self.normals, AttributeKind::Normal)?,
            uv: resolve_optional(corner.uv, self.uvs, AttributeKind::TexCoord)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objmesh_core::ErrorKind;

    #[test]
    fn test_parse() {
        assert_eq!(RawIndex::parse("1"), Some(RawIndex::Absolute(0)));
        assert_eq!(RawIndex::parse("+7"), Some(RawIndex::Absolute(6)));
        assert_eq!(RawIndex::parse("-1"), Some(RawIndex::Relative(-1)));
        assert_eq!(RawIndex::parse("0"), Some(RawIndex::Absolute(0)));
        assert_eq!(RawIndex::parse(""), None);
        assert_eq!(RawIndex::parse("1.5"), None);
        assert_eq!(RawIndex::parse("99999999999"), None);
    }

    #[test]
    fn test_relative_resolution() {
        // three positions defined: -1 is the third, -2 the second
        let p = AttributeKind::Position;
        assert_eq!(resolve_required(RawIndex::Relative(-1), 3, p), Ok(2));
        assert_eq!(resolve_required(RawIndex::Relative(-2), 3, p), Ok(1));
        assert_eq!(resolve_required(RawIndex::Absolute(0), 3, p), Ok(0));
    }

    #[test]
    fn test_out_of_range() {
        let err = resolve_required(RawIndex::Relative(-4), 3, AttributeKind::Position).unwrap_err();
        assert_eq!(
            err,
            ObjError::IndexOutOfRange {
                attribute: AttributeKind::Position,
                index: -4,
                count: 3,
            }
        );
        let err = resolve_required(RawIndex::Absolute(3), 3, AttributeKind::Position).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert!(err.to_string().contains("index 4"));
    }

    #[test]
    fn test_optional_unused() {
        assert_eq!(resolve_optional(None, 0, AttributeKind::Normal), Ok(None));
        assert_eq!(
            resolve_optional(Some(RawIndex::Relative(-1)), 2, AttributeKind::TexCoord),
            Ok(Some(1))
        );
        assert!(resolve_optional(Some(RawIndex::Absolute(0)), 0, AttributeKind::Normal).is_err());
    }

    #[test]
    fn test_resolver() {
        let resolver = IndexResolver::new(4, 1, 2);
        let corner = RawFaceIndex {
            position: RawIndex::Relative(-1),
            normal: Some(RawIndex::Absolute(0)),
            uv: None,
        };
        assert_eq!(
            resolver.resolve(&corner),
            Ok(ResolvedCorner {
                position: 3,
                normal: Some(0),
                uv: None,
            })
        );
    }
}
