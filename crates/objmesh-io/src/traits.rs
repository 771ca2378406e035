//! Common traits for mesh readers.
//!
//! Generic code can load meshes without naming the concrete reader:
//!
//! ```ignore
//! fn load<R: Reader>(path: &str) -> ObjResult<ObjMesh> {
//!     let mut reader = R::open(path)?;
//!     reader.read_mesh()
//! }
//! ```

use std::path::Path;

use objmesh_core::{ObjMesh, ObjResult};

/// Common interface for mesh readers.
pub trait Reader: Sized {
    /// Open a file for reading.
    ///
    /// # Arguments
    /// * `path` - Input file path
    fn open<P: AsRef<Path>>(path: P) -> ObjResult<Self>;

    /// Read the mesh stored in the file.
    fn read_mesh(&mut self) -> ObjResult<ObjMesh>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjReader;
    use std::io::Write;

    fn load<R: Reader>(path: &Path) -> ObjResult<ObjMesh> {
        let mut reader = R::open(path)?;
        reader.read_mesh()
    }

    #[test]
    fn test_generic_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4").unwrap();
        file.flush().unwrap();

        let mesh = load::<ObjReader>(file.path()).unwrap();
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
    }
}
