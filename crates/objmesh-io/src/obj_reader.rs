//! OBJ format reader.
//!
//! Provides both a struct-based API (`ObjReader`) and convenience functions.

use std::fs;
use std::path::{Path, PathBuf};

use objmesh_core::{LoadOptions, NoProgress, ObjError, ObjMesh, ObjResult, ProgressObserver};
use tracing::info;

use crate::decoder;
use crate::handle::{LoadState, ObjHandle};
use crate::traits::Reader;

/// OBJ format reader.
///
/// Reads positions, normals, texture coordinates, faces and `usemtl`
/// clusters from an OBJ file.
#[derive(Debug, Clone)]
pub struct ObjReader {
    path: PathBuf,
    options: LoadOptions,
}

impl ObjReader {
    /// Open an OBJ file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> ObjResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ObjError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(Self {
            path,
            options: LoadOptions::default(),
        })
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Read the whole file as text. Invalid UTF-8 sequences are replaced,
    /// they can only appear in names and comments of a valid file.
    pub fn read_text(&self) -> ObjResult<String> {
        let bytes = fs::read(&self.path).map_err(|err| ObjError::from_io(err, &self.path))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read and decode the file.
    pub fn read_mesh(&mut self) -> ObjResult<ObjMesh> {
        self.read_mesh_with_progress(&mut NoProgress)
    }

    /// Read and decode the file, reporting scan and resolve progress.
    pub fn read_mesh_with_progress(
        &mut self,
        observer: &mut dyn ProgressObserver,
    ) -> ObjResult<ObjMesh> {
        let text = self.read_text()?;
        decoder::decode(&text, &self.options, observer)
    }

    /// Populate `handle` from the file, driving its state machine.
    ///
    /// On failure the handle ends in [`LoadState::Failed`] with no data.
    pub fn read_into(
        &self,
        handle: &mut ObjHandle,
        observer: &mut dyn ProgressObserver,
    ) -> ObjResult<()> {
        handle.begin()?;
        match self.decode_phases(handle, observer) {
            Ok(mesh) => {
                info!(
                    path = %self.path.display(),
                    vertices = mesh.num_vertices(),
                    indices = mesh.indices().len(),
                    materials = mesh.materials().len(),
                    clusters = mesh.clusters().len(),
                    "loaded OBJ mesh"
                );
                handle.complete(mesh);
                Ok(())
            }
            Err(err) => {
                handle.fail();
                Err(err)
            }
        }
    }

    fn decode_phases(
        &self,
        handle: &mut ObjHandle,
        observer: &mut dyn ProgressObserver,
    ) -> ObjResult<ObjMesh> {
        let text = self.read_text()?;
        let scanned = decoder::scan(&text, &self.options, observer)?;
        handle.transition(LoadState::Resolving);
        scanned.resolve(&self.options, observer)
    }
}

impl Reader for ObjReader {
    fn open<P: AsRef<Path>>(path: P) -> ObjResult<Self> {
        ObjReader::open(path)
    }

    fn read_mesh(&mut self) -> ObjResult<ObjMesh> {
        ObjReader::read_mesh(self)
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Decode an OBJ file into a mesh with default options.
pub fn read_obj_mesh<P: AsRef<Path>>(path: P) -> ObjResult<ObjMesh> {
    ObjReader::open(path)?.read_mesh()
}

/// Decode OBJ text with default options.
pub fn parse_obj_str(text: &str) -> ObjResult<ObjMesh> {
    decoder::decode(text, &LoadOptions::default(), &mut NoProgress)
}

/// Decode OBJ text with explicit options and a progress observer.
pub fn parse_obj_str_with(
    text: &str,
    options: &LoadOptions,
    observer: &mut dyn ProgressObserver,
) -> ObjResult<ObjMesh> {
    decoder::decode(text, options, observer)
}
