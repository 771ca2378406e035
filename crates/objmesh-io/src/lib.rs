//! OBJ decoding library.
//!
//! Reads the Wavefront OBJ directive subset used by mesh viewers (`v`, `vn`,
//! `vt`, `f`, `usemtl`) into a deduplicated, triangulated, material-clustered
//! [`ObjMesh`](objmesh_core::ObjMesh).
//!
//! # Directives
//!
//! | Directive | Effect |
//! |-----------|--------|
//! | `# ...`   | comment |
//! | `v x y z` | position |
//! | `vn x y z`| normal |
//! | `vt u v`  | texture coordinate |
//! | `f c1 c2 c3 [c4 ...]` | face, corners `p`, `p/t`, `p//n` or `p/t/n` |
//! | `usemtl name` | start a cluster under `name` |
//! | `mtllib`, `g`, `o`, `s` | recognized, no effect |
//!
//! # Handle API
//!
//! ```ignore
//! use objmesh_io::{create_handle, load};
//!
//! let mut handle = create_handle();
//! if load(&mut handle, "model.obj")? {
//!     for cluster in handle.clusters() {
//!         draw(&handle.indices()[cluster.range()]);
//!     }
//! }
//! ```
//!
//! # Background loading
//!
//! ```ignore
//! use objmesh_io::{create_handle, load_async};
//!
//! let task = load_async(create_handle(), "model.obj").map_err(|_| "missing")?;
//! for event in task.progress() {
//!     println!("{:.0}%", event.fraction() * 100.0);
//! }
//! let handle = task.wait()?;
//! ```
//!
//! # Reader API
//!
//! ```ignore
//! use objmesh_io::{ObjReader, Reader};
//!
//! let mut reader = ObjReader::open("model.obj")?;
//! let mesh = reader.read_mesh()?;
//! ```

pub mod assembler;
pub mod async_loader;
pub mod attributes;
pub mod decoder;
pub mod face;
pub mod handle;
pub mod index;
pub mod material;
pub mod obj_reader;
pub mod scanner;
pub mod traits;

use std::path::Path;

use objmesh_core::{LoadOptions, NoProgress, ObjError, ObjResult, ProgressObserver};
use tracing::warn;

pub use async_loader::LoadTask;
pub use decoder::{decode, scan, ScannedObj};
pub use handle::{LoadState, ObjHandle};
pub use obj_reader::{parse_obj_str, parse_obj_str_with, read_obj_mesh, ObjReader};
pub use traits::Reader;

/// Create an empty handle, ready for one load.
pub fn create_handle() -> ObjHandle {
    ObjHandle::new()
}

/// Load `path` into `handle` with default options.
///
/// Returns `Ok(false)` without touching the handle when the file does not
/// exist. Every other failure is an `Err` and leaves the handle
/// [`LoadState::Failed`].
pub fn load<P: AsRef<Path>>(handle: &mut ObjHandle, path: P) -> ObjResult<bool> {
    load_with(handle, path, &LoadOptions::default(), &mut NoProgress)
}

/// Load `path` into `handle`, reporting progress to `observer`.
#[tracing::instrument(
    skip(handle, path, options, observer),
    fields(path = %path.as_ref().display())
)]
pub fn load_with<P: AsRef<Path>>(
    handle: &mut ObjHandle,
    path: P,
    options: &LoadOptions,
    observer: &mut dyn ProgressObserver,
) -> ObjResult<bool> {
    let reader = match ObjReader::open(path.as_ref()) {
        Ok(reader) => reader.with_options(options.clone()),
        Err(ObjError::FileNotFound { path }) => {
            warn!(%path, "OBJ file does not exist");
            return Ok(false);
        }
        Err(err) => return Err(err),
    };
    reader.read_into(handle, observer)?;
    Ok(true)
}

/// Start loading `path` into `handle` on a background thread with default
/// options. A missing file or an already used handle is handed back as `Err`.
pub fn load_async<P: AsRef<Path>>(handle: ObjHandle, path: P) -> Result<LoadTask, ObjHandle> {
    async_loader::load_async(handle, path, LoadOptions::default())
}

/// Background load with explicit options.
pub fn load_async_with<P: AsRef<Path>>(
    handle: ObjHandle,
    path: P,
    options: LoadOptions,
) -> Result<LoadTask, ObjHandle> {
    async_loader::load_async(handle, path, options)
}
