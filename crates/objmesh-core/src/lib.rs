//! objmesh core library
//!
//! Data types shared by the OBJ decoder and its callers: the decoded mesh
//! (vertices, triangle indices, material clusters), load options, progress
//! events and the error taxonomy.

pub mod mesh;
pub mod options;
pub mod progress;
pub mod status;

pub use mesh::{
    Cluster, DrawRange, InvariantViolation, Material, ObjMesh, Vec2, Vec3, Vertex, DEFAULT_NORMAL,
    DEFAULT_UV,
};
pub use options::{LoadOptions, Triangulation};
pub use progress::{LoadProgress, NoProgress, ProgressObserver, ProgressThrottle};
pub use status::{AttributeKind, ErrorKind, ObjError, ObjResult};
