//! Result handle populated by a load.

use std::fmt;

use objmesh_core::{Cluster, Material, ObjError, ObjMesh, ObjResult, Vertex};

/// Load progression of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    NotStarted,
    Scanning,
    Resolving,
    Done,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadState::NotStarted => "not started",
            LoadState::Scanning => "scanning",
            LoadState::Resolving => "resolving",
            LoadState::Done => "done",
            LoadState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Owner of one decoded mesh.
///
/// A handle starts empty in [`LoadState::NotStarted`], is populated by
/// exactly one load and is read-only afterwards. Accessors return empty
/// slices until the load is [`LoadState::Done`].
#[derive(Debug, Clone)]
pub struct ObjHandle {
    state: LoadState,
    mesh: ObjMesh,
}

impl Default for ObjHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjHandle {
    pub fn new() -> Self {
        Self {
            state: LoadState::NotStarted,
            mesh: ObjMesh::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Done
    }

    pub fn mesh(&self) -> Option<&ObjMesh> {
        self.is_loaded().then_some(&self.mesh)
    }

    pub fn into_mesh(self) -> Option<ObjMesh> {
        self.is_loaded().then_some(self.mesh)
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.mesh.vertices()
    }

    pub fn indices(&self) -> &[u32] {
        self.mesh.indices()
    }

    pub fn clusters(&self) -> &[Cluster] {
        self.mesh.clusters()
    }

    pub fn materials(&self) -> &[Material] {
        self.mesh.materials()
    }

    pub(crate) fn begin(&mut self) -> ObjResult<()> {
        if self.state != LoadState::NotStarted {
            return Err(ObjError::AlreadyLoaded);
        }
        self.transition(LoadState::Scanning);
        Ok(())
    }

    pub(crate) fn transition(&mut self, state: LoadState) {
        tracing::debug!(from = %self.state, to = %state, "load state transition");
        self.state = state;
    }

    pub(crate) fn complete(&mut self, mesh: ObjMesh) {
        self.mesh = mesh;
        self.transition(LoadState::Done);
    }

    pub(crate) fn fail(&mut self) {
        self.mesh = ObjMesh::new();
        self.transition(LoadState::Failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_empty() {
        let handle = ObjHandle::new();
        assert_eq!(handle.state(), LoadState::NotStarted);
        assert!(!handle.is_loaded());
        assert!(handle.mesh().is_none());
        assert!(handle.vertices().is_empty());
        assert!(handle.indices().is_empty());
    }

    #[test]
    fn test_single_population() {
        let mut handle = ObjHandle::new();
        handle.begin().unwrap();
        assert_eq!(handle.state(), LoadState::Scanning);
        handle.transition(LoadState::Resolving);
        handle.complete(ObjMesh::new());
        assert!(handle.is_loaded());
        assert_eq!(handle.begin(), Err(ObjError::AlreadyLoaded));
        assert!(handle.clone().into_mesh().is_some());
    }

    #[test]
    fn test_failed_handle_is_unusable() {
        let mut handle = ObjHandle::new();
        handle.begin().unwrap();
        handle.fail();
        assert_eq!(handle.state(), LoadState::Failed);
        assert!(handle.mesh().is_none());
        assert_eq!(handle.begin(), Err(ObjError::AlreadyLoaded));
    }
}
