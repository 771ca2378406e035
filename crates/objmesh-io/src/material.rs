//! `usemtl` bookkeeping: the material registry and the draw clusters.

use std::collections::HashMap;

use objmesh_core::{Cluster, Material};

#[derive(Debug, Clone, Default)]
pub struct MaterialTracker {
    materials: Vec<Material>,
    by_name: HashMap<String, u32>,
    clusters: Vec<Cluster>,
}

impl MaterialTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to material `name`, registering it on first use, and opens a
    /// cluster starting at index-buffer position `start_index`.
    pub fn use_material(&mut self, name: &str, start_index: usize) -> u32 {
        let index = match self.by_name.get(name) {
            Some(&index) => index,
            None => {
                let index = self.materials.len() as u32;
                tracing::trace!(material = name, index, "registered material");
                self.materials.push(Material {
                    index,
                    name: name.to_string(),
                });
                self.by_name.insert(name.to_string(), index);
                index
            }
        };
        self.clusters.push(Cluster::new(index, start_index as u32));
        index
    }

    /// Accounts `index_count` emitted indices to the open cluster, if any.
    pub fn record_face(&mut self, index_count: usize) {
        if let Some(cluster) = self.clusters.last_mut() {
            cluster.index_count += index_count as u32;
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn into_parts(self) -> (Vec<Cluster>, Vec<Material>) {
        (self.clusters, self.materials)
    }
}
