//! Vertex buffer assembly with deduplication of identical corners.

use std::collections::HashMap;

use objmesh_core::{LoadProgress, ObjResult, ProgressObserver, ProgressThrottle, Vertex};

use crate::attributes::AttributeCollectors;
use crate::index::{IndexResolver, RawFaceIndex, ResolvedCorner};

/// Dedup key: resolved (uv, normal, position) indices, in that order.
type CornerKey = (Option<u32>, Option<u32>, u32);

fn corner_key(corner: &ResolvedCorner) -> CornerKey {
    (corner.uv, corner.normal, corner.position)
}

/// Builds the final vertex and index buffers from raw face corners.
pub struct VertexAssembler<'a> {
    attributes: &'a AttributeCollectors,
    resolver: IndexResolver,
    cache: HashMap<CornerKey, u32>,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl<'a> VertexAssembler<'a> {
    pub fn new(attributes: &'a AttributeCollectors) -> Self {
        Self {
            attributes,
            resolver: IndexResolver::new(
                attributes.positions.len(),
                attributes.normals.len(),
                attributes.uvs.len(),
            ),
            cache: HashMap::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Resolves and assembles every corner in order.
    pub fn assemble(
        mut self,
        corners: &[RawFaceIndex],
        progress_step: usize,
        observer: &mut dyn ProgressObserver,
    ) -> ObjResult<(Vec<Vertex>, Vec<u32>)> {
        let total = corners.len();
        let mut throttle = ProgressThrottle::new(total, progress_step);
        self.indices.reserve(total);

        report(observer, &mut throttle, 0);
        for (i, corner) in corners.iter().enumerate() {
            self.push_corner(corner)?;
            report(observer, &mut throttle, i + 1);
        }

        Ok((self.vertices, self.indices))
    }

    /// Appends the index-buffer entry for one corner, materializing a new
    /// vertex only for an unseen attribute combination.
    pub fn push_corner(&mut self, corner: &RawFaceIndex) -> ObjResult<u32> {
        let resolved = self.resolver.resolve(corner)?;
        let key = corner_key(&resolved);

        let slot = match self.cache.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.vertices.len() as u32;
                let vertex = self.materialize(&resolved);
                self.vertices.push(vertex);
                self.cache.insert(key, slot);
                slot
            }
        };
        self.indices.push(slot);
        Ok(slot)
    }

    fn materialize(&self, corner: &ResolvedCorner) -> Vertex {
        let attributes = self.attributes;
        Vertex::new(
            attributes.positions[corner.position as usize],
            corner.normal.map(|n| attributes.normals[n as usize]),
            corner.uv.map(|t| attributes.uvs[t as usize]),
        )
    }
}

fn report(observer: &mut dyn ProgressObserver, throttle: &mut ProgressThrottle, done: usize) {
    if throttle.should_report(done) {
        observer.report(LoadProgress::Resolve {
            total_corners: throttle.total(),
            processed_corners: done,
        });
    }
}
