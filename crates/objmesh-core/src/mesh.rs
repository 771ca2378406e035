//! Decoded mesh data: deduplicated vertices, a triangle index buffer and the
//! per-material partition of that buffer.

use std::collections::HashSet;
use std::ops::Range;

use thiserror::Error;

pub type Vec3 = [f32; 3];
pub type Vec2 = [f32; 2];

/// Normal used when a face corner has no normal reference.
pub const DEFAULT_NORMAL: Vec3 = [0.0, 0.0, 0.0];
/// Texture coordinate used when a face corner has no uv reference.
pub const DEFAULT_UV: Vec2 = [-1.0, -1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Option<Vec3>, uv: Option<Vec2>) -> Self {
        Self {
            position,
            normal: normal.unwrap_or(DEFAULT_NORMAL),
            uv: uv.unwrap_or(DEFAULT_UV),
        }
    }
}

/// A material name referenced by `usemtl`. `index` is its registration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub index: u32,
    pub name: String,
}

/// Contiguous range `[start_index, start_index + index_count)` of the index
/// buffer drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    pub material_index: u32,
    pub start_index: u32,
    pub index_count: u32,
}

impl Cluster {
    pub fn new(material_index: u32, start_index: u32) -> Self {
        Self {
            material_index,
            start_index,
            index_count: 0,
        }
    }

    pub fn range(&self) -> Range<usize> {
        let start = self.start_index as usize;
        start..start + self.index_count as usize
    }
}

/// A draw call over the index buffer. `material` is `None` for the implicit
/// range of a mesh without any `usemtl`; the renderer supplies its own
/// default material for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub material: Option<u32>,
    pub start: usize,
    pub count: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("index buffer length {0} is not a multiple of 3")]
    PartialTriangle(usize),
    #[error("indices[{slot}] = {index} but only {vertex_count} vertices exist")]
    DanglingIndex {
        slot: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("cluster {cluster} starts at {start}, expected {expected}")]
    ClusterGap {
        cluster: usize,
        start: usize,
        expected: usize,
    },
    #[error("clusters cover {covered} indices but the index buffer has {len}")]
    ClusterCoverage { covered: usize, len: usize },
    #[error("cluster {cluster} references unknown material {material_index}")]
    UnknownMaterial { cluster: usize, material_index: u32 },
    #[error("material '{0}' is registered more than once")]
    DuplicateMaterial(String),
    #[error("material '{name}' has index {index} at registry slot {slot}")]
    MaterialOrder { name: String, index: u32, slot: usize },
}

/// Immutable snapshot of a decoded OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    clusters: Vec<Cluster>,
    materials: Vec<Material>,
}

impl ObjMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        clusters: Vec<Cluster>,
        materials: Vec<Material>,
    ) -> Self {
        Self {
            vertices,
            indices,
            clusters,
            materials,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn material(&self, index: u32) -> Option<&Material> {
        self.materials.get(index as usize)
    }

    pub fn material_by_name(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Draw ranges covering the whole index buffer.
    pub fn draw_ranges(&self) -> Vec<DrawRange> {
        if self.clusters.is_empty() {
            if self.indices.is_empty() {
                return Vec::new();
            }
            return vec![DrawRange {
                material: None,
                start: 0,
                count: self.indices.len(),
            }];
        }
        let mut ranges = Vec::with_capacity(self.clusters.len() + 1);
        let leading = self.clusters[0].start_index as usize;
        if leading > 0 {
            ranges.push(DrawRange {
                material: None,
                start: 0,
                count: leading,
            });
        }
        ranges.extend(self.clusters.iter().map(|c| DrawRange {
            material: Some(c.material_index),
            start: c.start_index as usize,
            count: c.index_count as usize,
        }));
        ranges
    }

    /// Positions as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.position).collect()
    }

    /// Normals as `[x0, y0, z0, ...]`, defaults included.
    pub fn normals_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.normal).collect()
    }

    /// Texture coordinates as `[u0, v0, u1, v1, ...]`, defaults included.
    pub fn uvs_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.uv).collect()
    }

    /// Checks the structural invariants every decoded mesh upholds.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.indices.len() % 3 != 0 {
            return Err(InvariantViolation::PartialTriangle(self.indices.len()));
        }

        let vertex_count = self.vertices.len();
        if let Some(slot) = self
            .indices
            .iter()
            .position(|&i| i as usize >= vertex_count)
        {
            return Err(InvariantViolation::DanglingIndex {
                slot,
                index: self.indices[slot],
                vertex_count,
            });
        }

        let mut names = HashSet::with_capacity(self.materials.len());
        for (slot, material) in self.materials.iter().enumerate() {
            if material.index as usize != slot {
                return Err(InvariantViolation::MaterialOrder {
                    name: material.name.clone(),
                    index: material.index,
                    slot,
                });
            }
            if !names.insert(material.name.as_str()) {
                return Err(InvariantViolation::DuplicateMaterial(material.name.clone()));
            }
        }

        // Faces before the first `usemtl` are outside every cluster.
        let mut expected = match self.clusters.first() {
            Some(first) => first.start_index as usize,
            None => return Ok(()),
        };
        for (i, cluster) in self.clusters.iter().enumerate() {
            if cluster.material_index as usize >= self.materials.len() {
                return Err(InvariantViolation::UnknownMaterial {
                    cluster: i,
                    material_index: cluster.material_index,
                });
            }
            let start = cluster.start_index as usize;
            if start != expected {
                return Err(InvariantViolation::ClusterGap {
                    cluster: i,
                    start,
                    expected,
                });
            }
            expected = start + cluster.index_count as usize;
        }

        if expected != self.indices.len() {
            return Err(InvariantViolation::ClusterCoverage {
                covered: expected,
                len: self.indices.len(),
            });
        }

        Ok(())
    }
}
