//! Human and JSON renderings of a loaded mesh.

use std::fmt::Write as _;
use std::path::Path;

use objmesh_core::{Material, ObjMesh};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RangeReport<'a> {
    pub material: Option<&'a str>,
    pub start: usize,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MeshReport<'a> {
    pub path: String,
    pub vertices: usize,
    pub indices: usize,
    pub triangles: usize,
    pub materials: &'a [Material],
    pub draw_ranges: Vec<RangeReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<&'a ObjMesh>,
}

impl<'a> MeshReport<'a> {
    pub fn new(path: &Path, mesh: &'a ObjMesh, dump: bool) -> Self {
        let draw_ranges = mesh
            .draw_ranges()
            .into_iter()
            .map(|range| RangeReport {
                material: range
                    .material
                    .and_then(|index| mesh.material(index))
                    .map(|m| m.name.as_str()),
                start: range.start,
                count: range.count,
            })
            .collect();

        Self {
            path: path.display().to_string(),
            vertices: mesh.num_vertices(),
            indices: mesh.indices().len(),
            triangles: mesh.num_triangles(),
            materials: mesh.materials(),
            draw_ranges,
            mesh: dump.then_some(mesh),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.path);
        let _ = writeln!(
            out,
            "  vertices: {}  indices: {}  triangles: {}",
            self.vertices, self.indices, self.triangles
        );
        if !self.materials.is_empty() {
            let _ = writeln!(out, "  materials:");
            for material in self.materials {
                let _ = writeln!(out, "    [{}] {}", material.index, material.name);
            }
        }
        let _ = writeln!(out, "  draw ranges:");
        for range in &self.draw_ranges {
            let _ = writeln!(
                out,
                "    {:>8} +{:<8} {}",
                range.start,
                range.count,
                range.material.unwrap_or("<default>")
            );
        }

        if let Some(mesh) = self.mesh {
            let _ = writeln!(out, "  vertex buffer:");
            for (i, v) in mesh.vertices().iter().enumerate() {
                let _ = writeln!(
                    out,
                    "    {i:>6}: p {:?} n {:?} uv {:?}",
                    v.position, v.normal, v.uv
                );
            }
            let _ = writeln!(out, "  index buffer:");
            for triangle in mesh.indices().chunks(3) {
                let _ = writeln!(out, "    {:?}", triangle);
            }
        }
        out
    }
}
