//! Property-based tests for decoded mesh invariants.
//!
//! Generates well-formed OBJ text (random attribute counts, polygon sizes,
//! corner forms, relative indices and material switches) and checks:
//! - the index buffer is whole triangles
//! - clusters tile the index buffer when a material precedes the first face
//! - draw ranges tile the index buffer for every document
//! - decoding is deterministic
//! - no two vertices come from the same attribute combination

use std::collections::HashSet;
use std::fmt::Write as _;

use objmesh_core::{LoadOptions, NoProgress, Triangulation};
use objmesh_io::{parse_obj_str, parse_obj_str_with};
use proptest::prelude::*;

const MATERIALS: [&str; 3] = ["stone", "wood", "metal"];

#[derive(Debug, Clone)]
struct Face {
    material: Option<usize>,
    form: u8,
    corners: Vec<(u16, u16, u16, bool)>,
}

#[derive(Debug, Clone)]
struct ObjDoc {
    positions: usize,
    normals: usize,
    uvs: usize,
    faces: Vec<Face>,
}

impl ObjDoc {
    fn render(&self) -> String {
        let mut text = String::from("# generated\n");
        for i in 0..self.positions {
            let _ = writeln!(text, "v {} {} {}", i, i as f32 * 0.5, -(i as f32));
        }
        for i in 0..self.normals {
            let _ = writeln!(text, "vn 0 {} 1", i);
        }
        for i in 0..self.uvs {
            let _ = writeln!(text, "vt {} 0.25", i as f32 / 8.0);
        }
        for face in &self.faces {
            if let Some(m) = face.material {
                let _ = writeln!(text, "usemtl {}", MATERIALS[m]);
            }
            text.push('f');
            for &(p, t, n, relative) in &face.corners {
                let p = self.index(p, self.positions, relative);
                let _ = match face.form {
                    1 if self.uvs > 0 => {
                        write!(text, " {}/{}", p, self.index(t, self.uvs, relative))
                    }
                    2 if self.normals > 0 => {
                        write!(text, " {}//{}", p, self.index(n, self.normals, relative))
                    }
                    3 if self.uvs > 0 && self.normals > 0 => write!(
                        text,
                        " {}/{}/{}",
                        p,
                        self.index(t, self.uvs, relative),
                        self.index(n, self.normals, relative)
                    ),
                    _ => write!(text, " {}", p),
                };
            }
            text.push('\n');
        }
        text
    }

    fn index(&self, raw: u16, count: usize, relative: bool) -> i64 {
        let zero_based = (raw as usize % count) as i64;
        if relative {
            zero_based - count as i64
        } else {
            zero_based + 1
        }
    }

    fn leads_with_material(&self) -> bool {
        self.faces.first().map_or(true, |f| f.material.is_some())
    }
}

fn arb_face() -> impl Strategy<Value = Face> {
    (
        prop::option::weighted(0.5, 0..MATERIALS.len()),
        0u8..4,
        prop::collection::vec((any::<u16>(), any::<u16>(), any::<u16>(), any::<bool>()), 3..9),
    )
        .prop_map(|(material, form, corners)| Face { material, form, corners })
}

fn arb_doc() -> impl Strategy<Value = ObjDoc> {
    (1usize..24, 0usize..4, 0usize..4, prop::collection::vec(arb_face(), 0..24)).prop_map(
        |(positions, normals, uvs, faces)| ObjDoc { positions, normals, uvs, faces },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn proptest_indices_are_whole_triangles(doc in arb_doc()) {
        let mesh = parse_obj_str(&doc.render()).unwrap();
        prop_assert_eq!(mesh.indices().len() % 3, 0);
        prop_assert!(mesh.validate().is_ok(), "{:?}", mesh.validate());
    }

    #[test]
    fn proptest_clusters_tile_index_buffer(doc in arb_doc()) {
        prop_assume!(doc.leads_with_material());
        let mesh = parse_obj_str(&doc.render()).unwrap();

        let covered: usize = mesh.clusters().iter().map(|c| c.index_count as usize).sum();
        if mesh.clusters().is_empty() {
            prop_assert!(mesh.indices().is_empty());
        } else {
            prop_assert_eq!(covered, mesh.indices().len());
            prop_assert_eq!(mesh.clusters()[0].start_index, 0);
        }
        for pair in mesh.clusters().windows(2) {
            prop_assert_eq!(pair[0].start_index + pair[0].index_count, pair[1].start_index);
        }
    }

    #[test]
    fn proptest_draw_ranges_tile_index_buffer(doc in arb_doc()) {
        let mesh = parse_obj_str(&doc.render()).unwrap();
        let ranges = mesh.draw_ranges();

        let mut next = 0usize;
        for range in &ranges {
            prop_assert_eq!(range.start, next);
            prop_assert!(range.count > 0);
            next = range.start + range.count;
        }
        prop_assert_eq!(next, mesh.indices().len());

        // Only faces written before the first `usemtl` lack a material.
        let leading_faces = doc.faces.iter().take_while(|f| f.material.is_none()).count();
        let unassigned = ranges.iter().filter(|r| r.material.is_none()).count();
        if leading_faces > 0 {
            prop_assert_eq!(unassigned, 1);
            prop_assert!(ranges[0].material.is_none());
        } else {
            prop_assert_eq!(unassigned, 0);
        }
    }

    #[test]
    fn proptest_decoding_is_deterministic(doc in arb_doc()) {
        let text = doc.render();
        let first = parse_obj_str(&text).unwrap();
        let second = parse_obj_str(&text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn proptest_materials_are_unique(doc in arb_doc()) {
        let mesh = parse_obj_str(&doc.render()).unwrap();
        let names: HashSet<&str> = mesh.materials().iter().map(|m| m.name.as_str()).collect();
        prop_assert_eq!(names.len(), mesh.materials().len());
        prop_assert!(mesh.materials().len() <= MATERIALS.len());
    }

    #[test]
    fn proptest_vertices_are_deduplicated(doc in arb_doc()) {
        let mesh = parse_obj_str(&doc.render()).unwrap();
        // Generated attributes are pairwise distinct, so equal vertices
        // would mean the same combination was materialized twice.
        let mut seen = HashSet::new();
        for v in mesh.vertices() {
            let key: Vec<u32> = v
                .position
                .iter()
                .chain(v.normal.iter())
                .chain(v.uv.iter())
                .map(|c| c.to_bits())
                .collect();
            prop_assert!(seen.insert(key));
        }
        prop_assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.num_vertices()));
    }

    #[test]
    fn proptest_fan_emits_n_minus_two(doc in arb_doc()) {
        let options = LoadOptions::new().with_triangulation(Triangulation::Fan);
        let mesh = parse_obj_str_with(&doc.render(), &options, &mut NoProgress).unwrap();
        let expected: usize = doc.faces.iter().map(|f| f.corners.len() - 2).sum();
        prop_assert_eq!(mesh.num_triangles(), expected);
    }
}
