//! Two-phase OBJ decoding.
//!
//! [`scan`] makes one top-to-bottom pass over the text, collecting attribute
//! lists, raw (already triangulated) face corners and material clusters.
//! [`ScannedObj::resolve`] then resolves every corner against the final
//! attribute list lengths and assembles the deduplicated buffers.

use objmesh_core::{
    LoadOptions, LoadProgress, ObjError, ObjMesh, ObjResult, ProgressObserver, ProgressThrottle,
};

use crate::assembler::VertexAssembler;
use crate::attributes::AttributeCollectors;
use crate::face;
use crate::index::RawFaceIndex;
use crate::material::MaterialTracker;
use crate::scanner::Scanner;

const USEMTL: &str = "usemtl";

/// Output of the scan phase.
#[derive(Debug, Clone, Default)]
pub struct ScannedObj {
    attributes: AttributeCollectors,
    corners: Vec<RawFaceIndex>,
    materials: MaterialTracker,
}

impl ScannedObj {
    pub fn attributes(&self) -> &AttributeCollectors {
        &self.attributes
    }

    /// Triangulated face corners in file order; one per index-buffer entry.
    pub fn corners(&self) -> &[RawFaceIndex] {
        &self.corners
    }

    pub fn materials(&self) -> &MaterialTracker {
        &self.materials
    }

    /// Runs the resolve phase and produces the final mesh.
    pub fn resolve(
        self,
        options: &LoadOptions,
        observer: &mut dyn ProgressObserver,
    ) -> ObjResult<ObjMesh> {
        let (vertices, indices) = VertexAssembler::new(&self.attributes).assemble(
            &self.corners,
            options.resolve_progress_step(),
            observer,
        )?;
        let (clusters, materials) = self.materials.into_parts();
        Ok(ObjMesh::from_parts(vertices, indices, clusters, materials))
    }
}

/// Decodes OBJ text into a mesh in one call.
pub fn decode(
    text: &str,
    options: &LoadOptions,
    observer: &mut dyn ProgressObserver,
) -> ObjResult<ObjMesh> {
    scan(text, options, observer)?.resolve(options, observer)
}

/// Runs the scan phase over `text`.
pub fn scan(
    text: &str,
    options: &LoadOptions,
    observer: &mut dyn ProgressObserver,
) -> ObjResult<ScannedObj> {
    let mut scanner = Scanner::new(text);
    let mut throttle = ProgressThrottle::new(scanner.len(), options.scan_progress_step());
    let mut scanned = ScannedObj::default();

    report(observer, &mut throttle, 0);
    while let Some(byte) = scanner.peek() {
        match byte {
            b'#' => scanner.skip_to_next_line(),
            b'v' => scanned.read_vertex_directive(&mut scanner)?,
            b'f' => scanned.read_face_directive(&mut scanner, options)?,
            b'u' => scanned.read_usemtl_directive(&mut scanner),
            // mtllib, g, o, s: recognized, no effect
            b'm' | b'g' | b'o' | b's' => scanner.skip_to_next_line(),
            _ => scanner.advance(1),
        }
        report(observer, &mut throttle, scanner.position());
    }

    Ok(scanned)
}

impl ScannedObj {
    fn read_vertex_directive(&mut self, scanner: &mut Scanner<'_>) -> ObjResult<()> {
        let line = scanner.line();
        scanner.advance(1);
        match scanner.peek() {
            Some(b' ') | Some(b'\t') => self.attributes.read_position(scanner)?,
            Some(b'n') => {
                scanner.advance(1);
                self.attributes.read_normal(scanner)?;
            }
            Some(b't') => {
                scanner.advance(1);
                self.attributes.read_uv(scanner)?;
            }
            other => {
                return Err(ObjError::InvalidVertexData {
                    line,
                    found: other.map(|b| char::from(b).to_string()).unwrap_or_default(),
                });
            }
        }
        scanner.skip_to_next_line();
        Ok(())
    }

    fn read_face_directive(
        &mut self,
        scanner: &mut Scanner<'_>,
        options: &LoadOptions,
    ) -> ObjResult<()> {
        let line = scanner.line();
        scanner.advance(1);
        if !matches!(scanner.peek(), Some(b' ') | Some(b'\t')) {
            return Err(ObjError::invalid_face(line, "expected whitespace after 'f'"));
        }

        let polygon = face::read_face(scanner)?;
        if polygon.len() < 3 {
            return Err(ObjError::invalid_face(
                line,
                format!("face needs at least 3 corners, found {}", polygon.len()),
            ));
        }

        let emitted = face::triangulate(&polygon, options.triangulation(), &mut self.corners);
        self.materials.record_face(emitted);
        scanner.skip_to_next_line();
        Ok(())
    }

    fn read_usemtl_directive(&mut self, scanner: &mut Scanner<'_>) {
        if scanner.read_numeric_token() == USEMTL {
            scanner.skip_whitespace();
            let name = scanner.read_numeric_token();
            self.materials.use_material(name, self.corners.len());
        }
        scanner.skip_to_next_line();
    }
}

fn report(observer: &mut dyn ProgressObserver, throttle: &mut ProgressThrottle, done: usize) {
    if throttle.should_report(done) {
        observer.report(LoadProgress::Scan {
            total_bytes: throttle.total(),
            consumed_bytes: done,
        });
    }
}
