use epimesh::algs::extrude::{ExtrudeOptions, extrude};
use epimesh::algs::subdivide::{SubdivideOptions, subdivide_faces};
use epimesh::data::datasets::Datasets;
use epimesh::mesh_error::EpiMeshError;
use epimesh::mesh_generation::three_faces_sheet;
use epimesh::topology::point::{EdgeId, FaceId, VertId};
use epimesh::topology::validation::ValidationOptions;

mod util;
use util::{assert_paired, fid, square_sheet};

/// Asserts every original edge of `face` closes a triangle through `center`.
fn assert_fans(d: &Datasets, before: &Datasets, face: FaceId, center: VertId) {
    for e in before.face_edges(face) {
        let orig = &d.edge[e];
        let owner = orig.face;
        let has = |s: VertId, t: VertId| {
            d.edge
                .rows()
                .iter()
                .any(|x| x.srce == s && x.trgt == t && x.face == owner && x.subdiv)
        };
        assert!(has(orig.trgt, center), "edge {e} has no inward spoke");
        assert!(has(center, orig.srce), "edge {e} has no outward spoke");
    }
}

#[test]
fn fan_subdivision_counts() -> Result<(), Box<dyn std::error::Error>> {
    let (sheet, _) = three_faces_sheet(true)?;
    let out = subdivide_faces(&sheet, &[fid(0), fid(2)], SubdivideOptions::default())?;
    assert_eq!(out.nv(), 13 + 2);
    assert_eq!(out.ne(), 18 + 2 * 12);
    assert_eq!(out.nf(), 3);

    // original rows are untouched, apart from recomputed opposites
    for (a, b) in sheet.edge.rows().iter().zip(out.edge.rows()) {
        assert_eq!((a.srce, a.trgt, a.face), (b.srce, b.trgt, b.face));
    }
    assert_eq!(out.vert[VertId::new(13)].pos, sheet.face[fid(0)].pos);
    assert_fans(&out, &sheet, fid(0), VertId::new(13));
    assert_fans(&out, &sheet, fid(2), VertId::new(14));
    assert_paired(&out);
    out.validate(&ValidationOptions::default().allow_multiple_cycles())?;
    Ok(())
}

#[test]
fn unsplit_faces_become_several_cycles() -> Result<(), Box<dyn std::error::Error>> {
    let (sheet, _) = three_faces_sheet(true)?;
    let out = subdivide_faces(&sheet, &[fid(1)], SubdivideOptions::default())?;
    assert!(matches!(
        out.validate(&ValidationOptions::default()),
        Err(EpiMeshError::MultipleCycles { .. })
    ));
    Ok(())
}

#[test]
fn split_faces_are_triangles() -> Result<(), Box<dyn std::error::Error>> {
    let sheet = square_sheet(2, 2, 0.05, 3);
    let out = subdivide_faces(&sheet, &[fid(3), fid(0)], SubdivideOptions { split_faces: true })?;
    assert_eq!(out.nf(), 4 + 8);
    assert!(!out.face[fid(0)].is_alive);
    assert!(!out.face[fid(3)].is_alive);
    assert!(out.face[fid(1)].is_alive);
    for f in 4..12 {
        let face = fid(f);
        assert_eq!(out.face_edges(face).count(), 3, "face {f}");
        assert!(out.face[face].subdiv);
    }
    // the new center of face 3 comes first
    assert_eq!(out.vert[VertId::new(9)].pos, sheet.face[fid(3)].pos);
    out.validate(&ValidationOptions::strict())?;
    Ok(())
}

#[test]
fn bulk_subdivision_inherits_cells() -> Result<(), Box<dyn std::error::Error>> {
    let (sheet, _) = three_faces_sheet(true)?;
    let mono = extrude(&sheet, ExtrudeOptions::default())?;
    // face 6 is the first sagittal quad, in cell 0
    let out = subdivide_faces(&mono, &[fid(6)], SubdivideOptions { split_faces: true })?;
    assert_eq!(out.ne(), mono.ne() + 8);
    for e in mono.ne()..out.ne() {
        let edge = &out.edge[EdgeId::new(e as u32)];
        assert_eq!(edge.cell.map(|c| c.get()), Some(0));
    }
    assert_paired(&out);
    out.validate(&ValidationOptions::strict())?;
    Ok(())
}
