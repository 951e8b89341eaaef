use epimesh::data::datasets::Datasets;
use epimesh::data::schema::EntityKind;
use epimesh::debug_invariants::DebugInvariants;
use epimesh::epithelium::Sheet;
use epimesh::mesh_error::EpiMeshError;
use epimesh::mesh_generation::three_faces_sheet;
use epimesh::topology::half_edge::reset_opposites;
use epimesh::topology::validation::{NonManifoldHandling, ValidationOptions};

mod util;
use util::{eid, fid, vid};

#[test]
fn fixture_satisfies_invariants() -> Result<(), Box<dyn std::error::Error>> {
    let (d, _) = three_faces_sheet(true)?;
    assert!(d.validate_invariants().is_ok());
    d.debug_assert_invariants();
    Ok(())
}

#[test]
fn dangling_vertex_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let (mut d, _) = three_faces_sheet(true)?;
    d.edge[eid(4)].trgt = vid(40);
    let e = d.validate_invariants().unwrap_err();
    assert_eq!(
        e,
        EpiMeshError::DanglingReference {
            edge: eid(4),
            kind: EntityKind::Vert,
            index: 40,
        }
    );
    Ok(())
}

#[test]
fn one_sided_opposite_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let (mut d, _) = three_faces_sheet(true)?;
    d.edge[eid(0)].opposite = Some(eid(3));
    assert!(matches!(
        d.validate_invariants(),
        Err(EpiMeshError::OppositeMismatch { .. })
    ));
    // reset_opposites repairs it
    reset_opposites(&mut d);
    d.validate_invariants()?;
    Ok(())
}

#[test]
fn open_face_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let (mut d, _) = three_faces_sheet(true)?;
    d.edge[eid(2)].face = Some(fid(1));
    reset_opposites(&mut d);
    assert!(matches!(
        d.validate_invariants(),
        Err(EpiMeshError::OpenFace { .. })
    ));
    // a soft-deleted face is not checked
    d.face[fid(0)].is_alive = false;
    d.face[fid(1)].is_alive = false;
    d.validate_invariants()?;
    Ok(())
}

#[test]
fn duplicated_half_edge_is_non_manifold() -> Result<(), Box<dyn std::error::Error>> {
    let (d, _) = three_faces_sheet(true)?;
    let mut rows = d.edge.clone().into_rows();
    let copy = rows[1].clone();
    rows.push(copy);
    let mut dup = Datasets {
        edge: epimesh::data::table::Table::from_rows(rows)?,
        ..d
    };
    reset_opposites(&mut dup);

    let mut warn_only = ValidationOptions::default();
    warn_only.check_face_closure = false;
    dup.validate(&warn_only)?;

    let strict = ValidationOptions {
        non_manifold: NonManifoldHandling::Error,
        ..warn_only
    };
    assert_eq!(
        dup.validate(&strict),
        Err(EpiMeshError::NonManifoldEdge {
            srce: vid(1),
            trgt: vid(2),
            count: 2,
        })
    );
    Ok(())
}

#[test]
fn sheets_round_trip_through_json() -> Result<(), Box<dyn std::error::Error>> {
    let (d, _) = three_faces_sheet(true)?;
    let mut sheet = Sheet::new("three", d)?;
    sheet.update_face_centroids();
    let anchored = sheet.create_anchors()?;
    let text = serde_json::to_string(&anchored)?;
    let back: Sheet = serde_json::from_str(&text)?;
    assert_eq!(back.identifier, anchored.identifier);
    assert_eq!(back.flavor(), anchored.flavor());
    assert_eq!(back.datasets.edge, anchored.datasets.edge);
    for (a, b) in back.datasets.vert.rows().iter().zip(anchored.datasets.vert.rows()) {
        assert_eq!((a.is_anchor, a.at_border), (b.is_anchor, b.at_border));
        for c in 0..3 {
            assert!((a.pos[c] - b.pos[c]).abs() < 1e-12);
        }
    }
    assert_eq!(back.nv(), anchored.nv());
    assert_eq!(back.nf(), anchored.nf());
    Ok(())
}

#[test]
#[should_panic(expected = "[invariants] intentional")]
fn debug_invariants_macro_panics() {
    epimesh::debug_invariants!(
        Err::<(), EpiMeshError>(EpiMeshError::InvalidGeometry("bad".into())),
        "intentional"
    );
}
