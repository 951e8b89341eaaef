//! Chained edits: each result feeds the next operation, which either
//! accepts it or returns a typed error.

use epimesh::algs::boundary::create_anchors;
use epimesh::algs::extrude::{ExtrudeOptions, extrude};
use epimesh::algs::subdivide::{SubdivideOptions, subdivide_faces};
use epimesh::data::datasets::Datasets;
use epimesh::data::table::Table;
use epimesh::mesh_error::EpiMeshError;
use epimesh::mesh_generation::three_faces_sheet;
use epimesh::topology::half_edge::reset_opposites;
use epimesh::topology::validation::{ValidationOptions, has_multi_cycle_faces};

mod util;
use util::{assert_paired, fid, square_sheet};

const SPLIT: SubdivideOptions = SubdivideOptions { split_faces: true };

fn anchor_count(d: &Datasets) -> usize {
    d.edge.rows().iter().filter(|e| e.is_anchor).count()
}

#[test]
fn fan_then_anchor() -> Result<(), Box<dyn std::error::Error>> {
    let (sheet, _) = three_faces_sheet(true)?;
    let fan = subdivide_faces(&sheet, &[fid(0), fid(2)], SubdivideOptions::default())?;
    let anchored = create_anchors(&fan)?;
    assert_eq!(anchored.nv(), fan.nv() + 12);
    assert_eq!(anchored.ne(), fan.ne() + 12);
    assert_eq!(anchor_count(&anchored), 12);
    assert!(has_multi_cycle_faces(&anchored));
    anchored.validate(&ValidationOptions::default().allow_multiple_cycles())?;
    assert_paired(&anchored);
    Ok(())
}

#[test]
fn fan_then_extrude_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let (sheet, _) = three_faces_sheet(true)?;
    let fan = subdivide_faces(&sheet, &[fid(1)], SubdivideOptions::default())?;
    assert!(matches!(
        extrude(&fan, ExtrudeOptions::default()),
        Err(EpiMeshError::MultipleCycles { face, .. }) if face == fid(1)
    ));
    Ok(())
}

#[test]
fn split_then_extrude() -> Result<(), Box<dyn std::error::Error>> {
    let sheet = square_sheet(2, 2, 0.05, 11);
    let tris = subdivide_faces(&sheet, &[fid(1), fid(2)], SPLIT)?;
    let mono = extrude(&tris, ExtrudeOptions::default())?;
    assert_eq!(mono.nc(), tris.nf());
    let cells = mono.cell.as_ref().ok_or("extrusion has no cell table")?;
    let alive = cells.rows().iter().filter(|c| c.is_alive).count();
    assert_eq!(alive, 2 + 8);
    // every live cell is closed by its sagittal quads
    for e in mono.edge.rows() {
        if e.face.is_some_and(|f| mono.face[f].is_alive) {
            assert!(e.opposite.is_some());
        }
    }
    assert_paired(&mono);
    mono.validate(&ValidationOptions::strict())?;
    Ok(())
}

#[test]
fn anchor_then_subdivide() -> Result<(), Box<dyn std::error::Error>> {
    let (sheet, _) = three_faces_sheet(true)?;
    let anchored = create_anchors(&sheet)?;

    let fan = subdivide_faces(&anchored, &[fid(0)], SubdivideOptions::default())?;
    assert_eq!(fan.nv(), anchored.nv() + 1);
    assert_eq!(anchor_count(&fan), 12);
    fan.validate(&ValidationOptions::default().allow_multiple_cycles())?;

    let tris = subdivide_faces(&anchored, &[fid(0), fid(1), fid(2)], SPLIT)?;
    assert_eq!(tris.nf(), 3 + 18);
    assert_eq!(anchor_count(&tris), 12);
    tris.validate(&ValidationOptions::default())?;
    assert_paired(&tris);
    Ok(())
}

#[test]
fn fan_anchor_then_split_neighbour() -> Result<(), Box<dyn std::error::Error>> {
    let (sheet, _) = three_faces_sheet(true)?;
    let fan = subdivide_faces(&sheet, &[fid(0)], SubdivideOptions::default())?;
    let anchored = create_anchors(&fan)?;
    let out = subdivide_faces(&anchored, &[fid(1)], SPLIT)?;
    assert!(out.face[fid(0)].is_alive);
    assert!(!out.face[fid(1)].is_alive);
    out.validate(&ValidationOptions::default().allow_multiple_cycles())?;
    Ok(())
}

#[test]
fn open_face_is_refused_everywhere() -> Result<(), Box<dyn std::error::Error>> {
    let mut sheet = square_sheet(2, 2, 0.0, 0);
    let mut rows = sheet.edge.rows().to_vec();
    rows.remove(0);
    sheet.edge = Table::from_rows(rows)?;
    reset_opposites(&mut sheet);

    let is_open = |r: Result<Datasets, EpiMeshError>| {
        matches!(r, Err(EpiMeshError::OpenFace { face, .. }) if face == fid(0))
    };
    assert!(is_open(create_anchors(&sheet)));
    assert!(is_open(subdivide_faces(&sheet, &[fid(3)], SubdivideOptions::default())));
    assert!(is_open(subdivide_faces(&sheet, &[fid(3)], SPLIT)));
    assert!(is_open(extrude(&sheet, ExtrudeOptions::default())));
    Ok(())
}
