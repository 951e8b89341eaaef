//! Named tissue objects wrapping one mesh generation.
//!
//! [`Epithelium`] is the general container; [`Sheet`] restricts it to 2D
//! meshes (planar or embedded in 3D) and adds the triangulated export.
//! Edits return a new object holding the next generation.

use std::ops::Deref;

use crate::algs::boundary::create_anchors;
use crate::algs::extrude::{ExtrudeOptions, extrude};
use crate::algs::subdivide::{SubdivideOptions, subdivide_faces};
use crate::algs::triangulate::{TriangularMesh, triangular_mesh};
use crate::data::datasets::Datasets;
use crate::data::schema::{Axis, MeshFlavor};
use crate::geometry::face_centroids;
use crate::mesh_error::EpiMeshError;
use crate::topology::half_edge::reset_opposites;
use crate::topology::point::FaceId;
use crate::topology::validation::{ValidationOptions, validate_datasets};

/// A tissue: an identifier and its current tables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Epithelium {
    pub identifier: String,
    pub datasets: Datasets,
}

impl Epithelium {
    /// Wraps `datasets`, checking that the cell table matches the flavor.
    pub fn new(identifier: impl Into<String>, datasets: Datasets) -> Result<Self, EpiMeshError> {
        match (datasets.flavor.has_cells(), datasets.cell.is_some()) {
            (true, false) => Err(EpiMeshError::MissingCellTable("missing on a bulk mesh")),
            (false, true) => Err(EpiMeshError::MissingCellTable("present on a sheet")),
            _ => Ok(Self {
                identifier: identifier.into(),
                datasets,
            }),
        }
    }

    fn next(&self, datasets: Datasets) -> Self {
        Self {
            identifier: self.identifier.clone(),
            datasets,
        }
    }

    #[inline]
    pub fn nv(&self) -> usize {
        self.datasets.nv()
    }

    #[inline]
    pub fn ne(&self) -> usize {
        self.datasets.ne()
    }

    #[inline]
    pub fn nf(&self) -> usize {
        self.datasets.nf()
    }

    #[inline]
    pub fn nc(&self) -> usize {
        self.datasets.nc()
    }

    pub fn flavor(&self) -> MeshFlavor {
        self.datasets.flavor
    }

    /// Embedding axes of the mesh.
    pub fn coords(&self) -> &'static [Axis] {
        self.datasets.flavor.axes()
    }

    /// Re-derives every `opposite` column.
    pub fn reset_topo(&mut self) {
        reset_opposites(&mut self.datasets);
    }

    pub fn validate(&self, options: &ValidationOptions) -> Result<(), EpiMeshError> {
        validate_datasets(&self.datasets, options)
    }

    /// Moves every face reference point to the mean of its edges' source
    /// vertices. Faces without edges keep their position.
    pub fn update_face_centroids(&mut self) {
        let centroids = face_centroids(&self.datasets);
        for (face, c) in self.datasets.face.rows_mut().iter_mut().zip(centroids) {
            if let Some(c) = c {
                face.pos = c;
            }
        }
    }

    pub fn create_anchors(&self) -> Result<Self, EpiMeshError> {
        Ok(self.next(create_anchors(&self.datasets)?))
    }

    pub fn subdivide_faces(
        &self,
        faces: &[FaceId],
        options: SubdivideOptions,
    ) -> Result<Self, EpiMeshError> {
        Ok(self.next(subdivide_faces(&self.datasets, faces, options)?))
    }

    /// Extrudes a flat sheet into a single-layer volumetric epithelium.
    pub fn extrude(&self, options: ExtrudeOptions) -> Result<Self, EpiMeshError> {
        Ok(self.next(extrude(&self.datasets, options)?))
    }
}

/// A 2D epithelium, in a 2D or 3D space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sheet {
    inner: Epithelium,
}

impl Sheet {
    pub fn new(identifier: impl Into<String>, datasets: Datasets) -> Result<Self, EpiMeshError> {
        if datasets.flavor == MeshFlavor::Bulk {
            return Err(EpiMeshError::UnsupportedFlavor {
                found: datasets.flavor.name(),
                expected: "planar or flat_sheet",
            });
        }
        Ok(Self {
            inner: Epithelium::new(identifier, datasets)?,
        })
    }

    /// Forwards to [`Epithelium::ne`]; otherwise `PartialEq::ne` shadows it.
    #[inline]
    pub fn ne(&self) -> usize {
        self.inner.ne()
    }

    pub fn into_epithelium(self) -> Epithelium {
        self.inner
    }

    pub fn datasets_mut(&mut self) -> &mut Datasets {
        &mut self.inner.datasets
    }

    pub fn reset_topo(&mut self) {
        self.inner.reset_topo();
    }

    pub fn update_face_centroids(&mut self) {
        self.inner.update_face_centroids();
    }

    /// See [`triangular_mesh`].
    pub fn triangular_mesh(&self, axes: &[Axis]) -> Result<TriangularMesh, EpiMeshError> {
        triangular_mesh(&self.inner.datasets, axes)
    }

    pub fn create_anchors(&self) -> Result<Self, EpiMeshError> {
        Ok(Self {
            inner: self.inner.create_anchors()?,
        })
    }

    pub fn subdivide_faces(
        &self,
        faces: &[FaceId],
        options: SubdivideOptions,
    ) -> Result<Self, EpiMeshError> {
        Ok(Self {
            inner: self.inner.subdivide_faces(faces, options)?,
        })
    }
}

impl Deref for Sheet {
    type Target = Epithelium;

    fn deref(&self) -> &Epithelium {
        &self.inner
    }
}
