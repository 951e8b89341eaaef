//! Entity records, column schemas and the dense tables holding them.

pub mod datasets;
pub mod records;
pub mod schema;
pub mod table;

pub use datasets::Datasets;
pub use records::{Cell, Edge, Face, Record, Segment, Vertex};
pub use schema::{Axis, ColumnSpec, ColumnValue, EntityKind, MeshFlavor, MeshSchema, spec};
pub use table::{Table, make_table};
