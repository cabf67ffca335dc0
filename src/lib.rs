//! Structured quadrilateral mesh generation and the per-element geometric
//! kernel needed by a 2D finite element assembly loop.
//!
//! The crate builds the element→node connectivity of a structured rectangular
//! grid, evaluates bilinear shape functions and their derivatives on the
//! `[-1, 1]²` reference element, and maps local derivatives into physical
//! space through the element Jacobian. Node coordinates live in an external
//! distributed array exposed through the [CoordinateStore] trait; the mesh
//! holds a non-owning handle and never partitions or mutates coordinate data.
//!
//! ```
//! use quad_mesh::{Mesh, UniformGridStore};
//!
//! let store = UniformGridStore::serial([2, 2], [1.0, 1.0]);
//! let mesh = Mesh::structured(&store, [2, 2], [1.0, 1.0]).unwrap();
//!
//! assert_eq!(mesh.element_count(), 4);
//! assert_eq!(mesh.element_nodes(0).unwrap(), [0, 1, 3, 4]);
//! ```

/// Bilinear shape functions and their local derivatives
pub mod basis;
/// Mesh construction, topology, quadrature, and the element Jacobian transform
pub mod mesh;
/// 2D vector, matrix, and point primitives
pub mod space;
/// Interface to the external distributed coordinate store
pub mod store;

pub use mesh::{ElementDerivs, Mesh, MeshError, QuadratureRule, NODES_PER_ELEMENT};
pub use space::{Point, M2D, V2D};
pub use store::{CoordinateStore, UniformGridStore};
