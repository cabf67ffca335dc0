mod jacobian;
pub mod quadrature;
pub mod topology;

pub use jacobian::{ElementDerivs, MIN_JACOBIAN_DET};
pub use quadrature::QuadratureRule;
pub use topology::NODES_PER_ELEMENT;

use crate::space::{Point, V2D};
use crate::store::CoordinateStore;
use json::{array, object, JsonValue};
use log::{debug, info};
use rayon::prelude::*;
use std::fmt;

#[derive(Debug, PartialEq)]
/// Everything that can go wrong while building or querying a [Mesh]
pub enum MeshError {
    /// Non-positive element count along an axis
    InvalidResolution { axis: usize, count: usize },
    /// Axis index outside `[0, dim)`
    AxisOutOfRange(usize),
    /// Gauss point index outside `[0, 4)`
    GaussPointOutOfRange(usize),
    /// Element id outside the connectivity table
    ElementOutOfRange(usize),
    /// ijk grid index outside the node grid
    NodeOutOfRange { index: usize, axis: usize },
    /// A node required by an element evaluation is not owned by the local
    /// partition
    NodeNotLocal { node_id: usize },
    /// Near-zero Jacobian determinant
    DegenerateElement { elem_id: usize, det: f64 },
    /// Operation only implemented for 2D meshes
    UnsupportedDimension(usize),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidResolution { axis, count } => write!(
                f,
                "Element count along axis {} must be positive; got {}; cannot build Mesh!",
                axis, count
            ),
            Self::AxisOutOfRange(axis) => {
                write!(f, "Axis {} is outside the Mesh's dimension!", axis)
            }
            Self::GaussPointOutOfRange(index) => {
                write!(f, "Gauss point index {} is outside [0, 4)!", index)
            }
            Self::ElementOutOfRange(elem_id) => {
                write!(f, "Element {} does not exist!", elem_id)
            }
            Self::NodeOutOfRange { index, axis } => write!(
                f,
                "Node index {} is outside the grid along axis {}!",
                index, axis
            ),
            Self::NodeNotLocal { node_id } => write!(
                f,
                "Node {}'s coordinates are not owned by the local partition!",
                node_id
            ),
            Self::DegenerateElement { elem_id, det } => write!(
                f,
                "Element {} has a degenerate Jacobian (det = {:e}); cannot compute global derivatives!",
                elem_id, det
            ),
            Self::UnsupportedDimension(dim) => write!(
                f,
                "{}-dimensional meshes are not supported by this operation!",
                dim
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Structured quadrilateral mesh over a rectangular domain.
///
/// Owns its connectivity and quadrature tables, which are built once at
/// construction and never mutated. Node coordinates are read through a
/// non-owning handle to an external [CoordinateStore]; see
/// [Mesh::node_coords] for the partition-aware lookup.
pub struct Mesh<'s, S: CoordinateStore> {
    store: &'s S,
    dim: usize,
    el_counts: [usize; 3],
    node_counts: [usize; 3],
    lengths: [f64; 3],
    element_count: usize,
    connectivity: Vec<[usize; NODES_PER_ELEMENT]>,
    gauss_points: [V2D; 4],
    local_element_count: usize,
}

impl<'s, S: CoordinateStore> Mesh<'s, S> {
    /// Build an `el_counts[0]` by `el_counts[1]` structured grid over a
    /// rectangular domain with physical extents `lengths`.
    ///
    /// Fails with [MeshError::InvalidResolution] if either element count is
    /// zero; no partially-built mesh is ever exposed.
    pub fn structured(
        store: &'s S,
        el_counts: [usize; 2],
        lengths: [f64; 2],
    ) -> Result<Self, MeshError> {
        info!(
            "building {}x{} structured quad mesh",
            el_counts[0], el_counts[1]
        );

        let connectivity = topology::structured_connectivity(el_counts)?;
        let element_count = connectivity.len();
        let local_element_count = store.local_element_count();
        debug!(
            "{} of {} elements owned locally",
            local_element_count, element_count
        );

        Ok(Self {
            store,
            dim: 2,
            el_counts: [el_counts[0], el_counts[1], 0],
            node_counts: [el_counts[0] + 1, el_counts[1] + 1, 0],
            lengths: [lengths[0], lengths[1], 0.0],
            element_count,
            connectivity,
            gauss_points: quadrature::bilinear_table(),
            local_element_count,
        })
    }

    pub fn gauss_point_count(&self) -> usize {
        self.gauss_points.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Number of elements owned by the local partition, cached from the
    /// store at construction
    pub fn local_element_count(&self) -> usize {
        self.local_element_count
    }

    pub fn nodes_per_element(&self) -> usize {
        NODES_PER_ELEMENT
    }

    pub fn node_count(&self) -> usize {
        let mut count = self.node_counts[0] * self.node_counts[1];
        if self.dim == 3 {
            count *= self.node_counts[2];
        }
        count
    }

    /// Number of nodes along `axis`
    pub fn node_resolution(&self, axis: usize) -> Result<usize, MeshError> {
        if axis >= self.dim {
            return Err(MeshError::AxisOutOfRange(axis));
        }
        Ok(self.node_counts[axis])
    }

    /// Nodal spacing along `axis`: `lengths[axis] / el_counts[axis]`
    pub fn node_separation(&self, axis: usize) -> Result<f64, MeshError> {
        if axis >= self.dim {
            return Err(MeshError::AxisOutOfRange(axis));
        }
        Ok(self.lengths[axis] / self.el_counts[axis] as f64)
    }

    /// Reference coordinates of gauss point `index`
    pub fn gauss_point(&self, index: usize) -> Result<V2D, MeshError> {
        self.gauss_points
            .get(index)
            .copied()
            .ok_or(MeshError::GaussPointOutOfRange(index))
    }

    /// Global node ids of element `elem_id`, in the fixed corner order
    pub fn element_nodes(&self, elem_id: usize) -> Result<[usize; NODES_PER_ELEMENT], MeshError> {
        self.connectivity
            .get(elem_id)
            .copied()
            .ok_or(MeshError::ElementOutOfRange(elem_id))
    }

    /// Global node id of grid position `(i, j)`
    pub fn node_id_from_ijk(&self, i: usize, j: usize) -> Result<usize, MeshError> {
        if self.dim != 2 {
            return Err(MeshError::UnsupportedDimension(self.dim));
        }
        if i >= self.node_counts[0] {
            return Err(MeshError::NodeOutOfRange { index: i, axis: 0 });
        }
        if j >= self.node_counts[1] {
            return Err(MeshError::NodeOutOfRange { index: j, axis: 1 });
        }

        Ok(i + j * self.node_counts[0])
    }

    /// Physical coordinate of a global node id, or `None` if the node is not
    /// owned by the local partition.
    ///
    /// A miss is a normal outcome in a partitioned run; no remote fetch is
    /// attempted.
    pub fn node_coords(&self, node_id: usize) -> Option<Point> {
        let [low, high] = self.store.ownership_range();
        if node_id < low || node_id >= high {
            return None;
        }

        let buffer = self.store.coord_buffer();
        let start = node_id * self.dim;
        Some(Point::new(buffer[start], buffer[start + 1]))
    }

    /// Jacobian, determinant, and global shape function derivatives for
    /// element `elem_id` at reference point `at`.
    ///
    /// All four of the element's nodes must be locally owned; a miss is
    /// surfaced as [MeshError::NodeNotLocal].
    pub fn global_derivs(&self, elem_id: usize, at: V2D) -> Result<ElementDerivs, MeshError> {
        if self.dim != 2 {
            return Err(MeshError::UnsupportedDimension(self.dim));
        }

        let node_ids = self.element_nodes(elem_id)?;
        let mut corners = [Point::default(); NODES_PER_ELEMENT];
        for (corner, node_id) in corners.iter_mut().zip(node_ids) {
            *corner = self
                .node_coords(node_id)
                .ok_or(MeshError::NodeNotLocal { node_id })?;
        }

        jacobian::evaluate(elem_id, &corners, at)
    }

    /// Sweep every element at every gauss point and collect `(elem_id, det)`
    /// for the ones with a degenerate Jacobian. Elements whose nodes are not
    /// all locally owned are skipped.
    pub fn detect_degenerate_elements(&self) -> Vec<(usize, f64)>
    where
        S: Sync,
    {
        (0..self.element_count)
            .into_par_iter()
            .filter_map(|elem_id| {
                for index in 0..self.gauss_points.len() {
                    match self.global_derivs(elem_id, self.gauss_points[index]) {
                        Err(MeshError::DegenerateElement { det, .. }) => {
                            return Some((elem_id, det))
                        }
                        Err(MeshError::NodeNotLocal { .. }) => return None,
                        _ => {}
                    }
                }
                None
            })
            .collect()
    }

    /// Json description of the mesh topology and quadrature table
    pub fn to_json(&self) -> JsonValue {
        object! {
            "dim": self.dim,
            "element_counts": array![self.el_counts[0], self.el_counts[1]],
            "node_counts": array![self.node_counts[0], self.node_counts[1]],
            "lengths": array![self.lengths[0], self.lengths[1]],
            "local_element_count": self.local_element_count,
            "elements": JsonValue::from(
                self.connectivity
                    .iter()
                    .map(|nodes| JsonValue::from(nodes.to_vec()))
                    .collect::<Vec<JsonValue>>()
            ),
            "gauss_points": JsonValue::from(
                self.gauss_points
                    .iter()
                    .map(|point| JsonValue::from(*point))
                    .collect::<Vec<JsonValue>>()
            ),
        }
    }
}

impl<'s, S: CoordinateStore> fmt::Display for Mesh<'s, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}x{} structured quad mesh: {} elements ({} local), {} nodes",
            self.el_counts[0],
            self.el_counts[1],
            self.element_count,
            self.local_element_count,
            self.node_count(),
        )?;
        for (elem_id, nodes) in self.connectivity.iter().enumerate() {
            writeln!(
                f,
                "  El {} = {{ {} {} {} {} }}",
                elem_id, nodes[0], nodes[1], nodes[2], nodes[3]
            )?;
        }
        writeln!(f, "  gauss points:")?;
        for point in self.gauss_points.iter() {
            writeln!(f, "    {}", point)?;
        }
        Ok(())
    }
}

impl<'s, S: CoordinateStore> Drop for Mesh<'s, S> {
    fn drop(&mut self) {
        debug!("dropping mesh ({} elements)", self.element_count);
    }
}
