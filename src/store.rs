/// Read-only view of the distributed node-coordinate array owned by an
/// external collaborator.
///
/// The mesh queries this interface but never mutates it or triggers
/// communication through it; looking up a node outside the ownership range
/// is a normal miss, not an error.
pub trait CoordinateStore {
    /// Global node ids whose coordinates are stored locally, as `[low, high)`
    fn ownership_range(&self) -> [usize; 2];

    /// Flat coordinate buffer: `dim` consecutive scalars per node, indexed by
    /// `global_node_id * dim`. Only entries inside the ownership range hold
    /// valid data.
    fn coord_buffer(&self) -> &[f64];

    /// Number of elements owned by the local partition
    fn local_element_count(&self) -> usize;
}

/// In-process [CoordinateStore] holding uniform coordinates over a
/// rectangular domain. Serves as the store for serial runs and as a
/// partition test double via [UniformGridStore::with_ownership].
pub struct UniformGridStore {
    coords: Vec<f64>,
    range: [usize; 2],
    local_elements: usize,
}

impl UniformGridStore {
    /// Store covering the full grid, with every node owned locally
    pub fn serial(el_counts: [usize; 2], lengths: [f64; 2]) -> Self {
        let node_count = (el_counts[0] + 1) * (el_counts[1] + 1);
        Self::with_ownership(el_counts, lengths, [0, node_count], el_counts[0] * el_counts[1])
    }

    /// Store exposing only the node ids in `range` as locally owned.
    /// The coordinate buffer still spans the full grid.
    pub fn with_ownership(
        el_counts: [usize; 2],
        lengths: [f64; 2],
        range: [usize; 2],
        local_elements: usize,
    ) -> Self {
        assert!(
            el_counts[0] > 0 && el_counts[1] > 0,
            "Element counts must be positive; cannot lay out coordinates!"
        );

        let node_counts = [el_counts[0] + 1, el_counts[1] + 1];
        let sep = [
            lengths[0] / el_counts[0] as f64,
            lengths[1] / el_counts[1] as f64,
        ];

        let mut coords = Vec::with_capacity(2 * node_counts[0] * node_counts[1]);
        for j in 0..node_counts[1] {
            for i in 0..node_counts[0] {
                coords.push(i as f64 * sep[0]);
                coords.push(j as f64 * sep[1]);
            }
        }

        Self {
            coords,
            range,
            local_elements,
        }
    }

}

impl CoordinateStore for UniformGridStore {
    fn ownership_range(&self) -> [usize; 2] {
        self.range
    }

    fn coord_buffer(&self) -> &[f64] {
        &self.coords
    }

    fn local_element_count(&self) -> usize {
        self.local_elements
    }
}
