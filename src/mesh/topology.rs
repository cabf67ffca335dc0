use super::MeshError;

/*
    Element and node numbering for a 3x2 grid; elements are row-major
    (el = i + j*nx) and node rows are strided by nx + 1:

    8 ----- 9 ----- 10 ----- 11
    |   3   |   4   |   5    |
    4 ----- 5 ----- 6 ------ 7
    |   0   |   1   |   2    |
    0 ----- 1 ----- 2 ------ 3

    Within one element, node indices follow the reference layout in
    [crate::basis]:

    2 ------ 3
    |        |
    0 ------ 1
*/

/// Number of nodes referenced by each bilinear quadrilateral
pub const NODES_PER_ELEMENT: usize = 4;

/// Build the element→node table for a structured `el_counts[0]` by
/// `el_counts[1]` grid as one contiguous allocation.
pub(crate) fn structured_connectivity(
    el_counts: [usize; 2],
) -> Result<Vec<[usize; NODES_PER_ELEMENT]>, MeshError> {
    for (axis, &count) in el_counts.iter().enumerate() {
        if count == 0 {
            return Err(MeshError::InvalidResolution { axis, count });
        }
    }

    let [nx, ny] = el_counts;
    let node_stride = nx + 1;

    let mut table = vec![[0usize; NODES_PER_ELEMENT]; nx * ny];
    for j in 0..ny {
        for i in 0..nx {
            let origin = j * node_stride + i;
            table[i + j * nx] = [
                origin,
                origin + 1,
                origin + node_stride,
                origin + node_stride + 1,
            ];
        }
    }

    Ok(table)
}
