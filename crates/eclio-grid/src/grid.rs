//! Corner-point grid with active-cell indexing.

use crate::error::GridError;

/// Sentinel in the global → active map for inactive cells.
const INACTIVE: u32 = u32::MAX;

/// A corner-point grid as exported to `EGRID`.
///
/// Cells are addressed three ways:
/// - `(i, j, k)` with `i` fastest,
/// - global index `i + nx * (j + ny * k)` over all `nx * ny * nz` cells,
/// - active index, counting only cells with `ACTNUM != 0` in global order.
///
/// The index maps are built once at construction; the grid is immutable
/// afterwards. Geometry is stored in SI (metres).
///
/// # Examples
///
/// ```
/// use eclio_grid::EclipseGrid;
///
/// let grid = EclipseGrid::from_cartesian(
///     [3, 3, 3],
///     &[1.0, 2.0, 3.0],
///     &[4.0, 5.0, 6.0],
///     &[7.0, 8.0, 9.0],
///     &[100.0; 9],
/// )
/// .unwrap();
/// assert_eq!(grid.num_active(), 27);
/// assert_eq!(grid.active_index(1, 0, 0), Some(1));
/// assert_eq!(grid.coord().len(), 4 * 4 * 6);
/// ```
#[derive(Debug, Clone)]
pub struct EclipseGrid {
    dims: [usize; 3],
    coord: Vec<f64>,
    zcorn: Vec<f64>,
    actnum: Option<Vec<i32>>,
    global_to_active: Vec<u32>,
    active_to_global: Vec<usize>,
}

impl EclipseGrid {
    /// Build a grid from raw corner-point arrays.
    ///
    /// `coord` must hold `6 * (nx + 1) * (ny + 1)` values, `zcorn`
    /// `8 * nx * ny * nz`, and `actnum` (when given) `nx * ny * nz`.
    pub fn new(
        dims: [usize; 3],
        coord: Vec<f64>,
        zcorn: Vec<f64>,
        actnum: Option<Vec<i32>>,
    ) -> Result<Self, GridError> {
        let [nx, ny, nz] = dims;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::EmptyGrid);
        }
        check_len("COORD", 6 * (nx + 1) * (ny + 1), coord.len())?;
        check_len("ZCORN", 8 * nx * ny * nz, zcorn.len())?;
        if let Some(a) = &actnum {
            check_len("ACTNUM", nx * ny * nz, a.len())?;
        }

        let size = nx * ny * nz;
        let mut global_to_active = vec![INACTIVE; size];
        let mut active_to_global = Vec::with_capacity(size);
        for (g, slot) in global_to_active.iter_mut().enumerate() {
            let active = actnum.as_ref().is_none_or(|a| a[g] != 0);
            if active {
                *slot = active_to_global.len() as u32;
                active_to_global.push(g);
            }
        }

        Ok(Self {
            dims,
            coord,
            zcorn,
            actnum,
            global_to_active,
            active_to_global,
        })
    }

    /// Build a block-centred Cartesian grid from `DXV`/`DYV`/`DZV` and
    /// top-layer `TOPS`.
    ///
    /// Pillars are vertical; each cell's top is `TOPS[i, j]` plus the
    /// thickness of the layers above it.
    pub fn from_cartesian(
        dims: [usize; 3],
        dxv: &[f64],
        dyv: &[f64],
        dzv: &[f64],
        tops: &[f64],
    ) -> Result<Self, GridError> {
        let [nx, ny, nz] = dims;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::EmptyGrid);
        }
        check_len("DXV", nx, dxv.len())?;
        check_len("DYV", ny, dyv.len())?;
        check_len("DZV", nz, dzv.len())?;
        check_len("TOPS", nx * ny, tops.len())?;

        let xs = prefix_sums(dxv);
        let ys = prefix_sums(dyv);
        let zs = prefix_sums(dzv);
        let z_top = tops.iter().copied().fold(f64::INFINITY, f64::min);
        let z_bottom = tops.iter().copied().fold(f64::NEG_INFINITY, f64::max) + zs[nz];

        let mut coord = Vec::with_capacity(6 * (nx + 1) * (ny + 1));
        for &y in &ys {
            for &x in &xs {
                coord.extend_from_slice(&[x, y, z_top, x, y, z_bottom]);
            }
        }

        let mut zcorn = vec![0.0; 8 * nx * ny * nz];
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let top = tops[i + nx * j] + zs[k];
                    let bottom = top + dzv[k];
                    for c in 0..8 {
                        let z = if c >> 2 == 0 { top } else { bottom };
                        zcorn[zcorn_index(dims, [i, j, k], c)] = z;
                    }
                }
            }
        }

        Self::new(dims, coord, zcorn, None)
    }

    /// Replace the ACTNUM array, rebuilding the active index maps.
    pub fn with_actnum(self, actnum: Vec<i32>) -> Result<Self, GridError> {
        Self::new(self.dims, self.coord, self.zcorn, Some(actnum))
    }

    /// `[nx, ny, nz]`.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Number of cells in the full Cartesian box.
    pub fn cartesian_size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Number of active cells.
    pub fn num_active(&self) -> usize {
        self.active_to_global.len()
    }

    /// Global index of `(i, j, k)`.
    pub fn global_index(&self, i: usize, j: usize, k: usize) -> Result<usize, GridError> {
        let [nx, ny, nz] = self.dims;
        if i >= nx || j >= ny || k >= nz {
            return Err(GridError::CellOutOfBounds {
                ijk: [i, j, k],
                dims: self.dims,
            });
        }
        Ok(i + nx * (j + ny * k))
    }

    /// `(i, j, k)` of a global index.
    pub fn ijk(&self, global: usize) -> [usize; 3] {
        let [nx, ny, _] = self.dims;
        [global % nx, (global / nx) % ny, global / (nx * ny)]
    }

    /// Active index of `(i, j, k)`, or `None` for inactive or out-of-bounds cells.
    pub fn active_index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        self.global_index(i, j, k)
            .ok()
            .and_then(|g| self.active_index_of(g))
    }

    /// Active index of a global index, or `None` if the cell is inactive.
    pub fn active_index_of(&self, global: usize) -> Option<usize> {
        match self.global_to_active.get(global) {
            Some(&a) if a != INACTIVE => Some(a as usize),
            _ => None,
        }
    }

    /// Whether the global cell is active.
    pub fn is_active(&self, global: usize) -> bool {
        self.active_index_of(global).is_some()
    }

    /// Global indices of the active cells, in active order.
    pub fn active_cells(&self) -> &[usize] {
        &self.active_to_global
    }

    /// Pillar coordinates, `6 * (nx + 1) * (ny + 1)` values.
    pub fn coord(&self) -> &[f64] {
        &self.coord
    }

    /// Corner depths, `8 * nx * ny * nz` values.
    pub fn zcorn(&self) -> &[f64] {
        &self.zcorn
    }

    /// ACTNUM over the Cartesian box; all ones when no ACTNUM was given.
    pub fn actnum(&self) -> Vec<i32> {
        match &self.actnum {
            Some(a) => a.clone(),
            None => vec![1; self.cartesian_size()],
        }
    }

    /// Compress a Cartesian-sized array to active cells.
    pub fn compress<T: Copy>(&self, global: &[T]) -> Vec<T> {
        self.active_to_global.iter().map(|&g| global[g]).collect()
    }

    /// The eight corners of a cell as `[x, y, z]`, ordered with `i` fastest,
    /// then `j`, then top before bottom.
    pub fn cell_corners(&self, global: usize) -> [[f64; 3]; 8] {
        let ijk = self.ijk(global);
        let nx = self.dims[0];
        let mut corners = [[0.0; 3]; 8];
        for (c, corner) in corners.iter_mut().enumerate() {
            let pi = ijk[0] + (c & 1);
            let pj = ijk[1] + ((c >> 1) & 1);
            let p = 6 * (pi + (nx + 1) * pj);
            let pillar = &self.coord[p..p + 6];
            let z = self.zcorn[zcorn_index(self.dims, ijk, c)];
            let dz = pillar[5] - pillar[2];
            let t = if dz == 0.0 { 0.0 } else { (z - pillar[2]) / dz };
            *corner = [
                pillar[0] + t * (pillar[3] - pillar[0]),
                pillar[1] + t * (pillar[4] - pillar[1]),
                z,
            ];
        }
        corners
    }

    /// Mean cell extent along each axis, `[dx, dy, dz]`.
    pub fn cell_dims(&self, global: usize) -> [f64; 3] {
        let corners = self.cell_corners(global);
        let mut out = [0.0; 3];
        for (axis, bit) in [(0usize, 1usize), (1, 2), (2, 4)] {
            let mut sum = 0.0;
            for c in (0..8).filter(|c| c & bit == 0) {
                let a = corners[c];
                let b = corners[c | bit];
                sum += ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2) + (b[2] - a[2]).powi(2))
                    .sqrt();
            }
            out[axis] = sum / 4.0;
        }
        out
    }

    /// Depth of the cell centre.
    pub fn cell_depth(&self, global: usize) -> f64 {
        self.cell_corners(global).iter().map(|c| c[2]).sum::<f64>() / 8.0
    }

    /// Bulk volume, approximated as `dx * dy * dz`.
    pub fn cell_volume(&self, global: usize) -> f64 {
        self.cell_dims(global).iter().product()
    }
}

/// Position of corner `c` of cell `ijk` in the ZCORN array.
fn zcorn_index(dims: [usize; 3], ijk: [usize; 3], c: usize) -> usize {
    let [nx, ny, _] = dims;
    let [i, j, k] = ijk;
    let ic = c & 1;
    let jc = (c >> 1) & 1;
    let kc = c >> 2;
    k * 8 * nx * ny + kc * 4 * nx * ny + j * 4 * nx + jc * 2 * nx + i * 2 + ic
}

fn prefix_sums(widths: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(widths.len() + 1);
    let mut acc = 0.0;
    out.push(acc);
    for &w in widths {
        acc += w;
        out.push(acc);
    }
    out
}

fn check_len(name: &str, expected: usize, found: usize) -> Result<(), GridError> {
    if expected != found {
        return Err(GridError::SizeMismatch {
            name: name.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_333() -> EclipseGrid {
        EclipseGrid::from_cartesian(
            [3, 3, 3],
            &[1.0, 2.0, 3.0],
            &[4.0, 5.0, 6.0],
            &[7.0, 8.0, 9.0],
            &[100.0; 9],
        )
        .unwrap()
    }

    #[test]
    fn zero_dimension_rejected() {
        let err = EclipseGrid::new([0, 1, 1], vec![], vec![], None).unwrap_err();
        assert_eq!(err, GridError::EmptyGrid);
    }

    #[test]
    fn wrong_zcorn_length_rejected() {
        let err = EclipseGrid::new([1, 1, 1], vec![0.0; 24], vec![0.0; 7], None).unwrap_err();
        assert!(matches!(err, GridError::SizeMismatch { ref name, expected: 8, found: 7 } if name == "ZCORN"));
    }

    #[test]
    fn cartesian_geometry() {
        let grid = grid_333();
        let g = grid.global_index(2, 1, 2).unwrap();
        let [dx, dy, dz] = grid.cell_dims(g);
        assert!((dx - 3.0).abs() < 1e-12);
        assert!((dy - 5.0).abs() < 1e-12);
        assert!((dz - 9.0).abs() < 1e-12);
        // Layer 2 starts at 100 + 7 + 8.
        assert!((grid.cell_depth(g) - (115.0 + 4.5)).abs() < 1e-12);
        assert!((grid.cell_volume(g) - 135.0).abs() < 1e-9);
    }

    #[test]
    fn actnum_drives_active_indexing() {
        let mut actnum = vec![1; 27];
        actnum[0] = 0;
        actnum[5] = 0;
        let grid = grid_333().with_actnum(actnum).unwrap();
        assert_eq!(grid.num_active(), 25);
        assert_eq!(grid.active_index(0, 0, 0), None);
        assert_eq!(grid.active_index(1, 0, 0), Some(0));
        assert_eq!(grid.active_index_of(6), Some(4));
        assert_eq!(grid.actnum()[5], 0);
        assert_eq!(grid.compress(&(0..27).collect::<Vec<_>>())[..2], [1, 2]);
    }

    #[test]
    fn missing_actnum_exports_all_ones() {
        assert_eq!(grid_333().actnum(), vec![1; 27]);
    }

    #[test]
    fn out_of_bounds_cell() {
        let grid = grid_333();
        assert!(matches!(
            grid.global_index(3, 0, 0),
            Err(GridError::CellOutOfBounds { .. })
        ));
        assert_eq!(grid.active_index(0, 0, 3), None);
    }

    proptest! {
        #[test]
        fn ijk_global_roundtrip(i in 0usize..3, j in 0usize..3, k in 0usize..3) {
            let grid = grid_333();
            let g = grid.global_index(i, j, k).unwrap();
            prop_assert_eq!(grid.ijk(g), [i, j, k]);
        }
    }
}
