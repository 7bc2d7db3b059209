// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Affine transforms and bounding boxes
//!
//! Geometry transforms are 3x4 affine matrices stored column-major: the first
//! nine values are the rotation/scale block, the last three the translation.

use nalgebra::{Matrix3x4, Vector3};

/// Column-major 3x4 affine transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3x4 {
    pub data: [f32; 12],
}

impl Mat3x4 {
    /// Identity transform
    pub const IDENTITY: Mat3x4 = Mat3x4 {
        data: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
    };

    /// Build from three rows of four values, as written by REV producers
    pub fn from_rows(rows: [[f32; 4]; 3]) -> Self {
        let mut data = [0.0; 12];
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                data[3 * c + r] = *value;
            }
        }
        Self { data }
    }

    /// Pure translation
    pub fn from_translation(t: [f32; 3]) -> Self {
        let mut m = Self::IDENTITY;
        m.data[9..].copy_from_slice(&t);
        m
    }

    /// Value at row `r`, column `c`
    pub fn get(&self, r: usize, c: usize) -> f32 {
        self.data[3 * c + r]
    }

    /// Translation column
    pub fn translation(&self) -> [f32; 3] {
        [self.data[9], self.data[10], self.data[11]]
    }

    /// View as a nalgebra matrix
    pub fn to_matrix(&self) -> Matrix3x4<f32> {
        Matrix3x4::from_column_slice(&self.data)
    }

    /// Apply the full affine transform to a point
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let m = self.to_matrix();
        let linear = m.fixed_view::<3, 3>(0, 0).into_owned();
        let translation: Vector3<f32> = m.column(3).into_owned();
        let out = linear * Vector3::from(p) + translation;
        [out.x, out.y, out.z]
    }

    /// Apply only the rotation/scale block to a direction
    pub fn transform_vector(&self, v: [f32; 3]) -> [f32; 3] {
        let linear = self.to_matrix().fixed_view::<3, 3>(0, 0).into_owned();
        let out = linear * Vector3::from(v);
        [out.x, out.y, out.z]
    }
}

impl Default for Mat3x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBox3 {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BBox3 {
    /// Create from min and max corners
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Create from six values: min xyz followed by max xyz
    pub fn from_array(v: [f32; 6]) -> Self {
        Self {
            min: [v[0], v[1], v[2]],
            max: [v[3], v[4], v[5]],
        }
    }

    /// The eight corners
    pub fn corners(&self) -> [[f32; 3]; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            [lo[0], lo[1], lo[2]],
            [hi[0], lo[1], lo[2]],
            [lo[0], hi[1], lo[2]],
            [hi[0], hi[1], lo[2]],
            [lo[0], lo[1], hi[2]],
            [hi[0], lo[1], hi[2]],
            [lo[0], hi[1], hi[2]],
            [hi[0], hi[1], hi[2]],
        ]
    }

    /// Size along each axis
    pub fn extent(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Bounding box of `bbox` after applying `m`
///
/// Transforms all eight corners, so rotated boxes grow to stay axis aligned.
pub fn transform_bbox(m: &Mat3x4, bbox: &BBox3) -> BBox3 {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for corner in bbox.corners() {
        let p = m.transform_point(corner);
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    BBox3 { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rows_are_transposed() {
        let m = Mat3x4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
        ]);
        assert_eq!(
            m.data,
            [1.0, 5.0, 9.0, 2.0, 6.0, 10.0, 3.0, 7.0, 11.0, 4.0, 8.0, 12.0]
        );
        assert_eq!(m.get(1, 2), 7.0);
        assert_eq!(m.translation(), [4.0, 8.0, 12.0]);
    }

    #[test]
    fn test_translation_moves_origin() {
        let m = Mat3x4::from_rows([
            [1.0, 0.0, 0.0, 10.0],
            [0.0, 1.0, 0.0, 20.0],
            [0.0, 0.0, 1.0, 30.0],
        ]);
        assert_eq!(m.transform_point([0.0, 0.0, 0.0]), [10.0, 20.0, 30.0]);
        assert_eq!(m.transform_vector([1.0, 0.0, 0.0]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rotation_about_z() {
        // 90 degrees: x -> y
        let m = Mat3x4::from_rows([
            [0.0, -1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ]);
        let p = m.transform_point([1.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 0.0);
        assert_relative_eq!(p[1], 1.0);
        assert_relative_eq!(p[2], 0.0);
    }

    #[test]
    fn test_identity_bbox_is_unchanged() {
        let local = BBox3::new([-1.0, -2.0, -3.0], [4.0, 5.0, 6.0]);
        assert_eq!(transform_bbox(&Mat3x4::IDENTITY, &local), local);
    }

    #[test]
    fn test_translated_bbox_is_shifted() {
        let local = BBox3::new([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let world = transform_bbox(&Mat3x4::from_translation([10.0, 20.0, 30.0]), &local);
        assert_eq!(world.min, [9.0, 19.0, 29.0]);
        assert_eq!(world.max, [11.0, 21.0, 31.0]);
    }

    #[test]
    fn test_rotated_bbox_stays_axis_aligned() {
        let local = BBox3::new([0.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        let rot = Mat3x4::from_rows([
            [0.0, -1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ]);
        let world = transform_bbox(&rot, &local);
        assert_relative_eq!(world.min[0], -1.0);
        assert_relative_eq!(world.max[0], 0.0);
        assert_relative_eq!(world.min[1], 0.0);
        assert_relative_eq!(world.max[1], 2.0);
        assert_eq!(world.extent()[2], 1.0);
    }
}
