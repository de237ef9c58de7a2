//! 4x4 matrix utilities for the render transform
//!
//! Matrices are column-major (`m[col][row]`), matching the WGSL `mat4x4<f32>`
//! memory layout so they can be copied into uniform buffers as-is.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Rotation about the X axis by `angle` radians
pub fn rotation_x(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cs, sn, 0.0],
        [0.0, -sn, cs, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Y axis by `angle` radians
pub fn rotation_y(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    [
        [cs, 0.0, -sn, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [sn, 0.0, cs, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point by a 4x4 matrix (w = 1)
pub fn transform_point(m: Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0],
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1],
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2],
    )
}

/// Perspective projection matrix (right-handed, OpenGL-style depth range)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (a[i][j] - b[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity_transform() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, v), v));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        use std::f32::consts::FRAC_PI_2;

        // +Z rotates to +X under a 90 degree yaw
        let m = rotation_y(FRAC_PI_2);
        let result = transform_point(m, Vec3::Z);
        assert!(vec_approx_eq(result, Vec3::X), "got {:?}", result);
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        use std::f32::consts::FRAC_PI_2;

        // +Y rotates to +Z under a 90 degree pitch
        let m = rotation_x(FRAC_PI_2);
        let result = transform_point(m, Vec3::Y);
        assert!(vec_approx_eq(result, Vec3::Z), "got {:?}", result);
    }

    #[test]
    fn test_mul_identity() {
        let a = rotation_x(0.5);
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_mul_composition() {
        use std::f32::consts::FRAC_PI_4;

        // Two 45 degree rotations equal one 90 degree rotation
        let r45 = rotation_y(FRAC_PI_4);
        let r90 = rotation_y(FRAC_PI_4 * 2.0);
        let composed = mul(r45, r45);

        let v = Vec3::new(1.0, 0.0, 0.5);
        assert!(vec_approx_eq(
            transform_point(composed, v),
            transform_point(r90, v)
        ));
    }

    #[test]
    fn test_look_at_origin() {
        // Camera at +Z looking at the origin maps the origin in front of the eye
        let view = look_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        let result = transform_point(view, Vec3::ZERO);
        assert!(vec_approx_eq(result, Vec3::new(0.0, 0.0, -3.0)), "got {:?}", result);
    }

    #[test]
    fn test_perspective_nonzero() {
        let proj = perspective(std::f32::consts::FRAC_PI_4, 800.0 / 600.0, 0.1, 100.0);
        assert!(proj[0][0] != 0.0);
        assert!(proj[1][1] != 0.0);
        assert!((proj[2][3] - (-1.0)).abs() < EPSILON);
    }
}
