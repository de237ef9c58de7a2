//! Morphable prism mesh generation
//!
//! The cross-section is a regular N-gon whose corners are rounded off by a
//! sinusoidal radius correction: `r(theta) = r - k * r * sin(N * theta) / N`
//! with the morph factor k in [0, 1]. At k = 0 the ripple vanishes and the
//! section is the ideal polygon; at k = 1 it is maximally rounded, approaching
//! a cylinder. The sin term is an approximation of straight edges, not a
//! literal polygon rasterization, and is kept exactly as-is because the k = 0
//! appearance depends on it.
//!
//! The output vertex list is laid out as three consecutive blocks:
//!
//! 1. Lateral band, `2 * (N + 1) * (M + 1)` points forming a triangle strip
//!    (each angular sample emits a top point then a bottom point).
//! 2. Top cap, `3 * N` points as N independent triangles (center, corner,
//!    next corner).
//! 3. Bottom cap, `3 * N` points with the corners in reversed angular order
//!    so its winding is the mirror of the top cap's.
//!
//! The inclusive sampling ranges duplicate the shared corner between adjacent
//! edges. That redundancy is load-bearing for the strip topology; do not
//! deduplicate without re-deriving the winding.

use morphprism_math::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::Range;

/// Shape parameters for the morphable prism
///
/// `sides` and `subdivisions` describe the polygon (N edges, M angular steps
/// per edge); `radius` and `height` size the solid. Inputs are caller
/// validated: N >= 3, M >= 1, radius > 0, height > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrismParams {
    /// Polygon edge count (N)
    pub sides: u32,
    /// Angular samples per edge (M)
    pub subdivisions: u32,
    /// Cross-section radius
    pub radius: f32,
    /// Prism height along Y
    pub height: f32,
}

impl Default for PrismParams {
    fn default() -> Self {
        Self {
            sides: 6,
            subdivisions: 4,
            radius: 0.5,
            height: 1.0,
        }
    }
}

/// Effective cross-section radius at angle `theta` for morph factor `morph`
///
/// The general rule for all morph values; morph = 0 is the degenerate case
/// where the ripple term vanishes and the result is exactly `radius`.
#[inline]
pub fn effective_radius(radius: f32, sides: u32, theta: f32, morph: f32) -> f32 {
    let n = sides as f32;
    radius - morph * (radius * (theta * n).sin() / n)
}

impl PrismParams {
    /// Generate the full vertex list for the given morph factor
    ///
    /// Pure and deterministic: identical inputs produce bit-identical output.
    pub fn generate(&self, morph: f32) -> PrismMesh {
        debug_assert!(self.sides >= 3);
        debug_assert!(self.subdivisions >= 1);
        debug_assert!(self.radius > 0.0 && self.height > 0.0);
        debug_assert!((0.0..=1.0).contains(&morph));

        let n = self.sides as usize;
        let m = self.subdivisions as usize;
        let lateral_count = 2 * (n + 1) * (m + 1);
        let cap_count = 3 * n;

        let mut vertices = Vec::with_capacity(lateral_count + 2 * cap_count);
        let step = TAU / self.sides as f32;
        let half = self.height / 2.0;

        // Lateral band. The outer loop is inclusive (N + 1 iterations) and the
        // "next" corner angle wraps modulo N; both quirks are part of the
        // sampling scheme the strip winding was built around.
        for i in 0..=n {
            let angle = i as f32 * step;
            let next_angle = ((i + 1) % n) as f32 * step;

            for j in 0..=m {
                let t = j as f32 / m as f32;
                let theta = angle * (1.0 - t) + next_angle * t;
                let r = effective_radius(self.radius, self.sides, theta, morph);
                let x = r * theta.cos();
                let z = r * theta.sin();

                vertices.push(Vec3::new(x, half, z));
                vertices.push(Vec3::new(x, -half, z));
            }
        }

        // Top cap: one triangle per edge, fanning out from the axis point.
        for i in 0..n {
            let angle = i as f32 * step;
            let next_angle = ((i + 1) % n) as f32 * step;

            vertices.push(Vec3::new(0.0, half, 0.0));
            vertices.push(self.corner(angle, half, morph));
            vertices.push(self.corner(next_angle, half, morph));
        }

        // Bottom cap: same triangles mirrored to -h/2, corners emitted in
        // reversed angular order so the face winding flips with the mirror.
        for i in 0..n {
            let angle = i as f32 * step;
            let next_angle = ((i + 1) % n) as f32 * step;

            vertices.push(Vec3::new(0.0, -half, 0.0));
            vertices.push(self.corner(next_angle, -half, morph));
            vertices.push(self.corner(angle, -half, morph));
        }

        PrismMesh {
            vertices,
            lateral_count,
            cap_count,
        }
    }

    fn corner(&self, theta: f32, y: f32, morph: f32) -> Vec3 {
        let r = effective_radius(self.radius, self.sides, theta, morph);
        Vec3::new(r * theta.cos(), y, r * theta.sin())
    }
}

/// Flat vertex list for one frame of the prism
///
/// Ephemeral: rebuilt from [`PrismParams::generate`] every frame and never
/// mutated after creation. Consumers slice it with the closed-form ranges
/// below.
#[derive(Debug, Clone, PartialEq)]
pub struct PrismMesh {
    vertices: Vec<Vec3>,
    lateral_count: usize,
    cap_count: usize,
}

impl PrismMesh {
    /// All vertices: lateral band, then top cap, then bottom cap
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Total vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Lateral band vertices (draw as a triangle strip)
    pub fn lateral(&self) -> &[Vec3] {
        &self.vertices[..self.lateral_count]
    }

    /// Top cap vertices (draw as a triangle list)
    pub fn top_cap(&self) -> &[Vec3] {
        &self.vertices[self.lateral_count..self.lateral_count + self.cap_count]
    }

    /// Bottom cap vertices (draw as a triangle list)
    pub fn bottom_cap(&self) -> &[Vec3] {
        &self.vertices[self.lateral_count + self.cap_count..]
    }

    /// Draw range for the triangle strip
    pub fn lateral_range(&self) -> Range<u32> {
        0..self.lateral_count as u32
    }

    /// Draw range covering both caps (contiguous triangle list)
    pub fn caps_range(&self) -> Range<u32> {
        self.lateral_count as u32..self.vertices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn params() -> PrismParams {
        PrismParams::default()
    }

    #[test]
    fn test_vertex_counts() {
        let mesh = params().generate(0.3);
        // N = 6, M = 4: lateral 2*(6+1)*(4+1) = 70, caps 3*6 = 18 each
        assert_eq!(mesh.lateral().len(), 70);
        assert_eq!(mesh.top_cap().len(), 18);
        assert_eq!(mesh.bottom_cap().len(), 18);
        assert_eq!(mesh.vertex_count(), 106);
    }

    #[test]
    fn test_vertex_counts_other_polygon() {
        let mesh = PrismParams {
            sides: 8,
            subdivisions: 3,
            radius: 1.0,
            height: 2.0,
        }
        .generate(0.0);
        assert_eq!(mesh.lateral().len(), 2 * 9 * 4);
        assert_eq!(mesh.top_cap().len(), 24);
        assert_eq!(mesh.bottom_cap().len(), 24);
    }

    #[test]
    fn test_ranges_partition_vertex_list() {
        let mesh = params().generate(0.7);
        assert_eq!(mesh.lateral_range().end, mesh.caps_range().start);
        assert_eq!(mesh.caps_range().end as usize, mesh.vertex_count());
    }

    #[test]
    fn test_zero_morph_radius_exact() {
        // At k = 0 the ripple term is multiplied away entirely, so every
        // lateral sample sits exactly on the input radius.
        let p = params();
        let mesh = p.generate(0.0);
        for v in mesh.lateral() {
            let r = (v.x * v.x + v.z * v.z).sqrt();
            assert!((r - p.radius).abs() < EPSILON, "radius {} at {:?}", r, v);
        }
    }

    #[test]
    fn test_effective_radius_formula() {
        let r = 0.5;
        for &k in &[0.0, 0.25, 0.5, 1.0] {
            for i in 0..100 {
                let theta = i as f32 * TAU / 100.0;
                let expected = r - k * (r * (theta * 6.0).sin() / 6.0);
                assert_eq!(effective_radius(r, 6, theta, k), expected);
            }
        }
    }

    #[test]
    fn test_effective_radius_bounds() {
        // r(theta) stays within [r*(1 - k/N), r*(1 + k/N)]
        let r = 0.5;
        let n = 6u32;
        for &k in &[0.0, 0.3, 1.0] {
            let lo = r * (1.0 - k / n as f32);
            let hi = r * (1.0 + k / n as f32);
            for i in 0..1000 {
                let theta = i as f32 * TAU / 1000.0;
                let er = effective_radius(r, n, theta, k);
                assert!(er >= lo - EPSILON && er <= hi + EPSILON);
            }
        }
    }

    #[test]
    fn test_effective_radius_seam_continuity() {
        // The ripple has period 2*pi/N, so theta = 0 and theta = 2*pi agree
        let a = effective_radius(0.5, 6, 0.0, 0.8);
        let b = effective_radius(0.5, 6, TAU, 0.8);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn test_lateral_top_bottom_pairing() {
        // Samples come in stacked pairs: same x/z, y = +h/2 then y = -h/2
        let p = params();
        let mesh = p.generate(0.6);
        let lateral = mesh.lateral();
        for pair in lateral.chunks_exact(2) {
            assert_eq!(pair[0].x, pair[1].x);
            assert_eq!(pair[0].z, pair[1].z);
            assert_eq!(pair[0].y, p.height / 2.0);
            assert_eq!(pair[1].y, -p.height / 2.0);
        }
    }

    #[test]
    fn test_bottom_cap_reverses_top_corners() {
        // For edge i: bottom corner order is the angular reverse of the top's,
        // with y mirrored.
        let mesh = params().generate(0.4);
        let top = mesh.top_cap();
        let bottom = mesh.bottom_cap();
        for i in 0..6 {
            let t = &top[3 * i..3 * i + 3];
            let b = &bottom[3 * i..3 * i + 3];

            // Centers mirror on the axis
            assert_eq!(t[0], Vec3::new(0.0, 0.5, 0.0));
            assert_eq!(b[0], Vec3::new(0.0, -0.5, 0.0));

            // b[1] mirrors t[2], b[2] mirrors t[1]
            assert_eq!((b[1].x, b[1].z), (t[2].x, t[2].z));
            assert_eq!((b[2].x, b[2].z), (t[1].x, t[1].z));
            assert_eq!(b[1].y, -t[2].y);
            assert_eq!(b[2].y, -t[1].y);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let p = params();
        let a = p.generate(0.37);
        let b = p.generate(0.37);
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_morph_approaches_circle() {
        // At k = 1 the radial ripple amplitude is r/N; the section should be
        // visibly rounder than the polygon but still bounded.
        let p = params();
        let mesh = p.generate(1.0);
        let lo = p.radius * (1.0 - 1.0 / 6.0);
        let hi = p.radius * (1.0 + 1.0 / 6.0);
        for v in mesh.lateral() {
            let r = (v.x * v.x + v.z * v.z).sqrt();
            assert!(r >= lo - EPSILON && r <= hi + EPSILON);
        }
    }
}
