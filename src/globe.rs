//! Rotating sparkling globe: wireframe sphere geometry, Y-axis rotation and
//! perspective projection onto a square pixel surface.

use rand::Rng;
use std::f64::consts::PI;

/// Segment count for the wireframe grid.
pub const SEGMENTS: usize = 16;
/// Number of sparkle particles.
pub const SPARKLE_COUNT: usize = 50;
/// Camera distance for perspective division.
pub const CAMERA_DISTANCE: f64 = 4.0;
/// Rotation advance per frame, in radians (~1.9 s per revolution at 60 Hz).
pub const ROTATION_STEP: f64 = 0.005;
/// Upper bound on the surface side length, in pixels.
pub const MAX_SURFACE_SIDE: f64 = 400.0;

/// Surface side length for a given viewport width, in pixels.
#[inline]
pub fn surface_side(viewport_width: f64) -> f64 {
    (viewport_width * 0.4).min(MAX_SURFACE_SIDE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Point on the unit sphere for the given latitude/longitude angles.
    #[inline]
    pub fn on_sphere(lat: f64, lon: f64) -> Self {
        Self {
            x: lat.sin() * lon.cos(),
            y: lat.cos(),
            z: lat.sin() * lon.sin(),
        }
    }

    /// Rotate about the Y axis by `angle` radians.
    #[inline]
    pub fn rotate_y(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.z * sin,
            y: self.y,
            z: self.x * sin + self.z * cos,
        }
    }

    /// A rotated point is drawn only while it stays on the visible
    /// hemisphere; z <= -1 is past the horizon.
    #[inline]
    pub fn visible(&self) -> bool {
        self.z > -1.0
    }

    /// Depth-derived stroke alpha, 0.0 at the far horizon up to 1.0 facing
    /// the camera.
    #[inline]
    pub fn depth_alpha(&self) -> f64 {
        (self.z + 1.0) * 0.5
    }
}

/// Pulsing particle scattered in the globe's volume.
#[derive(Debug, Clone)]
pub struct Sparkle {
    pub pos: Point3,
    /// Glow radius in surface pixels at scale 1.0, in [1, 4).
    pub size: f64,
    /// Current pulse phase, always within [0, 1].
    pub opacity: f64,
    /// Opacity increment per frame, in [0.01, 0.03).
    pub speed: f64,
}

impl Sparkle {
    /// Advance the pulse one frame, wrapping to 0 once past 1.
    #[inline]
    pub fn tick(&mut self) {
        self.opacity += self.speed;
        if self.opacity > 1.0 {
            self.opacity = 0.0;
        }
    }
}

/// Screen-space point plus depth scale. Derived per frame, never stored.
#[derive(Debug, Clone, Copy)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// Latitude and longitude arcs on the unit sphere. Generated once; for
/// SEGMENTS=16 this yields 17 latitude lines of 33 points and 33 longitude
/// lines of 17 points.
pub fn grid_lines() -> Vec<Vec<Point3>> {
    let s = SEGMENTS;
    let mut lines = Vec::with_capacity((s + 1) + (2 * s + 1));

    // Latitude arcs
    for i in 0..=s {
        let lat = (i as f64 / s as f64) * PI;
        let line = (0..=2 * s)
            .map(|j| {
                let lon = (j as f64 / (2 * s) as f64) * 2.0 * PI;
                Point3::on_sphere(lat, lon)
            })
            .collect();
        lines.push(line);
    }

    // Longitude arcs
    for i in 0..=2 * s {
        let lon = (i as f64 / (2 * s) as f64) * 2.0 * PI;
        let line = (0..=s)
            .map(|j| {
                let lat = (j as f64 / s as f64) * PI;
                Point3::on_sphere(lat, lon)
            })
            .collect();
        lines.push(line);
    }

    lines
}

fn random_sparkles() -> Vec<Sparkle> {
    let mut rng = rand::thread_rng();
    (0..SPARKLE_COUNT)
        .map(|_| Sparkle {
            pos: Point3 {
                x: rng.gen_range(-1.0..1.0),
                y: rng.gen_range(-1.0..1.0),
                z: rng.gen_range(-1.0..1.0),
            },
            size: rng.gen_range(1.0..4.0),
            opacity: rng.gen_range(0.0..1.0),
            speed: rng.gen_range(0.01..0.03),
        })
        .collect()
}

/// Globe state: immutable grid geometry plus the two things that evolve
/// over time, rotation angle and sparkle pulse phases.
pub struct Globe {
    grid: Vec<Vec<Point3>>,
    sparkles: Vec<Sparkle>,
    rotation: f64,
    side: f64,
}

impl Globe {
    pub fn new(viewport_width: f64) -> Self {
        Self::with_parts(grid_lines(), random_sparkles(), viewport_width)
    }

    pub fn with_parts(grid: Vec<Vec<Point3>>, sparkles: Vec<Sparkle>, viewport_width: f64) -> Self {
        Self {
            grid,
            sparkles,
            rotation: 0.0,
            side: surface_side(viewport_width),
        }
    }

    /// Recompute the surface side for a new viewport width. Geometry and
    /// animation state are untouched.
    pub fn resize(&mut self, viewport_width: f64) {
        self.side = surface_side(viewport_width);
    }

    /// Advance the rotation one frame, wrapping mod 2π.
    pub fn advance(&mut self) {
        self.rotation += ROTATION_STEP;
        if self.rotation >= 2.0 * PI {
            self.rotation -= 2.0 * PI;
        }
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Sphere radius on screen: 35% of the surface width.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.side * 0.35
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.side / 2.0, self.side / 2.0)
    }

    #[inline]
    pub fn grid(&self) -> &[Vec<Point3>] {
        &self.grid
    }

    #[inline]
    pub fn sparkles_mut(&mut self) -> &mut [Sparkle] {
        &mut self.sparkles
    }

    /// Perspective-project an already rotated point onto the surface.
    pub fn project(&self, point: &Point3) -> Projected {
        let (cx, cy) = self.center();
        let scale = CAMERA_DISTANCE / (CAMERA_DISTANCE + point.z);
        Projected {
            x: cx + point.x * self.radius() * scale,
            y: cy + point.y * self.radius() * scale,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn bare_globe(viewport_width: f64) -> Globe {
        Globe::with_parts(grid_lines(), Vec::new(), viewport_width)
    }

    #[test]
    fn test_surface_side_law() {
        assert_eq!(surface_side(1000.0), 400.0);
        assert_eq!(surface_side(500.0), 200.0);
        assert_eq!(surface_side(2000.0), 400.0);
    }

    #[test]
    fn test_grid_line_counts() {
        let lines = grid_lines();
        assert_eq!(lines.len(), (SEGMENTS + 1) + (2 * SEGMENTS + 1));
        // 17 latitude arcs of 33 points each
        for line in &lines[..=SEGMENTS] {
            assert_eq!(line.len(), 2 * SEGMENTS + 1);
        }
        // 33 longitude arcs of 17 points each
        for line in &lines[SEGMENTS + 1..] {
            assert_eq!(line.len(), SEGMENTS + 1);
        }
    }

    #[test]
    fn test_grid_points_on_unit_sphere() {
        for line in grid_lines() {
            for p in line {
                let r = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
                assert!((r - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_projection_identity_at_zero_rotation() {
        let globe = bare_globe(1000.0);
        let p = Point3 { x: 1.0, y: 0.0, z: 0.0 };
        let proj = globe.project(&p.rotate_y(0.0));
        let (cx, _) = globe.center();
        assert!((proj.x - (cx + globe.radius())).abs() < EPS);
        assert!((proj.scale - 1.0).abs() < EPS);
    }

    #[test]
    fn test_projection_periodic_over_full_revolution() {
        let globe = bare_globe(1000.0);
        let p = Point3 { x: 1.0, y: 0.0, z: 0.0 };
        let start = globe.project(&p.rotate_y(0.0));
        let full = globe.project(&p.rotate_y(2.0 * PI));
        assert!((start.x - full.x).abs() < 1e-6);
        assert!((start.y - full.y).abs() < 1e-6);
        // and it actually moves in between
        let mid = globe.project(&p.rotate_y(PI));
        assert!((mid.x - start.x).abs() > 1.0);
    }

    #[test]
    fn test_culling_boundary() {
        assert!(!Point3 { x: 0.0, y: 0.0, z: -1.0 }.visible());
        assert!(Point3 { x: 0.0, y: 0.0, z: -1.0 + 1e-9 }.visible());
        assert!(Point3 { x: 0.0, y: 0.0, z: 0.0 }.visible());
    }

    #[test]
    fn test_depth_alpha_range() {
        assert!((Point3 { x: 0.0, y: 0.0, z: -1.0 }.depth_alpha()).abs() < EPS);
        assert!((Point3 { x: 0.0, y: 0.0, z: 1.0 }.depth_alpha() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_sparkle_opacity_wraps_and_stays_bounded() {
        let mut sparkle = Sparkle {
            pos: Point3 { x: 0.0, y: 0.0, z: 0.0 },
            size: 2.0,
            opacity: 0.5,
            speed: 0.03,
        };
        let mut wrapped = false;
        let mut prev = sparkle.opacity;
        for _ in 0..200 {
            sparkle.tick();
            assert!(sparkle.opacity >= 0.0 && sparkle.opacity <= 1.0);
            if sparkle.opacity < prev {
                wrapped = true;
            }
            prev = sparkle.opacity;
        }
        assert!(wrapped);
    }

    #[test]
    fn test_rotation_advances_and_wraps() {
        let mut globe = bare_globe(100.0);
        let mut prev = globe.rotation();
        for _ in 0..10 {
            globe.advance();
            assert!(globe.rotation() > prev);
            prev = globe.rotation();
        }
        let frames_per_rev = (2.0 * PI / ROTATION_STEP) as usize + 1;
        for _ in 0..frames_per_rev {
            globe.advance();
            assert!(globe.rotation() < 2.0 * PI);
            assert!(globe.rotation() >= 0.0);
        }
    }

    #[test]
    fn test_end_to_end_equator_projection() {
        // viewport 1000 -> 400x400 surface, R = 140, centre (200, 200)
        let globe = bare_globe(1000.0);
        assert_eq!(globe.side(), 400.0);
        assert!((globe.radius() - 140.0).abs() < EPS);
        assert_eq!(globe.center(), (200.0, 200.0));

        let equator = Point3::on_sphere(PI / 2.0, 0.0);
        let proj = globe.project(&equator.rotate_y(0.0));
        assert!((proj.x - 340.0).abs() < 1e-6);
        assert!((proj.y - 200.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_reapplies_law() {
        let mut globe = bare_globe(1000.0);
        globe.resize(500.0);
        assert_eq!(globe.side(), 200.0);
        globe.resize(3000.0);
        assert_eq!(globe.side(), 400.0);
    }
}
