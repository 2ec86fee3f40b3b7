//! Software pixel surface for the globe animation.
//!
//! An RGB framebuffer with alpha-blended primitives, blitted into terminal
//! cells using half-block characters (one column = 1 px wide, one row =
//! 2 px tall).

use crate::globe::{Globe, Point3, Projected};
use crate::theme::{Rgb, GLOBE_BLUE, GLOBE_VIOLET, GLOBE_WHITE};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct Surface {
    width: usize,
    height: usize,
    px: Vec<Rgb>,
}

impl Surface {
    pub fn new(width: usize, height: usize, bg: Rgb) -> Self {
        Self {
            width,
            height,
            px: vec![bg; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.width + x]
    }

    /// Blend `color` over the pixel at (x, y) with the given alpha.
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_px(&mut self, x: isize, y: isize, color: Rgb, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let dst = &mut self.px[y as usize * self.width + x as usize];
        for c in 0..3 {
            let blended = color[c] as f64 * alpha + dst[c] as f64 * (1.0 - alpha);
            dst[c] = blended.round().min(255.0) as u8;
        }
    }

    /// Draw a line between two points using Bresenham's algorithm,
    /// alpha-blending each pixel.
    pub fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb, alpha: f64) {
        let (mut x0, mut y0, x1, y1) = (
            x0.round() as isize,
            y0.round() as isize,
            x1.round() as isize,
            y1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_px(x0, y0, color, alpha);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Fill a disc with a radial gradient given as (position, color, alpha)
    /// stops over [0, 1]. Pixels beyond the radius are untouched.
    pub fn fill_radial(&mut self, cx: f64, cy: f64, radius: f64, stops: &[(f64, Rgb, f64)]) {
        if radius <= 0.0 {
            return;
        }
        let min_x = ((cx - radius).floor().max(0.0)) as usize;
        let max_x = ((cx + radius).ceil().min(self.width as f64 - 1.0)) as usize;
        let min_y = ((cy - radius).floor().max(0.0)) as usize;
        let max_y = ((cy + radius).ceil().min(self.height as f64 - 1.0)) as usize;
        if self.width == 0 || self.height == 0 {
            return;
        }
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > radius {
                    continue;
                }
                let (color, alpha) = sample_stops(stops, dist / radius);
                self.blend_px(x as isize, y as isize, color, alpha);
            }
        }
    }

    /// Fill the whole surface with a radial gradient centered at (cx, cy);
    /// pixels beyond `radius` take the final stop.
    pub fn fill_radial_rect(&mut self, cx: f64, cy: f64, radius: f64, stops: &[(f64, Rgb, f64)]) {
        if radius <= 0.0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let (color, alpha) = sample_stops(stops, (dist / radius).min(1.0));
                self.blend_px(x as isize, y as isize, color, alpha);
            }
        }
    }

    /// Blit to terminal lines, two vertical pixels per cell via '▀'.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let rows = self.height.div_ceil(2);
        (0..rows)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..self.width)
                    .map(|x| {
                        let top = self.get(x, row * 2);
                        let bottom = if row * 2 + 1 < self.height {
                            self.get(x, row * 2 + 1)
                        } else {
                            top
                        };
                        Span::styled(
                            "▀",
                            Style::default()
                                .fg(Color::Rgb(top[0], top[1], top[2]))
                                .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Interpolate gradient stops at position `t` in [0, 1].
fn sample_stops(stops: &[(f64, Rgb, f64)], t: f64) -> (Rgb, f64) {
    debug_assert!(!stops.is_empty());
    if t <= stops[0].0 {
        return (stops[0].1, stops[0].2);
    }
    for pair in stops.windows(2) {
        let (p0, c0, a0) = pair[0];
        let (p1, c1, a1) = pair[1];
        if t <= p1 {
            let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 1.0 };
            let color = [
                lerp_u8(c0[0], c1[0], f),
                lerp_u8(c0[1], c1[1], f),
                lerp_u8(c0[2], c1[2], f),
            ];
            return (color, a0 + (a1 - a0) * f);
        }
    }
    let last = stops[stops.len() - 1];
    (last.1, last.2)
}

#[inline]
fn lerp_u8(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}

/// Split a polyline into runs of consecutively visible rotated points.
/// A culled point breaks continuity, so the stroke restarts after it.
pub fn visible_runs(points: &[Point3], rotation: f64) -> Vec<Vec<Point3>> {
    let mut runs = Vec::new();
    let mut current: Vec<Point3> = Vec::new();
    for point in points {
        let rotated = point.rotate_y(rotation);
        if rotated.visible() {
            current.push(rotated);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Render one animation frame: background gradient, rotation advance, grid
/// wireframe, sparkles, outer halo. Returns the finished surface; a
/// zero-sized surface is returned untouched.
pub fn paint_frame(globe: &mut Globe, bg: Rgb) -> Surface {
    let side = globe.side().round() as usize;
    let mut surface = Surface::new(side, side, bg);
    if side == 0 {
        return surface;
    }

    let (cx, cy) = globe.center();
    let radius = globe.radius();

    // Background gradient: violet core fading to blue at 1.5R
    surface.fill_radial_rect(
        cx,
        cy,
        radius * 1.5,
        &[(0.0, GLOBE_VIOLET, 0.10), (1.0, GLOBE_BLUE, 0.05)],
    );

    globe.advance();
    let rotation = globe.rotation();

    // Wireframe grid, stroke alpha fading with depth
    for line in globe.grid() {
        for run in visible_runs(line, rotation) {
            let mut prev: Option<(Projected, f64)> = None;
            for rotated in &run {
                let proj = globe.project(rotated);
                let alpha = rotated.depth_alpha() * 0.6;
                if let Some((p, a)) = prev {
                    surface.stroke_line(p.x, p.y, proj.x, proj.y, GLOBE_VIOLET, a.min(alpha));
                }
                prev = Some((proj, alpha));
            }
        }
    }

    // Sparkles: glow disc plus cross highlight, pulse advanced per frame
    let params = (radius, cx, cy);
    for sparkle in globe.sparkles_mut() {
        let rotated = sparkle.pos.rotate_y(rotation);
        if !rotated.visible() {
            continue;
        }
        let proj = project_with(&rotated, params);
        let alpha = rotated.depth_alpha() * sparkle.opacity;
        sparkle.tick();

        let glow_r = sparkle.size * proj.scale;
        surface.fill_radial(
            proj.x,
            proj.y,
            glow_r,
            &[
                (0.0, GLOBE_WHITE, alpha),
                (0.5, GLOBE_VIOLET, alpha * 0.8),
                (1.0, GLOBE_VIOLET, 0.0),
            ],
        );
        surface.stroke_line(
            proj.x - sparkle.size,
            proj.y,
            proj.x + sparkle.size,
            proj.y,
            GLOBE_WHITE,
            alpha * 0.8,
        );
        surface.stroke_line(
            proj.x,
            proj.y - sparkle.size,
            proj.x,
            proj.y + sparkle.size,
            GLOBE_WHITE,
            alpha * 0.8,
        );
    }

    // Outer halo ring, fading outward from 0.8R to 1.2R
    surface.fill_radial(
        cx,
        cy,
        radius * 1.2,
        &[
            (0.0, GLOBE_VIOLET, 0.0),
            (0.8 / 1.2, GLOBE_VIOLET, 0.0),
            (1.0, GLOBE_VIOLET, 0.3),
        ],
    );

    surface
}

#[inline]
fn project_with(point: &Point3, (radius, cx, cy): (f64, f64, f64)) -> Projected {
    let scale = crate::globe::CAMERA_DISTANCE / (crate::globe::CAMERA_DISTANCE + point.z);
    Projected {
        x: cx + point.x * radius * scale,
        y: cy + point.y * radius * scale,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::Sparkle;

    const BG: Rgb = [0, 0, 0];

    #[test]
    fn test_blend_px_alpha_math() {
        let mut s = Surface::new(2, 2, BG);
        s.blend_px(0, 0, [200, 100, 50], 0.5);
        assert_eq!(s.get(0, 0), [100, 50, 25]);
        // full alpha overwrites
        s.blend_px(1, 1, [10, 20, 30], 1.0);
        assert_eq!(s.get(1, 1), [10, 20, 30]);
        // out of bounds is a no-op
        s.blend_px(-1, 0, [255, 255, 255], 1.0);
        s.blend_px(5, 5, [255, 255, 255], 1.0);
    }

    #[test]
    fn test_stroke_line_covers_endpoints() {
        let mut s = Surface::new(8, 8, BG);
        s.stroke_line(0.0, 0.0, 7.0, 7.0, [255, 255, 255], 1.0);
        assert_eq!(s.get(0, 0), [255, 255, 255]);
        assert_eq!(s.get(7, 7), [255, 255, 255]);
        assert_eq!(s.get(3, 3), [255, 255, 255]);
    }

    #[test]
    fn test_visible_runs_restart_across_culled_gap() {
        let points = [
            Point3 { x: 0.0, y: 0.0, z: 0.5 },
            Point3 { x: 0.0, y: 0.0, z: -1.5 },
            Point3 { x: 0.0, y: 0.0, z: 0.5 },
        ];
        let runs = visible_runs(&points, 0.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 1);
        assert_eq!(runs[1].len(), 1);

        // boundary: exactly -1 is culled
        let boundary = [Point3 { x: 0.0, y: 0.0, z: -1.0 }];
        assert!(visible_runs(&boundary, 0.0).is_empty());
    }

    #[test]
    fn test_culled_sparkle_leaves_no_trace() {
        // stays past the horizon for the small rotation a single frame adds
        let sparkle = Sparkle {
            pos: Point3 { x: 0.0, y: 0.0, z: -1.5 },
            size: 4.0,
            opacity: 1.0,
            speed: 0.01,
        };
        let mut with = Globe::with_parts(Vec::new(), vec![sparkle], 100.0);
        let mut without = Globe::with_parts(Vec::new(), Vec::new(), 100.0);
        let a = paint_frame(&mut with, BG);
        let b = paint_frame(&mut without, BG);
        for y in 0..a.height() {
            for x in 0..a.width() {
                assert_eq!(a.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn test_zero_sized_surface_is_silent_noop() {
        let mut globe = Globe::with_parts(crate::globe::grid_lines(), Vec::new(), 0.0);
        let surface = paint_frame(&mut globe, BG);
        assert_eq!(surface.width(), 0);
        assert!(surface.to_lines().is_empty());
    }

    #[test]
    fn test_sample_stops_endpoints_and_midpoint() {
        let stops = [(0.0, [0, 0, 0], 0.0), (1.0, [200, 100, 50], 1.0)];
        assert_eq!(sample_stops(&stops, 0.0), ([0, 0, 0], 0.0));
        assert_eq!(sample_stops(&stops, 1.0), ([200, 100, 50], 1.0));
        let (mid, alpha) = sample_stops(&stops, 0.5);
        assert_eq!(mid, [100, 50, 25]);
        assert!((alpha - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_to_lines_half_block_dimensions() {
        let s = Surface::new(4, 5, BG);
        let lines = s.to_lines();
        assert_eq!(lines.len(), 3); // 5 px tall -> 3 cell rows
        assert_eq!(lines[0].spans.len(), 4);
    }
}
