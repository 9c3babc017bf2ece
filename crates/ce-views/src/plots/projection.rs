//! Composite Albers USA projection
//!
//! Lower 48 on a conic equal-area projection, with Alaska and Hawaii drawn as
//! insets in the lower left. Output is in a 960x600 canvas; [`CanvasFit`]
//! maps that canvas onto screen space.

use egui::{Pos2, Rect, Vec2};

/// Width of the projected canvas
pub const CANVAS_WIDTH: f64 = 960.0;

/// Height of the projected canvas
pub const CANVAS_HEIGHT: f64 = 600.0;

const SCALE: f64 = 1000.0;

/// Conic equal-area projection with a longitude rotation and a projected center
#[derive(Debug, Clone, Copy)]
pub struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
    rotate: f64,
    center: [f64; 2],
    scale: f64,
    translate: [f64; 2],
}

impl ConicEqualArea {
    /// `parallels`, `rotate` and `center` in degrees; `center` is taken after rotation
    pub fn new(parallels: [f64; 2], rotate: f64, center: [f64; 2], scale: f64, translate: [f64; 2]) -> Self {
        let sy0 = parallels[0].to_radians().sin();
        let n = (sy0 + parallels[1].to_radians().sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;

        let mut projection = Self {
            n,
            c,
            r0,
            rotate: rotate.to_radians(),
            center: [0.0, 0.0],
            scale,
            translate,
        };
        projection.center = projection.raw(center[0].to_radians(), center[1].to_radians());
        projection
    }

    fn raw(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let theta = lambda * self.n;
        [r * theta.sin(), self.r0 - r * theta.cos()]
    }

    /// Project lon/lat degrees to canvas coordinates (y down)
    pub fn project(&self, lon: f64, lat: f64) -> [f64; 2] {
        let lambda = wrap_radians(lon.to_radians() + self.rotate);
        let [x, y] = self.raw(lambda, lat.to_radians());
        [
            self.translate[0] + self.scale * (x - self.center[0]),
            self.translate[1] - self.scale * (y - self.center[1]),
        ]
    }
}

fn wrap_radians(lambda: f64) -> f64 {
    use std::f64::consts::PI;
    if (-PI..=PI).contains(&lambda) {
        lambda
    } else {
        (lambda + PI).rem_euclid(2.0 * PI) - PI
    }
}

/// Which sub-projection a location belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Lower48,
    Alaska,
    Hawaii,
}

/// Composite projection for the 50 states
#[derive(Debug, Clone, Copy)]
pub struct AlbersUsa {
    lower48: ConicEqualArea,
    alaska: ConicEqualArea,
    hawaii: ConicEqualArea,
}

impl Default for AlbersUsa {
    fn default() -> Self {
        Self::new(SCALE, [CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0])
    }
}

impl AlbersUsa {
    pub fn new(k: f64, translate: [f64; 2]) -> Self {
        let [x, y] = translate;
        Self {
            lower48: ConicEqualArea::new([29.5, 45.5], 96.0, [-0.6, 38.7], k, translate),
            alaska: ConicEqualArea::new([55.0, 65.0], 154.0, [-2.0, 58.5], 0.35 * k, [x - 0.307 * k, y + 0.201 * k]),
            hawaii: ConicEqualArea::new([8.0, 18.0], 157.0, [-3.0, 19.9], k, [x - 0.205 * k, y + 0.212 * k]),
        }
    }

    /// Inset a location falls in. Anything outside Alaska and Hawaii uses the lower 48.
    pub fn region(lon: f64, lat: f64) -> Region {
        if lat > 50.0 && (lon < -129.0 || lon > 170.0) {
            Region::Alaska
        } else if lat < 30.0 && lon < -150.0 {
            Region::Hawaii
        } else {
            Region::Lower48
        }
    }

    pub fn project_in(&self, region: Region, lon: f64, lat: f64) -> [f64; 2] {
        match region {
            Region::Lower48 => self.lower48.project(lon, lat),
            Region::Alaska => self.alaska.project(lon, lat),
            Region::Hawaii => self.hawaii.project(lon, lat),
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> [f64; 2] {
        self.project_in(Self::region(lon, lat), lon, lat)
    }
}

/// Maps canvas coordinates onto a screen rect, keeping the aspect ratio, plus zoom and pan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFit {
    origin: Pos2,
    scale: f32,
}

impl CanvasFit {
    pub fn new(rect: Rect, zoom: f32, pan: Vec2) -> Self {
        let base = (rect.width() / CANVAS_WIDTH as f32).min(rect.height() / CANVAS_HEIGHT as f32);
        let scale = base * zoom;
        let half = Vec2::new(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32) * 0.5 * scale;
        Self {
            origin: rect.center() + pan - half,
            scale,
        }
    }

    pub fn to_screen(&self, canvas: [f64; 2]) -> Pos2 {
        self.origin + Vec2::new(canvas[0] as f32, canvas[1] as f32) * self.scale
    }

    pub fn to_canvas(&self, screen: Pos2) -> [f64; 2] {
        let v = (screen - self.origin) / self.scale;
        [v.x as f64, v.y as f64]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2], tol: f64) -> bool {
        (a[0] - b[0]).abs() < tol && (a[1] - b[1]).abs() < tol
    }

    #[test]
    fn test_center_projects_to_canvas_middle() {
        let projection = AlbersUsa::default();
        assert!(close(projection.project(-96.6, 38.7), [480.0, 300.0], 1e-6));
    }

    #[test]
    fn test_lower48_orientation() {
        let projection = AlbersUsa::default();
        let new_york = projection.project(-74.0, 40.7);
        let san_francisco = projection.project(-122.4, 37.8);
        let miami = projection.project(-80.2, 25.8);

        assert!(new_york[0] > 480.0 && san_francisco[0] < 480.0);
        assert!(miami[1] > new_york[1]);
        for p in [new_york, san_francisco, miami] {
            assert!(p[0] > 0.0 && p[0] < CANVAS_WIDTH && p[1] > 0.0 && p[1] < CANVAS_HEIGHT);
        }
    }

    #[test]
    fn test_insets_land_lower_left() {
        let projection = AlbersUsa::default();
        let anchorage = projection.project(-150.0, 61.0);
        let aleutians = projection.project(175.0, 52.0);
        let honolulu = projection.project(-157.8, 21.3);

        assert!(close(anchorage, [191.2, 485.4], 0.5));
        assert!(aleutians[0] > 0.0 && aleutians[0] < anchorage[0]);
        assert!(close(honolulu, [311.3, 488.0], 0.5));
    }

    #[test]
    fn test_region_selection() {
        assert_eq!(AlbersUsa::region(-150.0, 61.0), Region::Alaska);
        assert_eq!(AlbersUsa::region(175.0, 52.0), Region::Alaska);
        assert_eq!(AlbersUsa::region(-157.8, 21.3), Region::Hawaii);
        assert_eq!(AlbersUsa::region(-96.6, 38.7), Region::Lower48);
        assert_eq!(AlbersUsa::region(-66.1, 18.4), Region::Lower48);
    }

    #[test]
    fn test_canvas_fit_round_trips_and_centers() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(480.0, 400.0));
        let fit = CanvasFit::new(rect, 1.0, Vec2::ZERO);

        let middle = fit.to_screen([480.0, 300.0]);
        assert!((middle - rect.center()).length() < 1e-3);
        // width limits: 480 / 960
        assert!((fit.to_screen([960.0, 300.0]).x - rect.right()).abs() < 1e-3);

        let back = fit.to_canvas(fit.to_screen([123.0, 456.0]));
        assert!(close(back, [123.0, 456.0], 1e-3));
    }
}
