//! Section properties for frame elements

use serde::{Deserialize, Serialize};

/// Cross-section properties for in-plane bending
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area
    pub a: f64,
    /// Second moment of area about the bending axis
    pub i: f64,
}

impl Section {
    /// Create a section from area and second moment of area
    pub fn new(a: f64, i: f64) -> Self {
        Self { a, i }
    }

    /// Solid rectangle, bending about the axis parallel to `width`
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self {
            a: width * depth,
            i: width * depth.powi(3) / 12.0,
        }
    }

    /// Solid circle
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        Self {
            a: std::f64::consts::PI * r.powi(2),
            i: std::f64::consts::PI * r.powi(4) / 4.0,
        }
    }

    /// Hollow circular (pipe) section
    pub fn pipe(outer_diameter: f64, wall_thickness: f64) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;

        Self {
            a: std::f64::consts::PI * (r_o.powi(2) - r_i.powi(2)),
            i: std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 4.0,
        }
    }

    /// Box/tube section with uniform wall thickness
    pub fn box_section(width: f64, depth: f64, wall_thickness: f64) -> Self {
        let bi = width - 2.0 * wall_thickness;
        let di = depth - 2.0 * wall_thickness;

        Self {
            a: width * depth - bi * di,
            i: (width * depth.powi(3) - bi * di.powi(3)) / 12.0,
        }
    }

    /// Wide flange (I-beam) section, strong-axis bending
    ///
    /// # Arguments
    /// * `depth` - Total depth of section
    /// * `flange_width` - Width of flange
    /// * `flange_thickness` - Thickness of flange
    /// * `web_thickness` - Thickness of web
    pub fn wide_flange(depth: f64, flange_width: f64, flange_thickness: f64, web_thickness: f64) -> Self {
        let hw = depth - 2.0 * flange_thickness;

        Self {
            a: 2.0 * flange_width * flange_thickness + hw * web_thickness,
            i: (flange_width * depth.powi(3) - (flange_width - web_thickness) * hw.powi(3)) / 12.0,
        }
    }

    /// Radius of gyration
    pub fn radius_of_gyration(&self) -> f64 {
        (self.i / self.a).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangular_section() {
        let section = Section::rectangular(10.0, 20.0);
        assert_relative_eq!(section.a, 200.0);
        assert_relative_eq!(section.i, 10.0 * 8000.0 / 12.0);
    }

    #[test]
    fn test_box_matches_difference_of_rectangles() {
        let outer = Section::rectangular(10.0, 20.0);
        let inner = Section::rectangular(8.0, 18.0);
        let tube = Section::box_section(10.0, 20.0, 1.0);
        assert_relative_eq!(tube.a, outer.a - inner.a);
        assert_relative_eq!(tube.i, outer.i - inner.i, max_relative = 1e-12);
    }

    #[test]
    fn test_wide_flange_without_web_gap_is_rectangle() {
        let wf = Section::wide_flange(20.0, 10.0, 2.0, 10.0);
        let rect = Section::rectangular(10.0, 20.0);
        assert_relative_eq!(wf.a, rect.a);
        assert_relative_eq!(wf.i, rect.i, max_relative = 1e-12);
    }
}
