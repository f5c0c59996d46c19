//! Per-variable contour styling.
//!
//! Colorscale, banding and colorbar title are looked up by variable name and
//! family, mirroring the catalog's linear/log10 policy.

use serde::Serialize;

use meteogram_common::catalog::lookup;
use meteogram_common::{Family, Scale};

use crate::contour::{generate_contour_levels, log_tick_label};

/// Colors of the surface line trace.
pub const LINE_COLOR: &str = "firebrick";
pub const LINE_WIDTH: f64 = 3.0;

/// cmocean "thermal", a perceptually uniform sequential scale.
pub const THERMAL: &[(f64, &str)] = &[
    (0.0, "#042333"),
    (0.1, "#0d3269"),
    (0.2, "#3f339f"),
    (0.3, "#66439a"),
    (0.4, "#8b5391"),
    (0.5, "#b15f82"),
    (0.6, "#d86e6b"),
    (0.7, "#f0844c"),
    (0.8, "#f9a935"),
    (0.9, "#f7cf3a"),
    (1.0, "#e8fa5b"),
];

/// A plotly colorscale, either by name or as explicit stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorScale {
    Named(&'static str),
    Stops(Vec<(f64, &'static str)>),
}

impl ColorScale {
    pub fn jet() -> Self {
        ColorScale::Named("Jet")
    }

    /// Blue-white-red, for signed fields centered on zero.
    pub fn diverging() -> Self {
        ColorScale::Named("RdBu")
    }

    pub fn thermal() -> Self {
        ColorScale::Stops(THERMAL.to_vec())
    }
}

/// Discrete contour bands `start..=end` every `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Banding {
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

/// Bands used for every log10-scaled hydrometeor mass.
pub const LOG_MASS_BANDS: Banding = Banding {
    start: -8.0,
    end: -2.0,
    size: 1.0,
};

impl Banding {
    pub fn levels(&self) -> Vec<f64> {
        generate_contour_levels(self.start, self.end, self.size)
    }

    /// Tick labels as powers of ten, for log-scaled values.
    pub fn power_labels(&self) -> Vec<String> {
        self.levels().into_iter().map(log_tick_label).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContourStyle {
    pub colorscale: ColorScale,
    pub bands: Option<Banding>,
    pub zmid: Option<f64>,
    pub colorbar_title: String,
}

/// Style for a contour of `name` in `family`.
pub fn contour_style(family: Family, name: &str) -> ContourStyle {
    let spec = lookup(name);
    let unit = spec.map(|s| s.unit).unwrap_or_default();

    if spec.map(|s| s.scale) == Some(Scale::Log10) {
        return ContourStyle {
            colorscale: ColorScale::jet(),
            bands: Some(LOG_MASS_BANDS),
            zmid: None,
            colorbar_title: format!("log10({})", unit),
        };
    }

    let (colorscale, zmid) = match (family, name) {
        (_, "U" | "V") => (ColorScale::diverging(), Some(0.0)),
        (Family::Hydrometeors, _) => (ColorScale::jet(), None),
        _ => (ColorScale::thermal(), None),
    };
    ContourStyle {
        colorscale,
        bands: None,
        zmid,
        colorbar_title: unit.to_string(),
    }
}
