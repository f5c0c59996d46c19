//! Plotly-compatible figure description.
//!
//! The browser client hands the serialized [`Figure`] straight to
//! `Plotly.react`, so field names follow the plotly.js schema.

use chrono::{DateTime, Utc};
use serde::Serialize;

use meteogram_common::Theme;

use crate::style::ColorScale;

/// Paper background; the dashboard card color shows through.
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(Scatter),
    Contour(Contour),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<Option<f64>>,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

impl Scatter {
    pub fn lines(x: Vec<DateTime<Utc>>, y: Vec<Option<f64>>) -> Self {
        Self {
            x,
            y,
            mode: "lines",
            name: None,
            line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contour {
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<i64>,
    /// Rows follow `y`, columns follow `x`.
    pub z: Vec<Vec<Option<f64>>>,
    pub colorscale: ColorScale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocontour: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contours: Option<ContourBands>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmid: Option<f64>,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContourBands {
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Text,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    pub font: Font,
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Layout {
    /// Base layout with the dashboard colors applied.
    pub fn styled(theme: &Theme) -> Self {
        Self {
            font: Font {
                color: Some(theme.text_color.clone()),
                size: None,
            },
            plot_bgcolor: theme.plot_background.clone(),
            paper_bgcolor: TRANSPARENT.to_string(),
            ..Default::default()
        }
    }

    pub fn with_axes(mut self, x: &str, y: &str) -> Self {
        self.xaxis = Some(Axis::titled(x));
        self.yaxis = Some(Axis::titled(y));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: None,
            y: None,
            xanchor: None,
            yanchor: None,
            font: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Text,
}

impl Axis {
    pub fn titled(text: &str) -> Self {
        Self {
            title: Text::new(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub showarrow: bool,
}

/// Placeholder shown instead of a plot when no data can be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorFigure {
    #[serde(flatten)]
    pub figure: Figure,
    pub message: String,
}

/// Result of a plot build: a drawable figure or the error placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Plot {
    Figure(Figure),
    Error(ErrorFigure),
}

impl Plot {
    pub fn is_error(&self) -> bool {
        matches!(self, Plot::Error(_))
    }

    pub fn figure(&self) -> &Figure {
        match self {
            Plot::Figure(figure) => figure,
            Plot::Error(error) => &error.figure,
        }
    }
}
