//! Plot builders, one per family.
//!
//! Builders read only the deserialized table. Anything that prevents a
//! meaningful plot (no table, unknown selector, no values) yields the error
//! placeholder; a build never fails and never returns an empty figure.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use meteogram_common::catalog::lookup;
use meteogram_common::{DashboardError, DashboardResult, Family, Theme};
use pipeline::table::{Table, HEIGHT_LEVEL, SERIES_NAME, TIME, VALUE};

use crate::contour::ContourGrid;
use crate::figure::{
    Annotation, ColorBar, Contour, ContourBands, ErrorFigure, Figure, Font, Layout, Legend, Line,
    Margin, Plot, Scatter, Text, Title, Trace,
};
use crate::style::{contour_style, LINE_COLOR, LINE_WIDTH};

/// Message shown on every error placeholder.
pub const DATA_UNAVAILABLE_MESSAGE: &str = "No data available for the selected date and variable";

pub const ERROR_TITLE: &str = "Error when reading data";
pub const PRECIP_TITLE: &str = "Select the precipitation type by clicking on the legend";
pub const PRECIP_LEGEND_TITLE: &str = "Precip Type";
pub const SURFACE_HEIGHT: u32 = 380;

/// Build the figure for `family`.
///
/// `table` is `None` when the pipeline produced no table (e.g. the source
/// file is missing). For precipitation, `None` or an empty selector draws
/// every available series.
pub fn build(family: Family, selector: Option<&str>, table: Option<&Table>, theme: &Theme) -> Plot {
    let result = match table {
        None => Err(DashboardError::data_unavailable(family.as_str(), "no table produced")),
        Some(table) => match family {
            Family::Surface => surface(table, selector, theme),
            Family::Precipitation => precipitation(table, selector, theme),
            Family::TimeHeight | Family::Hydrometeors => contour(family, table, selector, theme),
        },
    };

    match result {
        Ok(figure) => {
            debug!(family = %family, traces = figure.data.len(), "Built figure");
            Plot::Figure(figure)
        }
        Err(e) => {
            warn!(family = %family, selector = ?selector, error = %e, "Falling back to error figure");
            Plot::Error(error_figure(theme))
        }
    }
}

/// The placeholder figure: centered error title, no traces.
pub fn error_figure(theme: &Theme) -> ErrorFigure {
    let mut layout = Layout::styled(theme);
    layout.title = Some(Title {
        x: Some(0.5),
        y: Some(0.5),
        font: Some(Font {
            color: None,
            size: Some(24.0),
        }),
        ..Title::new(ERROR_TITLE)
    });
    layout.annotations.push(Annotation {
        text: DATA_UNAVAILABLE_MESSAGE.to_string(),
        x: 0.5,
        y: 0.35,
        xref: "paper",
        yref: "paper",
        showarrow: false,
    });

    ErrorFigure {
        figure: Figure {
            data: Vec::new(),
            layout,
        },
        message: DATA_UNAVAILABLE_MESSAGE.to_string(),
    }
}

fn required_selector(selector: Option<&str>) -> DashboardResult<&str> {
    selector
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DashboardError::SelectorUnmatched("no variable selected".to_string()))
}

/// Selector must name a data column, not a coordinate.
fn data_column<'a>(table: &Table, selector: Option<&'a str>) -> DashboardResult<&'a str> {
    let name = required_selector(selector)?;
    if [TIME, HEIGHT_LEVEL].contains(&name) || !table.has_column(name) {
        return Err(DashboardError::SelectorUnmatched(name.to_string()));
    }
    Ok(name)
}

fn times(table: &Table) -> DashboardResult<Vec<DateTime<Utc>>> {
    table
        .column(TIME)
        .ok_or_else(|| DashboardError::Serialization("table has no time column".to_string()))?
        .map(|c| {
            c.as_time()
                .ok_or_else(|| DashboardError::Serialization(format!("invalid time cell {:?}", c)))
        })
        .collect()
}

fn unit(name: &str) -> &'static str {
    lookup(name).map(|s| s.unit).unwrap_or_default()
}

fn require_values(name: &str, values: &[Option<f64>]) -> DashboardResult<()> {
    if values.iter().any(Option::is_some) {
        Ok(())
    } else {
        Err(DashboardError::data_unavailable(name, "no values to plot"))
    }
}

fn surface(table: &Table, selector: Option<&str>, theme: &Theme) -> DashboardResult<Figure> {
    let name = data_column(table, selector)?;
    let x = times(table)?;
    let y = table.float_column(name).unwrap_or_default();
    require_values(name, &y)?;

    let mut trace = Scatter::lines(x, y);
    trace.line = Some(Line {
        color: LINE_COLOR.to_string(),
        width: LINE_WIDTH,
    });

    let mut layout = Layout::styled(theme).with_axes("Time", unit(name));
    layout.margin = Some(Margin {
        l: 20,
        r: 20,
        t: 20,
        b: 10,
    });
    layout.height = Some(SURFACE_HEIGHT);

    Ok(Figure {
        data: vec![Trace::Scatter(trace)],
        layout,
    })
}

fn precipitation(table: &Table, selector: Option<&str>, theme: &Theme) -> DashboardResult<Figure> {
    let available = table.distinct_text(SERIES_NAME);
    let selected = selector.filter(|s| !s.is_empty());
    let series: Vec<String> = match selected {
        None => available,
        Some(name) if available.iter().any(|s| s == name) => vec![name.to_string()],
        Some(name) => return Err(DashboardError::SelectorUnmatched(name.to_string())),
    };

    let t_idx = table.column_index(TIME);
    let v_idx = table.column_index(VALUE);
    let (Some(t_idx), Some(v_idx)) = (t_idx, v_idx) else {
        return Err(DashboardError::Serialization(
            "precipitation table needs time and value columns".to_string(),
        ));
    };

    let mut data = Vec::with_capacity(series.len());
    for name in &series {
        let (x, y) = series_points(table, name, t_idx, v_idx);
        if !y.iter().any(Option::is_some) {
            debug!(series = %name, "Skipping series without values");
            continue;
        }

        let mut trace = Scatter::lines(x, y);
        trace.name = Some(name.clone());
        data.push(Trace::Scatter(trace));
    }
    if data.is_empty() {
        return Err(DashboardError::data_unavailable(
            selected.unwrap_or("precip"),
            "no series with values",
        ));
    }

    let mut layout = Layout::styled(theme).with_axes("Time", unit("PRECIP"));
    layout.title = Some(Title {
        x: Some(0.5),
        xanchor: Some("center"),
        yanchor: Some("top"),
        ..Title::new(PRECIP_TITLE)
    });
    layout.legend = Some(Legend {
        title: Text::new(PRECIP_LEGEND_TITLE),
    });

    Ok(Figure { data, layout })
}

/// Paired `(time, value)` points of one series; rows without a timestamp are
/// dropped so both axes stay aligned.
fn series_points(
    table: &Table,
    name: &str,
    t_idx: usize,
    v_idx: usize,
) -> (Vec<DateTime<Utc>>, Vec<Option<f64>>) {
    table
        .rows_where(SERIES_NAME, name)
        .into_iter()
        .flatten()
        .filter_map(|row| Some((row[t_idx].as_time()?, row[v_idx].as_f64())))
        .unzip()
}

fn contour(
    family: Family,
    table: &Table,
    selector: Option<&str>,
    theme: &Theme,
) -> DashboardResult<Figure> {
    let name = data_column(table, selector)?;
    let grid = ContourGrid::from_table(table, name)
        .ok_or_else(|| DashboardError::SelectorUnmatched(name.to_string()))?;
    if !grid.has_values() {
        return Err(DashboardError::data_unavailable(name, "no values to plot"));
    }

    let style = contour_style(family, name);
    let (contours, tickvals, ticktext) = match style.bands {
        Some(bands) => (
            Some(ContourBands {
                start: bands.start,
                end: bands.end,
                size: bands.size,
            }),
            Some(bands.levels()),
            Some(bands.power_labels()),
        ),
        None => (None, None, None),
    };

    let trace = Contour {
        x: grid.times,
        y: grid.levels,
        z: grid.values,
        colorscale: style.colorscale,
        autocontour: contours.map(|_| false),
        contours,
        zmid: style.zmid,
        colorbar: ColorBar {
            title: Text::new(style.colorbar_title),
            tickvals,
            ticktext,
        },
    };

    Ok(Figure {
        data: vec![Trace::Contour(trace)],
        layout: Layout::styled(theme).with_axes("Time", "Model level"),
    })
}
