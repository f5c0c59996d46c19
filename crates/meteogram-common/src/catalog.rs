//! Fixed catalog of meteogram variables.
//!
//! Every name a plot selector can reference appears in exactly one
//! [`Family`]. Display policy (unit label, linear vs. log10 scale) is looked
//! up here by exact name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Name of the derived hydrometeor total column.
pub const TOTAL_HYDROMETEORS: &str = "total_hydrometeors";

/// Source variables the precipitation family derives its series from.
pub const PRECIP_INPUTS: [&str; 4] = ["RAIN_GSP", "RAIN_CON", "SNOW_GSP", "SNOW_CON"];

/// A group of variables sharing transformation and display policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    #[serde(rename = "vars1d")]
    Surface,
    #[serde(rename = "precip")]
    Precipitation,
    #[serde(rename = "timeheight")]
    TimeHeight,
    #[serde(rename = "hydrometeors")]
    Hydrometeors,
}

/// How values of a variable are stored in the intermediate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Linear,
    /// Stored as `log10(v)`, with values below the detection floor collapsed
    /// to a sentinel.
    Log10,
}

/// What part a variable plays inside its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read from the source file and passed through.
    Field,
    /// Water vapour. Read from the file but never part of the hydrometeor total.
    Vapor,
    /// Hydrometeor mass mixing ratio, summed into the total.
    Mass,
    /// Hydrometeor number concentration.
    Number,
    /// Computed by the pipeline, never present in the file.
    Derived,
}

/// Catalog entry for one selectable variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariableSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub family: Family,
    pub unit: &'static str,
    pub scale: Scale,
    pub role: Role,
}

const fn spec(
    name: &'static str,
    label: &'static str,
    family: Family,
    unit: &'static str,
    scale: Scale,
    role: Role,
) -> VariableSpec {
    VariableSpec {
        name,
        label,
        family,
        unit,
        scale,
        role,
    }
}

use Family::*;
use Role::*;
use Scale::*;

const KG_M2: &str = "kg·m⁻²";

/// All selectable variables, in dropdown order within each family.
pub static CATALOG: &[VariableSpec] = &[
    // 1D surface
    spec("T2M", "2m Temperature", Surface, "K", Linear, Field),
    spec("P_SFC", "Surface pressure", Surface, "hPa", Linear, Field),
    spec("TQV", "IWV", Surface, KG_M2, Linear, Field),
    spec("TQC", "LWP", Surface, KG_M2, Linear, Field),
    spec("TQI", "IWP", Surface, KG_M2, Linear, Field),
    // Precipitation (derived series)
    spec("PRECIP", "Total precipitation", Precipitation, KG_M2, Linear, Derived),
    spec("RAIN", "Rain", Precipitation, KG_M2, Linear, Derived),
    spec("SNOW", "Snow", Precipitation, KG_M2, Linear, Derived),
    // Time-height profiles
    spec("CLC", "Cloud cover", TimeHeight, "0–1", Linear, Field),
    spec("T", "Temperature", TimeHeight, "K", Linear, Field),
    spec("RHO", "Density", TimeHeight, "kg/m³", Linear, Field),
    spec("P", "Pressure", TimeHeight, "Pa", Linear, Field),
    spec("REL_HUM", "Relative humidity", TimeHeight, "%", Linear, Field),
    spec("U", "Horizontal wind U", TimeHeight, "m/s", Linear, Field),
    spec("V", "Horizontal wind V", TimeHeight, "m/s", Linear, Field),
    // Hydrometeor mass
    spec("QV", "Specific humidity", Hydrometeors, "kg/kg", Linear, Vapor),
    spec("QC", "Cloud water mass", Hydrometeors, "kg/kg", Log10, Mass),
    spec("QI", "Cloud ice mass", Hydrometeors, "kg/kg", Log10, Mass),
    spec("QR", "Rain mass", Hydrometeors, "kg/kg", Log10, Mass),
    spec("QS", "Snow mass", Hydrometeors, "kg/kg", Log10, Mass),
    spec("QG", "Graupel mass", Hydrometeors, "kg/kg", Log10, Mass),
    spec("QH", "Hail mass", Hydrometeors, "kg/kg", Log10, Mass),
    spec(TOTAL_HYDROMETEORS, "Total hydrometeors mass", Hydrometeors, "kg/kg", Log10, Derived),
    // Hydrometeor number concentration
    spec("QNC", "Cloud water number conc.", Hydrometeors, "kg⁻¹", Linear, Number),
    spec("QNI", "Cloud ice number conc.", Hydrometeors, "kg⁻¹", Linear, Number),
    spec("QNR", "Rain number conc.", Hydrometeors, "kg⁻¹", Linear, Number),
    spec("QNS", "Snow number conc.", Hydrometeors, "kg⁻¹", Linear, Number),
    spec("QNG", "Graupel number conc.", Hydrometeors, "kg⁻¹", Linear, Number),
    spec("QNH", "Hail number conc.", Hydrometeors, "kg⁻¹", Linear, Number),
];

/// Look up a catalog entry by exact name.
pub fn lookup(name: &str) -> Option<&'static VariableSpec> {
    CATALOG.iter().find(|v| v.name == name)
}

impl Family {
    pub const ALL: [Family; 4] = [Surface, Precipitation, TimeHeight, Hydrometeors];

    /// Identifier used in URLs and serialized payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface => "vars1d",
            Precipitation => "precip",
            TimeHeight => "timeheight",
            Hydrometeors => "hydrometeors",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Surface => "1D Variables",
            Precipitation => "Precipitation",
            TimeHeight => "Time-height variables",
            Hydrometeors => "Hydrometeors",
        }
    }

    /// Catalog entries belonging to this family.
    pub fn variables(&self) -> impl Iterator<Item = &'static VariableSpec> + '_ {
        CATALOG.iter().filter(move |v| v.family == *self)
    }

    /// Names the pipeline asks the loader for, before availability filtering.
    pub fn source_variables(&self) -> Vec<&'static str> {
        match self {
            Precipitation => PRECIP_INPUTS.to_vec(),
            _ => self
                .variables()
                .filter(|v| v.role != Derived)
                .map(|v| v.name)
                .collect(),
        }
    }

    /// Whether tables for this family carry a `height_level` column.
    pub fn has_levels(&self) -> bool {
        matches!(self, TimeHeight | Hydrometeors)
    }

    /// Selector preselected in the dashboard. Precipitation draws every
    /// series by default.
    pub fn default_selector(&self) -> Option<&'static str> {
        match self {
            Surface => Some("T2M"),
            Precipitation => None,
            TimeHeight => Some("CLC"),
            Hydrometeors => Some("QV"),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Family::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DashboardError::UnknownFamily(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique_across_families() {
        let mut seen = HashSet::new();
        for v in CATALOG {
            assert!(seen.insert(v.name), "{} listed twice", v.name);
        }
    }

    #[test]
    fn test_units_match_table() {
        assert_eq!(lookup("T2M").unwrap().unit, "K");
        assert_eq!(lookup("P_SFC").unwrap().unit, "hPa");
        assert_eq!(lookup("TQI").unwrap().unit, "kg·m⁻²");
        assert_eq!(lookup("PRECIP").unwrap().unit, "kg·m⁻²");
        assert_eq!(lookup("CLC").unwrap().unit, "0–1");
        assert_eq!(lookup("RHO").unwrap().unit, "kg/m³");
        assert_eq!(lookup("REL_HUM").unwrap().unit, "%");
        assert_eq!(lookup("V").unwrap().unit, "m/s");
        assert_eq!(lookup(TOTAL_HYDROMETEORS).unwrap().unit, "kg/kg");
    }

    #[test]
    fn test_log_scale_is_exact_name_lookup() {
        for name in ["QC", "QI", "QR", "QS", "QG", "QH", TOTAL_HYDROMETEORS] {
            assert_eq!(lookup(name).unwrap().scale, Scale::Log10, "{}", name);
        }
        for name in ["QV", "QNC", "QNI", "QNR", "QNS", "QNG", "QNH"] {
            assert_eq!(lookup(name).unwrap().scale, Scale::Linear, "{}", name);
        }
        assert!(lookup("qc").is_none());
        assert!(lookup("total hydrometeors").is_none());
    }

    #[test]
    fn test_source_variables() {
        assert_eq!(
            Family::Surface.source_variables(),
            vec!["T2M", "P_SFC", "TQV", "TQC", "TQI"]
        );
        assert_eq!(Family::Precipitation.source_variables(), PRECIP_INPUTS.to_vec());

        let hydro = Family::Hydrometeors.source_variables();
        assert_eq!(hydro.len(), 13);
        assert!(!hydro.contains(&TOTAL_HYDROMETEORS));
    }

    #[test]
    fn test_family_round_trip_through_str() {
        for family in Family::ALL {
            assert_eq!(family.as_str().parse::<Family>().unwrap(), family);
        }
        assert!("radar".parse::<Family>().is_err());
    }

    #[test]
    fn test_family_serde_names() {
        let json = serde_json::to_string(&Family::TimeHeight).unwrap();
        assert_eq!(json, "\"timeheight\"");
    }
}
