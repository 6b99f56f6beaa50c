//! Parameter tables.
//!
//! Every model declares an ordered table of parameters. The order is part
//! of the model's contract: kernel functions receive their parameter
//! vector in table order.

use serde::Serialize;

/// How the host's polydispersity/averaging machinery treats a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Plain scalar parameter.
    Scalar,
    /// Geometric parameter eligible for volume-weighted averaging.
    Volume,
    /// Scattering length density.
    Sld,
    /// Orientation angle (degrees), used only for 2-D evaluation.
    Orientation,
}

/// One row of a model's parameter table.
///
/// Mirrors the `(name, units, default, [lower, upper], kind, description)`
/// records of the plugin interface. Bounds may be infinite; whenever both
/// are finite the declared default must lie between them.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    /// Parameter name, unique within the model.
    pub name: &'static str,
    /// Display units (free text, e.g. `"Ang"`, `"1e-6/Ang^2"`).
    pub units: &'static str,
    /// Default value.
    pub default: f64,
    /// Lower bound (may be `-inf`).
    pub lower: f64,
    /// Upper bound (may be `inf`).
    pub upper: f64,
    /// Kind tag for the host's averaging machinery.
    pub kind: ParamKind,
    /// Short description.
    pub description: &'static str,
}

impl Parameter {
    /// Creates a parameter row.
    #[must_use]
    pub fn new(
        name: &'static str,
        units: &'static str,
        default: f64,
        bounds: [f64; 2],
        kind: ParamKind,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            units,
            default,
            lower: bounds[0],
            upper: bounds[1],
            kind,
            description,
        }
    }

    /// True when the declared default lies inside the declared bounds.
    #[must_use]
    pub fn default_in_bounds(&self) -> bool {
        self.lower <= self.default && self.default <= self.upper
    }

    /// True when `value` lies inside the declared bounds.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}
