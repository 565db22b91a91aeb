use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Values within this distance are treated as the same option value.
const VALUE_TOLERANCE: f64 = 1e-9;

/// Shape of a single input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum InputKind {
    /// Yes/no, stored as 0 or 1.
    Boolean,
    /// Pick one of a fixed list. Option values need not be unique or sequential.
    Enumerated { options: Vec<InputOption> },
    /// Free number entry.
    Numeric {
        default_value: Option<f64>,
        /// Bar ceiling when the field is charted in a point breakdown.
        ceiling: Option<f64>,
    },
}

/// One choice of an enumerated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InputOption {
    pub label: String,
    pub value: f64,
    /// Overrides the "+value" badge, e.g. "+2" for an option stored as 1.
    pub display_delta: Option<String>,
}

impl InputOption {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            display_delta: None,
        }
    }

    pub fn with_delta(mut self, delta: impl Into<String>) -> Self {
        self.display_delta = Some(delta.into());
        self
    }

    /// Badge text shown next to the option label.
    pub fn delta_text(&self) -> String {
        match &self.display_delta {
            Some(delta) => delta.clone(),
            None if self.value > 0.0 => format!("+{}", self.value),
            None => "0".to_string(),
        }
    }
}

/// Describes one field of a calculator's form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorInput {
    /// Unique within its calculator; keys the [`ValueBag`].
    pub id: String,
    pub label: String,
    pub kind: InputKind,
    /// Display-only unit suffix.
    pub unit: Option<String>,
    pub help_text: Option<String>,
}

impl CalculatorInput {
    fn new(id: &str, label: &str, kind: InputKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            unit: None,
            help_text: None,
        }
    }

    pub fn boolean(id: &str, label: &str) -> Self {
        Self::new(id, label, InputKind::Boolean)
    }

    pub fn enumerated(id: &str, label: &str, options: Vec<InputOption>) -> Self {
        Self::new(id, label, InputKind::Enumerated { options })
    }

    pub fn numeric(id: &str, label: &str, default_value: Option<f64>) -> Self {
        Self::new(
            id,
            label,
            InputKind::Numeric {
                default_value,
                ceiling: None,
            },
        )
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_help(mut self, help_text: &str) -> Self {
        self.help_text = Some(help_text.to_string());
        self
    }

    /// Set the bar ceiling of a numeric field. No effect on other kinds.
    pub fn with_ceiling(mut self, value: f64) -> Self {
        if let InputKind::Numeric { ceiling, .. } = &mut self.kind {
            *ceiling = Some(value);
        }
        self
    }

    /// The choices a renderer should offer. Booleans get a "Không"/"Có" pair;
    /// numeric fields have none.
    pub fn choices(&self) -> Vec<InputOption> {
        match &self.kind {
            InputKind::Boolean => vec![InputOption::new("Không", 0.0), InputOption::new("Có", 1.0)],
            InputKind::Enumerated { options } => options.clone(),
            InputKind::Numeric { .. } => Vec::new(),
        }
    }

    /// Value the field starts with when the calculator is opened.
    pub fn default_value(&self) -> f64 {
        match &self.kind {
            InputKind::Boolean => 0.0,
            InputKind::Enumerated { options } => options.first().map(|o| o.value).unwrap_or(0.0),
            InputKind::Numeric { default_value, .. } => default_value.unwrap_or(0.0),
        }
    }

    /// Largest contribution the field can make to a point breakdown.
    pub fn max_points(&self) -> Option<f64> {
        match &self.kind {
            InputKind::Boolean => Some(1.0),
            InputKind::Enumerated { options } => options
                .iter()
                .map(|o| o.value.abs())
                .reduce(f64::max),
            InputKind::Numeric { ceiling, .. } => *ceiling,
        }
    }

    /// Whether `value` is something this field can produce.
    pub fn accepts(&self, value: f64) -> bool {
        match &self.kind {
            InputKind::Boolean => value == 0.0 || value == 1.0,
            InputKind::Enumerated { options } => options
                .iter()
                .any(|o| (o.value - value).abs() < VALUE_TOLERANCE),
            InputKind::Numeric { .. } => value.is_finite(),
        }
    }

    /// The selected option of an enumerated field, if `value` matches one.
    pub fn option_for(&self, value: f64) -> Option<&InputOption> {
        match &self.kind {
            InputKind::Enumerated { options } => options
                .iter()
                .find(|o| (o.value - value).abs() < VALUE_TOLERANCE),
            _ => None,
        }
    }
}

/// Current field values of one calculator, keyed by input id.
///
/// Booleans are stored as 0/1 and enumerated fields as the selected option's
/// value. Non-finite numbers are never stored: an unparseable entry simply
/// leaves the field absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueBag(BTreeMap<String, f64>);

impl ValueBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag initialised with every field's default value.
    pub fn with_defaults(inputs: &[CalculatorInput]) -> Self {
        Self(
            inputs
                .iter()
                .map(|input| (input.id.clone(), input.default_value()))
                .collect(),
        )
    }

    /// Set a field. A non-finite value clears it instead.
    pub fn set(&mut self, id: impl Into<String>, value: f64) -> &mut Self {
        let id = id.into();
        if value.is_finite() {
            self.0.insert(id, value);
        } else {
            self.0.remove(&id);
        }
        self
    }

    /// Builder form of [`ValueBag::set`].
    pub fn with(mut self, id: impl Into<String>, value: f64) -> Self {
        self.set(id, value);
        self
    }

    /// Set a field from raw text entry. Text that does not parse clears it.
    pub fn set_text(&mut self, id: impl Into<String>, text: &str) -> &mut Self {
        let value = text.trim().replace(',', ".").parse::<f64>().unwrap_or(f64::NAN);
        self.set(id, value)
    }

    pub fn remove(&mut self, id: &str) -> Option<f64> {
        self.0.remove(id)
    }

    /// The value of a field, if present.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied().filter(|v| v.is_finite())
    }

    /// The value of a field if it is present and strictly positive.
    pub fn positive(&self, id: &str) -> Option<f64> {
        self.get(id).filter(|v| *v > 0.0)
    }

    /// True when the field is present and greater than zero.
    pub fn flag(&self, id: &str) -> bool {
        self.positive(id).is_some()
    }

    /// A point-valued field, with absent or negative values counting as zero.
    pub fn points(&self, id: &str) -> f64 {
        self.get(id).unwrap_or(0.0).max(0.0)
    }

    /// A field holding a small whole-number code (option selectors).
    pub fn code(&self, id: &str) -> Option<i64> {
        self.get(id)
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ValueBag {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut bag = ValueBag::new();
        for (id, value) in iter {
            bag.set(id, value);
        }
        bag
    }
}

/// A value the calculator's schema cannot produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub input_id: String,
    pub value: f64,
    pub message: String,
}
