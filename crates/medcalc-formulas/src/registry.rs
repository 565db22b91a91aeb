//! The calculator catalog.
//!
//! A process-wide, read-only fixture built once on first use. Lookup is by
//! exact id; browsing filters by a case-insensitive substring of the name,
//! description or id, ANDed with a specialty selector.

use std::sync::LazyLock;

use medcalc_core::models::specialty::SpecialtyFilter;

use crate::Calculator;
use crate::calculators;
use crate::error::FormulaError;

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// The built-in catalog.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

pub struct Registry {
    calculators: Vec<Box<dyn Calculator>>,
}

impl Registry {
    /// A registry over the given calculators, kept in insertion order.
    pub fn new(calculators: Vec<Box<dyn Calculator>>) -> Self {
        Self { calculators }
    }

    /// The bundled catalog.
    pub fn builtin() -> Self {
        Self::new(calculators::builtin())
    }

    pub fn get(&self, id: &str) -> Option<&dyn Calculator> {
        self.calculators
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Like [`Registry::get`], but unknown ids are an error.
    pub fn require(&self, id: &str) -> Result<&dyn Calculator, FormulaError> {
        self.get(id)
            .ok_or_else(|| FormulaError::UnknownCalculator(id.to_string()))
    }

    pub fn list(&self) -> Vec<&dyn Calculator> {
        self.calculators.iter().map(|c| c.as_ref()).collect()
    }

    pub fn filter(&self, search: &str, specialty: SpecialtyFilter) -> Vec<&dyn Calculator> {
        let needle = search.trim().to_lowercase();
        self.calculators
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| specialty.matches(c.specialties()))
            .filter(|c| {
                needle.is_empty()
                    || c.name().to_lowercase().contains(&needle)
                    || c.description().to_lowercase().contains(&needle)
                    || c.id().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Resolve a calculator's related ids. Ids missing from the catalog are
    /// dropped.
    pub fn related(&self, calculator: &dyn Calculator) -> Vec<&dyn Calculator> {
        calculator
            .content()
            .related_ids
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}
