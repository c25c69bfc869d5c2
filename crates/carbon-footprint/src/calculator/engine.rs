use serde::Serialize;
use tracing::debug;

use super::category::Category;
use super::factors::{CategoryCoefficients, FactorTable};
use super::inputs::InputBag;
use super::rules;

/// Stateless evaluator mapping a category and its inputs to an emission estimate.
#[derive(Debug, Clone, Copy)]
pub struct CalculationEngine {
    factors: &'static FactorTable,
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new(FactorTable::current())
    }
}

impl CalculationEngine {
    pub fn new(factors: &'static FactorTable) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &'static FactorTable {
        self.factors
    }

    /// Scalar estimate for a category name. Unknown categories yield `0.0`.
    pub fn compute(&self, category: &str, fields: &InputBag) -> f64 {
        self.compute_detailed(category, fields).total
    }

    pub fn compute_detailed(&self, category: &str, fields: &InputBag) -> Calculation {
        match Category::parse(category) {
            Some(category) => self.evaluate(category, fields),
            None => {
                debug!(category, "no rules for category; result is zero");
                Calculation::default()
            }
        }
    }

    pub fn evaluate(&self, category: Category, fields: &InputBag) -> Calculation {
        let mut acc = Accumulator::default();

        match self.factors.for_category(category) {
            CategoryCoefficients::Transports(factors) => rules::transports(factors, fields, &mut acc),
            CategoryCoefficients::Housing(factors) => rules::housing(factors, fields, &mut acc),
            CategoryCoefficients::Food(factors) => rules::food(factors, fields, &mut acc),
            CategoryCoefficients::Clothing(factors) => rules::clothing(factors, fields, &mut acc),
            CategoryCoefficients::Digital(factors) => rules::digital(factors, fields, &mut acc),
            CategoryCoefficients::Consumption(factors) => {
                rules::consumption(factors, fields, &mut acc)
            }
        }

        acc.finish(category)
    }
}

/// Engine output with the audit trail of contributing terms.
///
/// `terms` already include every multiplicative adjustment, so they always sum to `total`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Calculation {
    pub category: Option<Category>,
    pub total: f64,
    pub terms: Vec<Term>,
    pub adjustments: Vec<Adjustment>,
}

/// Additive contribution of one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub field: &'static str,
    pub value: f64,
}

/// Multiplier applied to the running subtotal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub field: &'static str,
    pub factor: f64,
}

/// Running sum for one evaluation.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    total: f64,
    terms: Vec<Term>,
    adjustments: Vec<Adjustment>,
}

impl Accumulator {
    /// Adds a term unless it would make the total non-finite.
    pub(crate) fn add(&mut self, field: &'static str, value: f64) {
        let next = self.total + value;
        if !value.is_finite() || !next.is_finite() {
            debug!(field, "dropping non-finite term");
            return;
        }
        self.total = next;
        self.terms.push(Term { field, value });
    }

    /// Scales everything accumulated so far.
    pub(crate) fn scale(&mut self, field: &'static str, factor: f64) {
        let next = self.total * factor;
        if !factor.is_finite() || !next.is_finite() {
            debug!(field, "dropping non-finite adjustment");
            return;
        }
        self.total = next;
        for term in &mut self.terms {
            term.value *= factor;
        }
        self.adjustments.push(Adjustment { field, factor });
    }

    fn finish(self, category: Category) -> Calculation {
        Calculation {
            category: Some(category),
            total: self.total,
            terms: self.terms,
            adjustments: self.adjustments,
        }
    }
}
