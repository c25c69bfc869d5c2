//! Emission-factor calculation: the canonical factor table, the tolerant input bag, and the
//! engine that applies per-category rules.

mod category;
mod engine;
pub mod factors;
mod inputs;
pub mod router;
mod rules;

pub use category::{Category, UnknownCategory};
pub use engine::{Adjustment, Calculation, CalculationEngine, Term};
pub use factors::{CategoryCoefficients, FactorTable, FACTOR_TABLE_VERSION};
pub use inputs::InputBag;
pub use router::{calculator_router, CalculatorState};
