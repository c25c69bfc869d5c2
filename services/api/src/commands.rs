use carbon_footprint::calculator::{Calculation, CalculationEngine, FactorTable, InputBag};
use carbon_footprint::error::AppError;
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Category name, canonical (e.g. Food) or legacy (e.g. Alimentation)
    #[arg(long)]
    pub(crate) category: String,
    /// JSON object of input fields, e.g. '{"carKm":100,"carType":"medium","carOccupants":2}'
    #[arg(long, default_value = "{}")]
    pub(crate) inputs: String,
    /// Print each contributing term and adjustment
    #[arg(long)]
    pub(crate) detailed: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FactorsArgs {
    /// Emit compact JSON instead of pretty-printed output
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let inputs: InputBag = serde_json::from_str(&args.inputs)?;
    let calculation = CalculationEngine::default().compute_detailed(&args.category, &inputs);
    print!("{}", render_calculation(&args.category, &calculation, args.detailed));
    Ok(())
}

pub(crate) fn run_factors(args: FactorsArgs) -> Result<(), AppError> {
    let table = FactorTable::current();
    let rendered = if args.compact {
        serde_json::to_string(table)?
    } else {
        serde_json::to_string_pretty(table)?
    };
    println!("{}", rendered);
    Ok(())
}

fn render_calculation(requested: &str, calculation: &Calculation, detailed: bool) -> String {
    let mut out = String::new();
    let label = calculation
        .category
        .map(|category| category.name().to_string())
        .unwrap_or_else(|| format!("{requested} (no rules for this category)"));

    out.push_str(&format!("Category: {}\n", label));
    out.push_str(&format!("Result: {:.4}\n", calculation.total));

    if detailed {
        out.push_str(&format!("Factor table: {}\n", FactorTable::current().version));
        if calculation.terms.is_empty() {
            out.push_str("Terms: none\n");
        } else {
            out.push_str("Terms:\n");
            for term in &calculation.terms {
                out.push_str(&format!("  {:<18} {:>12.4}\n", term.field, term.value));
            }
        }
        for adjustment in &calculation.adjustments {
            out.push_str(&format!("  x {:<16} {:>12.2}\n", adjustment.field, adjustment.factor));
        }
    }
    out
}
