//! Human-readable summaries of finished tank runs.

use std::fmt::{self, Display};

use super::{ConstraintReport, CostModel, DesignPoint};
use crate::error::Result;
use crate::math::optimization::{Method, OptimizationResult, Status};

/// Outcome of one run expressed in tank terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub method: Method,
    pub status: Status,
    pub iterations: usize,
    pub function_evaluations: usize,
    pub design: DesignPoint,
    /// Raw manufacturing cost, without the penalty
    pub cost: f64,
    /// Penalized objective value the optimizer reported
    pub objective_value: f64,
    pub gradient_norm: f64,
    pub target_volume: f64,
    pub constraints: ConstraintReport,
}

impl Summary {
    /// Evaluates the final design of `result` against `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the final point is not two-dimensional.
    pub fn new(model: &CostModel, result: &OptimizationResult<f64>) -> Result<Self> {
        let design = DesignPoint::try_from(&result.optimal_point)?;
        Ok(Self {
            method: result.method,
            status: result.status,
            iterations: result.iterations,
            function_evaluations: result.function_evaluations,
            design,
            cost: model.cost(design.diameter, design.length),
            objective_value: result.optimal_value,
            gradient_norm: result.final_gradient_norm(),
            target_volume: model.parameters().volume(),
            constraints: model.constraints(design),
        })
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "VIOLATED"
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.status {
            Status::Converged => "converged",
            Status::MaxIterations => "stopped at the iteration limit",
        };
        let c = &self.constraints;

        writeln!(
            f,
            "{}: {} after {} iterations ({} function evaluations)",
            self.method, outcome, self.iterations, self.function_evaluations
        )?;
        writeln!(f, "  diameter  D = {:.4} m", self.design.diameter)?;
        writeln!(f, "  length    L = {:.4} m", self.design.length)?;
        writeln!(f, "  cost      ${}", currency(self.cost))?;
        writeln!(f, "  objective {}", currency(self.objective_value))?;
        writeln!(f, "  |grad|    {:.3e}", self.gradient_norm)?;
        writeln!(
            f,
            "  volume    {:.4} m³ in [{:.4}, {:.4}] (target {:.4}) {}",
            c.volume,
            c.min_volume,
            c.max_volume,
            self.target_volume,
            verdict(c.volume_ok())
        )?;
        writeln!(
            f,
            "  D <= Dmax {:.4} <= {:.4} {}",
            c.diameter,
            c.max_diameter,
            verdict(c.diameter_ok())
        )?;
        write!(
            f,
            "  L <= Lmax {:.4} <= {:.4} {}",
            c.length,
            c.max_length,
            verdict(c.length_ok())
        )
    }
}

/// Formats an amount with two decimals and `,` thousands separators.
#[must_use]
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_at(formatted.len() - 3);

    let mut out = String::with_capacity(formatted.len() + whole.len() / 3 + 1);
    if value < 0.0 && formatted != "0.00" {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out.push_str(cents);
    out
}

/// One row per iterate: iteration, `D`, `L`, penalized value and gradient
/// norm.
#[must_use]
pub fn history_table(result: &OptimizationResult<f64>) -> String {
    let header = format!(
        "{:<6}{:<12}{:<12}{:<16}{:<12}",
        "Iter", "D", "L", "Value", "|grad|"
    );
    let rows: Vec<String> = result
        .x_history
        .iter()
        .zip(&result.f_history)
        .zip(&result.gradient_norms)
        .enumerate()
        .map(|(i, ((x, value), gradient_norm))| {
            let diameter = x.get(0).copied().unwrap_or(f64::NAN);
            let length = x.get(1).copied().unwrap_or(f64::NAN);
            format!(
                "{:<6}{:<12.4}{:<12.4}{:<16.2}{:.2e}\n",
                i, diameter, length, value, gradient_norm
            )
        })
        .collect();

    format!(
        "{}\n{}\n{}",
        header.trim_end(),
        "-".repeat(header.len()),
        rows.concat()
    )
}

/// Summaries of several runs separated by blank lines.
///
/// # Errors
///
/// Returns an error if any result is not two-dimensional.
pub fn render_all(model: &CostModel, results: &[OptimizationResult<f64>]) -> Result<String> {
    let summaries = results
        .iter()
        .map(|result| Summary::new(model, result).map(|summary| summary.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(summaries.join("\n\n"))
}
