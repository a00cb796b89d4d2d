//! Human-readable summary of an optimal plan.

use std::fmt;

use crate::model::PlanSolution;
use crate::problem::Problem;

/// Formats an optimal solution against its problem.
///
/// Only optimal outcomes reach this type; non-optimal solver statuses are
/// reported as a status line by the caller.
pub struct Report<'a> {
    problem: &'a Problem,
    solution: &'a PlanSolution,
}

impl<'a> Report<'a> {
    pub fn new(problem: &'a Problem, solution: &'a PlanSolution) -> Self {
        Self { problem, solution }
    }

    fn production_hours(&self) -> f64 {
        self.problem
            .products
            .iter()
            .zip(&self.solution.quantity)
            .map(|(p, &q)| q as f64 * p.unit_hours)
            .sum()
    }

    fn changeover_hours(&self) -> f64 {
        let switches = self.solution.selected.iter().filter(|&&s| s).count();
        switches as f64 * self.problem.changeover_hours
    }

    fn units_consumed(&self, m: usize) -> i64 {
        self.problem
            .products
            .iter()
            .zip(&self.solution.quantity)
            .map(|(p, &q)| p.material_use[m] * q)
            .sum()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total profit: {}", self.solution.profit.round() as i64)?;
        for (i, product) in self.problem.products.iter().enumerate() {
            let quantity = self.solution.quantity[i];
            if self.solution.selected[i] {
                writeln!(
                    f,
                    "  product {}: selected, {} units, revenue {}",
                    i + 1,
                    quantity,
                    quantity * product.unit_price
                )?;
            } else {
                writeln!(f, "  product {}: not produced", i + 1)?;
            }
        }
        writeln!(
            f,
            "Time used: {:.1} h production + {:.1} h changeover of {:.1} h available",
            self.production_hours(),
            self.changeover_hours(),
            self.problem.total_hours
        )?;
        for (m, material) in self.problem.materials.iter().enumerate() {
            writeln!(
                f,
                "  material {}: {} lot(s) of {} units, {} used",
                m + 1,
                self.solution.lots[m],
                material.lot_size,
                self.units_consumed(m)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Material, Product};

    fn two_product_problem() -> Problem {
        Problem {
            total_hours: 20.0,
            changeover_hours: 1.5,
            fixed_cost: 4.0,
            products: vec![
                Product {
                    material_use: vec![2],
                    unit_hours: 1.0,
                    demand_min: 1,
                    demand_max: 10,
                    unit_price: 5,
                },
                Product {
                    material_use: vec![1],
                    unit_hours: 2.0,
                    demand_min: 3,
                    demand_max: 8,
                    unit_price: 9,
                },
            ],
            materials: vec![Material { lot_size: 20, lot_cost: 3 }],
        }
    }

    #[test]
    fn renders_selected_and_skipped_products() {
        let problem = two_product_problem();
        let solution = PlanSolution {
            profit: 41.6,
            quantity: vec![7, 0],
            selected: vec![true, false],
            lots: vec![1],
        };
        let rendered = Report::new(&problem, &solution).to_string();

        assert!(rendered.contains("Total profit: 42"));
        assert!(rendered.contains("product 1: selected, 7 units, revenue 35"));
        assert!(rendered.contains("product 2: not produced"));
        assert!(rendered.contains("Time used: 7.0 h production + 1.5 h changeover of 20.0 h available"));
        assert!(rendered.contains("material 1: 1 lot(s) of 20 units, 14 used"));
    }
}
