//! MILP formulation and solve, on SCIP via `russcip`.
//!
//! Three variable groups: integer production quantities, binary selection
//! flags, integer lot purchases. Revenue and lot prices live directly on the
//! variables' objective coefficients, so the constraints only have to encode
//! demand linking, the time budget and material availability.

use russcip::Variable;
use russcip::prelude::*;
use tracing::{debug, info};

use crate::problem::Problem;

/// Values of an optimal plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSolution {
    /// Objective value: revenue minus lot purchases minus the fixed cost.
    pub profit: f64,
    /// Units produced, per product.
    pub quantity: Vec<i64>,
    /// Whether each product was selected for production.
    pub selected: Vec<bool>,
    /// Lots purchased, per material.
    pub lots: Vec<i64>,
}

/// Result of one solve.
#[derive(Debug)]
pub enum PlanOutcome {
    Optimal(PlanSolution),
    /// Any non-optimal solver status. No solution values are exposed.
    Unsolved(Status),
}

/// Builds the model for `problem`, solves it once and extracts the plan.
///
/// The `russcip::Model` is created here and owned for the whole build and
/// solve; nothing re-creates it mid-pipeline.
pub fn solve(problem: &Problem) -> PlanOutcome {
    let mut model = Model::new()
        .hide_output()
        .include_default_plugins()
        .create_prob("lot_plan")
        .set_obj_sense(ObjSense::Maximize);

    let mut make = Vec::with_capacity(problem.product_count());
    let mut sel = Vec::with_capacity(problem.product_count());
    for (i, product) in problem.products.iter().enumerate() {
        make.push(model.add_var(
            0.,
            f64::INFINITY,
            product.unit_price as f64,
            &format!("make_{}", i + 1),
            VarType::Integer,
        ));
        sel.push(model.add_var(0., 1., 0., &format!("sel_{}", i + 1), VarType::Binary));
    }
    let lots: Vec<Variable> = problem
        .materials
        .iter()
        .enumerate()
        .map(|(m, material)| {
            model.add_var(
                0.,
                f64::INFINITY,
                -(material.lot_cost as f64),
                &format!("lots_{}", m + 1),
                VarType::Integer,
            )
        })
        .collect();

    // Demand bounds, linked through the selection flag: sel = 0 pins the
    // quantity to zero, sel = 1 enforces [demand_min, demand_max].
    for (i, product) in problem.products.iter().enumerate() {
        model.add_cons(
            vec![&make[i], &sel[i]],
            &[1.0, -(product.demand_min as f64)],
            0.,
            f64::INFINITY,
            &format!("demand_min_{}", i + 1),
        );
        model.add_cons(
            vec![&make[i], &sel[i]],
            &[1.0, -(product.demand_max as f64)],
            -f64::INFINITY,
            0.,
            &format!("demand_max_{}", i + 1),
        );
    }

    // Time budget: per-unit production time plus one changeover per selected
    // product. Added even with no products, so an inconsistent hour budget
    // is infeasible rather than vacuously satisfied.
    let mut vars: Vec<&Variable> = Vec::new();
    let mut coefs: Vec<f64> = Vec::new();
    for (product, var) in problem.products.iter().zip(&make) {
        vars.push(var);
        coefs.push(product.unit_hours);
    }
    for var in &sel {
        vars.push(var);
        coefs.push(problem.changeover_hours);
    }
    model.add_cons(vars, &coefs, -f64::INFINITY, problem.total_hours, "time_budget");

    // Material availability: consumption must fit in the purchased lots.
    for (m, material) in problem.materials.iter().enumerate() {
        let mut vars: Vec<&Variable> = make.iter().collect();
        let mut coefs: Vec<f64> = problem
            .products
            .iter()
            .map(|p| p.material_use[m] as f64)
            .collect();
        vars.push(&lots[m]);
        coefs.push(-(material.lot_size as f64));
        model.add_cons(
            vars,
            &coefs,
            -f64::INFINITY,
            0.,
            &format!("material_{}", m + 1),
        );
    }

    debug!(
        vars = 2 * problem.product_count() + problem.material_count(),
        cons = 2 * problem.product_count() + problem.material_count() + 1,
        "model built"
    );

    let solved = model.solve();
    let status = solved.status();
    info!(?status, "solver finished");
    if status != Status::Optimal {
        return PlanOutcome::Unsolved(status);
    }
    let Some(sol) = solved.best_sol() else {
        return PlanOutcome::Unsolved(status);
    };

    // SCIP's linear objective carries no constant term; the fixed cost is
    // applied here instead. A constant shift cannot change which plan wins.
    let profit = solved.obj_val() - problem.fixed_cost;
    PlanOutcome::Optimal(PlanSolution {
        profit,
        quantity: make.iter().map(|v| sol.val(v).round() as i64).collect(),
        selected: sel.iter().map(|v| sol.val(v) > 0.5).collect(),
        lots: lots.iter().map(|v| sol.val(v).round() as i64).collect(),
    })
}
