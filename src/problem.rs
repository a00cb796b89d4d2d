//! The parsed planning problem. Immutable once constructed.

/// One product in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Units of each raw material consumed per unit produced.
    /// Always has one entry per material in the problem.
    pub material_use: Vec<i64>,
    /// Production time for one unit, in hours.
    pub unit_hours: f64,
    /// Minimum quantity if the product is produced at all.
    pub demand_min: i64,
    /// Maximum sellable quantity.
    pub demand_max: i64,
    /// Sale price per unit.
    pub unit_price: i64,
}

/// One raw material. Purchasable only in whole lots.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Units per lot.
    pub lot_size: i64,
    /// Price per lot.
    pub lot_cost: i64,
}

/// A complete planning problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Shared production-time budget, in hours.
    pub total_hours: f64,
    /// Changeover time charged once per product selected for production.
    pub changeover_hours: f64,
    /// Flat cost subtracted once from profit, regardless of activity.
    pub fixed_cost: f64,
    pub products: Vec<Product>,
    pub materials: Vec<Material>,
}

impl Problem {
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}
