//! Parser for the fixed-layout plan input file.
//!
//! ```text
//! line 1: product count          (integer)
//! line 2: material count         (integer)
//! line 3: total hours
//! line 4: changeover hours
//! line 5: fixed cost
//! line 6: blank or header, ignored
//! then one row per product:  <use_1> .. <use_M> <unit_hours> <dmin> <dmax> <price>
//! then one row per material: <lot_size> <lot_cost>
//! ```
//!
//! Numeric tokens are picked out of each line word by word, so labels such as
//! `products: 3` are fine. Lines carrying no numeric token before or between
//! table rows are treated as separators.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::problem::{Material, Problem, Product};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected {what}, but the file ends before it")]
    MissingLine { line: usize, what: &'static str },

    #[error("line {line}: no numeric value found for {what}")]
    NoNumber { line: usize, what: &'static str },

    #[error("line {line}: expected {expected} numeric fields, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {what} is {value}, which is outside its domain")]
    Domain {
        line: usize,
        what: &'static str,
        value: f64,
    },

    #[error("line {line}: minimum demand {min} exceeds maximum demand {max}")]
    DemandBounds { line: usize, min: i64, max: i64 },
}

/// Reads and parses a plan file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Problem, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&text)
}

/// Parses plan text into an immutable [`Problem`].
pub fn parse_str(text: &str) -> Result<Problem, ParseError> {
    let lines: Vec<&str> = text.lines().collect();

    let product_count = count_field(&lines, 0, "product count")?;
    let material_count = count_field(&lines, 1, "material count")?;
    let total_hours = scalar_field(&lines, 2, "total hours")?;
    let changeover_hours = scalar_field(&lines, 3, "changeover hours")?;
    let fixed_cost = scalar_field(&lines, 4, "fixed cost")?;

    // Line 6 never carries data; the tables start after it.
    let mut rows = Rows::new(&lines, 6);

    let mut products = Vec::with_capacity(product_count);
    for _ in 0..product_count {
        let (line, tokens) = rows.next_row("a product row")?;
        products.push(product_row(line, &tokens, material_count)?);
    }

    let mut materials = Vec::with_capacity(material_count);
    for _ in 0..material_count {
        let (line, tokens) = rows.next_row("a material row")?;
        materials.push(material_row(line, &tokens)?);
    }

    debug!(
        products = product_count,
        materials = material_count,
        "parsed plan input"
    );

    Ok(Problem {
        total_hours,
        changeover_hours,
        fixed_cost,
        products,
        materials,
    })
}

/// Walks the table section, skipping separator lines.
struct Rows<'a> {
    lines: &'a [&'a str],
    next: usize,
}

impl<'a> Rows<'a> {
    fn new(lines: &'a [&'a str], start: usize) -> Self {
        Self { lines, next: start }
    }

    /// Next line carrying at least one numeric token, with its 1-based number.
    fn next_row(&mut self, what: &'static str) -> Result<(usize, Vec<f64>), ParseError> {
        while self.next < self.lines.len() {
            let idx = self.next;
            self.next += 1;
            let tokens = numeric_tokens(self.lines[idx]);
            if !tokens.is_empty() {
                return Ok((idx + 1, tokens));
            }
        }
        Err(ParseError::MissingLine {
            line: self.lines.len() + 1,
            what,
        })
    }
}

fn product_row(line: usize, tokens: &[f64], material_count: usize) -> Result<Product, ParseError> {
    let expected = material_count + 4;
    if tokens.len() != expected {
        return Err(ParseError::RowWidth {
            line,
            expected,
            found: tokens.len(),
        });
    }

    let material_use = tokens[..material_count]
        .iter()
        .map(|&value| integer(value, line, "material use"))
        .collect::<Result<Vec<_>, _>>()?;
    let unit_hours = tokens[material_count];
    if unit_hours < 0.0 {
        return Err(ParseError::Domain {
            line,
            what: "unit hours",
            value: unit_hours,
        });
    }
    let demand_min = integer(tokens[material_count + 1], line, "minimum demand")?;
    let demand_max = integer(tokens[material_count + 2], line, "maximum demand")?;
    let unit_price = integer(tokens[material_count + 3], line, "unit price")?;
    if demand_min > demand_max {
        return Err(ParseError::DemandBounds {
            line,
            min: demand_min,
            max: demand_max,
        });
    }

    Ok(Product {
        material_use,
        unit_hours,
        demand_min,
        demand_max,
        unit_price,
    })
}

fn material_row(line: usize, tokens: &[f64]) -> Result<Material, ParseError> {
    if tokens.len() != 2 {
        return Err(ParseError::RowWidth {
            line,
            expected: 2,
            found: tokens.len(),
        });
    }
    Ok(Material {
        lot_size: integer(tokens[0], line, "lot size")?,
        lot_cost: integer(tokens[1], line, "lot cost")?,
    })
}

/// First numeric token of a header line, as a non-negative whole count.
fn count_field(lines: &[&str], idx: usize, what: &'static str) -> Result<usize, ParseError> {
    let value = integer(line_token(lines, idx, what)?, idx + 1, what)?;
    Ok(value as usize)
}

/// First numeric token of a header line, as a non-negative number.
fn scalar_field(lines: &[&str], idx: usize, what: &'static str) -> Result<f64, ParseError> {
    let value = line_token(lines, idx, what)?;
    if value < 0.0 {
        return Err(ParseError::Domain {
            line: idx + 1,
            what,
            value,
        });
    }
    Ok(value)
}

fn line_token(lines: &[&str], idx: usize, what: &'static str) -> Result<f64, ParseError> {
    let line = lines.get(idx).ok_or(ParseError::MissingLine {
        line: idx + 1,
        what,
    })?;
    numeric_tokens(line)
        .first()
        .copied()
        .ok_or(ParseError::NoNumber {
            line: idx + 1,
            what,
        })
}

fn integer(value: f64, line: usize, what: &'static str) -> Result<i64, ParseError> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(ParseError::Domain { line, what, value });
    }
    Ok(value as i64)
}

/// All numeric tokens in a line. A token is a delimited word that is entirely
/// one optionally signed integer or decimal; labels and units are ignored.
fn numeric_tokens(line: &str) -> Vec<f64> {
    line.split(|c: char| c.is_whitespace() || matches!(c, ',' | ':' | ';' | '(' | ')' | '='))
        .filter_map(parse_number)
        .collect()
}

fn parse_number(word: &str) -> Option<f64> {
    let body = word.strip_prefix('-').unwrap_or(word);
    if !body.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let mut dots = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => {}
            '.' if dots == 0 => dots = 1,
            _ => return None,
        }
    }
    word.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
products: 2
materials: 2
hours: 40
changeover: 2
fixed: 5
use_a use_b hours dmin dmax price

2 1 1.5 0 40 8
1 3 2.0 5 25 11

30 10
25 7
";

    #[test]
    fn parses_labeled_sample() {
        let problem = parse_str(SAMPLE).unwrap();
        assert_eq!(problem.product_count(), 2);
        assert_eq!(problem.material_count(), 2);
        assert_eq!(problem.total_hours, 40.0);
        assert_eq!(problem.changeover_hours, 2.0);
        assert_eq!(problem.fixed_cost, 5.0);

        let second = &problem.products[1];
        assert_eq!(second.material_use, vec![1, 3]);
        assert_eq!(second.unit_hours, 2.0);
        assert_eq!(second.demand_min, 5);
        assert_eq!(second.demand_max, 25);
        assert_eq!(second.unit_price, 11);

        assert_eq!(problem.materials[0], Material { lot_size: 30, lot_cost: 10 });
        assert_eq!(problem.materials[1], Material { lot_size: 25, lot_cost: 7 });
    }

    #[test]
    fn tables_may_follow_without_separator_lines() {
        let text = "1\n1\n10\n1\n0\nheader\n2 1.0 1 10 5\n20 3\n";
        let problem = parse_str(text).unwrap();
        assert_eq!(problem.products[0].material_use, vec![2]);
        assert_eq!(problem.materials[0].lot_size, 20);
    }

    #[test]
    fn round_trip_reconstructs_the_problem() {
        let original = Problem {
            total_hours: 36.5,
            changeover_hours: 0.25,
            fixed_cost: 12.0,
            products: vec![
                Product {
                    material_use: vec![4, 0, 1],
                    unit_hours: 1.5,
                    demand_min: 2,
                    demand_max: 9,
                    unit_price: 13,
                },
                Product {
                    material_use: vec![0, 2, 2],
                    unit_hours: 0.75,
                    demand_min: 0,
                    demand_max: 50,
                    unit_price: 6,
                },
            ],
            materials: vec![
                Material { lot_size: 12, lot_cost: 5 },
                Material { lot_size: 40, lot_cost: 11 },
                Material { lot_size: 7, lot_cost: 2 },
            ],
        };

        let mut text = format!(
            "{}\n{}\n{}\n{}\n{}\n\n",
            original.product_count(),
            original.material_count(),
            original.total_hours,
            original.changeover_hours,
            original.fixed_cost,
        );
        for p in &original.products {
            for use_m in &p.material_use {
                text.push_str(&format!("{use_m} "));
            }
            text.push_str(&format!(
                "{} {} {} {}\n",
                p.unit_hours, p.demand_min, p.demand_max, p.unit_price
            ));
        }
        text.push('\n');
        for m in &original.materials {
            text.push_str(&format!("{} {}\n", m.lot_size, m.lot_cost));
        }

        assert_eq!(parse_str(&text).unwrap(), original);
    }

    #[test]
    fn truncated_header_is_a_missing_line() {
        let err = parse_str("3\n2\n40\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingLine { line: 4, .. }));
    }

    #[test]
    fn missing_table_rows_are_reported_past_the_last_line() {
        let text = "2\n1\n10\n1\n0\n\n2 1.0 1 10 5\n";
        let err = parse_str(text).unwrap_err();
        assert!(matches!(err, ParseError::MissingLine { .. }));
    }

    #[test]
    fn header_line_without_a_number_is_rejected() {
        let err = parse_str("products\n2\n40\n2\n5\n").unwrap_err();
        assert!(matches!(err, ParseError::NoNumber { line: 1, .. }));
    }

    #[test]
    fn wrong_product_row_width_is_rejected() {
        let text = "1\n2\n10\n1\n0\n\n2 1 1.5 0 40\n\n30 10\n25 7\n";
        let err = parse_str(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::RowWidth {
                line: 7,
                expected: 6,
                found: 5,
            }
        ));
    }

    #[test]
    fn negative_values_are_out_of_domain() {
        let text = "1\n1\n10\n1\n0\n\n2 1.0 -1 10 5\n\n20 3\n";
        let err = parse_str(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Domain {
                line: 7,
                what: "minimum demand",
                ..
            }
        ));
    }

    #[test]
    fn fractional_count_is_out_of_domain() {
        let err = parse_str("2.5\n1\n10\n1\n0\n").unwrap_err();
        assert!(matches!(err, ParseError::Domain { line: 1, .. }));
    }

    #[test]
    fn inverted_demand_bounds_are_rejected() {
        let text = "1\n1\n10\n1\n0\n\n2 1.0 8 3 5\n\n20 3\n";
        let err = parse_str(text).unwrap_err();
        assert!(matches!(err, ParseError::DemandBounds { line: 7, min: 8, max: 3 }));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = parse_file("/nonexistent/plan.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
