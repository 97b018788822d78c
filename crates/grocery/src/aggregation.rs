use std::collections::HashMap;

use mealplanner_shared::IngredientLine;

/// Sum ingredient lines sharing a normalised (name, unit)
///
/// Convertible units are folded into a base unit before grouping:
/// - volume: cup, tbsp, tsp, l into ml
/// - weight: kg, oz, lb into g
/// - count: whole, item, piece into piece
///
/// Incompatible units stay on separate lines ("1 piece onion" and "240 ml onion").
pub fn aggregate(lines: impl IntoIterator<Item = IngredientLine>) -> Vec<IngredientLine> {
    let mut groups: HashMap<(String, String), f64> = HashMap::new();

    for line in lines {
        let name = normalize_name(&line.name);
        if name.is_empty() {
            continue;
        }

        let (unit, quantity) = normalize_unit(&line.unit, line.quantity);
        *groups.entry((name, unit)).or_insert(0.0) += quantity;
    }

    let mut result: Vec<IngredientLine> = groups
        .into_iter()
        .map(|((name, unit), quantity)| IngredientLine {
            name,
            quantity: round_quantity(quantity),
            unit,
        })
        .collect();

    result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.unit.cmp(&b.unit)));

    result
}

/// Multiply every quantity by `factor`
pub fn scale(lines: &[IngredientLine], factor: f64) -> impl Iterator<Item = IngredientLine> + '_ {
    lines.iter().map(move |line| IngredientLine {
        quantity: line.quantity * factor,
        ..line.clone()
    })
}

/// Lowercase with inner whitespace collapsed
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn normalize_unit(unit: &str, quantity: f64) -> (String, f64) {
    let unit = unit.trim().to_lowercase();

    let (base, factor) = match unit.as_str() {
        "cup" | "cups" => ("ml", 240.0),
        "tbsp" | "tablespoon" | "tablespoons" => ("ml", 15.0),
        "tsp" | "teaspoon" | "teaspoons" => ("ml", 5.0),
        "ml" | "milliliter" | "milliliters" => ("ml", 1.0),
        "l" | "liter" | "liters" => ("ml", 1000.0),

        "g" | "gram" | "grams" => ("g", 1.0),
        "kg" | "kilogram" | "kilograms" => ("g", 1000.0),
        "oz" | "ounce" | "ounces" => ("g", 28.35),
        "lb" | "lbs" | "pound" | "pounds" => ("g", 453.59),

        "whole" | "item" | "items" | "piece" | "pieces" | "pcs" => ("piece", 1.0),
        "clove" | "cloves" => ("clove", 1.0),

        _ => return (unit, quantity),
    };

    (base.to_owned(), quantity * factor)
}

fn round_quantity(quantity: f64) -> f64 {
    (quantity * 100.0).round() / 100.0
}
