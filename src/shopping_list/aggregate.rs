// Copyright 2023 Remi Bernotavicius

use super::collect::IngredientUsage;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One consolidated row of the shopping list: the total of every usage of
/// one (name, unit) pair within a category. `quantity` of `None` means the
/// amount is unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedLine {
    pub name: String,
    pub unit: Option<String>,
    pub quantity: Option<Decimal>,
}

/// Orders lines within a category: ascending by name ignoring case, then by
/// exact name and unit so the full order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineKey {
    name: String,
    unit: Option<String>,
}

impl Ord for LineKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.unit.cmp(&other.unit))
    }
}

impl PartialOrd for LineKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Consolidates a flat list of usages into one line per distinct
/// (category, name, unit) triple, summing quantities exactly. The same
/// ingredient in two different units stays two lines.
///
/// A usage without a quantity poisons its line: the total becomes
/// unspecified and stays that way no matter how many other usages of the
/// same key carry amounts, since "to taste" and "2 cups" cannot be safely
/// combined.
///
/// Categories come back in alphabetical order, lines per `LineKey` order.
pub fn aggregate(
    usages: impl IntoIterator<Item = IngredientUsage>,
) -> BTreeMap<String, Vec<AggregatedLine>> {
    let mut totals: BTreeMap<String, BTreeMap<LineKey, Option<Decimal>>> = BTreeMap::new();
    for usage in usages {
        let key = LineKey {
            name: usage.name,
            unit: usage.unit,
        };
        let total = totals
            .entry(usage.category)
            .or_default()
            .entry(key)
            .or_insert(Some(Decimal::ZERO));
        *total = match (*total, usage.quantity) {
            (Some(so_far), Some(quantity)) => Some(so_far + quantity),
            _ => None,
        };
    }

    totals
        .into_iter()
        .map(|(category, lines)| {
            let lines = lines
                .into_iter()
                .map(|(key, quantity)| AggregatedLine {
                    name: key.name,
                    unit: key.unit,
                    quantity,
                })
                .collect();
            (category, lines)
        })
        .collect()
}

#[cfg(test)]
fn usage(name: &str, category: &str, unit: Option<&str>, quantity: Option<&str>) -> IngredientUsage {
    IngredientUsage {
        name: name.into(),
        category: category.into(),
        unit: unit.map(Into::into),
        quantity: quantity.map(|q| q.parse().unwrap()),
    }
}

#[test]
fn empty_input_yields_empty_mapping() {
    assert_eq!(aggregate(vec![]), maplit::btreemap! {});
}

#[test]
fn same_key_sums_exactly() {
    let lines = aggregate(vec![
        usage("flour", "Baking", Some("cups"), Some("2.00")),
        usage("flour", "Baking", Some("cups"), Some("1.50")),
        usage("flour", "Baking", Some("cups"), Some("0.10")),
    ]);
    assert_eq!(
        lines,
        maplit::btreemap! {
            "Baking".to_owned() => vec![AggregatedLine {
                name: "flour".into(),
                unit: Some("cups".into()),
                quantity: Some("3.60".parse().unwrap()),
            }],
        }
    );
}

#[test]
fn summation_is_order_independent() {
    let forward = vec![
        usage("flour", "Baking", Some("cups"), Some("2.00")),
        usage("flour", "Baking", Some("cups"), Some("1.50")),
    ];
    let reverse: Vec<_> = forward.iter().rev().cloned().collect();
    assert_eq!(aggregate(forward), aggregate(reverse));
}

#[test]
fn different_units_never_merge() {
    let lines = aggregate(vec![
        usage("flour", "Baking", Some("cups"), Some("2.00")),
        usage("flour", "Baking", Some("g"), Some("200.00")),
    ]);
    assert_eq!(lines["Baking"].len(), 2);
    assert_eq!(
        lines["Baking"],
        vec![
            AggregatedLine {
                name: "flour".into(),
                unit: Some("cups".into()),
                quantity: Some("2.00".parse().unwrap()),
            },
            AggregatedLine {
                name: "flour".into(),
                unit: Some("g".into()),
                quantity: Some("200.00".parse().unwrap()),
            },
        ]
    );
}

#[test]
fn missing_quantity_is_sticky_regardless_of_order() {
    for usages in [
        vec![
            usage("salt", "Spices", None, None),
            usage("salt", "Spices", None, Some("2.00")),
        ],
        vec![
            usage("salt", "Spices", None, Some("2.00")),
            usage("salt", "Spices", None, None),
        ],
    ] {
        let lines = aggregate(usages);
        assert_eq!(
            lines["Spices"],
            vec![AggregatedLine {
                name: "salt".into(),
                unit: None,
                quantity: None,
            }]
        );
    }
}

#[test]
fn lines_ordered_by_name_ignoring_case() {
    let lines = aggregate(vec![
        usage("Zucchini", "Produce", None, Some("1.00")),
        usage("apples", "Produce", None, Some("3.00")),
        usage("Basil", "Produce", None, Some("1.00")),
    ]);
    let names: Vec<_> = lines["Produce"].iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["apples", "Basil", "Zucchini"]);
}

#[test]
fn categories_ordered_alphabetically() {
    let lines = aggregate(vec![
        usage("salt", "Spices", None, None),
        usage("flour", "Baking", Some("cups"), Some("2.00")),
        usage("apples", "Produce", None, Some("3.00")),
    ]);
    let categories: Vec<_> = lines.keys().map(String::as_str).collect();
    assert_eq!(categories, vec!["Baking", "Produce", "Spices"]);
}
