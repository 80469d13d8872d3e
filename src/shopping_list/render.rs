// Copyright 2023 Remi Bernotavicius

use super::aggregate::AggregatedLine;
use std::collections::BTreeMap;
use std::fmt;

impl fmt::Display for AggregatedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(quantity) = &self.quantity {
            write!(f, " - {quantity:.2}")?;
            if let Some(unit) = &self.unit {
                write!(f, " {unit}")?;
            }
        }
        Ok(())
    }
}

/// Lays the aggregated list out as plain text:
///
/// ```text
/// MENU <menu name>
/// <category>
/// ------------
/// <name> - <quantity> <unit>
///
/// <next category>
/// ...
/// ```
///
/// Lines without a quantity show the ingredient name alone. A category with
/// no lines still gets its heading rather than aborting the report.
pub fn render(menu_name: &str, categories: &BTreeMap<String, Vec<AggregatedLine>>) -> String {
    let mut report = format!("MENU {menu_name}\n");
    for (i, (category, lines)) in categories.iter().enumerate() {
        if i > 0 {
            report.push('\n');
        }
        report.push_str(category);
        report.push('\n');
        report.push_str("------------\n");
        for line in lines {
            report.push_str(&line.to_string());
            report.push('\n');
        }
    }
    report
}

#[test]
fn line_formatting() {
    let line = AggregatedLine {
        name: "Flour".into(),
        unit: Some("cups".into()),
        quantity: Some("3.5".parse().unwrap()),
    };
    assert_eq!(line.to_string(), "Flour - 3.50 cups");

    let line = AggregatedLine {
        name: "Eggs".into(),
        unit: None,
        quantity: Some("12".parse().unwrap()),
    };
    assert_eq!(line.to_string(), "Eggs - 12.00");

    let line = AggregatedLine {
        name: "Salt".into(),
        unit: Some("tsp".into()),
        quantity: None,
    };
    assert_eq!(line.to_string(), "Salt");
}

#[test]
fn report_with_multiple_categories() {
    let categories = maplit::btreemap! {
        "Baking".to_owned() => vec![
            AggregatedLine {
                name: "Flour".into(),
                unit: Some("cups".into()),
                quantity: Some("3.50".parse().unwrap()),
            },
        ],
        "Spices".to_owned() => vec![
            AggregatedLine {
                name: "Salt".into(),
                unit: None,
                quantity: None,
            },
        ],
    };
    assert_eq!(
        render("Dinner", &categories),
        "MENU Dinner\n\
         Baking\n\
         ------------\n\
         Flour - 3.50 cups\n\
         \n\
         Spices\n\
         ------------\n\
         Salt\n"
    );
}

#[test]
fn report_with_no_categories() {
    assert_eq!(render("Empty", &maplit::btreemap! {}), "MENU Empty\n");
}

#[test]
fn category_with_no_lines_renders_an_empty_block() {
    let categories = maplit::btreemap! {
        "Produce".to_owned() => vec![],
    };
    assert_eq!(
        render("Sparse", &categories),
        "MENU Sparse\n\
         Produce\n\
         ------------\n"
    );
}
