// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{Ingredient, Meal, MealIngredient, Menu, MenuId};
use crate::{Error, Result};
use diesel::BelongingToDsl as _;
use diesel::ExpressionMethods as _;
use diesel::OptionalExtension as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;
use rust_decimal::Decimal;

/// One ingredient requirement contributed by one meal. These only live for
/// the duration of a single shopping-list run; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientUsage {
    pub name: String,
    pub category: String,
    pub unit: Option<String>,
    pub quantity: Option<Decimal>,
}

pub fn find_menu(conn: &mut database::Connection, menu_id: MenuId) -> Result<Menu> {
    use database::schema::menus::dsl::*;

    menus
        .select(Menu::as_select())
        .filter(id.eq(menu_id))
        .get_result(conn)
        .optional()?
        .ok_or(Error::MenuNotFound(menu_id))
}

/// Flattens a menu into every (ingredient, quantity) pair its meals require.
/// No grouping or summing happens here, and the output order carries no
/// meaning. Association rows whose ingredient no longer exists are skipped
/// with a warning; foreign keys make that unreachable in a healthy database.
pub fn collect_usages(
    conn: &mut database::Connection,
    menu: &Menu,
) -> Result<Vec<IngredientUsage>> {
    let meals: Vec<Meal> = Meal::belonging_to(menu)
        .select(Meal::as_select())
        .load(conn)?;

    let expected: i64 = MealIngredient::belonging_to(&meals)
        .count()
        .get_result(conn)?;
    let rows: Vec<(MealIngredient, Ingredient)> = MealIngredient::belonging_to(&meals)
        .inner_join(database::schema::ingredients::table)
        .select((MealIngredient::as_select(), Ingredient::as_select()))
        .load(conn)?;
    if (rows.len() as i64) < expected {
        log::warn!(
            "menu {:?} has {} ingredient association(s) referencing missing \
             ingredients; the shopping list will be incomplete",
            menu.name,
            expected - rows.len() as i64,
        );
    }

    Ok(rows
        .into_iter()
        .map(|(usage, ingredient)| IngredientUsage {
            name: ingredient.name,
            category: ingredient.category,
            unit: ingredient.unit.filter(|u| !u.is_empty()),
            quantity: usage.quantity.map(|q| q.value()),
        })
        .collect())
}
