// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::MenuId;
use crate::Result;
use diesel::Connection as _;

mod aggregate;
mod collect;
mod render;

/// Produces the consolidated shopping list for one menu: every ingredient
/// its meals use, summed per (category, name, unit) and grouped by category.
///
/// The whole read runs inside one transaction so the report reflects a
/// single snapshot of the menu. Fails with [`crate::Error::MenuNotFound`] if
/// the menu does not exist.
pub fn generate(conn: &mut database::Connection, menu_id: MenuId) -> Result<String> {
    conn.transaction(|conn| {
        let menu = collect::find_menu(conn, menu_id)?;
        let usages = collect::collect_usages(conn, &menu)?;
        let categories = aggregate::aggregate(usages);
        Ok(render::render(&menu.name, &categories))
    })
}

#[cfg(test)]
use crate::database::models::{
    Ingredient, IngredientId, Meal, MealId, MealIngredient, MealIngredientId, Menu, Quantity,
};
#[cfg(test)]
use diesel::ExpressionMethods as _;
#[cfg(test)]
use diesel::QueryDsl as _;
#[cfg(test)]
use diesel::RunQueryDsl as _;

#[cfg(test)]
fn add_menu(conn: &mut database::Connection, menu_id: MenuId, menu_name: &str) {
    use database::schema::menus::dsl::*;

    diesel::insert_into(menus)
        .values(Menu {
            id: menu_id,
            name: menu_name.into(),
        })
        .execute(conn)
        .unwrap();
}

#[cfg(test)]
fn add_meal(
    conn: &mut database::Connection,
    meal_id: MealId,
    meal_name: &str,
    meal_menu_id: Option<MenuId>,
) {
    use database::schema::meals::dsl::*;

    diesel::insert_into(meals)
        .values(Meal {
            id: meal_id,
            name: meal_name.into(),
            menu_id: meal_menu_id,
        })
        .execute(conn)
        .unwrap();
}

#[cfg(test)]
fn add_ingredient(
    conn: &mut database::Connection,
    ingredient_id: IngredientId,
    ingredient_name: &str,
    ingredient_category: &str,
    ingredient_unit: Option<&str>,
) {
    use database::schema::ingredients::dsl::*;

    diesel::insert_into(ingredients)
        .values(Ingredient {
            id: ingredient_id,
            name: ingredient_name.into(),
            category: ingredient_category.into(),
            unit: ingredient_unit.map(Into::into),
        })
        .execute(conn)
        .unwrap();
}

#[cfg(test)]
fn add_usage(
    conn: &mut database::Connection,
    usage_id: MealIngredientId,
    usage_meal_id: MealId,
    usage_ingredient_id: IngredientId,
    usage_quantity: Option<&str>,
) {
    use database::schema::meals_ingredients::dsl::*;

    diesel::insert_into(meals_ingredients)
        .values(MealIngredient {
            id: usage_id,
            meal_id: usage_meal_id,
            ingredient_id: usage_ingredient_id,
            quantity: usage_quantity.map(|q| Quantity::new(q.parse().unwrap())),
        })
        .execute(conn)
        .unwrap();
}

#[test]
fn two_meals_sharing_an_ingredient() {
    let mut conn = database::establish_in_memory_connection();

    let menu_id = MenuId::INITIAL;
    add_menu(&mut conn, menu_id, "Dinner");

    let meal_a = MealId::INITIAL;
    let meal_b = meal_a.next();
    add_meal(&mut conn, meal_a, "Bread", Some(menu_id));
    add_meal(&mut conn, meal_b, "Pancakes", Some(menu_id));

    let flour = IngredientId::INITIAL;
    let salt = flour.next();
    add_ingredient(&mut conn, flour, "Flour", "Baking", Some("cups"));
    add_ingredient(&mut conn, salt, "Salt", "Spices", None);

    let usage_id = MealIngredientId::INITIAL;
    add_usage(&mut conn, usage_id, meal_a, flour, Some("2.00"));
    let usage_id = usage_id.next();
    add_usage(&mut conn, usage_id, meal_a, salt, None);
    let usage_id = usage_id.next();
    add_usage(&mut conn, usage_id, meal_b, flour, Some("1.50"));

    assert_eq!(
        generate(&mut conn, menu_id).unwrap(),
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
fn menu_with_no_meals() {
    let mut conn = database::establish_in_memory_connection();
    add_menu(&mut conn, MenuId::INITIAL, "Empty");

    assert_eq!(generate(&mut conn, MenuId::INITIAL).unwrap(), "MENU Empty\n");
}

#[test]
fn meal_with_no_ingredients() {
    let mut conn = database::establish_in_memory_connection();
    add_menu(&mut conn, MenuId::INITIAL, "Sparse");
    add_meal(&mut conn, MealId::INITIAL, "Toast", Some(MenuId::INITIAL));

    assert_eq!(
        generate(&mut conn, MenuId::INITIAL).unwrap(),
        "MENU Sparse\n"
    );
}

#[test]
fn unknown_menu_is_not_found() {
    let mut conn = database::establish_in_memory_connection();
    add_menu(&mut conn, MenuId::INITIAL, "Dinner");

    let result = generate(&mut conn, MenuId::INITIAL.next());
    assert!(matches!(result, Err(crate::Error::MenuNotFound(_))));
}

#[test]
fn other_menus_and_unassigned_meals_are_excluded() {
    let mut conn = database::establish_in_memory_connection();

    let dinner = MenuId::INITIAL;
    let brunch = dinner.next();
    add_menu(&mut conn, dinner, "Dinner");
    add_menu(&mut conn, brunch, "Brunch");

    let soup = MealId::INITIAL;
    let waffles = soup.next();
    let leftovers = waffles.next();
    add_meal(&mut conn, soup, "Soup", Some(dinner));
    add_meal(&mut conn, waffles, "Waffles", Some(brunch));
    add_meal(&mut conn, leftovers, "Leftovers", None);

    let onion = IngredientId::INITIAL;
    let syrup = onion.next();
    add_ingredient(&mut conn, onion, "Onion", "Produce", None);
    add_ingredient(&mut conn, syrup, "Syrup", "Pantry", Some("ml"));

    let usage_id = MealIngredientId::INITIAL;
    add_usage(&mut conn, usage_id, soup, onion, Some("1.00"));
    let usage_id = usage_id.next();
    add_usage(&mut conn, usage_id, waffles, syrup, Some("50.00"));
    let usage_id = usage_id.next();
    add_usage(&mut conn, usage_id, leftovers, onion, Some("2.00"));

    assert_eq!(
        generate(&mut conn, dinner).unwrap(),
        "MENU Dinner\n\
         Produce\n\
         ------------\n\
         Onion - 1.00\n"
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let mut conn = database::establish_in_memory_connection();
    add_menu(&mut conn, MenuId::INITIAL, "Dinner");
    add_meal(&mut conn, MealId::INITIAL, "Soup", Some(MenuId::INITIAL));
    add_ingredient(
        &mut conn,
        IngredientId::INITIAL,
        "Onion",
        "Produce",
        Some("whole"),
    );
    add_usage(
        &mut conn,
        MealIngredientId::INITIAL,
        MealId::INITIAL,
        IngredientId::INITIAL,
        Some("2.00"),
    );

    let first = generate(&mut conn, MenuId::INITIAL).unwrap();
    let second = generate(&mut conn, MenuId::INITIAL).unwrap();
    assert_eq!(first, second);
}

#[test]
fn orphaned_association_rows_are_skipped() {
    let mut conn = database::establish_in_memory_connection();

    add_menu(&mut conn, MenuId::INITIAL, "Dinner");
    add_meal(&mut conn, MealId::INITIAL, "Bread", Some(MenuId::INITIAL));

    let flour = IngredientId::INITIAL;
    let salt = flour.next();
    add_ingredient(&mut conn, flour, "Flour", "Baking", Some("cups"));
    add_ingredient(&mut conn, salt, "Salt", "Spices", None);
    add_usage(
        &mut conn,
        MealIngredientId::INITIAL,
        MealId::INITIAL,
        flour,
        Some("2.00"),
    );
    add_usage(
        &mut conn,
        MealIngredientId::INITIAL.next(),
        MealId::INITIAL,
        salt,
        None,
    );

    // Pull an ingredient out from underneath its association row, the way a
    // database without enforced foreign keys could.
    diesel::sql_query("PRAGMA foreign_keys = OFF")
        .execute(&mut conn)
        .unwrap();
    {
        use database::schema::ingredients::dsl::*;
        diesel::delete(ingredients.filter(id.eq(salt)))
            .execute(&mut conn)
            .unwrap();
    }

    assert_eq!(
        generate(&mut conn, MenuId::INITIAL).unwrap(),
        "MENU Dinner\n\
         Baking\n\
         ------------\n\
         Flour - 2.00 cups\n"
    );
}

#[test]
fn blank_unit_matches_missing_unit() {
    let mut conn = database::establish_in_memory_connection();

    add_menu(&mut conn, MenuId::INITIAL, "Dinner");
    add_meal(&mut conn, MealId::INITIAL, "Soup", Some(MenuId::INITIAL));

    let pepper = IngredientId::INITIAL;
    let pepper_blank_unit = pepper.next();
    add_ingredient(&mut conn, pepper, "Pepper", "Spices", None);
    add_ingredient(&mut conn, pepper_blank_unit, "Pepper", "Spices", Some(""));

    add_usage(
        &mut conn,
        MealIngredientId::INITIAL,
        MealId::INITIAL,
        pepper,
        Some("1.00"),
    );
    add_usage(
        &mut conn,
        MealIngredientId::INITIAL.next(),
        MealId::INITIAL,
        pepper_blank_unit,
        Some("2.00"),
    );

    assert_eq!(
        generate(&mut conn, MenuId::INITIAL).unwrap(),
        "MENU Dinner\n\
         Spices\n\
         ------------\n\
         Pepper - 3.00\n"
    );
}
