// Copyright 2023 Remi Bernotavicius

use diesel::associations::{Associations, Identifiable};
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow, Queryable};
use diesel::expression::{AsExpression, Selectable};
use diesel::prelude::Insertable;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use diesel_derive_newtype::DieselNewType;
use rust_decimal::Decimal;
use std::fmt;

#[derive(DieselNewType, Debug, Hash, PartialEq, Eq, Copy, Clone)]
pub struct MenuId(i32);

impl MenuId {
    pub const INITIAL: Self = Self(1);

    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Clone)]
#[diesel(table_name = crate::database::schema::menus)]
pub struct Menu {
    pub id: MenuId,
    pub name: String,
}

#[derive(DieselNewType, Debug, Hash, PartialEq, Eq, Copy, Clone)]
pub struct MealId(i32);

impl MealId {
    pub const INITIAL: Self = Self(1);

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// A meal may be unassigned, so its menu reference is nullable.
#[derive(Associations, Queryable, Selectable, Identifiable, Insertable, Clone)]
#[diesel(belongs_to(Menu))]
#[diesel(table_name = crate::database::schema::meals)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub menu_id: Option<MenuId>,
}

#[derive(DieselNewType, Debug, Hash, PartialEq, Eq, Copy, Clone)]
pub struct IngredientId(i32);

impl IngredientId {
    pub const INITIAL: Self = Self(1);

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Clone)]
#[diesel(table_name = crate::database::schema::ingredients)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub category: String,
    pub unit: Option<String>,
}

/// An ingredient quantity with exactly two decimal places, stored as TEXT
/// since SQLite has no decimal type. Construction rounds to two places so
/// every value in the database is already at that precision.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn new(value: Decimal) -> Self {
        Self(value.round_dp(2))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromSql<Text, Sqlite> for Quantity {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(Self::new(raw.parse()?))
    }
}

impl ToSql<Text, Sqlite> for Quantity {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.0.to_string());
        Ok(IsNull::No)
    }
}

#[derive(DieselNewType, Debug, Hash, PartialEq, Eq, Copy, Clone)]
pub struct MealIngredientId(i32);

impl MealIngredientId {
    pub const INITIAL: Self = Self(1);

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// Associates one ingredient with one meal. A null quantity means
/// "to taste / unspecified amount", which is distinct from zero.
#[derive(Associations, Queryable, Selectable, Identifiable, Insertable, Clone)]
#[diesel(belongs_to(Meal))]
#[diesel(belongs_to(Ingredient))]
#[diesel(table_name = crate::database::schema::meals_ingredients)]
pub struct MealIngredient {
    pub id: MealIngredientId,
    pub meal_id: MealId,
    pub ingredient_id: IngredientId,
    pub quantity: Option<Quantity>,
}

#[test]
fn quantity_rounds_to_two_places() {
    let q = Quantity::new("1.005".parse().unwrap());
    assert_eq!(q.value(), "1.00".parse().unwrap());

    let q = Quantity::new("2.5".parse().unwrap());
    assert_eq!(q.value(), "2.5".parse().unwrap());
}
