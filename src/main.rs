// Copyright 2023 Remi Bernotavicius

use clap::Parser;
use clap::Subcommand;
use crate::database::models::{Menu, MenuId};
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;
use std::path::PathBuf;

mod database;
mod error;
mod shopping_list;

pub use error::{Error, Result};

#[derive(Parser, Debug)]
struct Args {
    /// Use this SQLite database instead of the one in the user data directory.
    #[arg(long)]
    database: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every menu with its id.
    Menus,
    /// Generate the consolidated shopping list for a menu.
    ShoppingList {
        menu_id: i32,
        /// Write the list to this file (e.g. shopping_list.txt) instead of
        /// printing it.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// This is where the database lives on-disk. On Linux it should be like:
/// `~/.local/share/meal_planner/`
fn data_path() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new().expect("failed to get user home directory");
    let path = dirs.data_dir().join("meal_planner");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

fn list_menus(conn: &mut database::Connection) -> Result<()> {
    use database::schema::menus::dsl::*;

    for menu in menus.select(Menu::as_select()).load::<Menu>(conn)? {
        println!("{}\t{}", menu.id, menu.name);
    }
    Ok(())
}

fn generate_shopping_list(
    conn: &mut database::Connection,
    menu_id: i32,
    output: Option<PathBuf>,
) -> Result<()> {
    let report = shopping_list::generate(conn, MenuId::new(menu_id))?;
    match output {
        Some(path) => {
            std::fs::write(&path, &report)?;
            log::info!("wrote shopping list to {}", path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .expect("failed to initialize logging");

    let args = Args::parse();
    let database_path = match args.database {
        Some(path) => path,
        None => data_path()?.join("data.sqlite"),
    };
    let mut conn = database::establish_connection(database_path)?;
    match args.command {
        Commands::Menus => list_menus(&mut conn),
        Commands::ShoppingList { menu_id, output } => {
            generate_shopping_list(&mut conn, menu_id, output)
        }
    }
}
