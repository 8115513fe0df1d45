// ABOUTME: Recipe Finder CLI - command-line client for recipe search and saved state
// ABOUTME: Manages favorites, pantry and shopping list through the configured state store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
//!
//! Usage:
//! ```bash
//! # Search with explicit ingredients, or with the pantry when omitted
//! recipe-finder-cli search chicken,rice --diet vegetarian
//!
//! # Favorites
//! recipe-finder-cli favorites toggle mealdb 52772
//! recipe-finder-cli favorites list
//!
//! # Pantry
//! recipe-finder-cli pantry add eggs flour milk
//! recipe-finder-cli pantry toggle garlic
//!
//! # Shopping list
//! recipe-finder-cli shopping add-recipe spoonacular 716429
//! recipe-finder-cli shopping clear
//! ```
//!
//! With `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `SUPABASE_ACCESS_TOKEN` and
//! `SUPABASE_USER_ID` set, state is read from and written to Supabase;
//! otherwise it lives in a local JSON file.

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use recipe_finder::{
    config::environment::{ServerConfig, StoreConfig},
    logging,
    server::ServerResources,
    store::open_store,
};
use std::path::PathBuf;
use tracing::debug;

type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(
    name = "recipe-finder-cli",
    about = "Recipe Finder CLI",
    long_about = "Search recipes by ingredient and manage favorites, pantry and shopping list."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Local state file override
    #[arg(long, global = true)]
    state_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Search both providers by ingredient
    Search {
        /// Comma-separated ingredients (defaults to the pantry)
        ingredients: Option<String>,

        /// Diet filter (Spoonacular only)
        #[arg(long)]
        diet: Option<String>,

        /// Cuisine filter (Spoonacular only)
        #[arg(long)]
        cuisine: Option<String>,

        /// Number of Spoonacular results
        #[arg(long)]
        number: Option<u32>,
    },

    /// Favorite recipes
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Pantry items
    Pantry {
        #[command(subcommand)]
        action: PantryCommand,
    },

    /// Shopping list
    Shopping {
        #[command(subcommand)]
        action: ShoppingCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorites
    List,

    /// Save a recipe, or unsave it when already saved
    Toggle {
        /// Recipe source (mealdb or spoonacular)
        source: String,
        /// Recipe id
        id: String,
    },

    /// Remove a favorite by `source:id` key
    Remove {
        /// Composite key, e.g. `mealdb:52772`
        key: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PantryCommand {
    /// List pantry items
    List,

    /// Add an item, or remove it when already present
    Toggle {
        /// Ingredient name
        name: String,
    },

    /// Add several items at once
    Add {
        /// Ingredient names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove an item
    Remove {
        /// Ingredient name (case-insensitive)
        name: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ShoppingCommand {
    /// Show the shopping list
    List,

    /// Add entries
    Add {
        /// Entries to add
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Add a recipe's ingredients that are not in the pantry
    AddRecipe {
        /// Recipe source (mealdb or spoonacular)
        source: String,
        /// Recipe id
        id: String,
    },

    /// Remove an entry
    Remove {
        /// Entry text
        item: String,
    },

    /// Remove every entry
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_for_cli(cli.verbose)?;

    let server_config = ServerConfig::from_env()?;
    let mut store_config = StoreConfig::from_env();
    if let Some(state_path) = cli.state_path {
        store_config.state_path = state_path;
    }

    let store = open_store(&store_config, server_config.http_client_timeout())?;
    debug!("State store: {}", store.backend_info());

    let resources = ServerResources::new(server_config)?;
    let recipes = &resources.recipes;

    match cli.command {
        Command::Search {
            ingredients,
            diet,
            cuisine,
            number,
        } => {
            commands::search::run(
                recipes,
                &store,
                ingredients,
                diet.as_deref(),
                cuisine.as_deref(),
                number,
            )
            .await?;
        }
        Command::Favorites { action } => match action {
            FavoritesCommand::List => commands::favorites::list(&store).await?,
            FavoritesCommand::Toggle { source, id } => {
                commands::favorites::toggle(recipes, &store, &source, &id).await?;
            }
            FavoritesCommand::Remove { key } => commands::favorites::remove(&store, &key).await?,
        },
        Command::Pantry { action } => match action {
            PantryCommand::List => commands::pantry::list(&store).await?,
            PantryCommand::Toggle { name } => commands::pantry::toggle(&store, &name).await?,
            PantryCommand::Add { names } => commands::pantry::add(&store, &names).await?,
            PantryCommand::Remove { name } => commands::pantry::remove(&store, &name).await?,
        },
        Command::Shopping { action } => match action {
            ShoppingCommand::List => commands::shopping::list(&store).await?,
            ShoppingCommand::Add { items } => commands::shopping::add(&store, &items).await?,
            ShoppingCommand::AddRecipe { source, id } => {
                commands::shopping::add_recipe(recipes, &store, &source, &id).await?;
            }
            ShoppingCommand::Remove { item } => commands::shopping::remove(&store, &item).await?,
            ShoppingCommand::Clear => commands::shopping::clear(&store).await?,
        },
    }

    Ok(())
}
