use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use food_finder::logging;
use food_finder::models::{Registry, Restaurant, RestaurantOptions, SortKey, sort_restaurants};
use food_finder::storage::{
    ConfigStorage, RestaurantFile, TomlConfigStorage, data_file_path, ensure_directories,
};

#[derive(Parser)]
#[command(name = "food_finder")]
#[command(about = "Find and record restaurants", long_about = None)]
struct Cli {
    /// Restaurant file to use instead of the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Configuration file (default: $XDG_CONFIG_HOME/food_finder/food_finder.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved restaurants
    List {
        /// Column to sort by (default from config)
        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,
    },

    /// Add a restaurant
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short = 'u', long)]
        cuisine: String,

        /// Average price, e.g. 12.50
        #[arg(short, long)]
        price: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (data_dir, config_dir) = ensure_directories()?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("food_finder.toml"));
    let config = TomlConfigStorage::new(config_path).load()?;

    match &config.general.log_file {
        Some(log_file) => logging::init_logger(log_file, &config.general.log_level)?,
        None => env_logger::init(),
    }

    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| data_file_path(&config, &data_dir));
    let registry = Registry::with_store(Box::new(RestaurantFile::create_if_missing(path)?));

    match cli.command {
        Some(Commands::List { sort }) => cmd_list(&registry, sort.unwrap_or(config.general.default_sort)),
        Some(Commands::Add {
            name,
            cuisine,
            price,
        }) => cmd_add(&registry, name, cuisine, price),
        None => cmd_list(&registry, config.general.default_sort),
    }
}

/// Print every restaurant as a table
fn cmd_list(registry: &Registry, sort: SortKey) -> Result<()> {
    let mut restaurants = registry.all();
    sort_restaurants(&mut restaurants, sort);

    println!("Listing restaurants (sorted by {:?})", sort);
    println!("{}", "=".repeat(60));

    if restaurants.is_empty() {
        println!("No listings found");
        return Ok(());
    }

    println!("{:<30} {:<20} {:>8}", "Name", "Cuisine", "Price");
    println!("{}", "-".repeat(60));
    for restaurant in &restaurants {
        println!(
            "{:<30} {:<20} {:>8}",
            restaurant.name.as_deref().unwrap_or(""),
            restaurant.cuisine.as_deref().unwrap_or(""),
            restaurant.formatted_price()
        );
    }

    Ok(())
}

/// Save a new restaurant to the loaded file
fn cmd_add(registry: &Registry, name: String, cuisine: String, price: String) -> Result<()> {
    let restaurant = Restaurant::new(
        RestaurantOptions::default()
            .name(name)
            .cuisine(cuisine)
            .price(price),
    );

    if restaurant.save(registry) {
        log::info!("Added restaurant {:?}", restaurant.name);
        println!("Restaurant Added");
        Ok(())
    } else {
        println!("Save Error: Restaurant not added");
        Err(anyhow!(
            "Restaurant was not saved: it needs a name, a cuisine and a price above zero"
        ))
    }
}
