use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use settee::{
    catalog::Catalog,
    config::{CartConfig, parse_currency},
    session::CartSession,
    storage::{CART_STORAGE_KEY, FileStorage},
};

use crate::observability::LoggingConfig;

mod cart;
mod checkout;
mod products;

#[derive(Debug, Parser)]
#[command(name = "settee", about = "Furniture storefront cart", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(cart::AddArgs),
    /// Remove a line from the cart
    Remove(cart::LineArgs),
    /// Set the quantity of a line (zero or below removes it)
    Set(cart::SetArgs),
    /// Add one unit to a line
    Inc(cart::LineArgs),
    /// Take one unit off a line
    Dec(cart::LineArgs),
    /// Empty the cart
    Clear,
    /// Show the cart
    Show,
    /// Print the order creation body as JSON
    Order(checkout::CustomerArgs),
    /// Print the order message for the shop
    Message(checkout::CustomerArgs),
    /// List the catalog
    Products,
}

/// Where the cart lives and how it is priced.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// Directory holding the persisted cart
    #[arg(long, global = true, env = "SETTEE_DATA_DIR", default_value = ".settee")]
    data_dir: PathBuf,

    /// Product listing (JSON or YAML)
    #[arg(long, global = true, env = "SETTEE_CATALOG", default_value = "fixtures/catalog.yml")]
    catalog: PathBuf,

    /// Currency prices are held in
    #[arg(long, global = true, env = "SETTEE_CURRENCY", default_value = "KES")]
    currency: String,

    /// Storage key holding the cart
    #[arg(long, global = true, env = "SETTEE_STORAGE_KEY", default_value = CART_STORAGE_KEY)]
    storage_key: String,
}

impl StoreArgs {
    fn config(&self) -> Result<CartConfig, String> {
        let currency = parse_currency(&self.currency).map_err(|error| error.to_string())?;

        Ok(CartConfig {
            storage_key: self.storage_key.clone(),
            currency,
        })
    }

    pub(crate) fn session(&self) -> Result<CartSession<FileStorage>, String> {
        let config = self.config()?;

        Ok(CartSession::init(FileStorage::new(&self.data_dir), &config))
    }

    pub(crate) fn catalog(&self) -> Result<Catalog, String> {
        let config = self.config()?;

        Catalog::from_path(&self.catalog, config.currency).map_err(|error| {
            format!(
                "failed to load catalog {}: {error}",
                self.catalog.display()
            )
        })
    }
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        let store = &self.store;

        match self.command {
            Commands::Add(args) => cart::add(store, &args),
            Commands::Remove(args) => cart::remove(store, &args),
            Commands::Set(args) => cart::set(store, &args),
            Commands::Inc(args) => cart::step(store, &args, cart::Step::Up),
            Commands::Dec(args) => cart::step(store, &args, cart::Step::Down),
            Commands::Clear => cart::clear(store),
            Commands::Show => cart::show(store),
            Commands::Order(args) => checkout::order(store, args),
            Commands::Message(args) => checkout::message(store, args),
            Commands::Products => products::list(store),
        }
    }
}
