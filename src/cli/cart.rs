#![expect(clippy::print_stdout, reason = "command output to user")]

use std::io;

use clap::Args;
use settee::{items::LineItem, products::ProductId, summary};

use super::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Product id
    product: u64,

    /// Units to add
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,

    /// Colour; defaults to the product's first colour
    #[arg(long)]
    color: Option<String>,

    /// Add without a colour even if the product has some
    #[arg(long, conflicts_with = "color")]
    no_color: bool,
}

#[derive(Debug, Args)]
pub(crate) struct LineArgs {
    /// Product id
    product: u64,

    /// Colour of the line
    #[arg(long)]
    color: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct SetArgs {
    #[command(flatten)]
    line: LineArgs,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Step {
    Up,
    Down,
}

pub(crate) fn add(store: &StoreArgs, args: &AddArgs) -> Result<(), String> {
    let catalog = store.catalog()?;
    let product = catalog
        .get(ProductId::new(args.product))
        .map_err(|error| error.to_string())?;

    if !product.is_in_stock() {
        return Err(format!("{} is out of stock", product.name));
    }

    let variant = if args.no_color {
        None
    } else {
        args.color.as_deref().or_else(|| product.default_variant())
    };

    if let Some(variant) = variant
        && !product.colors.is_empty()
        && !product.colors.iter().any(|color| color == variant)
    {
        return Err(format!(
            "{} is not available in {variant}; choose from {}",
            product.name,
            product.colors.join(", ")
        ));
    }

    let mut session = store.session()?;

    if !session.add_item(product, args.quantity, variant) {
        return Err(format!("{} could not be added to the cart", product.name));
    }

    if let Some(item) = session.cart().get(product.id, variant) {
        println!("{} x{} in cart", item.name(), item.quantity());

        if let Some(stock) = item.stock().filter(|_| item.exceeds_stock()) {
            println!("warning: only {stock} in stock");
        }
    }

    Ok(())
}

pub(crate) fn remove(store: &StoreArgs, args: &LineArgs) -> Result<(), String> {
    let mut session = store.session()?;

    if session.remove_item(ProductId::new(args.product), args.color.as_deref()) {
        println!("Removed product {} from the cart", args.product);
    } else {
        println!("Product {} is not in the cart", args.product);
    }

    Ok(())
}

pub(crate) fn set(store: &StoreArgs, args: &SetArgs) -> Result<(), String> {
    let mut session = store.session()?;
    let product_id = ProductId::new(args.line.product);
    let variant = args.line.color.as_deref();

    session.update_quantity(product_id, args.quantity, variant);

    report_line(product_id, session.cart().get(product_id, variant).map(LineItem::quantity));

    Ok(())
}

pub(crate) fn step(store: &StoreArgs, args: &LineArgs, step: Step) -> Result<(), String> {
    let mut session = store.session()?;
    let product_id = ProductId::new(args.product);
    let variant = args.color.as_deref();

    let changed = match step {
        Step::Up => session.increment(product_id, variant),
        Step::Down => session.decrement(product_id, variant),
    };

    if !changed {
        return Err(format!("Product {product_id} is not in the cart"));
    }

    report_line(product_id, session.cart().get(product_id, variant).map(LineItem::quantity));

    Ok(())
}

pub(crate) fn clear(store: &StoreArgs) -> Result<(), String> {
    let mut session = store.session()?;

    session.clear();

    println!("Cart cleared");

    Ok(())
}

pub(crate) fn show(store: &StoreArgs) -> Result<(), String> {
    let session = store.session()?;

    summary::write_cart(io::stdout().lock(), session.cart())
        .map_err(|error| format!("failed to write cart: {error}"))
}

fn report_line(product_id: ProductId, quantity: Option<u32>) {
    match quantity {
        Some(quantity) => println!("Product {product_id} x{quantity} in cart"),
        None => println!("Product {product_id} is not in the cart"),
    }
}
