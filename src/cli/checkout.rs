#![expect(clippy::print_stdout, reason = "command output to user")]

use clap::Args;
use settee::order::CustomerInfo;

use super::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct CustomerArgs {
    /// Customer name
    #[arg(long)]
    name: String,

    /// Phone number
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    /// Delivery instructions
    #[arg(long)]
    notes: Option<String>,
}

impl From<CustomerArgs> for CustomerInfo {
    fn from(args: CustomerArgs) -> Self {
        Self {
            name: args.name,
            phone: args.phone,
            address: args.address,
            notes: args.notes,
        }
    }
}

pub(crate) fn order(store: &StoreArgs, args: CustomerArgs) -> Result<(), String> {
    let customer = CustomerInfo::from(args);
    let session = store.session()?;

    customer.validate().map_err(|error| error.to_string())?;

    let submission = session.order_submission(&customer);

    submission.validate().map_err(|error| error.to_string())?;

    let body = serde_json::to_string_pretty(&submission)
        .map_err(|error| format!("failed to encode order: {error}"))?;

    println!("{body}");

    Ok(())
}

pub(crate) fn message(store: &StoreArgs, args: CustomerArgs) -> Result<(), String> {
    let customer = CustomerInfo::from(args);
    let session = store.session()?;

    customer.validate().map_err(|error| error.to_string())?;

    if session.cart().is_empty() {
        return Err("Your cart is empty".to_string());
    }

    println!("{}", session.handoff_message(&customer));

    Ok(())
}
