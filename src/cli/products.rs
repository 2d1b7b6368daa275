use std::io;

use settee::summary;

use super::StoreArgs;

pub(crate) fn list(store: &StoreArgs) -> Result<(), String> {
    let catalog = store.catalog()?;

    summary::write_catalog(io::stdout().lock(), &catalog)
        .map_err(|error| format!("failed to write catalog: {error}"))
}
