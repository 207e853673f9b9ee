pub mod decompose;
pub mod evaluate;
pub mod pareto;
pub mod validate;

use crate::cli::ProjectArgs;
use crate::config::{PartialProjectConfig, ProjectConfig};
use crate::error::{CliError, Result};
use ecofront::core::inventory::InventoryDatabase;
use std::path::Path;
use tracing::info;

pub(crate) fn load_project(args: &ProjectArgs) -> Result<ProjectConfig> {
    let partial = PartialProjectConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    partial.merge_with_cli(args)
}

pub(crate) fn load_inventory(path: &Path) -> Result<InventoryDatabase> {
    info!("Loading inventory database from {:?}", path);
    let database = InventoryDatabase::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!(
        activities = database.len(),
        methods = database.methods().len(),
        "Inventory database loaded."
    );
    Ok(database)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const INVENTORY: &str = r#"
        [[methods]]
        path = ["IPCC 2013", "climate change", "GWP 100a"]

        [[activities]]
        code = "ethanol"
        name = "ethanol fermentation"
        impacts = { "IPCC 2013|climate change|GWP 100a" = -2.0 }
        exchanges = [{ input = "electricity", amount = 0.5 }]

        [[activities]]
        code = "lactic"
        name = "lactic acid fermentation"
        impacts = { "IPCC 2013|climate change|GWP 100a" = -1.0 }
        exchanges = [
            { input = "electricity", amount = 1.0 },
            { input = "lime", amount = 0.4 },
        ]

        [[activities]]
        code = "electricity"
        name = "grid electricity"
        category = "Energy"
        impacts = { "IPCC 2013|climate change|GWP 100a" = 0.6 }

        [[activities]]
        code = "lime"
        name = "quicklime production"
        category = "Chemicals"
        impacts = { "IPCC 2013|climate change|GWP 100a" = 1.0 }
    "#;

    pub const PROJECT: &str = r#"
        inventory = "inventory.toml"
        methods = ["IPCC 2013|climate change|GWP 100a"]

        [sweep]
        step = 25.0

        [[products]]
        name = "ethanol"

        [[products]]
        name = "lactic"

        [economics]
        discount-rate = 0.0
        lifetime-years = 1

        [economics.products.ethanol]
        margin = 1.0

        [economics.products.lactic]
        margin = 2.0
    "#;

    /// Writes the inventory and the given project file into `dir`; returns the project path.
    pub fn write_project(dir: &Path, project: &str) -> PathBuf {
        fs::write(dir.join("inventory.toml"), INVENTORY).unwrap();
        let path = dir.join("project.toml");
        fs::write(&path, project).unwrap();
        path
    }
}
