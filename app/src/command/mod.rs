//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch in `main` is resolved at compile time.

use orderscribe_core::Menu;
use std::path::Path;
use tracing::info;

mod batch;
mod info;
mod init;
mod keyterms;
mod scan;
mod version;

pub use batch::{BatchInput, BatchStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use keyterms::{KeytermsInput, KeytermsStrategy};
pub use scan::{ScanInput, ScanStrategy};
pub use version::VersionStrategy;

/// Read a menu file: a JSON array of menu items.
fn load_menu(path: &Path) -> anyhow::Result<Menu> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read menu {}: {e}", path.display()))?;
    let menu: Menu = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid menu {}: {e}", path.display()))?;

    if menu.is_empty() {
        anyhow::bail!("Menu {} has no items", path.display());
    }

    info!("Loaded {} menu items from {}", menu.len(), path.display());
    Ok(menu)
}

/// Core trait defining the contract for all command strategies.
///
/// Adding a command means adding a strategy type and implementing this
/// trait for it; each strategy names its own input type.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
