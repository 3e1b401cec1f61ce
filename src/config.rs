//! Runtime configuration, read from the environment (and `.env`) with
//! command-line overrides.

use clap::Args;
use std::path::PathBuf;
use crate::storage::{FileStorage, StorageError};

#[derive(Debug, Clone, Args)]
pub struct CartConfig {
    /// Directory holding the persisted cart
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".storefront", global = true)]
    pub storage_dir: PathBuf,

    /// Name of the slot the cart is stored under
    #[arg(long, env = "CART_STORAGE_KEY", default_value = "cart", global = true)]
    pub storage_key: String,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,
}

impl CartConfig {
    pub fn storage(&self) -> Result<FileStorage, StorageError> {
        FileStorage::new(&self.storage_dir, &self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: CartConfig,
    }

    #[test]
    fn test_overrides() {
        let args = ["test", "--storage-dir", "/tmp/carts", "--storage-key", "guest-1"];
        let harness = Harness::try_parse_from(args).unwrap();
        let storage = harness.config.storage().unwrap();
        assert_eq!(storage.path(), std::path::Path::new("/tmp/carts/guest-1.json"));
    }

    #[test]
    fn test_bad_key_is_rejected() {
        let harness = Harness::try_parse_from(["test", "--storage-key", "../escape"]).unwrap();
        assert!(harness.config.storage().is_err());
    }
}
