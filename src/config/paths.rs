//! Configuration file location.

use std::env;
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "CATALOG_FILL_CONFIG";
/// File name searched for in the working directory and `config/`.
pub const CONFIG_FILE_NAME: &str = "catalog-fill.toml";

/// What: Find the configuration file in override, working, and development locations.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing file found, or `None` if not found
///
/// Details:
/// - Tries locations in order:
///   1. `$CATALOG_FILL_CONFIG` when set and non-empty
///   2. `./catalog-fill.toml`
///   3. `CARGO_MANIFEST_DIR/config/catalog-fill.toml` (when running from source)
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(p) = env::var(CONFIG_ENV)
        && !p.trim().is_empty()
    {
        return Some(PathBuf::from(p));
    }

    let cwd_path = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_path.is_file() {
        return Some(cwd_path);
    }

    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join(CONFIG_FILE_NAME);
    if dev_path.is_file() {
        return Some(dev_path);
    }

    None
}
