//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "weft";
const APPLICATION: &str = "weft";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory for logs and other regenerable files.
///
/// - Linux: `$XDG_CACHE_HOME/weft` or `~/.cache/weft`
/// - macOS: `~/Library/Caches/dev.weft.weft`
/// - Windows: `C:\Users\<User>\AppData\Local\weft\weft\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/weft` or `~/.config/weft`
/// - macOS: `~/Library/Application Support/dev.weft.weft`
/// - Windows: `C:\Users\<User>\AppData\Roaming\weft\weft\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default options file, read when `--config` is not given.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Default log file, used when `--log-file` is not given.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}
