use std::env;
use std::path::{Path, PathBuf};

use log::warn;

/// Resolve start paths the way the walker expects them: absolute paths are
/// kept, everything else is either joined onto the current directory
/// (full-path display) or given a `./` prefix. With `use_search_path` the
/// directories of the `PATH` variable are seeded first, split on the
/// platform separator.
pub fn resolve_roots(paths: &[PathBuf], full_path: bool, use_search_path: bool) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if use_search_path {
        roots.extend(search_path_roots());
    }
    if paths.is_empty() {
        roots.push(resolve(Path::new("."), full_path));
    } else {
        roots.extend(paths.iter().map(|path| resolve(path, full_path)));
    }
    roots
}

fn resolve(path: &Path, full_path: bool) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if full_path {
        match env::current_dir() {
            Ok(cwd) => {
                let relative = path.strip_prefix(".").unwrap_or(path);
                return if relative.as_os_str().is_empty() {
                    cwd
                } else {
                    cwd.join(relative)
                };
            }
            Err(err) => warn!("current directory unavailable: {err}"),
        }
    }
    if path.starts_with("./") {
        path.to_path_buf()
    } else {
        Path::new(".").join(path)
    }
}

fn search_path_roots() -> Vec<PathBuf> {
    match env::var_os("PATH") {
        Some(value) if !value.is_empty() => env::split_paths(&value)
            .filter(|segment| !segment.as_os_str().is_empty())
            .collect(),
        _ => {
            warn!("environment variable `PATH' not set or empty");
            Vec::new()
        }
    }
}
