use relay_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// `--root` / `RELAY_ROOT` wins; otherwise the nearest ancestor of the
/// current directory holding `.relay/`, falling back to the current directory.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_relay_root(&cwd).unwrap_or(cwd)
}

fn find_relay_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| paths::relay_dir(dir).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn finds_relay_dir_from_nested_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".relay")).unwrap();
        let nested = dir.path().join("place/scripts");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_relay_root(&nested).as_deref(), Some(dir.path()));
    }

    #[test]
    fn no_relay_dir_finds_nothing() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        // An ancestor of the temp dir could in principle hold .relay/, so only
        // check that the temp tree itself is not reported.
        let found = find_relay_root(&nested);
        assert!(found.map_or(true, |p| !p.starts_with(dir.path())));
    }
}
