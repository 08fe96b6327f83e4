use std::path::PathBuf;
use std::sync::OnceLock;

/// Returns the workspace root directory (parent of the calling crate's directory).
pub fn workspace_root(manifest_dir: &str) -> PathBuf {
    let manifest_dir = PathBuf::from(manifest_dir);
    manifest_dir
        .parent()
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

/// Path of a file under `<workspace>/test_resources`.
pub fn test_resource_path(manifest_dir: &str, name: &str) -> PathBuf {
    workspace_root(manifest_dir).join("test_resources").join(name)
}

/// Path of a file under `<workspace>/test_output`, creating the directory on first use.
pub fn test_output_path(manifest_dir: &str, name: &str) -> PathBuf {
    static INIT: OnceLock<()> = OnceLock::new();
    let dir = workspace_root(manifest_dir).join("test_output");
    INIT.get_or_init(|| {
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
    });
    dir.join(name)
}
