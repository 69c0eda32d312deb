use std::path::PathBuf;
use std::sync::OnceLock;

/// `<workspace>/test_output`, created on first use.
fn output_dir() -> &'static PathBuf {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .expect("crate manifest directory has a parent")
            .join("test_output");
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
        dir
    })
}

/// Path for a file written by a test. Any file left by a previous run is removed.
pub fn test_output_path(name: &str) -> PathBuf {
    let path = output_dir().join(name);
    if path.exists() {
        std::fs::remove_file(&path)
            .unwrap_or_else(|e| panic!("Failed to remove stale {}: {}", path.display(), e));
    }
    path
}
