//! Test fixtures for creating reproducible project trees.

use ofstate_util::path::normalize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree with configurable files.
///
/// The directory is removed when the built project is dropped.
///
/// # Example
///
/// ```rust
/// use ofstate_test_utils::fixtures::TestProject;
///
/// let tree = TestProject::new()
///     .with_of_project("mockProject", "../mockOF", &["ofxSomeAddon", "ofxGui"])
///     .with_official_addons("mockOF", &["ofxGui"])
///     .build();
///
/// assert!(tree.path().join("mockProject/config.make").exists());
/// assert!(tree.path().join("mockOF/addons/ofxSomeAddon").is_dir());
/// ```
pub struct TestProject {
    /// The temporary directory backing this tree.
    temp_dir: TempDir,
    /// Files to create (path relative to root -> contents).
    files: BTreeMap<PathBuf, String>,
    /// Directories to create (paths relative to root).
    dirs: Vec<PathBuf>,
}

impl TestProject {
    /// Create a new tree builder.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            files: BTreeMap::new(),
            dirs: Vec::new(),
        }
    }

    /// Add a file. Parent directories are created automatically.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), contents.into());
        self
    }

    /// Add an empty directory.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dirs.push(path.as_ref().to_path_buf());
        self
    }

    /// Add a project directory whose `config.make` points at `of_root` and
    /// whose `addons.make` lists `addons`. Each addon directory is created
    /// under `<of_root>/addons`, resolved relative to the project.
    pub fn with_of_project(self, project: &str, of_root: &str, addons: &[&str]) -> Self {
        let project_dir = PathBuf::from(project);
        let addons_dir = normalize(&project_dir.join(of_root).join("addons"));

        let mut tree = self
            .with_file(project_dir.join("config.make"), content::config_make(of_root))
            .with_file(project_dir.join("addons.make"), content::addons_make(addons))
            .with_dir(&addons_dir);
        for addon in addons {
            tree = tree.with_dir(addons_dir.join(addon));
        }
        tree
    }

    /// Declare bundled addons in `<of_dir>/addons/.gitignore`.
    pub fn with_official_addons(self, of_dir: &str, addons: &[&str]) -> Self {
        let path = Path::new(of_dir).join("addons").join(".gitignore");
        self.with_file(path, content::addons_gitignore(addons))
    }

    /// Build the tree, creating all files and directories.
    pub fn build(self) -> BuiltTestProject {
        let root = self.temp_dir.path();

        // Create directories first
        for dir in &self.dirs {
            let full_path = root.join(dir);
            fs::create_dir_all(&full_path).unwrap_or_else(|e| {
                panic!("Failed to create directory {}: {}", full_path.display(), e)
            });
        }

        for (path, contents) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).unwrap_or_else(|e| {
                    panic!(
                        "Failed to create parent directory for {}: {}",
                        full_path.display(),
                        e
                    )
                });
            }
            fs::write(&full_path, contents)
                .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
        }

        BuiltTestProject {
            temp_dir: self.temp_dir,
        }
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A built tree with files created on disk.
pub struct BuiltTestProject {
    temp_dir: TempDir,
}

impl BuiltTestProject {
    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file from the tree.
    pub fn read_file(&self, path: impl AsRef<Path>) -> String {
        let full_path = self.path().join(path.as_ref());
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", full_path.display(), e))
    }

    /// Check if a file exists in the tree.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.path().join(path.as_ref()).exists()
    }

    /// Write a file (for modifying during tests).
    pub fn write_file(&self, path: impl AsRef<Path>, contents: impl AsRef<str>) {
        let full_path = self.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&full_path, contents.as_ref())
            .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
    }

    /// Remove a directory and everything below it.
    pub fn remove_dir(&self, path: impl AsRef<Path>) {
        let full_path = self.path().join(path.as_ref());
        fs::remove_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to remove {}: {}", full_path.display(), e));
    }

    /// File names in a directory, sorted.
    pub fn list_files(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let full_path = self.path().join(dir.as_ref());
        if !full_path.exists() {
            return Vec::new();
        }

        let mut names: Vec<String> = fs::read_dir(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", full_path.display(), e))
            .filter_map(|entry| {
                let entry = entry.ok()?;
                entry
                    .file_type()
                    .ok()?
                    .is_file()
                    .then(|| entry.file_name().to_string_lossy().into_owned())
            })
            .collect();
        names.sort();
        names
    }
}

/// Common test file contents.
pub mod content {
    /// A `config.make` pointing at the framework.
    pub fn config_make(of_root: &str) -> String {
        format!(
            "# OF_ROOT = ../../..\n\
             PROJECT_EXTERNAL_SOURCE_PATHS =\n\
             OF_ROOT = {of_root}\n"
        )
    }

    /// An `addons.make` listing the given addons.
    pub fn addons_make(addons: &[&str]) -> String {
        addons.iter().map(|a| format!("{a}\n")).collect()
    }

    /// The framework's `addons/.gitignore` with bundled addon exceptions.
    pub fn addons_gitignore(official: &[&str]) -> String {
        let mut out = String::from("/*\n!.gitignore\n");
        for addon in official {
            out.push_str(&format!("!{addon}\n"));
        }
        out
    }
}
