//! Shared fixture for the snapshot integration tests.

#![allow(dead_code)]

use ofstate_snapshot::StateManager;
use ofstate_test_utils::{BuiltTestProject, FakeVcs, TestProject};
use std::path::PathBuf;

pub const OF_SHA: &str = "1111111111111111111111111111111111111111";
pub const ADDON_SHA: &str = "2222222222222222222222222222222222222222";

/// mockProject using ../mockOF with one git addon, one plain addon and
/// one bundled addon.
pub struct Fixture {
    pub tree: BuiltTestProject,
    pub vcs: FakeVcs,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_addons(&["ofxSomeAddon", "ofxNonGitAddon", "ofxGui"])
    }

    pub fn with_addons(addons: &[&str]) -> Self {
        let tree = TestProject::new()
            .with_of_project("mockProject", "../mockOF", addons)
            .with_official_addons("mockOF", &["ofxGui"])
            .with_file("mockOF/addons/ofxNonGitAddon/src/plain.h", "// plain\n")
            .with_dir("mockOF/addons/ofxSomeAddon")
            .build();
        let vcs = FakeVcs::new()
            .with_repo(tree.path().join("mockOF"), OF_SHA)
            .with_repo(tree.path().join("mockOF/addons/ofxSomeAddon"), ADDON_SHA);
        Self { tree, vcs }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.tree.path().join("mockProject")
    }

    pub fn of_dir(&self) -> PathBuf {
        self.tree.path().join("mockOF")
    }

    pub fn addon_dir(&self, name: &str) -> PathBuf {
        self.tree.path().join("mockOF/addons").join(name)
    }

    pub async fn manager(&self) -> StateManager<FakeVcs> {
        StateManager::open(self.project_dir(), self.vcs.clone())
            .await
            .unwrap()
    }

    pub fn metadata_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.tree.read_file("mockProject/metadata.json")).unwrap()
    }
}
