//! Testing utilities, fixtures, and fakes for ofstate.
//!
//! - **Fixtures**: temporary project trees laid out like an openFrameworks install
//! - **Mocks**: an in-memory [`VersionControl`](ofstate_snapshot::VersionControl)
//! - **Git**: real repositories for end-to-end tests
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ofstate_test_utils::{FakeVcs, TestProject};
//!
//! #[tokio::test]
//! async fn test_record() {
//!     let tree = TestProject::new()
//!         .with_of_project("mockProject", "../mockOF", &["ofxSomeAddon"])
//!         .build();
//!     let vcs = FakeVcs::new().with_repo(tree.path().join("mockOF"), "abc");
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod git;
pub mod mocks;

// Re-export commonly used items
pub use fixtures::{BuiltTestProject, TestProject};
pub use git::{git_available, GitRepo};
pub use mocks::{FakeVcs, VcsCall};
