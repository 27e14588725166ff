pub mod entry;
pub mod error;
pub mod graph;

pub use entry::{EntryKind, FileEntry, TreeNode, basename_of, extension_of, parent_dir_of};
pub use error::{RepoGraphError, Result};
pub use graph::{DependencyEdge, DependencyGraph, DependencyNode};
