pub mod declaration;
pub mod report;
pub mod tree_walker;
pub mod version_extractor;
pub mod version_rewriter;

pub use declaration::{Declaration, DeclarationKind, FileTarget};
pub use report::{FileUpdate, Replacement, SkippedFile, UpdateReport};
pub use tree_walker::{PlannedFile, TreeWalker};
pub use version_extractor::VersionExtractor;
pub use version_rewriter::{Rewrite, VersionRewriter};
