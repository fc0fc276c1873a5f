pub mod repository;

pub use repository::ReactionRepository;

use std::fmt;

/// Like and Save follow the identical presence-toggle protocol; the kind
/// only selects which join table the repository operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Like,
    Save,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Save => "save",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a toggle or a status probe: whether the join row exists for
/// this user, and the article-wide total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionStatus {
    pub reacted: bool,
    pub total: u64,
}
