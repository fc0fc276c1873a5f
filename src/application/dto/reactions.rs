use crate::domain::reaction::ReactionStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReactionStatusDto {
    pub reacted: bool,
    pub total: u64,
}

impl From<ReactionStatus> for ReactionStatusDto {
    fn from(status: ReactionStatus) -> Self {
        Self {
            reacted: status.reacted,
            total: status.total,
        }
    }
}
