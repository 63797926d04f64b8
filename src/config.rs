use serde::{Deserialize, Serialize};

/// How equal-weight nodes are ordered when the tree is built.
///
/// Leaves are ranked by the policy; merged nodes always rank after every leaf,
/// in the order they were created. The two lowest-ranked nodes of the lowest
/// weight are merged first, so the same table and policy always give the same
/// tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TieBreak {
    /// Ascending symbol order.
    #[default]
    BySymbol,
    /// Order of first appearance in the message.
    FirstOccurrence,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    pub tie_break: TieBreak,
}

impl CodecConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}
