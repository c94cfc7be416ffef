//! In-memory UI surface.

use std::sync::RwLock;

use tracing::debug;

use crate::error::PresentError;
use crate::traits::{Presenter, UiBlock};

/// Records the blocks currently attached to a page. Inserting does not
/// replace anything by itself; callers remove the old block first.
#[derive(Debug, Default)]
pub struct MemorySurface {
    blocks: RwLock<Vec<UiBlock>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks currently shown, oldest first.
    pub fn blocks(&self) -> Vec<UiBlock> {
        self.blocks.read().unwrap().clone()
    }

    pub fn block(&self, id: &str) -> Option<UiBlock> {
        self.blocks
            .read()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }
}

impl Presenter for MemorySurface {
    fn remove_block(&self, block_id: &str) -> bool {
        let mut blocks = self.blocks.write().unwrap();
        let before = blocks.len();
        blocks.retain(|b| b.id != block_id);
        before != blocks.len()
    }

    fn insert_block(&self, block: UiBlock) -> Result<(), PresentError> {
        if block.anchor.is_empty() {
            return Err(PresentError::NoAnchor);
        }
        debug!(id = %block.id, anchor = %block.anchor, "Inserting summary block");
        self.blocks.write().unwrap().push(block);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreBand;

    fn block(id: &str, score: u8) -> UiBlock {
        UiBlock {
            id: id.into(),
            anchor: "#rightCol".into(),
            average_score: score,
            band: ScoreBand::from_score(score),
            review_count: 1,
            badges: vec![],
        }
    }

    #[test]
    fn test_remove_then_insert_keeps_one_block() {
        let surface = MemorySurface::new();
        assert!(!surface.remove_block("trustlens-ui-block"));

        surface.insert_block(block("trustlens-ui-block", 10)).unwrap();
        assert!(surface.remove_block("trustlens-ui-block"));
        surface.insert_block(block("trustlens-ui-block", 90)).unwrap();

        assert_eq!(surface.blocks().len(), 1);
        assert_eq!(surface.block("trustlens-ui-block").unwrap().average_score, 90);
    }

    #[test]
    fn test_block_without_anchor_is_refused() {
        let surface = MemorySurface::new();
        let mut orphan = block("trustlens-ui-block", 50);
        orphan.anchor.clear();

        assert!(matches!(
            surface.insert_block(orphan),
            Err(PresentError::NoAnchor)
        ));
        assert!(surface.blocks().is_empty());
    }
}
