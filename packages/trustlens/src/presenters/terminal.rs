//! Colored terminal output for the CLI.

use std::io::Write;
use std::sync::RwLock;

use crate::error::PresentError;
use crate::report::render_block;
use crate::traits::{Presenter, UiBlock};

/// Prints each inserted block to stdout. Remembers the id of the block
/// currently shown so a replacement is reported like on a page.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    shown: RwLock<Option<String>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the block printed last, unless it was removed since.
    pub fn shown(&self) -> Option<String> {
        self.shown.read().unwrap().clone()
    }
}

impl Presenter for TerminalPresenter {
    fn remove_block(&self, block_id: &str) -> bool {
        let mut shown = self.shown.write().unwrap();
        if shown.as_deref() == Some(block_id) {
            *shown = None;
            true
        } else {
            false
        }
    }

    fn insert_block(&self, block: UiBlock) -> Result<(), PresentError> {
        if block.anchor.is_empty() {
            return Err(PresentError::NoAnchor);
        }

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(render_block(&block).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| PresentError::Surface(e.to_string()))?;

        *self.shown.write().unwrap() = Some(block.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreBand;

    #[test]
    fn test_tracks_the_block_on_screen() {
        let presenter = TerminalPresenter::new();
        let block = UiBlock {
            id: "trustlens-ui-block".into(),
            anchor: "#centerCol".into(),
            average_score: 72,
            band: ScoreBand::High,
            review_count: 4,
            badges: vec![],
        };

        assert!(!presenter.remove_block("trustlens-ui-block"));
        presenter.insert_block(block).unwrap();
        assert_eq!(presenter.shown().as_deref(), Some("trustlens-ui-block"));
        assert!(presenter.remove_block("trustlens-ui-block"));
        assert_eq!(presenter.shown(), None);
    }
}
