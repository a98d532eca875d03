//! Drag-and-drop interpretation.
//!
//! This module provides:
//! - Classification of a drop gesture into swap / push / none
//! - The reorder operations a classified drop dispatches to

pub mod reorder;

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// What a completed drag gesture means for the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DragAction {
    /// Exchange the dragged and target positions.
    Swap,
    /// Dragged task takes the target's slot, shifting tasks between them.
    Push,
    /// No valid interaction.
    None,
}

/// Tunables for drop classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragConfig {
    /// Fraction of the target block's height past which a drop swaps
    /// instead of pushes. Clamped to [0, 1] on every update.
    #[serde(default = "default_swap_threshold")]
    pub swap_threshold: f64,
}

fn default_swap_threshold() -> f64 {
    0.5
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { swap_threshold: default_swap_threshold() }
    }
}

impl DragConfig {
    pub fn set_swap_threshold(&mut self, value: f64) {
        self.swap_threshold = value.clamp(0.0, 1.0);
    }
}

/// Classify a drop from its relative vertical position inside the target
/// block (0.0 = top edge, 1.0 = bottom edge). Stateless; the caller has
/// already normalized away pixel geometry.
pub fn classify(
    dragged: &Task,
    target: Option<&Task>,
    drop_relative_y: f64,
    swap_threshold: f64,
) -> DragAction {
    let target = match target {
        Some(t) => t,
        None => return DragAction::None,
    };
    if target.is_locked || dragged.id == target.id {
        return DragAction::None;
    }
    if drop_relative_y >= swap_threshold {
        DragAction::Swap
    } else {
        DragAction::Push
    }
}
