// Staged event input, drained once per frame.
//
// Event handlers never touch animation state directly: they stage values
// here, and the frame callback alone commits them. This keeps every rendered
// frame consistent even when several events land between frames. Pure Rust on
// purpose so the host-side tests can exercise it.

/// Everything the event handlers staged since the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StagedFrame {
    /// Last pointer position (viewport space); later events overwrite earlier.
    pub pointer: Option<[f32; 2]>,
    /// Last pointer X over the reveal container (viewport space).
    pub reveal_pointer: Option<f32>,
    /// Latest hover transition over the reveal container.
    pub reveal_hover: Option<bool>,
    pub scroll_dirty: bool,
    pub layout_dirty: bool,
    /// Best visibility ratio observed for the pressure container.
    pub intersection: Option<f64>,
}

#[derive(Debug, Default)]
pub struct StagedInput {
    frame: StagedFrame,
}

impl StagedInput {
    pub fn stage_pointer(&mut self, x: f32, y: f32) {
        self.frame.pointer = Some([x, y]);
    }

    pub fn stage_reveal_pointer(&mut self, x: f32) {
        self.frame.reveal_pointer = Some(x);
    }

    pub fn stage_reveal_hover(&mut self, hovering: bool) {
        self.frame.reveal_hover = Some(hovering);
    }

    pub fn stage_scroll(&mut self) {
        self.frame.scroll_dirty = true;
    }

    pub fn stage_layout(&mut self) {
        self.frame.layout_dirty = true;
    }

    pub fn stage_intersection(&mut self, visible_ratio: f64) {
        self.frame.intersection = Some(match self.frame.intersection {
            Some(prev) => prev.max(visible_ratio),
            None => visible_ratio,
        });
    }

    /// Hand the staged frame to the consumer and reset for the next one.
    pub fn drain(&mut self) -> StagedFrame {
        std::mem::take(&mut self.frame)
    }
}
