use crate::config::StackConfig;

/// Configuration for the GPUI card stack view.
#[derive(Debug, Clone)]
pub struct CardStackViewConfig {
    /// Layout and gesture settings of the stack itself.
    pub stack: StackConfig,
    /// Pixel distance a press must travel before it counts as a drag.
    ///
    /// A press released before travelling this far is a click and leaves the
    /// card untouched.
    pub drag_threshold_px: f32,
}

impl Default for CardStackViewConfig {
    fn default() -> Self {
        Self {
            stack: StackConfig::default(),
            drag_threshold_px: 4.0,
        }
    }
}
