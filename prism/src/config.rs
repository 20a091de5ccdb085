/// Reflection and refraction bounces allowed per camera ray.
pub const DEFAULT_RECURSION_DEPTH: usize = 5;

/// Knobs for a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Budget for recursive reflected rays.
    pub max_reflections: usize,
    /// Budget for recursive refracted rays, independent of `max_reflections`.
    pub max_refractions: usize,
    /// Draw a progress bar on stderr while rendering.
    pub show_progress: bool,
}

impl RenderConfig {
    pub fn with_max_reflections(mut self, max_reflections: usize) -> Self {
        self.max_reflections = max_reflections;
        self
    }

    pub fn with_max_refractions(mut self, max_refractions: usize) -> Self {
        self.max_refractions = max_refractions;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_reflections: DEFAULT_RECURSION_DEPTH,
            max_refractions: DEFAULT_RECURSION_DEPTH,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budgets_match_recursion_depth() {
        let config = RenderConfig::default();
        assert_eq!(config.max_reflections, 5);
        assert_eq!(config.max_refractions, 5);
        assert!(config.show_progress);
    }

    #[test]
    fn builders_override_single_fields() {
        let config = RenderConfig::default()
            .with_max_reflections(1)
            .with_progress(false);
        assert_eq!(config.max_reflections, 1);
        assert_eq!(config.max_refractions, DEFAULT_RECURSION_DEPTH);
        assert!(!config.show_progress);
    }
}
