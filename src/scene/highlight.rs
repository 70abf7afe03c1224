//! Selection and hover glow on beds.

use crate::core::types::Color;

use super::config::HighlightConfig;

/// Emissive colour and intensity applied to a bed's meshes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub intensity: f32,
}

impl Glow {
    pub const NONE: Glow = Glow {
        color: [0.0; 3],
        intensity: 0.0,
    };
}

/// Which beds are selected and hovered.
///
/// Selection wins over hover when both name the same bed.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
    selected: Option<String>,
    hovered: Option<String>,
    /// Beds that glowed on the last update and must be reset when released.
    lit: Vec<String>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Returns true if the selection changed.
    pub fn select(&mut self, bed_id: Option<&str>) -> bool {
        let next = bed_id.map(str::to_string);
        if self.selected == next {
            return false;
        }
        self.selected = next;
        true
    }

    /// Returns true if the hovered bed changed.
    pub fn hover(&mut self, bed_id: Option<&str>) -> bool {
        let next = bed_id.map(str::to_string);
        if self.hovered == next {
            return false;
        }
        self.hovered = next;
        true
    }

    /// Forget everything, e.g. after the beds were rebuilt.
    pub fn clear(&mut self) {
        self.selected = None;
        self.hovered = None;
        self.lit.clear();
    }

    /// Glow for `bed_id` at scene time `time` (seconds).
    pub fn glow_for(&self, bed_id: &str, time: f32, config: &HighlightConfig) -> Glow {
        let (color, intensity, rate) = if self.selected.as_deref() == Some(bed_id) {
            (config.selected_color, config.selected_intensity, config.selected_pulse_rate)
        } else if self.hovered.as_deref() == Some(bed_id) {
            (config.hovered_color, config.hovered_intensity, config.hovered_pulse_rate)
        } else {
            return Glow::NONE;
        };
        let pulse = 1.0 + config.pulse_amplitude * (rate * time).sin();
        Glow {
            color,
            intensity: (intensity * pulse).max(0.0),
        }
    }

    /// Glow updates due at `time`: every highlighted bed, plus a reset for
    /// each bed that was lit last time and no longer is.
    pub fn updates(&mut self, time: f32, config: &HighlightConfig) -> Vec<(String, Glow)> {
        let mut out = Vec::new();
        let mut now_lit = Vec::new();
        for id in [self.selected.as_ref(), self.hovered.as_ref()].into_iter().flatten() {
            if !now_lit.contains(id) {
                now_lit.push(id.clone());
            }
        }
        for id in &self.lit {
            if !now_lit.contains(id) {
                out.push((id.clone(), Glow::NONE));
            }
        }
        for id in &now_lit {
            out.push((id.clone(), self.glow_for(id, time, config)));
        }
        self.lit = now_lit;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_beats_hover() {
        let config = HighlightConfig::default();
        let mut state = HighlightState::new();
        state.select(Some("a"));
        state.hover(Some("a"));
        let glow = state.glow_for("a", 0.0, &config);
        assert_eq!(glow.color, config.selected_color);
        assert!((glow.intensity - config.selected_intensity).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_bounded() {
        let config = HighlightConfig::default();
        let mut state = HighlightState::new();
        state.hover(Some("b"));
        let lo = config.hovered_intensity * (1.0 - config.pulse_amplitude) - 1e-6;
        let hi = config.hovered_intensity * (1.0 + config.pulse_amplitude) + 1e-6;
        for i in 0..100 {
            let g = state.glow_for("b", i as f32 * 0.07, &config);
            assert!((lo..=hi).contains(&g.intensity));
        }
        assert_eq!(state.glow_for("c", 1.0, &config), Glow::NONE);
    }

    #[test]
    fn test_change_detection() {
        let mut state = HighlightState::new();
        assert!(state.select(Some("a")));
        assert!(!state.select(Some("a")));
        assert!(state.select(None));
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_released_bed_reset_once() {
        let config = HighlightConfig::default();
        let mut state = HighlightState::new();
        state.select(Some("a"));
        let first = state.updates(0.0, &config);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].0, "a");

        state.select(Some("b"));
        let second = state.updates(0.1, &config);
        assert_eq!(second[0], ("a".to_string(), Glow::NONE));
        assert_eq!(second[1].0, "b");

        state.select(None);
        assert_eq!(state.updates(0.2, &config), vec![("b".to_string(), Glow::NONE)]);
        assert!(state.updates(0.3, &config).is_empty());
    }
}
