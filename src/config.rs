use std::time::Duration;

use crate::simulation::ValidationMode;

/// Logical window size in plot units (both diagrams share this canvas)
pub const WINDOW_WIDTH: f64 = 800.0;
pub const WINDOW_HEIGHT: f64 = 800.0;

/// Margins around the two diagrams
pub const SIDE_OFFSET: f64 = 50.0;
pub const BOTTOM_OFFSET: f64 = 50.0;
pub const TOP_OFFSET: f64 = 10.0;

/// Simulation time at the top of the x-t diagram
pub const STOP_TIME: f64 = 5.0;

/// Wall-clock length of one full animation cycle (0 -> STOP_TIME)
pub const CYCLE_DURATION: Duration = Duration::from_secs(5);

// ============================================
// Wave Speeds
// ============================================

/// Largest accepted characteristic speed magnitude
pub const MAX_SPEED: f64 = 1.5;

/// Values within this distance outside [-MAX_SPEED, MAX_SPEED] are clamped, not dropped
pub const RANGE_TOLERANCE: f64 = 0.01;

/// Speed list shown at startup (sorted before use)
pub const DEFAULT_SPEEDS: [f64; 4] = [-0.25, -0.5, 1.0, 1.5];

// ============================================
// Axes
// ============================================

pub const ARROW_HEAD_ANGLE_DEG: f64 = 20.0;
pub const ARROW_HEAD_SIZE: f64 = 20.0;

/// Offset of the horizontal axis label from the right edge of the window
pub const X_LABEL_INSET: f64 = 80.0;
/// Offset of axis labels from their axis line
pub const LABEL_OFFSET: f64 = 25.0;
pub const Y_LABEL_OFFSET_X: f64 = 15.0;
/// Axis caption height in plot units
pub const LABEL_FONT_SIZE: f64 = 20.0;

/// Gap between the two diagrams, above the x-U plot area
pub const DIAGRAM_GAP: f64 = 50.0;

// ============================================
// Overlay
// ============================================

/// How long a clicked region's label stays visible
pub const TOOLTIP_TIMEOUT: Duration = Duration::from_secs(1);
/// Tooltip placement below and right of the click, in plot units
pub const TOOLTIP_OFFSET: f64 = 5.0;

/// Frame intervals kept for the FPS average
pub const FPS_SAMPLE_SIZE: usize = 30;
/// Smaller windows than this fall back to FPS_SAMPLE_SIZE
pub const FPS_MIN_SAMPLE_SIZE: usize = 5;
pub const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);

pub const MARQUEE_STEP: Duration = Duration::from_millis(500);
pub const MARQUEE_TEXT: &str =
    "*** Pause/play:SPACE; Reverse:R; Change wave speeds:DOUBLE_CLICK or ENTER ***";

/// Two left presses closer than this count as a double click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Plot-space layout shared by both geometry builders.
///
/// Screen coordinates grow downward; simulation time grows upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub side_offset: f64,
    pub bottom_offset: f64,
    pub top_offset: f64,
    pub stop_time: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            side_offset: SIDE_OFFSET,
            bottom_offset: BOTTOM_OFFSET,
            top_offset: TOP_OFFSET,
            stop_time: STOP_TIME,
        }
    }
}

/// Origin and extents of one diagram inside the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    /// Horizontal position of x = 0
    pub x_zero: f64,
    /// Baseline (t = 0 for x-t, U = 0 for x-U)
    pub y_zero: f64,
    /// Where the vertical axis arrow ends
    pub axis_top: f64,
    /// Highest point a filled region may reach
    pub plot_top: f64,
    pub left: f64,
    pub right: f64,
    /// Vertical extent covered by the time axis at `stop_time`
    pub max_height: f64,
}

impl Viewport {
    fn max_plot_height(&self) -> f64 {
        self.height / 2.0 - 2.0 * self.bottom_offset - 2.0 * self.top_offset - DIAGRAM_GAP
    }

    /// Frame of the upper (x-t) diagram
    pub fn fan_frame(&self) -> PlotFrame {
        let y_zero = self.height / 2.0 - 2.0 * self.bottom_offset;
        let max_height = self.max_plot_height();
        PlotFrame {
            x_zero: self.width / 2.0,
            y_zero,
            axis_top: self.top_offset,
            plot_top: y_zero - max_height,
            left: self.side_offset,
            right: self.width - self.side_offset,
            max_height,
        }
    }

    /// Frame of the lower (x-U) diagram
    pub fn distribution_frame(&self) -> PlotFrame {
        let axis_top = self.height / 2.0 - DIAGRAM_GAP;
        PlotFrame {
            x_zero: self.width / 2.0,
            y_zero: self.height - self.bottom_offset,
            axis_top,
            plot_top: axis_top + DIAGRAM_GAP,
            left: self.side_offset,
            right: self.width - self.side_offset,
            max_height: self.max_plot_height(),
        }
    }

    /// Vertical distance the characteristics have travelled at time `t`
    pub fn current_height(&self, t: f64) -> f64 {
        t / self.stop_time * self.max_plot_height()
    }
}

/// Runtime options; each one differs between historical builds of the tool
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub validation: ValidationMode,
    pub autoplay: bool,
    pub marquee: bool,
    pub log_fps: bool,
    pub viewport: Viewport,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            validation: ValidationMode::RescaleToMax,
            autoplay: true,
            marquee: true,
            log_fps: false,
            viewport: Viewport::default(),
        }
    }
}

impl Settings {
    /// Settings from `RIEMANN_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary key lookup; unknown values keep the default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(value) = lookup("RIEMANN_VALIDATION") {
            match value.trim().to_ascii_lowercase().as_str() {
                "clamp" | "clamp-drop" => settings.validation = ValidationMode::ClampDrop,
                "rescale" | "rescale-to-max" => settings.validation = ValidationMode::RescaleToMax,
                other => log::warn!("Ignoring RIEMANN_VALIDATION={:?}", other),
            }
        }

        let flags: [(&str, &mut bool); 3] = [
            ("RIEMANN_AUTOPLAY", &mut settings.autoplay),
            ("RIEMANN_MARQUEE", &mut settings.marquee),
            ("RIEMANN_FPS", &mut settings.log_fps),
        ];
        for (key, slot) in flags {
            if let Some(value) = lookup(key) {
                match parse_flag(&value) {
                    Some(flag) => *slot = flag,
                    None => log::warn!("Ignoring {}={:?}", key, value),
                }
            }
        }

        settings
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_frames() {
        let viewport = Viewport::default();
        let fan = viewport.fan_frame();
        assert_eq!(fan.x_zero, 400.0);
        assert_eq!(fan.y_zero, 300.0);
        assert_eq!(fan.max_height, 230.0);
        assert_eq!(fan.plot_top, 70.0);

        let dist = viewport.distribution_frame();
        assert_eq!(dist.y_zero, 750.0);
        assert_eq!(dist.axis_top, 350.0);
        assert_eq!(dist.plot_top, 400.0);
    }

    #[test]
    fn test_current_height_scales_with_time() {
        let viewport = Viewport::default();
        assert_eq!(viewport.current_height(0.0), 0.0);
        assert_eq!(viewport.current_height(STOP_TIME), 230.0);
        assert_eq!(viewport.current_height(STOP_TIME / 2.0), 115.0);
    }

    #[test]
    fn test_settings_from_lookup() {
        let settings = Settings::from_lookup(lookup(&[
            ("RIEMANN_VALIDATION", "clamp"),
            ("RIEMANN_AUTOPLAY", "off"),
            ("RIEMANN_FPS", "1"),
        ]));
        assert_eq!(settings.validation, ValidationMode::ClampDrop);
        assert!(!settings.autoplay);
        assert!(settings.log_fps);
        assert!(settings.marquee);
    }

    #[test]
    fn test_settings_ignore_garbage() {
        let settings = Settings::from_lookup(lookup(&[
            ("RIEMANN_VALIDATION", "sometimes"),
            ("RIEMANN_AUTOPLAY", "maybe"),
        ]));
        assert_eq!(settings, Settings::default());
    }
}
