use serde::Deserialize;

use crate::logging::LogLevel;
use crate::notification::ToastTiming;

const DEFAULT_SCROLL_TOP_THRESHOLD: f64 = 300.0;
const DEFAULT_NAVBAR_SCROLLED_THRESHOLD: f64 = 50.0;
const DEFAULT_PARALLAX_FACTOR: f64 = 0.4;
const DEFAULT_PARALLAX_FADE_DISTANCE: f64 = 600.0;
const DEFAULT_FADE_IN_OFFSET: f64 = 150.0;
const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
const DEFAULT_COUNTER_STEP_MS: u32 = 16;
const DEFAULT_SKILL_BAR_DELAY_MS: u32 = 100;
const DEFAULT_TOAST_ENTER_DELAY_MS: u32 = 100;
const DEFAULT_TOAST_VISIBLE_UNTIL_MS: u32 = 3_000;
const DEFAULT_TOAST_EXIT_DURATION_MS: u32 = 300;
const DEFAULT_TOOLTIP_GAP: f64 = 10.0;
const DEFAULT_PRELOADER_DELAY_MS: u32 = 500;
const DEFAULT_CURSOR_BLINK_MS: u32 = 530;
const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;
const DEFAULT_MIN_INPUT_FONT_PX: f64 = 16.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SCROLL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const PARALLAX_FACTOR_BOUNDS: (f64, f64) = (0.0, 1.0);
const PARALLAX_FADE_DISTANCE_BOUNDS: (f64, f64) = (1.0, 10_000.0);
const FADE_IN_OFFSET_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const COUNTER_DURATION_MS_BOUNDS: (u32, u32) = (16, 60_000);
const COUNTER_STEP_MS_BOUNDS: (u32, u32) = (1, 1_000);
const SHORT_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const TOAST_VISIBLE_UNTIL_MS_BOUNDS: (u32, u32) = (100, 60_000);
const TOOLTIP_GAP_BOUNDS: (f64, f64) = (0.0, 200.0);
const CURSOR_BLINK_MS_BOUNDS: (u32, u32) = (50, 10_000);
const MOBILE_BREAKPOINT_BOUNDS: (f64, f64) = (240.0, 4_096.0);
const MIN_INPUT_FONT_PX_BOUNDS: (f64, f64) = (8.0, 48.0);

pub const CONFIG_ELEMENT_ID: &str = "interaction-config";

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub scroll_top_threshold: f64,
    pub navbar_scrolled_threshold: f64,
    pub parallax_factor: f64,
    pub parallax_fade_distance: f64,
    pub fade_in_offset: f64,
    pub counter_duration_ms: u32,
    pub counter_step_ms: u32,
    pub skill_bar_delay_ms: u32,
    pub toast: ToastTiming,
    pub tooltip_gap: f64,
    pub preloader_delay_ms: u32,
    pub cursor_blink_ms: u32,
    pub mobile_breakpoint: f64,
    pub min_input_font_px: f64,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD,
            navbar_scrolled_threshold: DEFAULT_NAVBAR_SCROLLED_THRESHOLD,
            parallax_factor: DEFAULT_PARALLAX_FACTOR,
            parallax_fade_distance: DEFAULT_PARALLAX_FADE_DISTANCE,
            fade_in_offset: DEFAULT_FADE_IN_OFFSET,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            counter_step_ms: DEFAULT_COUNTER_STEP_MS,
            skill_bar_delay_ms: DEFAULT_SKILL_BAR_DELAY_MS,
            toast: ToastTiming {
                enter_delay_ms: DEFAULT_TOAST_ENTER_DELAY_MS,
                visible_until_ms: DEFAULT_TOAST_VISIBLE_UNTIL_MS,
                exit_duration_ms: DEFAULT_TOAST_EXIT_DURATION_MS,
            },
            tooltip_gap: DEFAULT_TOOLTIP_GAP,
            preloader_delay_ms: DEFAULT_PRELOADER_DELAY_MS,
            cursor_blink_ms: DEFAULT_CURSOR_BLINK_MS,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            min_input_font_px: DEFAULT_MIN_INPUT_FONT_PX,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionOverrides {
    pub scroll_top_threshold: Option<f64>,
    pub navbar_scrolled_threshold: Option<f64>,
    pub parallax_factor: Option<f64>,
    pub parallax_fade_distance: Option<f64>,
    pub fade_in_offset: Option<f64>,
    pub counter_duration_ms: Option<u32>,
    pub counter_step_ms: Option<u32>,
    pub skill_bar_delay_ms: Option<u32>,
    pub toast_enter_delay_ms: Option<u32>,
    pub toast_visible_until_ms: Option<u32>,
    pub toast_exit_duration_ms: Option<u32>,
    pub tooltip_gap: Option<f64>,
    pub preloader_delay_ms: Option<u32>,
    pub cursor_blink_ms: Option<u32>,
    pub mobile_breakpoint: Option<f64>,
    pub min_input_font_px: Option<f64>,
    pub log_level: Option<String>,
}

impl InteractionConfig {
    pub fn from_overrides(overrides: &InteractionOverrides) -> Self {
        let toast = ToastTiming {
            enter_delay_ms: u32_with_bounds(
                overrides.toast_enter_delay_ms,
                DEFAULT_TOAST_ENTER_DELAY_MS,
                SHORT_DELAY_MS_BOUNDS,
            ),
            visible_until_ms: u32_with_bounds(
                overrides.toast_visible_until_ms,
                DEFAULT_TOAST_VISIBLE_UNTIL_MS,
                TOAST_VISIBLE_UNTIL_MS_BOUNDS,
            ),
            exit_duration_ms: u32_with_bounds(
                overrides.toast_exit_duration_ms,
                DEFAULT_TOAST_EXIT_DURATION_MS,
                SHORT_DELAY_MS_BOUNDS,
            ),
        };
        let defaults = Self::default();

        Self {
            scroll_top_threshold: f64_with_bounds(
                overrides.scroll_top_threshold,
                DEFAULT_SCROLL_TOP_THRESHOLD,
                SCROLL_THRESHOLD_BOUNDS,
            ),
            navbar_scrolled_threshold: f64_with_bounds(
                overrides.navbar_scrolled_threshold,
                DEFAULT_NAVBAR_SCROLLED_THRESHOLD,
                SCROLL_THRESHOLD_BOUNDS,
            ),
            parallax_factor: f64_with_bounds(
                overrides.parallax_factor,
                DEFAULT_PARALLAX_FACTOR,
                PARALLAX_FACTOR_BOUNDS,
            ),
            parallax_fade_distance: f64_with_bounds(
                overrides.parallax_fade_distance,
                DEFAULT_PARALLAX_FADE_DISTANCE,
                PARALLAX_FADE_DISTANCE_BOUNDS,
            ),
            fade_in_offset: f64_with_bounds(
                overrides.fade_in_offset,
                DEFAULT_FADE_IN_OFFSET,
                FADE_IN_OFFSET_BOUNDS,
            ),
            counter_duration_ms: u32_with_bounds(
                overrides.counter_duration_ms,
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            counter_step_ms: u32_with_bounds(
                overrides.counter_step_ms,
                DEFAULT_COUNTER_STEP_MS,
                COUNTER_STEP_MS_BOUNDS,
            ),
            skill_bar_delay_ms: u32_with_bounds(
                overrides.skill_bar_delay_ms,
                DEFAULT_SKILL_BAR_DELAY_MS,
                SHORT_DELAY_MS_BOUNDS,
            ),
            // A toast that hides before it shows would never be visible.
            toast: if toast.visible_until_ms >= toast.enter_delay_ms {
                toast
            } else {
                defaults.toast
            },
            tooltip_gap: f64_with_bounds(
                overrides.tooltip_gap,
                DEFAULT_TOOLTIP_GAP,
                TOOLTIP_GAP_BOUNDS,
            ),
            preloader_delay_ms: u32_with_bounds(
                overrides.preloader_delay_ms,
                DEFAULT_PRELOADER_DELAY_MS,
                SHORT_DELAY_MS_BOUNDS,
            ),
            cursor_blink_ms: u32_with_bounds(
                overrides.cursor_blink_ms,
                DEFAULT_CURSOR_BLINK_MS,
                CURSOR_BLINK_MS_BOUNDS,
            ),
            mobile_breakpoint: f64_with_bounds(
                overrides.mobile_breakpoint,
                DEFAULT_MOBILE_BREAKPOINT,
                MOBILE_BREAKPOINT_BOUNDS,
            ),
            min_input_font_px: f64_with_bounds(
                overrides.min_input_font_px,
                DEFAULT_MIN_INPUT_FONT_PX,
                MIN_INPUT_FONT_PX_BOUNDS,
            ),
            log_level: overrides
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let overrides: InteractionOverrides = serde_json::from_str(raw)?;
        Ok(Self::from_overrides(&overrides))
    }
}

fn u32_with_bounds(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_payload_yields_defaults() {
        let config = InteractionConfig::from_json("  ").expect("blank input is accepted");
        assert_eq!(config, InteractionConfig::default());
        assert_eq!(config.toast.visible_until_ms, 3_000);
        assert_eq!(config.mobile_breakpoint, 768.0);
    }

    #[test]
    fn in_range_overrides_are_applied() {
        let config = InteractionConfig::from_json(
            r#"{"scrollTopThreshold": 450, "cursorBlinkMs": 700, "logLevel": "debug"}"#,
        )
        .expect("valid overrides");

        assert_eq!(config.scroll_top_threshold, 450.0);
        assert_eq!(config.cursor_blink_ms, 700);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.navbar_scrolled_threshold, 50.0);
    }

    #[test]
    fn out_of_range_overrides_fall_back_to_defaults() {
        let config = InteractionConfig::from_json(
            r#"{"parallaxFactor": 3.5, "counterStepMs": 0, "logLevel": "loud"}"#,
        )
        .expect("valid JSON");

        assert_eq!(config.parallax_factor, 0.4);
        assert_eq!(config.counter_step_ms, 16);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn inverted_toast_timing_is_rejected_as_a_whole() {
        let config = InteractionConfig::from_json(
            r#"{"toastEnterDelayMs": 5000, "toastVisibleUntilMs": 1000}"#,
        )
        .expect("valid JSON");

        assert_eq!(config.toast, InteractionConfig::default().toast);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(InteractionConfig::from_json("{not json").is_err());
    }
}
