use macroquad::prelude::*;

use crate::config;

/// Single transient on-screen notification. Held briefly at full alpha, then
/// faded out step by step until the message clears.
pub struct Alert {
    message: String,
    color: Color,
    alpha: f32,
    fade_at: u64,
}

impl Alert {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            color: WHITE,
            alpha: 1.0,
            fade_at: 0,
        }
    }

    pub fn show(&mut self, message: &str, color: Color, tick: u64) {
        self.message = message.to_string();
        self.color = color;
        self.alpha = 1.0;
        self.fade_at = tick + config::ALERT_HOLD_TICKS;
    }

    pub fn update(&mut self, tick: u64) {
        if self.message.is_empty() {
            return;
        }
        if tick >= self.fade_at {
            if self.alpha > 0.0 {
                self.alpha -= config::ALERT_FADE_STEP;
            } else {
                self.message.clear();
            }
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn color(&self) -> Color {
        Color::new(self.color.r, self.color.g, self.color.b, self.alpha.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_then_fades_then_clears() {
        let mut alert = Alert::new();
        alert.show("poisoned", ORANGE, 10);

        // Still fully opaque during the hold window.
        for tick in 10..10 + config::ALERT_HOLD_TICKS {
            alert.update(tick);
        }
        assert_eq!(alert.message(), "poisoned");
        assert!((alert.color().a - 1.0).abs() < f32::EPSILON);

        // Fades out and eventually clears.
        let mut tick = 10 + config::ALERT_HOLD_TICKS;
        while !alert.message().is_empty() {
            alert.update(tick);
            tick += 1;
            assert!(tick < 1000, "alert never cleared");
        }
    }

    #[test]
    fn re_show_resets_alpha() {
        let mut alert = Alert::new();
        alert.show("one", WHITE, 0);
        for tick in 0..60 {
            alert.update(tick);
        }
        assert!(alert.color().a < 1.0);

        alert.show("two", WHITE, 60);
        assert_eq!(alert.message(), "two");
        assert!((alert.color().a - 1.0).abs() < f32::EPSILON);
    }
}
