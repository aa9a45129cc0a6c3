//! Toast notifications for request outcomes.
//!
//! Network and booking failures never block the UI; they surface here and
//! fade out after a few seconds.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

use crate::services::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }

    pub fn background_color(&self, is_dark_theme: bool) -> Color32 {
        match (self, is_dark_theme) {
            (ToastLevel::Success, true) => Color32::from_rgb(30, 70, 40),
            (ToastLevel::Info, true) => Color32::from_rgb(30, 50, 80),
            (ToastLevel::Warning, true) => Color32::from_rgb(80, 60, 20),
            (ToastLevel::Error, true) => Color32::from_rgb(80, 30, 30),
            (ToastLevel::Success, false) => Color32::from_rgb(220, 255, 220),
            (ToastLevel::Info, false) => Color32::from_rgb(220, 235, 255),
            (ToastLevel::Warning, false) => Color32::from_rgb(255, 245, 200),
            (ToastLevel::Error, false) => Color32::from_rgb(255, 220, 220),
        }
    }

    pub fn text_color(&self, is_dark_theme: bool) -> Color32 {
        match (self, is_dark_theme) {
            (ToastLevel::Success, true) => Color32::from_rgb(100, 220, 120),
            (ToastLevel::Info, true) => Color32::from_rgb(100, 180, 255),
            (ToastLevel::Warning, true) => Color32::from_rgb(255, 200, 80),
            (ToastLevel::Error, true) => Color32::from_rgb(255, 120, 120),
            (ToastLevel::Success, false) => Color32::from_rgb(30, 120, 50),
            (ToastLevel::Info, false) => Color32::from_rgb(30, 80, 150),
            (ToastLevel::Warning, false) => Color32::from_rgb(150, 100, 0),
            (ToastLevel::Error, false) => Color32::from_rgb(180, 40, 40),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        let duration = match level {
            ToastLevel::Error | ToastLevel::Warning => Duration::from_secs(5),
            ToastLevel::Success | ToastLevel::Info => Duration::from_secs(3),
        };
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// 1.0 until the last half second, then fading to 0.0
    pub fn opacity(&self) -> f32 {
        let elapsed = self.created_at.elapsed();
        let fade_start = self.duration.saturating_sub(Duration::from_millis(500));

        if elapsed >= self.duration {
            0.0
        } else if elapsed >= fade_start {
            ((self.duration - elapsed).as_secs_f32() / 0.5).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    pub(super) toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Info));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Error));
    }

    /// Log the full error and show its short form
    pub fn api_error(&mut self, context: &str, err: &ApiError) {
        log::error!("{}: {}", context, err);
        self.error(format!("{}: {}", context, err.user_message()));
    }

    pub fn render(&mut self, ctx: &Context) {
        self.toasts.retain(|t| !t.is_expired());
        if self.toasts.is_empty() {
            return;
        }

        // Keep repainting while toasts fade
        ctx.request_repaint();

        let is_dark = ctx.style().visuals.dark_mode;
        let screen_rect = ctx.screen_rect();
        let toast_width = 320.0;
        let toast_height = 40.0;
        let margin = 10.0;
        let spacing = 5.0;

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = (i as f32) * (toast_height + spacing);
            let pos = Pos2::new(
                screen_rect.right() - toast_width - margin,
                screen_rect.bottom() - toast_height - margin - y_offset,
            );

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    let bg = toast.level.background_color(is_dark);
                    let fg = toast.level.text_color(is_dark);
                    let bg = Color32::from_rgba_unmultiplied(bg.r(), bg.g(), bg.b(), (230.0 * opacity) as u8);
                    let fg = Color32::from_rgba_unmultiplied(fg.r(), fg.g(), fg.b(), (255.0 * opacity) as u8);

                    egui::Frame::none()
                        .fill(bg)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, fg.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_min_width(toast_width - 24.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(fg).strong());
                                ui.label(RichText::new(&toast.message).color(fg));
                            });
                        });
                });
        }
    }
}
