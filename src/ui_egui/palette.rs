use egui::{Color32, Visuals};

use crate::services::availability::DayState;

/// How far a booked cell leans from the base booked fill toward the booking's colour
const BOOKING_TINT: f32 = 0.55;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Parse `#RRGGBB` or `#RGB`
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color32::from_rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct DayCellPalette {
    pub available_bg: Color32,
    pub booked_bg: Color32,
    pub past_bg: Color32,
    pub selected_bg: Color32,
    pub in_range_bg: Color32,
    pub text: Color32,
    pub muted_text: Color32,
    pub selected_text: Color32,
    pub border: Color32,
    pub hover_border: Color32,
}

impl DayCellPalette {
    pub fn light() -> Self {
        let accent = Color32::from_rgb(194, 120, 140);
        Self {
            available_bg: Color32::from_rgb(250, 250, 250),
            booked_bg: Color32::from_rgb(244, 199, 199),
            past_bg: Color32::from_rgb(232, 232, 232),
            selected_bg: accent,
            in_range_bg: blend(accent, Color32::WHITE, 0.7),
            text: Color32::from_rgb(40, 40, 40),
            muted_text: Color32::from_rgb(150, 150, 150),
            selected_text: Color32::WHITE,
            border: Color32::from_rgb(220, 220, 220),
            hover_border: with_alpha(accent, 160),
        }
    }

    pub fn dark() -> Self {
        let accent = Color32::from_rgb(214, 140, 160);
        Self {
            available_bg: Color32::from_rgb(45, 45, 48),
            booked_bg: Color32::from_rgb(110, 50, 55),
            past_bg: Color32::from_rgb(32, 32, 34),
            selected_bg: accent,
            in_range_bg: blend(accent, Color32::from_rgb(45, 45, 48), 0.6),
            text: Color32::from_rgb(225, 225, 225),
            muted_text: Color32::from_rgb(110, 110, 110),
            selected_text: Color32::from_rgb(20, 20, 20),
            border: Color32::from_rgb(70, 70, 74),
            hover_border: with_alpha(accent, 200),
        }
    }

    pub fn from_visuals(visuals: &Visuals) -> Self {
        if visuals.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn fill(&self, state: DayState) -> Color32 {
        match state {
            DayState::Booked => self.booked_bg,
            DayState::Past => self.past_bg,
            DayState::Selected => self.selected_bg,
            DayState::InRange => self.in_range_bg,
            DayState::Available => self.available_bg,
        }
    }

    /// Fill for a booked day, tinted with the booking's colour so cells match the legend
    pub fn booked_fill(&self, booking_color: &str) -> Color32 {
        match parse_hex_color(booking_color) {
            Some(color) => blend(self.booked_bg, color, BOOKING_TINT),
            None => self.booked_bg,
        }
    }

    pub fn text_color(&self, state: DayState) -> Color32 {
        match state {
            DayState::Selected => self.selected_text,
            DayState::Past | DayState::Booked => self.muted_text,
            DayState::InRange | DayState::Available => self.text,
        }
    }
}
