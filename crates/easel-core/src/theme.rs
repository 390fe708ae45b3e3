// File: crates/easel-core/src/theme.rs
// Summary: Light/Dark color themes for chart scenes.

use crate::color::Rgba;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub axis_line: Rgba,
    pub tick: Rgba,
    pub tick_label: Rgba,
    pub axis_title: Rgba,
    pub line_stroke: Rgba,
    pub mark_stroke: Rgba,
    pub focus: Rgba,
    pub frame_label: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::from_argb(255, 18, 18, 20),
            axis_line: Rgba::from_argb(255, 180, 180, 190),
            tick: Rgba::from_argb(255, 150, 150, 160),
            tick_label: Rgba::from_argb(255, 235, 235, 245),
            axis_title: Rgba::from_argb(255, 235, 235, 245),
            line_stroke: Rgba::from_argb(255, 64, 160, 255),
            mark_stroke: Rgba::from_argb(255, 0, 0, 0),
            focus: Rgba::from_argb(255, 255, 230, 70),
            frame_label: Rgba::from_argb(255, 40, 200, 120),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::from_argb(255, 250, 250, 252),
            axis_line: Rgba::from_argb(255, 60, 60, 70),
            tick: Rgba::from_argb(255, 100, 100, 110),
            tick_label: Rgba::from_argb(255, 20, 20, 30),
            axis_title: Rgba::from_argb(255, 20, 20, 30),
            line_stroke: Rgba::from_argb(255, 110, 110, 110),
            mark_stroke: Rgba::from_argb(255, 0, 0, 0),
            focus: Rgba::from_argb(255, 30, 120, 240),
            frame_label: Rgba::from_argb(255, 20, 140, 80),
        }
    }

    pub fn find(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}
