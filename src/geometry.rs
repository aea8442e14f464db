//! Window placement in the `WIDTHxHEIGHT+X+Y` notation used by X11 window
//! managers.

use std::fmt;

use egui::{Pos2, Vec2, pos2, vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Geometry {
    pub const fn new(width: u32, height: u32, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// Cover a screen of the given size from its origin.
    pub const fn screen(width: u32, height: u32) -> Self {
        Self::new(width, height, 0, 0)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width as f32, self.height as f32)
    }

    pub fn position(&self) -> Pos2 {
        pos2(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}
