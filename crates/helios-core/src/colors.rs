//! Named color table.
//!
//! Process-wide immutable configuration: entities carry a `ColorName` and
//! the renderer resolves it through `rgb` at draw time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorName {
    Red,
    Green,
    Blue,
    White,
    Black,
    Yellow,
    Cyan,
    Magenta,
    Aquamarine,
    Brown,
    CadetBlue,
    CornflowerBlue,
    Orange,
    DarkOrchid,
    LightWood,
    Feldspar,
    FireBrick,
}

/// RGB triple for a named color.
pub const fn rgb(name: ColorName) -> [f32; 3] {
    match name {
        ColorName::Red => [1.0, 0.0, 0.0],
        ColorName::Green => [0.0, 1.0, 0.0],
        ColorName::Blue => [0.0, 0.0, 1.0],
        ColorName::White => [1.0, 1.0, 1.0],
        ColorName::Black => [0.0, 0.0, 0.0],
        ColorName::Yellow => [1.0, 1.0, 0.0],
        ColorName::Cyan => [0.0, 1.0, 1.0],
        ColorName::Magenta => [1.0, 0.0, 1.0],
        ColorName::Aquamarine => [0.439216, 0.858824, 0.576471],
        ColorName::Brown => [0.647059, 0.164706, 0.164706],
        ColorName::CadetBlue => [0.372549, 0.623529, 0.623529],
        ColorName::CornflowerBlue => [0.258824, 0.258824, 0.435294],
        ColorName::Orange => [1.0, 0.5, 0.0],
        ColorName::DarkOrchid => [0.6, 0.196078, 0.8],
        ColorName::LightWood => [0.91, 0.76, 0.65],
        ColorName::Feldspar => [0.82, 0.57, 0.46],
        ColorName::FireBrick => [0.556863, 0.137255, 0.137255],
    }
}
