//! Rendering layer.
//!
//! Game code only issues "copy this part of this texture to that rectangle"
//! calls against a [`Canvas`]; the terminal backend in [`terminal`] turns
//! those into crossterm commands.

mod terminal;

pub use terminal::TerminalCanvas;

use anyhow::Result;
use crossterm::style::Color;

/// An axis-aligned rectangle in playfield (or sprite-sheet) pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }
}

/// The fixed set of textures the game draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    Ship,
    /// Shared by the dead ship and dead aliens.
    Explosion,
    Alien,
    Blast,
}

impl TextureId {
    pub const ALL: [TextureId; 5] = [
        TextureId::Background,
        TextureId::Ship,
        TextureId::Explosion,
        TextureId::Alien,
        TextureId::Blast,
    ];

    /// Foreground colour used when the texture is drawn as glyphs.
    pub fn color(self) -> Color {
        match self {
            TextureId::Background => C_BACKGROUND,
            TextureId::Ship => C_SHIP,
            TextureId::Explosion => C_EXPLOSION,
            TextureId::Alien => C_ALIEN,
            TextureId::Blast => C_BLAST,
        }
    }
}

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkGrey;
const C_SHIP: Color = Color::White;
const C_EXPLOSION: Color = Color::Yellow;
const C_ALIEN: Color = Color::Green;
const C_BLAST: Color = Color::Cyan;

/// A render target.  Calls are made once per visible entity per frame and
/// the frame becomes visible on [`Canvas::present`].
pub trait Canvas {
    fn clear(&mut self) -> Result<()>;

    /// Fill `rect` with the empty (black) colour.
    fn fill_rect(&mut self, rect: Rect) -> Result<()>;

    /// Draw the `src` region of `texture` (the whole texture when `None`)
    /// into `dst`, rotated clockwise by `angle` degrees around its centre.
    fn copy(&mut self, texture: TextureId, src: Option<Rect>, dst: Rect, angle: f64) -> Result<()>;

    fn present(&mut self) -> Result<()>;
}
