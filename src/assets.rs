//! Sprite loading.
//!
//! A sprite file is plain text.  The first line holds the sheet size in
//! source pixels (`<width> <height>`); every following non-empty line is one
//! row of the sheet, one glyph per column.  A source rectangle picks the
//! glyph of the sheet cell its top-left corner falls in.

use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use tracing::info;

use crate::display::{Rect, TextureId};

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: i32,
    pub height: i32,
    cells: Vec<Vec<char>>,
}

impl Sprite {
    pub fn parse(text: &str) -> Result<Sprite> {
        let mut lines = text.lines();
        let header = lines.next().context("missing size header")?;
        let mut dims = header.split_whitespace().map(str::parse::<i32>);
        let (width, height) = match (dims.next(), dims.next(), dims.next()) {
            (Some(Ok(w)), Some(Ok(h)), None) => (w, h),
            _ => bail!("malformed size header {header:?}, expected `<width> <height>`"),
        };
        ensure!(width > 0 && height > 0, "sprite size must be positive, got {width}x{height}");

        let cells: Vec<Vec<char>> = lines
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().collect())
            .collect();
        ensure!(!cells.is_empty(), "sprite has no glyph rows");

        Ok(Sprite {
            width,
            height,
            cells,
        })
    }

    pub fn load(path: &Path) -> Result<Sprite> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Sprite::parse(&text).with_context(|| format!("invalid sprite {}", path.display()))
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Glyph for a region of the sheet; the whole texture uses the first cell.
    pub fn glyph(&self, src: Option<Rect>) -> char {
        let (x, y) = src.map_or((0, 0), |r| (r.x, r.y));
        let rows = self.cells.len() as i64;
        let row = (y as i64 * rows / self.height as i64).clamp(0, rows - 1) as usize;
        let line = &self.cells[row];
        let cols = line.len() as i64;
        let col = (x as i64 * cols / self.width as i64).clamp(0, cols - 1) as usize;
        line[col]
    }
}

/// Every texture the game draws with, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Textures {
    background: Sprite,
    ship: Sprite,
    explosion: Sprite,
    alien: Sprite,
    blast: Sprite,
}

impl Textures {
    /// Load all sprites from `dir`.  Any missing or malformed file is fatal.
    pub fn load(dir: &Path) -> Result<Textures> {
        let load = |id: TextureId| {
            let path = dir.join(file_name(id));
            Sprite::load(&path).with_context(|| format!("could not load {} image", describe(id)))
        };
        let textures = Textures {
            background: load(TextureId::Background)?,
            ship: load(TextureId::Ship)?,
            explosion: load(TextureId::Explosion)?,
            alien: load(TextureId::Alien)?,
            blast: load(TextureId::Blast)?,
        };
        info!(dir = %dir.display(), "textures loaded");
        Ok(textures)
    }

    pub fn sprite(&self, id: TextureId) -> &Sprite {
        match id {
            TextureId::Background => &self.background,
            TextureId::Ship => &self.ship,
            TextureId::Explosion => &self.explosion,
            TextureId::Alien => &self.alien,
            TextureId::Blast => &self.blast,
        }
    }
}

pub fn file_name(id: TextureId) -> &'static str {
    match id {
        TextureId::Background => "moon.txt",
        TextureId::Ship => "rocket.txt",
        TextureId::Explosion => "explode.txt",
        TextureId::Alien => "si.txt",
        TextureId::Blast => "blast.txt",
    }
}

fn describe(id: TextureId) -> &'static str {
    match id {
        TextureId::Background => "background",
        TextureId::Ship => "ship",
        TextureId::Explosion => "explosion",
        TextureId::Alien => "alien",
        TextureId::Blast => "blast",
    }
}
