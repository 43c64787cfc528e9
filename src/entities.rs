//! Game entities: the ship, a single alien and the blast.
//!
//! Each entity is plain data plus the small behaviours that only touch its
//! own fields (moving, collision checks, drawing itself).

use anyhow::Result;
use rand::Rng;

use crate::display::{Canvas, Rect, TextureId};

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: i32 = 800;
pub const PLAYFIELD_HEIGHT: i32 = 600;

// ── Ship tuning ───────────────────────────────────────────────────────────────

pub const SHIP_WIDTH: i32 = 44;
pub const SHIP_HEIGHT: i32 = 79;
pub const SHIP_START_X: i32 = 10;
pub const SHIP_START_Y: i32 = 500;
/// Distance covered by one move command.
pub const SHIP_STEP: i32 = 20;
pub const SHIP_MAX_X: i32 = 740;
pub const SHIP_MAX_Y: i32 = 550;
/// Ticks the explosion stays on screen before the scene restarts.
pub const SHIP_RESTART_TICKS: u32 = 100;

// ── Alien tuning ──────────────────────────────────────────────────────────────

/// Size of one cell in the alien sprite sheet.
pub const ALIEN_WIDTH: i32 = 48;
pub const ALIEN_HEIGHT: i32 = 44;
pub const ALIEN_SPAWN_X: i32 = 800;
/// Spawn heights are drawn from `0..ALIEN_MAX_Y`.
pub const ALIEN_MAX_Y: i32 = 500;
pub const ALIEN_SHEET_ROWS: i32 = 4;
pub const ALIEN_SHEET_COLS: i32 = 6;
pub const ALIEN_SPEED: i32 = 2;
/// Ticks a dead alien keeps exploding before it is dropped.
pub const ALIEN_REMOVE_TICKS: u32 = 50;

// ── Blast tuning ──────────────────────────────────────────────────────────────

pub const BLAST_SPEED: i32 = 10;
pub const BLAST_WIDTH: i32 = 44;
pub const BLAST_HEIGHT: i32 = 10;
pub const BLAST_FRAMES: u32 = 11;
/// Ticks each animation frame is shown for.
pub const BLAST_FRAME_TICKS: u32 = 10;
pub const BLAST_FRAME_WIDTH: i32 = 512;
pub const BLAST_FRAME_HEIGHT: i32 = 128;

// ── Ship ──────────────────────────────────────────────────────────────────────

/// The player's ship.  It is drawn rotated by 90°, so `h` spans the x axis
/// and `w` spans the y axis for collisions.
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub dead: bool,
    /// Ticks elapsed since `dead` was set.
    pub dead_tick: u32,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    pub fn new() -> Self {
        Ship {
            x: SHIP_START_X,
            y: SHIP_START_Y,
            w: SHIP_WIDTH,
            h: SHIP_HEIGHT,
            dead: false,
            dead_tick: 0,
        }
    }

    /// Per-tick hook for behaviour the ship drives on its own.  Nothing yet.
    pub fn update(&mut self) {}

    pub fn move_left(&mut self) {
        if !self.dead {
            self.x = (self.x - SHIP_STEP).max(0);
        }
    }

    pub fn move_right(&mut self) {
        if !self.dead {
            self.x = (self.x + SHIP_STEP).min(SHIP_MAX_X);
        }
    }

    pub fn move_up(&mut self) {
        if !self.dead {
            self.y = (self.y - SHIP_STEP).max(0);
        }
    }

    pub fn move_down(&mut self) {
        if !self.dead {
            self.y = (self.y + SHIP_STEP).min(SHIP_MAX_Y);
        }
    }

    /// Kill the ship if `alien` overlaps it.
    ///
    /// The vertical test is deliberately lopsided: the alien only counts once
    /// its midline reaches four pixels below the ship's top edge, which lines
    /// up with the visible hull of the rotated sprite.
    pub fn touch(&mut self, alien: &Alien) {
        if alien.x > self.x + self.h {
            return; // alien too far right
        }
        if alien.x + alien.w < self.x {
            return; // alien too far left
        }
        if alien.y + alien.h / 2 < self.y + 4 {
            return; // alien too high
        }
        if alien.y > self.y + self.w {
            return; // alien too low
        }
        self.dead = true;
    }

    /// Advance the death timer.  Returns `true` once the explosion has played
    /// long enough for the scene to restart.
    pub fn tick_death(&mut self) -> bool {
        if !self.dead {
            return false;
        }
        self.dead_tick += 1;
        self.dead_tick > SHIP_RESTART_TICKS
    }

    pub fn restart(&mut self) {
        *self = Ship::new();
    }

    pub fn paint(&self, canvas: &mut impl Canvas) -> Result<()> {
        if self.dead {
            let dst = Rect::new(self.x, self.y, self.w, self.w);
            canvas.copy(TextureId::Explosion, None, dst, 0.0)
        } else {
            let dst = Rect::new(self.x, self.y, self.w, self.h);
            canvas.copy(TextureId::Ship, None, dst, 90.0)
        }
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    /// Collision box.  Note `w`/`h` are the sheet cell's height/width.
    pub w: i32,
    pub h: i32,
    /// Sprite sheet cell, `row` in `0..ALIEN_SHEET_ROWS`, `col` in
    /// `0..ALIEN_SHEET_COLS`.
    pub row: i32,
    pub col: i32,
    pub dead: bool,
    pub dead_tick: u32,
    /// Set once the explosion has finished; the population drops it.
    pub remove: bool,
}

impl Alien {
    /// A fresh alien at the right edge of the playfield.
    pub fn new(y: i32, row: i32, col: i32) -> Self {
        Alien {
            x: ALIEN_SPAWN_X,
            y,
            w: ALIEN_HEIGHT,
            h: ALIEN_WIDTH,
            row,
            col,
            dead: false,
            dead_tick: 0,
            remove: false,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Alien::new(
            rng.gen_range(0..ALIEN_MAX_Y),
            rng.gen_range(0..ALIEN_SHEET_ROWS),
            rng.gen_range(0..ALIEN_SHEET_COLS),
        )
    }

    /// Mark this alien dead if `blast` overlaps it.
    pub fn splode(&mut self, blast: &Blast) {
        if blast.x > self.x + self.w {
            return; // blast too far right
        }
        if blast.x + blast.w < self.x {
            return; // blast too far left
        }
        if blast.y + blast.h < self.y {
            return; // blast too high
        }
        if blast.y > self.y + self.h {
            return; // blast too low
        }
        self.dead = true;
    }

    /// Right edge has left the playfield.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.w <= 0
    }

    pub fn paint(&self, canvas: &mut impl Canvas) -> Result<()> {
        if self.dead {
            let dst = Rect::new(self.x, self.y, self.w, self.w);
            canvas.copy(TextureId::Explosion, None, dst, 0.0)
        } else {
            let src = Rect::new(
                self.col * ALIEN_WIDTH,
                self.row * ALIEN_HEIGHT,
                self.w,
                self.h,
            );
            let dst = Rect::new(self.x, self.y, ALIEN_WIDTH, ALIEN_HEIGHT);
            canvas.copy(TextureId::Alien, Some(src), dst, 0.0)
        }
    }
}

// ── Blast ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Blast {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Ticks since the blast was fired; only drives the animation.
    pub age: u32,
}

impl Blast {
    pub fn new(x: i32, y: i32) -> Self {
        Blast {
            x,
            y,
            w: BLAST_WIDTH,
            h: BLAST_HEIGHT,
            age: 0,
        }
    }

    /// Move one tick.  Returns `None` once the blast has left the playfield,
    /// which empties the caller's slot.
    pub fn update(mut self) -> Option<Blast> {
        self.age += 1;
        self.x += BLAST_SPEED;
        if self.x > PLAYFIELD_WIDTH {
            return None;
        }
        Some(self)
    }

    /// Current animation frame in `0..BLAST_FRAMES`.
    pub fn frame(&self) -> u32 {
        self.age / BLAST_FRAME_TICKS % BLAST_FRAMES
    }

    pub fn paint(&self, canvas: &mut impl Canvas) -> Result<()> {
        let src = Rect::new(
            0,
            self.frame() as i32 * BLAST_FRAME_HEIGHT,
            BLAST_FRAME_WIDTH,
            BLAST_FRAME_HEIGHT,
        );
        let dst = Rect::new(self.x, self.y, BLAST_WIDTH, BLAST_HEIGHT);
        canvas.copy(TextureId::Blast, Some(src), dst, 0.0)
    }
}
