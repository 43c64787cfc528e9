//! The scene: one ship, the alien population and at most one blast.
//!
//! `update` is the whole per-tick simulation; `paint` only reads state and
//! issues draw calls.  Everything here runs on the tick-loop thread.

use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::aliens::{Aliens, Spawner};
use crate::display::{Canvas, Rect, TextureId};
use crate::entities::{Blast, Ship, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::input::Command;

const PLAYFIELD: Rect = Rect::new(0, 0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
/// Where the moon backdrop is drawn.
const BACKDROP: Rect = Rect::new(100, 0, 600, 600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// The ship is exploding; the scene restarts once the explosion is over.
    DeadPendingRestart,
}

#[derive(Debug, Default)]
pub struct Scene {
    ship: Ship,
    aliens: Aliens,
    blast: Option<Blast>,
    spawner: Option<Spawner>,
}

impl Scene {
    /// A scene with no spawn timer; aliens only arrive through
    /// [`Aliens::spawn`].
    pub fn new() -> Self {
        Scene::default()
    }

    /// A scene fed by a spawn timer firing every `interval`.  A `seed` makes
    /// the spawned aliens reproducible.
    pub fn with_spawner(interval: Duration, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (tx, rx) = mpsc::channel();
        let spawner = Spawner::start(interval, rng, tx)?;
        info!(?interval, ?seed, "alien spawner started");
        Ok(Scene {
            aliens: Aliens::with_inbox(rx),
            spawner: Some(spawner),
            ..Scene::default()
        })
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn aliens(&self) -> &Aliens {
        &self.aliens
    }

    pub fn aliens_mut(&mut self) -> &mut Aliens {
        &mut self.aliens
    }

    pub fn blast(&self) -> Option<&Blast> {
        self.blast.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.ship.dead {
            Phase::DeadPendingRestart
        } else {
            Phase::Playing
        }
    }

    /// Apply one player command.  Returns `true` when the player asked to quit.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Left => self.ship.move_left(),
            Command::Right => self.ship.move_right(),
            Command::Up => self.ship.move_up(),
            Command::Down => self.ship.move_down(),
            Command::Fire => self.fire(),
            Command::Quit => return true,
        }
        false
    }

    /// Launch a blast from the ship's nose.  Ignored while a blast is still
    /// in flight or the ship is dead.
    pub fn fire(&mut self) {
        if self.blast.is_some() || self.ship.dead {
            return;
        }
        let x = self.ship.x + self.ship.h;
        let y = self.ship.y + self.ship.w / 2;
        self.blast = Some(Blast::new(x, y));
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self) {
        self.ship.update();
        self.aliens.update();
        if let Some(blast) = self.blast.take() {
            self.blast = blast.update();
            if self.blast.is_none() {
                debug!("blast left the playfield");
            }
        }

        let was_alive = !self.ship.dead;
        self.aliens.touch(&mut self.ship);
        if was_alive && self.ship.dead {
            info!(x = self.ship.x, y = self.ship.y, "ship destroyed");
        }
        if let Some(blast) = &self.blast {
            self.aliens.splode(blast);
        }

        if self.ship.tick_death() {
            self.restart();
        }
    }

    /// Put the ship back at its start and clear the aliens.  An in-flight
    /// blast keeps flying.
    pub fn restart(&mut self) {
        info!(aliens = self.aliens.len(), "restarting scene");
        self.ship.restart();
        self.aliens.restart();
    }

    pub fn paint(&self, canvas: &mut impl Canvas) -> Result<()> {
        canvas.clear()?;
        canvas.fill_rect(PLAYFIELD)?;
        canvas.copy(TextureId::Background, None, BACKDROP, 0.0)?;

        self.ship.paint(canvas)?;
        self.aliens.paint(canvas)?;
        if let Some(blast) = &self.blast {
            blast.paint(canvas)?;
        }
        canvas.present()
    }

    /// One full frame: simulate, then draw.
    pub fn tick(&mut self, canvas: &mut impl Canvas) -> Result<()> {
        self.update();
        self.paint(canvas)
    }

    /// Stop the spawn timer.  Also happens when the scene is dropped.
    pub fn shutdown(&mut self) {
        if let Some(mut spawner) = self.spawner.take() {
            spawner.stop();
            info!("alien spawner stopped");
        }
    }

    pub fn has_spawner(&self) -> bool {
        self.spawner.as_ref().is_some_and(Spawner::is_running)
    }
}
