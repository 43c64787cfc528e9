//! The alien population and the timer that feeds it.
//!
//! Only the tick loop ever touches [`Aliens`].  The [`Spawner`] runs on its
//! own thread so spawn cadence does not depend on frame rate; it hands new
//! aliens over through a channel and the population takes them in at the
//! start of its next update.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use tracing::debug;

use crate::display::Canvas;
use crate::entities::{Alien, Blast, Ship, ALIEN_REMOVE_TICKS, ALIEN_SPEED};

// ── Population ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Aliens {
    speed: i32,
    aliens: Vec<Alien>,
    inbox: Option<Receiver<Alien>>,
}

impl Default for Aliens {
    fn default() -> Self {
        Self::new()
    }
}

impl Aliens {
    /// An empty population that only grows through [`Aliens::spawn`].
    pub fn new() -> Self {
        Aliens {
            speed: ALIEN_SPEED,
            aliens: Vec::new(),
            inbox: None,
        }
    }

    /// An empty population that also adopts every alien sent on `inbox`.
    pub fn with_inbox(inbox: Receiver<Alien>) -> Self {
        Aliens {
            inbox: Some(inbox),
            ..Aliens::new()
        }
    }

    pub fn spawn(&mut self, alien: Alien) {
        self.aliens.push(alien);
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.aliens.iter_mut()
    }

    /// Adopt whatever the spawner has sent since the last tick.
    fn drain_inbox(&mut self) {
        if let Some(inbox) = &self.inbox {
            self.aliens.extend(inbox.try_iter());
        }
    }

    /// Advance every alien by one tick and drop the finished ones.
    ///
    /// Live aliens drift left; dead ones count down their explosion.  An
    /// alien goes once it has drifted past the left edge or finished
    /// exploding, whichever comes first.
    pub fn update(&mut self) {
        self.drain_inbox();

        for alien in &mut self.aliens {
            if !alien.dead {
                alien.x -= self.speed;
            } else {
                alien.dead_tick += 1;
                if alien.dead_tick > ALIEN_REMOVE_TICKS {
                    alien.remove = true;
                }
            }
        }
        self.aliens.retain(|a| !a.is_off_screen() && !a.remove);
    }

    /// Let every alien try to kill the ship.
    pub fn touch(&self, ship: &mut Ship) {
        for alien in &self.aliens {
            ship.touch(alien);
        }
    }

    /// Kill every alien the blast overlaps.
    pub fn splode(&mut self, blast: &Blast) {
        for alien in &mut self.aliens {
            alien.splode(blast);
        }
    }

    pub fn restart(&mut self) {
        self.aliens.clear();
    }

    pub fn paint(&self, canvas: &mut impl Canvas) -> Result<()> {
        for alien in &self.aliens {
            alien.paint(canvas)?;
        }
        Ok(())
    }
}

// ── Spawn timer ───────────────────────────────────────────────────────────────

/// Background timer that sends one random alien immediately and another
/// every `interval` until stopped.  Dropping the spawner stops it and waits
/// for the thread to finish.
#[derive(Debug)]
pub struct Spawner {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Spawner {
    pub fn start(interval: Duration, mut rng: StdRng, aliens: Sender<Alien>) -> Result<Spawner> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("alien-spawner".into())
            .spawn(move || loop {
                let alien = Alien::random(&mut rng);
                debug!(y = alien.y, row = alien.row, col = alien.col, "alien spawned");
                if aliens.send(alien).is_err() {
                    break; // population dropped
                }
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .context("could not start alien spawner")?;

        Ok(Spawner {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the timer thread and wait for it to exit.  Idempotent.
    pub fn stop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("alien spawner panicked");
            }
            debug!("alien spawner stopped");
        }
    }
}

impl Drop for Spawner {
    fn drop(&mut self) {
        self.stop();
    }
}
