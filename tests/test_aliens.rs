mod common;

use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use common::{Call, Recorder};
use moon_shooter::aliens::{Aliens, Spawner};
use moon_shooter::display::TextureId;
use moon_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn alien_at(x: i32, y: i32) -> Alien {
    Alien {
        x,
        ..Alien::new(y, 0, 0)
    }
}

// ── update ────────────────────────────────────────────────────────────────────

#[test]
fn live_aliens_drift_left_by_speed() {
    let mut aliens = Aliens::new();
    aliens.spawn(Alien::new(100, 0, 0));
    for n in 1..=395 {
        aliens.update();
        let a = aliens.iter().next().expect("alien still present");
        assert_eq!(a.x, 800 - n * ALIEN_SPEED);
    }
    assert_eq!(aliens.iter().next().unwrap().x, 10);
}

#[test]
fn live_alien_removed_once_past_left_edge() {
    let mut aliens = Aliens::new();
    aliens.spawn(Alien::new(100, 0, 0));
    for _ in 0..421 {
        aliens.update();
    }
    assert_eq!(aliens.iter().next().map(|a| a.x), Some(-42));
    aliens.update();
    assert!(aliens.is_empty());
}

#[test]
fn dead_alien_is_frozen_then_removed_after_fifty_ticks() {
    let mut aliens = Aliens::new();
    let mut a = alien_at(500, 100);
    a.dead = true;
    aliens.spawn(a);

    for _ in 0..ALIEN_REMOVE_TICKS {
        aliens.update();
    }
    let a = aliens.iter().next().expect("still exploding");
    assert_eq!(a.x, 500);
    assert_eq!(a.dead_tick, 50);
    assert!(!a.remove);

    aliens.update();
    assert!(aliens.is_empty());
}

#[test]
fn off_screen_removal_does_not_wait_for_death() {
    let mut aliens = Aliens::new();
    let mut dead = alien_at(-44, 0);
    dead.dead = true;
    aliens.spawn(dead);
    aliens.spawn(alien_at(-42, 0)); // -44 after one tick
    aliens.spawn(alien_at(300, 0));
    aliens.update();
    assert_eq!(aliens.len(), 1);
    assert_eq!(aliens.iter().next().unwrap().x, 298);
}

#[test]
fn update_keeps_spawn_order() {
    let mut aliens = Aliens::new();
    for y in [10, 20, 30] {
        aliens.spawn(Alien::new(y, 0, 0));
    }
    aliens.update();
    let ys: Vec<i32> = aliens.iter().map(|a| a.y).collect();
    assert_eq!(ys, vec![10, 20, 30]);
}

// ── collisions ────────────────────────────────────────────────────────────────

#[test]
fn touch_kills_ship_not_alien() {
    let mut aliens = Aliens::new();
    aliens.spawn(alien_at(400, 100));
    aliens.spawn(alien_at(50, 500));
    let mut ship = Ship::new();
    aliens.touch(&mut ship);
    assert!(ship.dead);
    assert!(aliens.iter().all(|a| !a.dead));
}

#[test]
fn touch_misses_leave_ship_alive() {
    let mut aliens = Aliens::new();
    aliens.spawn(alien_at(400, 100));
    let mut ship = Ship::new();
    aliens.touch(&mut ship);
    assert!(!ship.dead);
}

#[test]
fn splode_kills_only_overlapping_aliens() {
    let mut aliens = Aliens::new();
    aliens.spawn(alien_at(400, 300));
    aliens.spawn(alien_at(400, 100));
    aliens.splode(&Blast::new(410, 310));
    let dead: Vec<bool> = aliens.iter().map(|a| a.dead).collect();
    assert_eq!(dead, vec![true, false]);
}

#[test]
fn restart_clears_population() {
    let mut aliens = Aliens::new();
    aliens.spawn(Alien::new(1, 0, 0));
    aliens.spawn(Alien::new(2, 0, 0));
    aliens.restart();
    assert!(aliens.is_empty());
}

// ── spawn handoff ─────────────────────────────────────────────────────────────

#[test]
fn inbox_aliens_join_on_next_update() {
    let (tx, rx) = mpsc::channel();
    let mut aliens = Aliens::with_inbox(rx);
    tx.send(Alien::new(42, 1, 1)).unwrap();
    tx.send(Alien::new(43, 1, 1)).unwrap();
    assert!(aliens.is_empty());

    aliens.update();
    assert_eq!(aliens.len(), 2);
    assert!(aliens.iter().all(|a| a.x == 798));
}

#[test]
fn closed_inbox_is_harmless() {
    let (tx, rx) = mpsc::channel();
    let mut aliens = Aliens::with_inbox(rx);
    tx.send(Alien::new(42, 1, 1)).unwrap();
    drop(tx);
    aliens.update();
    aliens.update();
    assert_eq!(aliens.len(), 1);
}

#[test]
fn spawner_sends_aliens_on_its_own() {
    let (tx, rx) = mpsc::channel();
    let spawner = Spawner::start(Duration::from_millis(5), StdRng::seed_from_u64(7), tx).unwrap();

    let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    let second = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    for a in [&first, &second] {
        assert_eq!(a.x, ALIEN_SPAWN_X);
        assert!((0..ALIEN_MAX_Y).contains(&a.y));
    }
    assert_eq!(first, Alien::random(&mut StdRng::seed_from_u64(7)));
    drop(spawner);
}

#[test]
fn dropping_spawner_stops_it_promptly() {
    let (tx, rx) = mpsc::channel();
    let spawner = Spawner::start(Duration::from_secs(60), StdRng::seed_from_u64(1), tx).unwrap();
    rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(spawner.is_running());

    let started = Instant::now();
    drop(spawner);
    assert!(started.elapsed() < Duration::from_secs(5));

    while rx.try_recv().is_ok() {}
    assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
}

#[test]
fn stop_is_idempotent() {
    let (tx, _rx) = mpsc::channel();
    let mut spawner = Spawner::start(Duration::from_secs(60), StdRng::seed_from_u64(1), tx).unwrap();
    spawner.stop();
    spawner.stop();
    assert!(!spawner.is_running());
}

#[test]
fn spawner_exits_when_population_is_gone() {
    let (tx, rx) = mpsc::channel();
    drop(rx);
    let spawner = Spawner::start(Duration::from_secs(60), StdRng::seed_from_u64(1), tx).unwrap();
    let deadline = Instant::now() + Duration::from_secs(2);
    while spawner.is_running() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(!spawner.is_running());
}

// ── painting ──────────────────────────────────────────────────────────────────

#[test]
fn paint_draws_each_alien_in_order() {
    let mut aliens = Aliens::new();
    aliens.spawn(alien_at(300, 10));
    let mut dead = alien_at(200, 20);
    dead.dead = true;
    aliens.spawn(dead);

    let mut r = Recorder::default();
    aliens.paint(&mut r).unwrap();
    let textures: Vec<TextureId> = r
        .calls
        .iter()
        .map(|c| match c {
            Call::Copy { texture, .. } => *texture,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(textures, vec![TextureId::Alien, TextureId::Explosion]);
}
