use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::RouletteError;
use crate::wheel::{self, Slot};

/// How long the caller animates the wheel before completing a spin.
pub const SPIN_DURATION: Duration = Duration::from_millis(3000);

/// Two full turns before the random part of the rotation.
pub const BASE_ROTATION: u32 = 720;

pub const GROUP_SIZE: usize = 2;

pub type Listener = Box<dyn FnMut(&Snapshot) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub index: usize,
    pub members: Vec<String>,
}

/// Handed to the caller by `begin_spin`. The caller animates `target_rotation`
/// over `duration` and then calls `complete_spin(id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTicket {
    pub id: u64,
    pub target_rotation: u32,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinStatus {
    Spinning,
    Ready,
    NeedsMore,
    AllDrawn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub roster: Vec<String>,
    pub wheel: Vec<Slot>,
    pub history: Vec<Group>,
    pub spinning: bool,
    pub target_rotation: Option<u32>,
    pub status: SpinStatus,
    pub can_reset: bool,
}

#[derive(Debug, Clone, Copy)]
struct PendingSpin {
    id: u64,
    target_rotation: u32,
}

pub struct RouletteEngine {
    roster: Vec<String>,
    remaining: Vec<String>,
    history: Vec<Group>,
    pending: Option<PendingSpin>,
    next_spin_id: u64,
    rng: StdRng,
    listener: Option<Listener>,
}

impl Default for RouletteEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RouletteEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        RouletteEngine {
            roster: Vec::new(),
            remaining: Vec::new(),
            history: Vec::new(),
            pending: None,
            next_spin_id: 1,
            rng,
            listener: None,
        }
    }

    /// Registers the callback that receives a snapshot after every state change.
    pub fn on_change(&mut self, listener: Listener) {
        self.listener = Some(listener);
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn history(&self) -> &[Group] {
        &self.history
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Reset only makes sense once something was drawn.
    pub fn can_reset(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn status(&self) -> SpinStatus {
        if self.pending.is_some() {
            return SpinStatus::Spinning;
        }
        match self.remaining.len() {
            0 => SpinStatus::AllDrawn,
            1 => SpinStatus::NeedsMore,
            _ => SpinStatus::Ready,
        }
    }

    pub fn layout(&self) -> Vec<Slot> {
        wheel::layout(&self.remaining)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            roster: self.roster.clone(),
            wheel: self.layout(),
            history: self.history.clone(),
            spinning: self.is_spinning(),
            target_rotation: self.pending.map(|p| p.target_rotation),
            status: self.status(),
            can_reset: self.can_reset(),
        }
    }

    /// Adds a trimmed name. Returns `Ok(false)` for blank input.
    pub fn add_participant(&mut self, name: &str) -> Result<bool, RouletteError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        if self.roster.iter().any(|p| p == name) {
            return Err(RouletteError::DuplicateParticipant(name.to_string()));
        }

        self.roster.push(name.to_string());
        self.remaining.push(name.to_string());
        debug!("added participant {name}, roster size {}", self.roster.len());
        self.notify();
        Ok(true)
    }

    /// Removes every occurrence of `name`. Names already drawn into a group
    /// stay until the next reset.
    pub fn remove_participant(&mut self, name: &str) -> Result<bool, RouletteError> {
        if self.is_drawn(name) {
            return Err(RouletteError::AlreadyDrawn(name.to_string()));
        }

        let before = self.roster.len();
        self.roster.retain(|p| p != name);
        self.remaining.retain(|p| p != name);
        let removed = self.roster.len() != before;
        if removed {
            debug!("removed participant {name}");
            self.notify();
        }
        Ok(removed)
    }

    pub fn begin_spin(&mut self) -> Result<SpinTicket, RouletteError> {
        if self.pending.is_some() {
            return Err(RouletteError::AlreadySpinning);
        }
        if self.remaining.len() < GROUP_SIZE {
            return Err(RouletteError::InsufficientParticipants(self.remaining.len()));
        }

        self.remaining.shuffle(&mut self.rng);
        let target_rotation = BASE_ROTATION + self.rng.gen_range(0..360);
        let id = self.next_spin_id;
        self.next_spin_id += 1;
        self.pending = Some(PendingSpin {
            id,
            target_rotation,
        });

        info!(
            "spin {id} started with {} names, rotating to {target_rotation} degrees",
            self.remaining.len()
        );
        self.notify();

        Ok(SpinTicket {
            id,
            target_rotation,
            duration: SPIN_DURATION,
        })
    }

    /// Finishes spin `id`. A completion for a spin that is no longer pending
    /// (the roulette was reset meanwhile) draws nothing. Always notifies.
    pub fn complete_spin(&mut self, id: u64) -> Option<Group> {
        let group = match self.pending {
            Some(pending) if pending.id == id => {
                self.pending = None;
                self.draw()
            }
            Some(pending) => {
                warn!("ignoring completion of spin {id}, spin {} is pending", pending.id);
                None
            }
            None => {
                warn!("ignoring completion of spin {id}, nothing is pending");
                None
            }
        };
        self.notify();
        group
    }

    fn draw(&mut self) -> Option<Group> {
        let drawn = self.select_group();
        if drawn.len() < GROUP_SIZE {
            info!("spin finished without a group, {} names remain", self.remaining.len());
            return None;
        }

        self.remaining.retain(|p| !drawn.contains(p));
        let group = Group {
            index: self.history.len() + 1,
            members: drawn,
        };
        info!("group {} drawn: {}", group.index, group.members.join(", "));
        self.history.push(group.clone());
        Some(group)
    }

    /// Picks the next pair from the current wheel: the names under the
    /// pointers, or a uniformly random pair when fewer than two are caught.
    pub fn select_group(&mut self) -> Vec<String> {
        let slots = wheel::layout(&self.remaining);
        let captured = wheel::captured(&slots);
        resolve_pair(&captured, &self.remaining, &mut self.rng)
    }

    pub fn reset_spins(&mut self) {
        self.history.clear();
        if let Some(pending) = self.pending.take() {
            debug!("reset dropped pending spin {}", pending.id);
        }
        self.remaining = self.roster.clone();
        info!("roulette reset, {} names back on the wheel", self.remaining.len());
        self.notify();
    }

    fn is_drawn(&self, name: &str) -> bool {
        self.history
            .iter()
            .any(|group| group.members.iter().any(|m| m == name))
    }

    fn notify(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(listener) = self.listener.as_mut() {
            listener(&snapshot);
        }
    }
}

fn resolve_pair<R: Rng + ?Sized>(captured: &[&str], pool: &[String], rng: &mut R) -> Vec<String> {
    if captured.len() >= GROUP_SIZE {
        return captured[..GROUP_SIZE].iter().map(|s| s.to_string()).collect();
    }
    if pool.len() >= GROUP_SIZE {
        debug!("pointers caught {} names, falling back to a random pair", captured.len());
        return pool
            .choose_multiple(rng, GROUP_SIZE)
            .cloned()
            .collect();
    }
    captured.iter().map(|s| s.to_string()).collect()
}
