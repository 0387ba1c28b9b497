//! The `Simulation` struct: per-tick orchestration of citizens and
//! buildings.
//!
//! # Tick shape
//!
//! One call to [`Simulation::step`] per tick:
//!
//! 1. **Day rollover** — when the tick crosses midnight, run the vacation
//!    pass for every tracked citizen.
//! 2. **Roster prepass** — collect the citizens that still exist (read-only;
//!    parallel with the `parallel` feature).
//! 3. **Evaluation** — sequentially evaluate each citizen, ascending id
//!    order for determinism.  All writes to the schedule and profile tables
//!    happen here, single-threaded.
//!
//! Building-side refreshes are not ticked globally: the host calls
//! [`Simulation::evaluate_building_tick`] when a building spawns or a
//! dependent condition (district policy, essential flag) changes.

use rd_core::{
    BuildingId, CitizenId, SimRng, SimTime, SimulationConfig, LATEST_CONFIG_VERSION,
};
use rd_resident::{process_new_day, ResidentEngine, ScheduleStore};
use rd_world::{Buildings, Citizens, MemoryWorld, World};
use rd_worktime::OperatingHours;
use tracing::debug;

use crate::context::TickContext;
use crate::observer::SimObserver;
use crate::snapshot::Snapshot;

/// Minutes per simulation tick (half-hour scheduling granularity).
pub const TICK_MINUTES: u64 = 30;

pub struct Simulation<W> {
    world: W,
    config: SimulationConfig,
    rng: SimRng,
    hours: OperatingHours,
    residents: ResidentEngine,
    /// Citizens handed over to the scheduler, ascending id order.
    roster: Vec<CitizenId>,
    now: SimTime,
    last_day: u64,
}

// The `Sync` bound keeps the roster prepass free to fan out across threads
// under the `parallel` feature; every realistic world backing is `Sync`.
impl<W: World + Sync> Simulation<W> {
    pub fn new(world: W, mut config: SimulationConfig, seed: u64) -> Self {
        config.validate();
        Self {
            world,
            config,
            rng: SimRng::new(seed),
            hours: OperatingHours::new(),
            residents: ResidentEngine::new(),
            roster: Vec::new(),
            now: SimTime::ZERO,
            last_day: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn hours(&self) -> &OperatingHours {
        &self.hours
    }

    pub fn hours_mut(&mut self) -> &mut OperatingHours {
        &mut self.hours
    }

    pub fn residents(&self) -> &ResidentEngine {
        &self.residents
    }

    pub fn residents_mut(&mut self) -> &mut ResidentEngine {
        &mut self.residents
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    // ── Roster ────────────────────────────────────────────────────────────

    /// Hand a citizen over to the scheduler.
    pub fn track_citizen(&mut self, citizen: CitizenId) {
        if citizen.is_some() && !self.roster.contains(&citizen) {
            self.roster.push(citizen);
            self.roster.sort_unstable();
        }
    }

    /// Permanently remove a citizen from the scheduler.
    pub fn release_citizen(&mut self, citizen: CitizenId) {
        self.roster.retain(|&c| c != citizen);
        self.residents.release(citizen);
    }

    // ── Per-entity evaluation ─────────────────────────────────────────────

    /// One full evaluation of one citizen at the simulation's current time.
    pub fn evaluate_citizen_tick(&mut self, citizen: CitizenId) {
        let ctx = TickContext::at(&self.config, self.now);
        self.residents.evaluate(
            &mut self.world,
            &mut self.hours,
            &self.config,
            &ctx.clock,
            &mut self.rng,
            citizen,
        );
    }

    /// Building-side refresh: derive the profile on first sight, re-apply
    /// policy triggers, drop profiles of vanished buildings.
    pub fn evaluate_building_tick(&mut self, building: BuildingId) {
        if building.is_none() {
            return;
        }
        if self.world.class(building).is_none() {
            self.hours.remove(building);
            return;
        }
        self.hours.get_or_create(&self.world, &self.config, &mut self.rng, building);
        self.hours.update(&self.world, building);
    }

    // ── Host-facing queries ───────────────────────────────────────────────

    /// Is the building open for visitors right now?
    pub fn is_building_working(&mut self, building: BuildingId) -> bool {
        let ctx = TickContext::at(&self.config, self.now);
        self.hours
            .is_working(&self.world, &self.config, &ctx.clock, &mut self.rng, building, 0.0)
    }

    /// Is the building within the closing lead of its effective close?
    pub fn is_closing_soon(&mut self, building: BuildingId) -> bool {
        let ctx = TickContext::at(&self.config, self.now);
        self.hours
            .is_closing_soon(&self.world, &self.config, &ctx.clock, &mut self.rng, building)
    }

    /// Would visiting the building (travelling from `from`) violate the
    /// district noise restriction?
    pub fn is_noise_restricted(&self, building: BuildingId, from: BuildingId) -> bool {
        let ctx = TickContext::at(&self.config, self.now);
        self.hours
            .is_noise_restricted(&self.world, &self.config, &ctx.clock, building, from)
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance the simulation clock to `now` and evaluate the whole roster.
    /// The world must already reflect `now` (journeys completed etc.).
    pub fn step<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) {
        self.now = now;
        observer.on_tick_start(now);

        if now.day() > self.last_day {
            self.last_day = now.day();
            observer.on_new_day(now.day());
            debug!(target: "schedule", day = now.day(), "day rollover");
            for i in 0..self.roster.len() {
                let citizen = self.roster[i];
                process_new_day(
                    &self.world,
                    self.residents.store_mut(),
                    &self.config,
                    &mut self.rng,
                    citizen,
                );
            }
        }

        let live = live_citizens(&self.world, &self.roster);
        for &citizen in &live {
            self.evaluate_citizen_tick(citizen);
        }
        observer.on_tick_end(now, live.len());
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Capture both scheduler tables and the configuration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: LATEST_CONFIG_VERSION,
            config: self.config.clone(),
            work_times: self.hours.entries(),
            schedules: self.residents.store().entries(),
        }
    }

    /// Rebuild a simulation from a decoded (already migrated) snapshot.
    /// The roster is re-seeded from the persisted schedules.
    pub fn restore(world: W, snapshot: Snapshot, seed: u64) -> Self {
        let roster: Vec<CitizenId> = snapshot.schedules.iter().map(|&(c, _)| c).collect();
        Self {
            world,
            config: snapshot.config,
            rng: SimRng::new(seed),
            hours: OperatingHours::restore(snapshot.work_times),
            residents: ResidentEngine::from_store(ScheduleStore::restore(snapshot.schedules)),
            roster,
            now: SimTime::ZERO,
            last_day: 0,
        }
    }
}

impl Simulation<MemoryWorld> {
    /// Drive `count` half-hour ticks from the current time, completing
    /// in-memory journeys before each evaluation pass.
    pub fn run_ticks<O: SimObserver>(&mut self, count: u64, observer: &mut O) {
        for _ in 0..count {
            let next = SimTime(self.now.0 + TICK_MINUTES);
            self.world.advance(next);
            self.step(next, observer);
        }
    }
}

// ── Roster prepass ────────────────────────────────────────────────────────────

/// The tracked citizens that still exist, ascending id order.  Read-only, so
/// it may fan out across threads; all mutation stays in the sequential
/// evaluation loop.
#[cfg(not(feature = "parallel"))]
fn live_citizens<C: Citizens>(world: &C, roster: &[CitizenId]) -> Vec<CitizenId> {
    roster.iter().copied().filter(|&c| world.exists(c)).collect()
}

#[cfg(feature = "parallel")]
fn live_citizens<C: Citizens + Sync>(world: &C, roster: &[CitizenId]) -> Vec<CitizenId> {
    use rayon::prelude::*;
    roster.par_iter().copied().filter(|&c| world.exists(c)).collect()
}
