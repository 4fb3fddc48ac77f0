//! CorePlugin configures the fixed simulation tick that drives the pointer engine.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;

const DEFAULT_TICK_HZ: f64 = 50.0;
const MIN_TICK_HZ: f64 = 1.0;
const MAX_TICK_HZ: f64 = 240.0;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
    ticks: u64,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
            ticks: 0,
        }
    }
}

/// Fixed tick rate the simulation schedule runs at.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FixedTickRate {
    hz: f64,
}

impl FixedTickRate {
    /// Creates a tick rate, clamped to a sane range.
    pub fn new(hz: f64) -> Self {
        let hz = if hz.is_finite() { hz } else { DEFAULT_TICK_HZ };
        Self {
            hz: hz.clamp(MIN_TICK_HZ, MAX_TICK_HZ),
        }
    }

    /// Ticks per second.
    pub fn hz(&self) -> f64 {
        self.hz
    }

    /// Seconds between two ticks.
    pub fn period_secs(&self) -> f64 {
        1.0 / self.hz
    }
}

impl Default for FixedTickRate {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ)
    }
}

/// Registers the fixed timestep used by `FixedUpdate` systems.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    tick_hz: f64,
}

impl CorePlugin {
    /// Creates a CorePlugin ticking at the provided rate.
    #[cfg_attr(not(test), allow(dead_code))]
    pub const fn with_tick_hz(tick_hz: f64) -> Self {
        Self { tick_hz }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let rate = FixedTickRate::new(self.tick_hz);
        app.insert_resource(rate)
            .insert_resource(Time::<Fixed>::from_hz(rate.hz()))
            .add_systems(Startup, log_startup_tick_rate);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(FixedUpdate, count_fixed_ticks)
                .add_systems(Update, log_fixed_ticks);
        }
    }
}

fn log_startup_tick_rate(rate: Res<FixedTickRate>) {
    info!(
        "CorePlugin initialised with fixed tick: {:.1} Hz ({:.4}s)",
        rate.hz(),
        rate.period_secs()
    );
}

#[cfg(feature = "core_debug")]
fn count_fixed_ticks(mut timer: ResMut<DebugTickTimer>) {
    timer.ticks = timer.ticks.saturating_add(1);
}

#[cfg(feature = "core_debug")]
fn log_fixed_ticks(mut timer: ResMut<DebugTickTimer>, time: Res<Time>) {
    if timer.timer.tick(time.delta()).just_finished() {
        info!(
            target: "core_debug",
            "Fixed ticks: {} | real dt: {:.4}s",
            timer.ticks,
            time.delta_secs(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_rate_reports_period() {
        let rate = FixedTickRate::new(50.0);
        assert_eq!(rate.hz(), 50.0);
        assert!((rate.period_secs() - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_rate_clamps_to_range() {
        assert_eq!(FixedTickRate::new(0.0).hz(), MIN_TICK_HZ);
        assert_eq!(FixedTickRate::new(10_000.0).hz(), MAX_TICK_HZ);
        assert_eq!(FixedTickRate::new(f64::NAN).hz(), DEFAULT_TICK_HZ);
        assert_eq!(CorePlugin::with_tick_hz(30.0).tick_hz, 30.0);
    }
}
