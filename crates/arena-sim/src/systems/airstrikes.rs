//! Pending airstrike fuses.

use hecs::World;

use arena_core::events::SimEvent;

use crate::combat::CombatCtx;
use crate::weapons::AirstrikeInstance;

/// Advance every pending strike, then drop the ones that went off.
pub fn run(
    world: &World,
    airstrikes: &mut Vec<AirstrikeInstance>,
    dt: f64,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    let mut detonations = Vec::new();
    {
        let mut ctx = CombatCtx::new(world, now, events);
        for strike in airstrikes.iter_mut() {
            if let Some(hits) = strike.advance(dt, &mut ctx) {
                detonations.push(SimEvent::AirstrikeDetonated {
                    position: strike.position,
                    hits,
                });
            }
        }
    }
    events.extend(detonations);
    airstrikes.retain(|strike| !strike.exploded);
}
