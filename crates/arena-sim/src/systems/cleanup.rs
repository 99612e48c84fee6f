//! Death sweep: scores kills and despawns dead enemies and onlookers.

use hecs::{Entity, World};

use arena_core::enums::OnlookerKillRule;
use arena_core::events::SimEvent;

use crate::combat::entity_id;
use crate::components::Vitals;
use crate::scoring::ScoreState;

/// Outcome of looking an entity up during the sweep.
enum Fate {
    Alive,
    Died,
    /// No longer in the world; dropped without scoring.
    Gone,
}

fn fate(world: &World, entity: Entity) -> Fate {
    match world.get::<&Vitals>(entity).map(|v| v.alive) {
        Ok(true) => Fate::Alive,
        Ok(false) => Fate::Died,
        Err(_) => Fate::Gone,
    }
}

/// Sweep dead enemies and onlookers, awarding score per kill, and flag
/// player death. The player entity itself is never despawned.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: Entity,
    enemies: &mut Vec<Entity>,
    onlookers: &mut Vec<Entity>,
    score: &mut ScoreState,
    rule: OnlookerKillRule,
    game_over: &mut bool,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    enemies.retain(|&enemy| match fate(world, enemy) {
        Fate::Alive => true,
        Fate::Died => {
            let score_awarded = score.award_enemy_kill();
            events.push(SimEvent::EnemyKilled {
                entity: entity_id(enemy),
                score_awarded,
            });
            tracing::debug!(entity = entity_id(enemy), score_awarded, "enemy killed");
            despawn_buffer.push(enemy);
            false
        }
        Fate::Gone => false,
    });

    onlookers.retain(|&onlooker| match fate(world, onlooker) {
        Fate::Alive => true,
        Fate::Died => {
            score.apply_onlooker_kill(rule);
            events.push(SimEvent::OnlookerKilled {
                entity: entity_id(onlooker),
                rule,
            });
            tracing::debug!(entity = entity_id(onlooker), ?rule, "onlooker killed");
            despawn_buffer.push(onlooker);
            false
        }
        Fate::Gone => false,
    });

    if !*game_over && !matches!(fate(world, player), Fate::Alive) {
        *game_over = true;
        score.reset_streak();
        events.push(SimEvent::PlayerDied);
        tracing::debug!("player died");
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
