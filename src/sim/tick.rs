//! Fixed timestep simulation tick
//!
//! Advances one frame of a run: tier-gated firing and spawning, collision
//! resolution, then entity movement. The step order is observable behavior
//! and must not be rearranged.

use super::input::InputSnapshot;
use super::state::{Effect, Enemy, GamePhase, GameState, Health, PlayerMood, Projectile};
use crate::consts::*;

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Run continues.
    Continue,
    /// The external quit signal was raised; nothing was simulated.
    Quit,
    /// Terminal. Carries the score frozen at the moment health ran out.
    GameOver { final_score: u32 },
}

/// Advance the game state by one frame.
///
/// `frame` is the driver-owned monotonic counter; the tier cadences key off
/// it directly, so frame 0 both fires and spawns.
pub fn tick(state: &mut GameState, input: &InputSnapshot, frame: u64) -> TickResult {
    if input.quit {
        return TickResult::Quit;
    }
    if state.phase == GamePhase::GameOver {
        return TickResult::GameOver {
            final_score: state.score.value(),
        };
    }

    // Cues last exactly one tick.
    state.player.mood = PlayerMood::Neutral;

    fire_weapons(state, frame);
    spawn_wave(state, frame);
    resolve_projectile_hits(state);
    if resolve_player_contact(state) {
        return TickResult::GameOver {
            final_score: state.score.value(),
        };
    }

    state.player.update_movement(input);
    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    // Enemies home toward the already-moved player.
    let player_rect = state.player.rect;
    for enemy in &mut state.enemies {
        enemy.advance(&player_rect);
    }
    state.enemies.retain(|e| !e.is_dead());
    for effect in &mut state.effects {
        effect.advance();
    }
    state.effects.retain(|fx| !fx.is_dead());

    TickResult::Continue
}

/// Score-tiered firing policy. Tiers are mutually exclusive: the rapid
/// cadence unlocks first, then the spread volley replaces the single shot.
fn fire_weapons(state: &mut GameState, frame: u64) {
    let score = state.score.value();
    if score >= SPREAD_FIRE_SCORE {
        if frame % RAPID_FIRE_INTERVAL == 0 {
            state
                .projectiles
                .extend(Projectile::spread_volley(&state.player));
        }
    } else if score >= RAPID_FIRE_SCORE {
        if frame % RAPID_FIRE_INTERVAL == 0 {
            state.projectiles.push(Projectile::fire(&state.player));
        }
    } else if frame % BASE_FIRE_INTERVAL == 0 {
        state.projectiles.push(Projectile::fire(&state.player));
    }
}

/// Score-tiered spawn policy: past the surge threshold, bigger batches of
/// tougher enemies arrive on a faster cadence.
fn spawn_wave(state: &mut GameState, frame: u64) {
    let (interval, count, hp) = if state.score.value() >= SURGE_SCORE {
        (SURGE_SPAWN_INTERVAL, SURGE_SPAWN_COUNT, SURGE_ENEMY_HP)
    } else {
        (BASE_SPAWN_INTERVAL, BASE_SPAWN_COUNT, BASE_ENEMY_HP)
    };
    if frame % interval == 0 {
        for _ in 0..count {
            let enemy = Enemy::spawn(&mut state.rng, hp);
            state.enemies.push(enemy);
        }
        log::info!(
            "wave: {} enemies at {} hp, {} on field",
            count,
            hp,
            state.enemies.len()
        );
    }
}

/// Projectile-to-enemy resolution.
///
/// Each enemy consumes every not-yet-consumed projectile overlapping it and
/// takes exactly one hit no matter how many it consumed. Kills emit an
/// effect, award score and raise the delight cue. Consumed projectiles and
/// dead enemies are compacted after the scan, never mid-iteration.
fn resolve_projectile_hits(state: &mut GameState) {
    let mut consumed = vec![false; state.projectiles.len()];
    for enemy in &mut state.enemies {
        let mut struck = false;
        for (i, projectile) in state.projectiles.iter().enumerate() {
            if !consumed[i] && enemy.rect.overlaps(&projectile.rect) {
                consumed[i] = true;
                struck = true;
            }
        }
        if struck && enemy.take_hit() <= 0 {
            state.effects.push(Effect::spawn(enemy.rect, EFFECT_LIFE_TICKS));
            state.score.add(KILL_REWARD);
            state.player.mood = PlayerMood::Delight;
        }
    }
    let mut index = 0;
    state.projectiles.retain(|_| {
        let hit = consumed[index];
        index += 1;
        !hit
    });
    state.enemies.retain(|e| !e.is_dead());
}

/// Player-to-enemy contact: one damage per overlapping enemy per tick.
/// Returns true the moment health is depleted; the caller freezes the run
/// right there, skipping the rest of the tick.
fn resolve_player_contact(state: &mut GameState) -> bool {
    let player_rect = state.player.rect;
    for enemy in &state.enemies {
        if enemy.rect.overlaps(&player_rect) {
            state.player.mood = PlayerMood::Distress;
            if state.player.take_hit() <= 0 {
                state.phase = GamePhase::GameOver;
                log::info!("run over: final score {}", state.score.value());
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::SpawnEdge;
    use glam::Vec2;

    /// A frame index that trips none of the fire/spawn cadences.
    const QUIET_FRAME: u64 = 1;

    fn enemy_at(center: Vec2, hp: i32) -> Enemy {
        Enemy {
            rect: Rect::square(center, ENEMY_SIZE),
            hp,
            edge: SpawnEdge::Left,
            vel: Vec2::ZERO,
            speed: ENEMY_SPEED,
            variant: 0,
        }
    }

    fn projectile_at(center: Vec2) -> Projectile {
        Projectile {
            rect: Rect::square(center, PROJECTILE_SIZE),
            vel: Vec2::new(1.0, 0.0),
            speed: PROJECTILE_SPEED,
            angle_deg: 0.0,
        }
    }

    /// Score has no constructor with a preset value; earn it in increments.
    fn grant_score(state: &mut GameState, value: u32) {
        state.score.add(value);
    }

    #[test]
    fn test_base_tier_fires_every_10th_frame() {
        let mut state = GameState::new(1);
        grant_score(&mut state, 50);
        let input = InputSnapshot::default();

        tick(&mut state, &input, 10);
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &input, 13);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_rapid_tier_fires_every_5th_frame() {
        let mut state = GameState::new(1);
        grant_score(&mut state, 150);
        let input = InputSnapshot::default();

        tick(&mut state, &input, 5);
        assert_eq!(state.projectiles.len(), 1);
        // The base cadence alone no longer applies.
        tick(&mut state, &input, 12);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_spread_tier_fires_three_at_fixed_headings() {
        let mut state = GameState::new(1);
        grant_score(&mut state, 250);
        let input = InputSnapshot::default();

        tick(&mut state, &input, 5);
        assert_eq!(state.projectiles.len(), 3);
        let headings: Vec<f32> = state
            .projectiles
            .iter()
            .map(|p| (-p.vel.y).atan2(p.vel.x).to_degrees())
            .collect();
        assert!((headings[0] + 30.0).abs() < 1e-3);
        assert!((headings[1] - 0.5).abs() < 1e-3);
        assert!((headings[2] - 31.0).abs() < 1e-3);
    }

    #[test]
    fn test_base_spawn_five_enemies_at_tier_two() {
        let mut state = GameState::new(1);
        grant_score(&mut state, 299);
        let input = InputSnapshot::default();

        tick(&mut state, &input, 300);
        assert_eq!(state.enemies.len(), 5);
        assert!(state.enemies.iter().all(|e| e.hp == 2));
    }

    #[test]
    fn test_surge_spawn_ten_enemies_at_tier_three() {
        let mut state = GameState::new(1);
        grant_score(&mut state, 300);
        let input = InputSnapshot::default();

        tick(&mut state, &input, 200);
        assert_eq!(state.enemies.len(), 10);
        assert!(state.enemies.iter().all(|e| e.hp == 3));
    }

    #[test]
    fn test_spawn_cadences_do_not_cross_tiers() {
        let mut state = GameState::new(1);
        grant_score(&mut state, 299);
        let input = InputSnapshot::default();

        // Below the surge threshold the 200-frame cadence means nothing.
        tick(&mut state, &input, 200);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_enemy_takes_one_hit_and_all_projectiles_are_consumed() {
        let mut state = GameState::new(1);
        let spot = Vec2::new(300.0, 700.0);
        state.enemies.push(enemy_at(spot, 3));
        state.projectiles.push(projectile_at(spot));
        state.projectiles.push(projectile_at(spot + Vec2::new(5.0, 0.0)));
        state.projectiles.push(projectile_at(spot - Vec2::new(5.0, 0.0)));

        tick(&mut state, &InputSnapshot::default(), QUIET_FRAME);

        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, 2);
        assert_eq!(state.score.value(), 0);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_kill_awards_score_effect_and_delight() {
        let mut state = GameState::new(1);
        let spot = Vec2::new(300.0, 700.0);
        state.enemies.push(enemy_at(spot, 1));
        state.projectiles.push(projectile_at(spot));

        tick(&mut state, &InputSnapshot::default(), QUIET_FRAME);

        assert!(state.enemies.is_empty());
        assert_eq!(state.score.value(), KILL_REWARD);
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].rect.center, spot);
        // Advanced once already this tick.
        assert_eq!(state.effects[0].life, EFFECT_LIFE_TICKS - 1);
        assert_eq!(state.player.mood, PlayerMood::Delight);
    }

    #[test]
    fn test_two_enemies_two_projectiles_one_hit_each() {
        let mut state = GameState::new(1);
        let a = Vec2::new(300.0, 700.0);
        let b = Vec2::new(600.0, 700.0);
        state.enemies.push(enemy_at(a, 2));
        state.enemies.push(enemy_at(b, 2));
        state.projectiles.push(projectile_at(a));
        state.projectiles.push(projectile_at(b));

        tick(&mut state, &InputSnapshot::default(), QUIET_FRAME);

        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 2);
        assert!(state.enemies.iter().all(|e| e.hp == 1));
    }

    #[test]
    fn test_player_damage_equals_overlap_count() {
        let mut state = GameState::new(1);
        let player_center = state.player.rect.center;
        state.enemies.push(enemy_at(player_center, 5));
        state.enemies.push(enemy_at(player_center + Vec2::new(10.0, 0.0), 5));

        tick(&mut state, &InputSnapshot::default(), QUIET_FRAME);

        assert_eq!(state.player.hp, PLAYER_START_HP - 2);
        assert_eq!(state.player.mood, PlayerMood::Distress);
        // Contact does not kill enemies.
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_distress_wins_over_delight() {
        let mut state = GameState::new(1);
        let player_center = state.player.rect.center;
        let far = Vec2::new(1400.0, 100.0);
        state.enemies.push(enemy_at(far, 1));
        state.projectiles.push(projectile_at(far));
        state.enemies.push(enemy_at(player_center, 5));

        tick(&mut state, &InputSnapshot::default(), QUIET_FRAME);

        assert_eq!(state.score.value(), KILL_REWARD);
        assert_eq!(state.player.mood, PlayerMood::Distress);
    }

    #[test]
    fn test_game_over_freezes_score_and_halts() {
        let mut state = GameState::new(1);
        state.player.hp = 1;
        let player_center = state.player.rect.center;
        let far = Vec2::new(1400.0, 100.0);
        // A kill lands in step 4 of the same tick, then contact ends the run.
        state.enemies.push(enemy_at(far, 1));
        state.projectiles.push(projectile_at(far));
        state.enemies.push(enemy_at(player_center, 5));
        state.projectiles.push(projectile_at(Vec2::new(100.0, 100.0)));

        let result = tick(&mut state, &InputSnapshot::default(), QUIET_FRAME);

        assert_eq!(
            result,
            TickResult::GameOver {
                final_score: KILL_REWARD
            }
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        // Steps 6-7 never ran: the surviving projectile did not move.
        assert_eq!(state.projectiles[0].rect.center, Vec2::new(100.0, 100.0));

        // Later ticks re-report the frozen result without simulating.
        let again = tick(&mut state, &InputSnapshot::default(), QUIET_FRAME + 1);
        assert_eq!(
            again,
            TickResult::GameOver {
                final_score: KILL_REWARD
            }
        );
        assert_eq!(state.projectiles[0].rect.center, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_quit_short_circuits_without_mutation() {
        let mut state = GameState::new(1);
        state.enemies.push(enemy_at(Vec2::new(400.0, 400.0), 2));
        let before = state.enemies[0].rect.center;
        let input = InputSnapshot {
            quit: true,
            right: true,
            ..Default::default()
        };

        // Frame 0 would normally fire and spawn; quit preempts both.
        assert_eq!(tick(&mut state, &input, 0), TickResult::Quit);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].rect.center, before);
        assert_eq!(state.player.rect.center, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
    }

    #[test]
    fn test_effects_expire_through_ticks() {
        let mut state = GameState::new(1);
        state
            .effects
            .push(Effect::spawn(Rect::square(Vec2::ZERO, 80.0), 0));

        // life 0 -> -1 on the first advance, compacted the same tick.
        tick(&mut state, &InputSnapshot::default(), QUIET_FRAME);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let input = InputSnapshot {
            up: true,
            left: true,
            ..Default::default()
        };

        for frame in 0..900 {
            assert_eq!(tick(&mut a, &input, frame), tick(&mut b, &input, frame));
        }

        assert_eq!(a.score.value(), b.score.value());
        assert_eq!(a.player.rect.center, b.player.rect.center);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.rect.center, eb.rect.center);
            assert_eq!(ea.variant, eb.variant);
        }
    }

    #[test]
    fn test_score_only_grows_in_kill_increments() {
        let mut state = GameState::new(7);
        let mut last = 0;
        for frame in 0..2000 {
            if tick(&mut state, &InputSnapshot::default(), frame) != TickResult::Continue {
                break;
            }
            let now = state.score.value();
            assert!(now >= last);
            assert_eq!((now - last) % KILL_REWARD, 0);
            last = now;
        }
    }
}
