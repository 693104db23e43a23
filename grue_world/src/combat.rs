//! Combat narration for the troll and the thief.
//!
//! Each system turns a combat event into one line drawn from a fixed
//! pool via the engine's seeded RNG, so battle transcripts replay
//! identically for a given seed.

use grue_engine::combat::{CombatEvent, CombatNarration, CombatSystem};
use grue_engine::{Engine, ItemId, WorldDef};

use crate::ids;

pub fn register(def: &mut WorldDef) {
    def.combat_system(ids::TROLL, Box::new(TrollCombat));
    def.combat_system(ids::THIEF, Box::new(ThiefCombat));
}

fn weapon_name(engine: &Engine, weapon: &ItemId) -> String {
    engine
        .state()
        .item(weapon)
        .map_or_else(|_| "weapon".to_string(), |item| item.name.clone())
}

/// The axe-swinging guardian of the passages.
pub struct TrollCombat;

impl CombatSystem for TrollCombat {
    fn narrate(&self, engine: &Engine, event: &CombatEvent) -> CombatNarration {
        let line = match event {
            CombatEvent::PlayerMissed { .. } => engine.pick(&[
                "Your swing misses the troll by an inch.",
                "A good stroke, but it's too slow; the troll dodges.",
                "Your blow glances off the troll's scaly hide.",
            ]),
            CombatEvent::EnemyMissed { .. } => engine.pick(&[
                "The troll swings his axe, but it misses.",
                "The troll's axe crashes against the rock, throwing sparks!",
                "The axe sweeps past as you jump aside.",
            ]),
            CombatEvent::PlayerDodged { .. } => engine.pick(&[
                "You dodge as the troll comes in low.",
                "The troll's swing whistles harmlessly past your ear.",
            ]),
            CombatEvent::EnemyLightlyInjured { .. } => engine.pick(&[
                "The troll is struck on the arm; blood begins to trickle down.",
                "Your blow nicks the troll, drawing a thin line of black blood.",
            ]),
            CombatEvent::EnemyGravelyInjured { .. } => engine.pick(&[
                "The troll is staggered, and drops to his knees.",
                "The flat of your blade slams the troll into the wall, stunning him.",
            ]),
            CombatEvent::EnemyCriticallyWounded { .. } => engine.pick(&[
                "The troll reels from a mighty blow, black blood oozing from his wounds.",
            ]),
            CombatEvent::EnemyUnconscious { .. } => engine.pick(&[
                "The troll is knocked senseless by your blow and collapses; his axe clatters to the floor.",
            ]),
            CombatEvent::EnemySlain { .. } => engine.pick(&[
                "The fatal blow strikes the troll square in the heart: he dies.",
                "The troll takes your blade in his chest and dies amid a cloud of sinister black fog.",
            ]),
            CombatEvent::EnemyFlees { .. } => {
                "The troll, hardly daunted, nonetheless backs away warily.".to_string()
            },
            CombatEvent::EnemySpecialAction { .. } => {
                "The troll spits in your face, grunting \"Better luck next time\" in a rather barbarous accent."
                    .to_string()
            },
            CombatEvent::PlayerLightlyInjured { .. } => engine.pick(&[
                "The axe gets you right in the side. Ouch!",
                "The troll hits you with a glancing blow; you are momentarily stunned.",
            ]),
            CombatEvent::PlayerGravelyInjured { .. } => engine.pick(&[
                "The troll's axe bites deep into your shoulder.",
                "The troll charges, and his axe slashes you across the chest.",
            ]),
            CombatEvent::PlayerCriticallyWounded { .. } => engine.pick(&[
                "The troll lands a crushing blow; the room swims before your eyes.",
            ]),
            CombatEvent::PlayerUnconscious { .. } => {
                "The troll's axe stroke lands squarely, and everything goes black.".to_string()
            },
            CombatEvent::PlayerSlain { .. } => {
                "The troll's axe removes your head, ending an otherwise promising career.".to_string()
            },
            CombatEvent::PlayerDisarmed { player_weapon, .. } => format!(
                "The axe hits your {} and knocks it spinning to the floor!",
                weapon_name(engine, player_weapon)
            ),
        };
        CombatNarration::text(line)
    }
}

/// The light-fingered gentleman with the stiletto.
pub struct ThiefCombat;

impl CombatSystem for ThiefCombat {
    fn narrate(&self, engine: &Engine, event: &CombatEvent) -> CombatNarration {
        let line = match event {
            CombatEvent::PlayerMissed { .. } => engine.pick(&[
                "You charge, but the thief jumps nimbly aside.",
                "Your blow misses; the thief makes no attempt to take advantage.",
            ]),
            CombatEvent::EnemyMissed { .. } => engine.pick(&[
                "The thief stabs nonchalantly with his stiletto and misses.",
                "You parry a lightning thrust, and the thief salutes you with a grim nod.",
            ]),
            CombatEvent::PlayerDodged { .. } => {
                "You dodge the thief's stiletto by a hair.".to_string()
            },
            CombatEvent::EnemyLightlyInjured { .. } => engine.pick(&[
                "The thief is disconcerted by a nick on his arm.",
                "Your blow draws blood, and the thief's grin fades.",
            ]),
            CombatEvent::EnemyGravelyInjured { .. } => {
                "The thief staggers back, badly wounded but still dangerous.".to_string()
            },
            CombatEvent::EnemyCriticallyWounded { .. } => {
                "The thief is barely on his feet, clutching a grievous wound.".to_string()
            },
            CombatEvent::EnemyUnconscious { .. } => {
                "The thief drops to the floor, unconscious; his stiletto slips from his fingers.".to_string()
            },
            CombatEvent::EnemySlain { .. } => {
                "The thief, his essence of life departing, sinks to the floor, dead.".to_string()
            },
            CombatEvent::EnemyFlees { .. } => {
                "Your opponent, determining discretion to be the better part of valor, decides to terminate this little contretemps and vanishes into the gloom.".to_string()
            },
            CombatEvent::EnemySpecialAction { .. } => {
                "The thief, a man of good breeding, refrains from attacking a helpless opponent.".to_string()
            },
            CombatEvent::PlayerLightlyInjured { .. } => engine.pick(&[
                "The thief's stiletto nicks your arm.",
                "A quick thrust pinks your left arm, and blood starts to trickle down.",
            ]),
            CombatEvent::PlayerGravelyInjured { .. } => {
                "The stiletto bites deep; the thief's expression never changes.".to_string()
            },
            CombatEvent::PlayerCriticallyWounded { .. } => {
                "The thief strikes like a snake! The resulting wound is serious.".to_string()
            },
            CombatEvent::PlayerUnconscious { .. } => {
                "Shifting in the midst of a thrust, the thief knocks you unconscious with the haft of his stiletto.".to_string()
            },
            CombatEvent::PlayerSlain { .. } => {
                "The stiletto severs your jugular. It looks like the end.".to_string()
            },
            CombatEvent::PlayerDisarmed { player_weapon, .. } => format!(
                "A long, theatrical slash: the thief flips your {} out of your hand and it clatters away.",
                weapon_name(engine, player_weapon)
            ),
        };
        CombatNarration::text(line)
    }
}
