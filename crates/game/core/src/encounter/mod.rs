//! Hostile construction: template instantiation and roster generation.
//!
//! Templates are used at their base stats. Level only moves the displayed
//! level and the placeholder scaling; difficulty comes from which templates a
//! zone offers. Bosses get a fixed post-scale on top.

use crate::config::BossScaling;
use crate::env::{AbilityDefinition, CombatEnv, RngOracle};
use crate::state::{Actor, ActorId, Side};

/// Builds a hostile from `template_id`.
///
/// Level is `max(1, template.level + level_modifier)`. Unknown ability ids in
/// the template are skipped with a warning. Returns `None` (and logs) for an
/// unknown template.
pub fn instantiate(
    env: &CombatEnv<'_>,
    template_id: &str,
    level_modifier: i32,
    id: ActorId,
) -> Option<Actor> {
    let Some(template) = env.actors().template(template_id) else {
        tracing::warn!(template = template_id, "actor template not found");
        return None;
    };

    let level = (template.level as i64 + level_modifier as i64).max(1) as u32;
    let mut actor = Actor::new(
        id,
        template.name.clone(),
        Side::Hostile,
        level,
        template.health,
        template.attack,
        template.defense,
    )
    .with_mana(template.mana)
    .with_attributes(template.attributes)
    .with_abilities(resolve_abilities(env, &template.abilities, template_id))
    .with_loot(template.loot.clone());
    actor.template_id = Some(template.id.clone());
    actor.is_boss = template.boss;
    Some(actor)
}

/// Resolves ability ids through the catalog, skipping unknown ones.
pub(crate) fn resolve_abilities(
    env: &CombatEnv<'_>,
    ids: &[String],
    owner: &str,
) -> Vec<AbilityDefinition> {
    ids.iter()
        .filter_map(|id| {
            let ability = env.abilities().ability(id);
            if ability.is_none() {
                tracing::warn!(owner, ability = %id, "unknown ability skipped");
            }
            ability
        })
        .collect()
}

/// Builds a boss: a normal instantiation followed by [`scale_boss`].
pub fn instantiate_boss(
    env: &CombatEnv<'_>,
    template_id: &str,
    level_modifier: i32,
    id: ActorId,
) -> Option<Actor> {
    let mut actor = instantiate(env, template_id, level_modifier, id)?;
    scale_boss(&mut actor, &env.config().boss);
    Some(actor)
}

/// Raises level, multiplies max health (refilling it) and attack.
pub fn scale_boss(actor: &mut Actor, scaling: &BossScaling) {
    actor.level += scaling.level_bonus;
    let max_health = (actor.max_health() as f64 * scaling.health_factor).floor() as u32;
    actor.set_max_health(max_health, true);
    actor.base_attack = (actor.base_attack as f64 * scaling.attack_factor).floor() as u32;
    actor.recompute_stats();
    actor.is_boss = true;
}

/// Assembles hostile rosters for zones.
#[derive(Clone, Copy, Debug)]
pub struct EncounterFactory<'a> {
    env: CombatEnv<'a>,
}

impl<'a> EncounterFactory<'a> {
    pub fn new(env: CombatEnv<'a>) -> Self {
        Self { env }
    }

    /// Builds a roster for `zone_id` at `zone_level`.
    ///
    /// A boss encounter is exactly the zone's boss. Otherwise `count` hostiles
    /// (default drawn from the configured range, at least one) are drawn
    /// uniformly from the zone's eligible pool, each with its own level jitter.
    /// Unknown zones, empty pools and unknown templates produce placeholders.
    pub fn build(
        &self,
        zone_id: &str,
        zone_level: u32,
        count: Option<u32>,
        is_boss: bool,
        rng: &mut dyn RngOracle,
    ) -> Vec<Actor> {
        let zone = self.env.zones().zone(zone_id);
        if zone.is_none() {
            tracing::warn!(zone = zone_id, "zone not found; using placeholder hostiles");
        }

        if is_boss {
            let boss = zone
                .and_then(|zone| instantiate_boss(&self.env, &zone.boss, 0, ActorId(1)))
                .unwrap_or_else(|| {
                    let mut placeholder = Actor::placeholder(ActorId(1), zone_level);
                    scale_boss(&mut placeholder, &self.env.config().boss);
                    placeholder
                });
            tracing::info!(zone = zone_id, boss = %boss.name, "boss encounter built");
            return vec![boss];
        }

        let rules = &self.env.config().encounter;
        let count = count
            .unwrap_or_else(|| rng.range_inclusive(rules.min_hostiles, rules.max_hostiles))
            .max(1);
        let variance = rules.level_variance(zone_level) as i32;
        let eligible = zone.map(|zone| zone.eligible(zone_level)).unwrap_or_default();
        if zone.is_some() && eligible.is_empty() {
            tracing::warn!(zone = zone_id, zone_level, "no eligible hostiles; using placeholders");
        }

        let mut roster = Vec::with_capacity(count as usize);
        for slot in 0..count {
            let id = ActorId(slot + 1);
            let modifier = if variance > 0 {
                rng.range_inclusive(0, (variance * 2) as u32) as i32 - variance
            } else {
                0
            };

            let actor = if eligible.is_empty() {
                None
            } else {
                let template = eligible[rng.index(eligible.len())];
                instantiate(&self.env, template, modifier, id)
            };
            let actor = actor.unwrap_or_else(|| {
                let level = (zone_level.max(1) as i64 + modifier as i64).max(1) as u32;
                Actor::placeholder(id, level)
            });
            roster.push(actor);
        }

        tracing::info!(zone = zone_id, zone_level, hostiles = roster.len(), "encounter built");
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::env::{
        AbilityCatalog, AbilityDefinition, AbilityKind, ActorTemplate, ItemCatalog, LevelBand,
        ScriptedRng, TemplateCatalog, ZoneDefinition, ZoneTable,
    };

    struct Fixture {
        abilities: AbilityCatalog,
        templates: TemplateCatalog,
        items: ItemCatalog,
        zones: ZoneTable,
        config: CombatConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let abilities = AbilityCatalog::from_definitions([AbilityDefinition::new(
                "bite",
                "Bite",
                AbilityKind::Attack,
            )])
            .expect("unique abilities");
            let templates = TemplateCatalog::from_templates([
                ActorTemplate::new("rat", "Rat", 1, 12, 3, 0).with_abilities(["bite", "gnaw"]),
                ActorTemplate::new("wolf", "Wolf", 3, 30, 7, 2),
                ActorTemplate::new("alpha", "Alpha Wolf", 5, 100, 18, 4).as_boss(),
            ])
            .expect("unique templates");
            let zones = ZoneTable::from_zones([ZoneDefinition {
                id: "woods".into(),
                name: "Woods".into(),
                boss: "alpha".into(),
                bands: vec![LevelBand::new(1, ["rat"]), LevelBand::new(4, ["wolf"])],
            }])
            .expect("unique zones");
            Self {
                abilities,
                templates,
                items: ItemCatalog::default(),
                zones,
                config: CombatConfig::default(),
            }
        }

        fn env(&self) -> CombatEnv<'_> {
            CombatEnv::new(
                &self.abilities,
                &self.templates,
                &self.items,
                &self.zones,
                &self.config,
            )
        }
    }

    #[test]
    fn instantiate_uses_base_stats_and_skips_unknown_abilities() {
        let fixture = Fixture::new();
        let actor = instantiate(&fixture.env(), "rat", 4, ActorId(3)).expect("known template");
        assert_eq!(actor.level, 5);
        assert_eq!(actor.max_health(), 12);
        assert_eq!(actor.current_attack, 3);
        assert_eq!(actor.abilities.len(), 1);
        assert_eq!(actor.template_id.as_deref(), Some("rat"));
    }

    #[test]
    fn level_never_drops_below_one() {
        let fixture = Fixture::new();
        let actor = instantiate(&fixture.env(), "rat", -5, ActorId(1)).expect("known template");
        assert_eq!(actor.level, 1);
    }

    #[test]
    fn unknown_template_is_not_found() {
        let fixture = Fixture::new();
        assert!(instantiate(&fixture.env(), "dragon", 0, ActorId(1)).is_none());
    }

    #[test]
    fn boss_post_scale() {
        let fixture = Fixture::new();
        let boss = instantiate_boss(&fixture.env(), "alpha", 0, ActorId(1)).expect("known template");
        assert_eq!(boss.level, 7);
        assert_eq!(boss.max_health(), 150);
        assert_eq!(boss.health(), 150);
        assert_eq!(boss.current_attack, 21);
        assert!(boss.is_boss);
    }

    #[test]
    fn boss_encounter_is_the_zone_boss() {
        let fixture = Fixture::new();
        let factory = EncounterFactory::new(fixture.env());
        let roster = factory.build("woods", 2, Some(3), true, &mut ScriptedRng::default());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].template_id.as_deref(), Some("alpha"));
    }

    #[test]
    fn low_level_pool_only_holds_first_band() {
        let fixture = Fixture::new();
        let factory = EncounterFactory::new(fixture.env());
        let roster = factory.build("woods", 2, Some(4), false, &mut ScriptedRng::constant(0.99));
        assert_eq!(roster.len(), 4);
        assert!(roster.iter().all(|a| a.template_id.as_deref() == Some("rat")));
    }

    #[test]
    fn unknown_zone_falls_back_to_placeholders() {
        let fixture = Fixture::new();
        let factory = EncounterFactory::new(fixture.env());
        let roster = factory.build("nowhere", 3, None, false, &mut ScriptedRng::default());
        assert_eq!(roster.len(), 1);
        assert!(roster[0].template_id.is_none());
        assert_eq!(roster[0].level, 3);
    }

    #[test]
    fn jitter_stays_within_one_level() {
        let fixture = Fixture::new();
        let factory = EncounterFactory::new(fixture.env());
        // zone level 8: variance 1. Rolls alternate jitter and template pick.
        let mut rng = ScriptedRng::new(vec![0.0, 0.0, 0.99, 0.99]);
        let roster = factory.build("woods", 8, Some(2), false, &mut rng);
        assert_eq!(roster[0].template_id.as_deref(), Some("rat"));
        assert_eq!(roster[0].level, 1);
        assert_eq!(roster[1].template_id.as_deref(), Some("wolf"));
        assert_eq!(roster[1].level, 4);
    }
}
