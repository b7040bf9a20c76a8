//! Validated content assembled into catalogs.
//!
//! [`ContentBundle::assemble`] owns every catalog plus the config and player
//! profile, and checks the cross references between them. Broken references
//! that would let an encounter start on malformed data are fatal; references
//! with a safe fallback (unknown ability ids on templates or the profile) only
//! warn.

use combat_core::{
    AbilityCatalog, AbilityDefinition, AbilityKind, ActorTemplate, CatalogError, CombatConfig,
    CombatEnv, ItemCatalog, ItemDefinition, PlayerProfile, SpecialEffect, TemplateCatalog,
    ZoneDefinition, ZoneTable,
};

/// Everything an engine needs, owned in one place.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub abilities: AbilityCatalog,
    pub templates: TemplateCatalog,
    pub items: ItemCatalog,
    pub zones: ZoneTable,
    pub config: CombatConfig,
    pub profile: PlayerProfile,
}

impl ContentBundle {
    /// Builds the catalogs and validates them against each other.
    pub fn assemble(
        abilities: Vec<AbilityDefinition>,
        templates: Vec<ActorTemplate>,
        items: Vec<ItemDefinition>,
        zones: Vec<ZoneDefinition>,
        config: CombatConfig,
        profile: PlayerProfile,
    ) -> Result<Self, CatalogError> {
        for ability in &abilities {
            check_ability(ability)?;
        }
        for template in &templates {
            for entry in &template.loot.items {
                check_probability(&template.id, "loot chance", entry.chance)?;
            }
        }
        check_probability("config", "basic_crit_chance", config.basic_crit_chance)?;
        check_probability("config", "enemy_ability_chance", config.enemy_ability_chance)?;

        let bundle = Self {
            abilities: AbilityCatalog::from_definitions(abilities)?,
            templates: TemplateCatalog::from_templates(templates)?,
            items: ItemCatalog::from_items(items)?,
            zones: ZoneTable::from_zones(zones)?,
            config,
            profile,
        };
        bundle.check_references()?;

        tracing::info!(
            abilities = bundle.abilities.len(),
            templates = bundle.templates.len(),
            items = bundle.items.len(),
            zones = bundle.zones.len(),
            "content assembled"
        );
        Ok(bundle)
    }

    /// Borrows the catalogs as a combat environment.
    pub fn env(&self) -> CombatEnv<'_> {
        CombatEnv::new(
            &self.abilities,
            &self.templates,
            &self.items,
            &self.zones,
            &self.config,
        )
    }

    fn check_references(&self) -> Result<(), CatalogError> {
        for zone in self.zones.iter() {
            if !self.templates.contains(&zone.boss) {
                return Err(CatalogError::UnknownBoss {
                    zone: zone.id.clone(),
                    boss: zone.boss.clone(),
                });
            }
            for band in &zone.bands {
                if let Some(missing) = band.enemies.iter().find(|t| !self.templates.contains(t)) {
                    return Err(CatalogError::UnknownZoneEnemy {
                        zone: zone.id.clone(),
                        template: missing.clone(),
                    });
                }
            }
        }

        for id in self.abilities.ids() {
            let Some(ability) = self.abilities.get(id) else {
                continue;
            };
            if let AbilityKind::Summon(spec) = &ability.kind {
                if !self.templates.contains(&spec.template) {
                    return Err(CatalogError::UnknownSummon {
                        ability: ability.id,
                        template: spec.template.clone(),
                    });
                }
            }
        }

        for template in self.templates.iter() {
            for id in template.abilities.iter().filter(|id| !self.abilities.contains(id)) {
                tracing::warn!(template = %template.id, ability = %id, "template references unknown ability");
            }
        }
        for id in self.profile.abilities.iter().filter(|id| !self.abilities.contains(id)) {
            tracing::warn!(ability = %id, "profile references unknown ability");
        }
        for id in self.profile.inventory.keys().filter(|id| self.items.get(id).is_none()) {
            tracing::warn!(item = %id, "profile inventory holds unknown item");
        }
        Ok(())
    }
}

fn check_ability(ability: &AbilityDefinition) -> Result<(), CatalogError> {
    let owner = ability.id.as_str();
    if let Some(status) = &ability.status_effect {
        if let Some(chance) = status.chance {
            check_probability(owner, "status chance", chance)?;
        }
    }
    if let Some(piercing) = ability.armor_piercing {
        check_probability(owner, "armor_piercing", piercing)?;
    }
    if let Some(crit) = ability.crit_chance {
        check_probability(owner, "crit_chance", crit)?;
    }
    match &ability.kind {
        AbilityKind::Special(SpecialEffect::Dodge { chance, .. }) => {
            check_probability(owner, "dodge chance", *chance)
        }
        AbilityKind::Special(SpecialEffect::Reflect { fraction, .. }) => {
            check_probability(owner, "reflect fraction", *fraction)
        }
        _ => Ok(()),
    }
}

fn check_probability(owner: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(CatalogError::OutOfRange {
        owner: owner.to_string(),
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CountRange, LevelBand, StatusKind, StatusSpec, SummonSpec};

    fn profile() -> PlayerProfile {
        PlayerProfile::new("Hero", 1, 50, 8, 2)
    }

    fn zone(boss: &str, enemy: &str) -> ZoneDefinition {
        ZoneDefinition {
            id: "woods".into(),
            name: "Woods".into(),
            boss: boss.into(),
            bands: vec![LevelBand::new(1, [enemy])],
        }
    }

    fn templates() -> Vec<ActorTemplate> {
        vec![
            ActorTemplate::new("rat", "Rat", 1, 10, 3, 0),
            ActorTemplate::new("king", "Rat King", 3, 60, 9, 2).as_boss(),
        ]
    }

    #[test]
    fn valid_content_assembles() {
        let bundle = ContentBundle::assemble(
            vec![AbilityDefinition::new("jab", "Jab", AbilityKind::Attack)],
            templates(),
            Vec::new(),
            vec![zone("king", "rat")],
            CombatConfig::default(),
            profile(),
        )
        .expect("valid content");
        assert!(bundle.env().zones().zone("woods").is_some());
    }

    #[test]
    fn unknown_boss_is_fatal() {
        let error = ContentBundle::assemble(
            Vec::new(),
            templates(),
            Vec::new(),
            vec![zone("dragon", "rat")],
            CombatConfig::default(),
            profile(),
        )
        .expect_err("boss must exist");
        assert_eq!(
            error,
            CatalogError::UnknownBoss {
                zone: "woods".into(),
                boss: "dragon".into()
            }
        );
    }

    #[test]
    fn unknown_zone_enemy_is_fatal() {
        let error = ContentBundle::assemble(
            Vec::new(),
            templates(),
            Vec::new(),
            vec![zone("king", "goblin")],
            CombatConfig::default(),
            profile(),
        )
        .expect_err("enemy must exist");
        assert!(matches!(error, CatalogError::UnknownZoneEnemy { .. }));
    }

    #[test]
    fn unknown_summon_template_is_fatal() {
        let summon = AbilityDefinition::new(
            "call",
            "Call",
            AbilityKind::Summon(SummonSpec {
                template: "ghost".into(),
                count: CountRange::new(1, 1),
            }),
        );
        let error = ContentBundle::assemble(
            vec![summon],
            templates(),
            Vec::new(),
            Vec::new(),
            CombatConfig::default(),
            profile(),
        )
        .expect_err("summon target must exist");
        assert!(matches!(error, CatalogError::UnknownSummon { .. }));
    }

    #[test]
    fn duplicate_ability_is_fatal() {
        let jab = AbilityDefinition::new("jab", "Jab", AbilityKind::Attack);
        let error = ContentBundle::assemble(
            vec![jab.clone(), jab],
            templates(),
            Vec::new(),
            Vec::new(),
            CombatConfig::default(),
            profile(),
        )
        .expect_err("duplicate id");
        assert_eq!(error, CatalogError::DuplicateAbility("jab".into()));
    }

    #[test]
    fn probability_outside_unit_interval_is_fatal() {
        let bite = AbilityDefinition::new("bite", "Bite", AbilityKind::Attack)
            .with_status(StatusSpec::new(StatusKind::Poison, 2).with_chance(1.5));
        let error = ContentBundle::assemble(
            vec![bite],
            templates(),
            Vec::new(),
            Vec::new(),
            CombatConfig::default(),
            profile(),
        )
        .expect_err("chance out of range");
        assert!(matches!(
            error,
            CatalogError::OutOfRange {
                field: "status chance",
                ..
            }
        ));
    }

    #[test]
    fn unknown_template_ability_only_warns() {
        let templates = vec![
            ActorTemplate::new("rat", "Rat", 1, 10, 3, 0).with_abilities(["gnaw"]),
            ActorTemplate::new("king", "Rat King", 3, 60, 9, 2),
        ];
        let result = ContentBundle::assemble(
            Vec::new(),
            templates,
            Vec::new(),
            vec![zone("king", "rat")],
            CombatConfig::default(),
            profile(),
        );
        assert!(result.is_ok());
    }
}
