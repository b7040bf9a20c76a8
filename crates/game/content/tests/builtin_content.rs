use std::fs;

use combat_content::{ContentBundle, ContentFactory};
use combat_core::{
    AggressivePolicy, CombatEngine, EncounterFactory, PcgRng, PlayerAction, ScriptedRng,
};

const FILES: [(&str, &str); 6] = [
    ("abilities.ron", include_str!("../data/abilities.ron")),
    ("actors.ron", include_str!("../data/actors.ron")),
    ("items.ron", include_str!("../data/items.ron")),
    ("zones.ron", include_str!("../data/zones.ron")),
    ("player.ron", include_str!("../data/player.ron")),
    ("tables.toml", include_str!("../data/tables.toml")),
];

fn builtin() -> ContentBundle {
    ContentFactory::builtin()
        .build_env()
        .expect("built-in content is valid")
}

#[test]
fn builtin_tables_load_and_validate() {
    let bundle = builtin();

    assert!(bundle.abilities.len() >= 20);
    assert!(bundle.templates.len() >= 9);
    assert_eq!(bundle.items.len(), 4);
    assert_eq!(bundle.zones.len(), 2);
    assert_eq!(bundle.config.mana_regen_per_round, 2);

    for zone in bundle.zones.iter() {
        let boss = bundle.templates.get(&zone.boss).expect("zone boss exists");
        assert!(boss.boss, "{} should be flagged as a boss", boss.id);
    }
    for id in &bundle.profile.abilities {
        assert!(bundle.abilities.contains(id), "profile ability {id} missing");
    }
}

#[test]
fn zone_pools_grow_with_level() {
    let bundle = builtin();
    let forest = bundle.zones.get("forest").expect("forest zone");

    assert_eq!(forest.eligible(1), vec!["giant_rat", "wolf"]);
    assert_eq!(forest.eligible(4), vec!["giant_rat", "wolf", "bandit", "treant"]);
}

#[test]
fn generated_rosters_come_from_the_zone_pool() {
    let bundle = builtin();
    let env = bundle.env();
    let factory = EncounterFactory::new(env);
    let pool = bundle.zones.get("crypt").expect("crypt zone").eligible(6);
    let mut rng = PcgRng::new(5);

    for _ in 0..50 {
        let roster = factory.build("crypt", 6, None, false, &mut rng);
        assert!((1..=2).contains(&roster.len()));
        for hostile in &roster {
            let template = hostile.template_id.as_deref().expect("template backed");
            assert!(pool.contains(&template));
        }
    }

    let boss = factory.build("crypt", 6, None, true, &mut rng);
    assert_eq!(boss.len(), 1);
    assert!(boss[0].is_boss);
    assert_eq!(boss[0].max_health(), 150);
    assert_eq!(boss[0].current_attack, 21);
}

#[test]
fn builtin_profile_plays_a_full_encounter() {
    let bundle = builtin();
    let mut rng = PcgRng::new(2024);
    let mut engine = CombatEngine::new(bundle.env(), &mut rng);

    let mut session = engine.start_encounter(&bundle.profile, "forest", 2, false);
    assert_eq!(session.inventory.get("potion"), Some(&3));

    let outcome = engine.autoplay(&mut session, &mut AggressivePolicy::default(), 100);
    assert!(outcome.is_terminal());
    let rewards = session.rewards.as_ref().expect("summary once finished");
    assert_eq!(rewards.outcome, outcome);
}

#[test]
fn builtin_items_resolve_through_the_engine() {
    let bundle = builtin();
    let mut rng = ScriptedRng::constant(0.99);
    let mut engine = CombatEngine::new(bundle.env(), &mut rng);

    let mut session = engine.start_encounter(&bundle.profile, "forest", 1, false);
    let before: Vec<_> = session.hostiles.iter().map(|h| h.health()).collect();
    engine
        .submit_player_action(&mut session, PlayerAction::UseItem("fire_flask".into()), Some(0))
        .expect("flask in inventory");

    assert_eq!(session.item_quantity("fire_flask"), 1);
    assert_eq!(
        session.hostiles[0].health(),
        before[0].saturating_sub(18)
    );
}

#[test]
fn directory_content_matches_builtin() {
    let dir = tempfile::tempdir().expect("temp dir");
    for (name, text) in FILES {
        fs::write(dir.path().join(name), text).expect("write table");
    }

    let from_disk = ContentFactory::new(dir.path())
        .build_env()
        .expect("directory content is valid");
    let builtin = builtin();

    assert_eq!(from_disk.abilities.len(), builtin.abilities.len());
    assert_eq!(from_disk.templates.len(), builtin.templates.len());
    assert_eq!(from_disk.config, builtin.config);
    assert_eq!(from_disk.profile, builtin.profile);
}

#[test]
fn directory_with_unknown_boss_fails_fast() {
    let dir = tempfile::tempdir().expect("temp dir");
    for (name, text) in FILES {
        let text = if name == "zones.ron" {
            text.replace("\"alpha_wolf\"", "\"dragon\"")
        } else {
            text.to_string()
        };
        fs::write(dir.path().join(name), text).expect("write table");
    }

    let error = ContentFactory::new(dir.path())
        .build_env()
        .expect_err("boss template missing");
    let message = format!("{error:#}");
    assert!(message.contains("dragon"), "{message}");
}
