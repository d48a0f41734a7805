use std::collections::HashSet;

use ascent_core::{
    BossReward, ChallengeEffect, EventBus, GameConfig, MetaProgress, Phase, Rarity, RunState,
    TiePolicy, UnlockRule,
};
use ascent_data::{builtin_content, content_from_json, content_to_json, meta_from_json, meta_to_json};

fn unique_ids<I: IntoIterator<Item = String>>(ids: I) -> bool {
    let mut seen = HashSet::new();
    ids.into_iter().all(|id| seen.insert(id))
}

#[test]
fn catalog_ids_are_unique() {
    let content = builtin_content();
    assert!(unique_ids(content.powers.iter().map(|p| p.id.clone())));
    assert!(unique_ids(content.specials.iter().map(|s| s.id.clone())));
    assert!(unique_ids(content.challenges.iter().map(|c| c.id.clone())));
    assert!(unique_ids(content.bosses.iter().map(|b| b.id.clone())));
    assert!(unique_ids(content.decks.iter().map(|d| d.id.clone())));
}

#[test]
fn every_boss_stage_has_a_boss() {
    let content = builtin_content();
    let config = GameConfig::standard();
    for stage in 1..=config.max_stage() {
        if config.is_boss_stage(stage) {
            let boss = content
                .boss_for_stage(stage)
                .unwrap_or_else(|| panic!("no boss for stage {stage}"));
            assert!(!boss.deck.is_empty());
            assert!(boss.stand_value >= 17);
        }
    }
}

#[test]
fn final_boss_grants_victory() {
    let content = builtin_content();
    let config = GameConfig::standard();
    let last = content
        .boss_for_stage(config.max_stage())
        .expect("final boss");
    assert!(last.rewards.contains(&BossReward::Victory));
    assert_eq!(last.tie_policy, TiePolicy::AllLose);
}

#[test]
fn power_tiers_cover_all_stage_caps() {
    let content = builtin_content();
    assert_eq!(content.powers.len(), 16);
    for power in &content.powers {
        assert!((1..=4).contains(&power.tier), "bad tier on {}", power.id);
        assert!(power.cost > 0, "free power {}", power.id);
    }
    for tier in 1..=4u8 {
        assert!(
            content.powers.iter().any(|power| power.tier == tier),
            "no tier {tier} powers"
        );
    }
}

#[test]
fn power_costs_and_usage_caps_hold() {
    let content = builtin_content();
    let power = |id: &str| {
        content
            .powers
            .iter()
            .find(|def| def.id == id)
            .unwrap_or_else(|| panic!("missing power {id}"))
    };
    for (id, cost) in [
        ("peek", 2),
        ("card_count", 1),
        ("insurance_plus", 1),
        ("quick_peek", 1),
        ("swap", 3),
        ("pressure", 2),
        ("lucky_draw", 3),
        ("safety_net", 2),
        ("freeze", 3),
        ("second_chance", 4),
        ("stacked_deck", 3),
        ("dealers_tell", 2),
        ("loaded_dice", 5),
        ("double_agent", 4),
        ("time_warp", 5),
        ("perfect_shuffle", 4),
    ] {
        assert_eq!(power(id).cost, cost, "cost drifted on {id}");
    }
    for id in ["loaded_dice", "double_agent", "perfect_shuffle"] {
        assert_eq!(power(id).uses_per_stage, Some(1), "{id} loses its stage cap");
        assert_eq!(power(id).uses_per_hand, Some(1));
    }
    assert_eq!(power("second_chance").uses_per_hand, Some(1));
    assert_eq!(power("second_chance").uses_per_stage, None);
    assert_eq!(power("time_warp").uses_per_run, Some(1));
    assert_eq!(power("time_warp").uses_per_hand, None);
}

#[test]
fn card_curse_challenges_are_in_the_pool() {
    let content = builtin_content();
    assert_eq!(content.challenges.len(), 15);
    let poison = content.challenge_by_id("poison_cards").expect("poison_cards");
    assert_eq!(poison.remove_cost, 14);
    assert!(matches!(
        poison.effect,
        ChallengeEffect::PoisonRandomCards { count: 2, chips: 3 }
    ));
    let cursed = content.challenge_by_id("cursed_ace").expect("cursed_ace");
    assert_eq!(cursed.remove_cost, 12);
    assert!(matches!(cursed.effect, ChallengeEffect::CursedAce));
}

#[test]
fn starter_decks_reference_real_specials() {
    let content = builtin_content();
    for deck in &content.decks {
        for id in &deck.specials {
            assert!(
                content.special_by_id(id).is_some(),
                "deck {} references unknown special {}",
                deck.id,
                id
            );
        }
        assert!(deck.starting_chips > 0);
        assert!(deck.recipe.len() >= 10, "deck {} too thin", deck.id);
    }
}

#[test]
fn exactly_one_deck_starts_unlocked() {
    let content = builtin_content();
    let defaults: Vec<&str> = content
        .decks
        .iter()
        .filter(|deck| deck.unlock == UnlockRule::Default)
        .map(|deck| deck.id.as_str())
        .collect();
    assert_eq!(defaults, vec!["grinder"]);
    // Everything else is bought with dust or earned.
    for deck in &content.decks {
        if deck.unlock != UnlockRule::Default {
            assert!(deck.dust_cost > 0, "locked deck {} is free", deck.id);
        }
    }
}

#[test]
fn every_rarity_has_an_unlocked_starter_option() {
    let content = builtin_content();
    let meta = MetaProgress::new_profile(&content);
    for rarity in [Rarity::Common, Rarity::Rare] {
        assert!(
            content
                .specials
                .iter()
                .any(|def| def.rarity == rarity && meta.special_unlocked(&def.id)),
            "no unlocked {rarity:?} special for a fresh profile"
        );
    }
    // Legendaries are all locked behind dust at first.
    assert!(content
        .specials
        .iter()
        .filter(|def| def.rarity == Rarity::Legendary)
        .all(|def| !meta.special_unlocked(&def.id)));
}

#[test]
fn content_round_trips_through_json() {
    let content = builtin_content();
    let raw = content_to_json(&content).expect("serialize");
    let parsed = content_from_json(&raw).expect("parse");
    assert_eq!(parsed.powers.len(), content.powers.len());
    assert_eq!(parsed.specials.len(), content.specials.len());
    assert_eq!(parsed.challenges.len(), content.challenges.len());
    assert_eq!(parsed.bosses.len(), content.bosses.len());
    assert_eq!(parsed.decks.len(), content.decks.len());
}

#[test]
fn corrupt_save_falls_back_to_fresh_profile() {
    let content = builtin_content();
    let mut meta = MetaProgress::new_profile(&content);
    meta.dust = 1234;
    let raw = meta_to_json(&meta).expect("serialize");
    let restored = meta_from_json(&raw, &content);
    assert_eq!(restored.dust, 1234);

    let fallback = meta_from_json("{not json", &content);
    assert_eq!(fallback.dust, 0);
    assert!(fallback.deck_unlocked("grinder"));
}

#[test]
fn a_full_hand_plays_out_with_builtin_content() {
    let content = builtin_content();
    let meta = MetaProgress::new_profile(&content);
    let mut run = RunState::new(GameConfig::standard(), content, meta, 99);
    let mut events = EventBus::default();
    run.start_run("grinder", &mut events).expect("start run");
    run.place_bet(5, &mut events).expect("bet");
    run.deal(&mut events).expect("deal");
    // Simple policy: hit to seventeen, then stand.
    while run.state.phase == Phase::PlayerTurn && run.player_total().total < 17 {
        run.hit(&mut events).expect("hit");
    }
    if run.state.phase == Phase::PlayerTurn {
        run.stand(&mut events).expect("stand");
    }
    assert!(matches!(
        run.state.phase,
        Phase::Resolution | Phase::GameOver
    ));
    assert_eq!(run.stats.hands_played, 1);
    assert!(run.state.chips >= 0);
    assert!(run.state.edge <= run.state.max_edge);
    assert!(events
        .drain()
        .any(|event| matches!(event, ascent_core::Event::HandResolved { .. })));
}
