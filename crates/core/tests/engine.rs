use ascent_core::{
    BossDef, BossReward, Card, Content, Deck, EventBus, GameConfig, MetaProgress, Outcome, Phase,
    PowerDef, PowerEffect, PowerTiming, Rank, RewardOption, RunError, RunState, Screen,
    SplitState, StarterDeckDef, Suit, TiePolicy, TraitKind, UnlockRule,
};

fn test_powers() -> Vec<PowerDef> {
    vec![
        PowerDef {
            id: "peek".to_string(),
            name: "Peek".to_string(),
            description: String::new(),
            cost: 3,
            tier: 1,
            timing: PowerTiming::PlayerTurn,
            effect: PowerEffect::Peek,
            uses_per_hand: Some(1),
            uses_per_stage: None,
            uses_per_run: None,
        },
        PowerDef {
            id: "safety_net".to_string(),
            name: "Safety Net".to_string(),
            description: String::new(),
            cost: 2,
            tier: 2,
            timing: PowerTiming::OnBust,
            effect: PowerEffect::SafetyNet,
            uses_per_hand: Some(1),
            uses_per_stage: None,
            uses_per_run: None,
        },
    ]
}

fn test_recipe() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| {
            [Rank::Two, Rank::Five, Rank::Nine, Rank::Ten, Rank::Ace]
                .into_iter()
                .map(move |rank| Card::standard(suit, rank))
        })
        .collect()
}

fn test_deck(id: &str, deck_trait: TraitKind) -> StarterDeckDef {
    StarterDeckDef {
        id: id.to_string(),
        name: id.to_string(),
        tagline: String::new(),
        starting_chips: 50,
        starting_edge: 5,
        max_edge: 8,
        recipe: test_recipe(),
        specials: Vec::new(),
        deck_trait,
        unlock: UnlockRule::Default,
        dust_cost: 0,
    }
}

fn test_content() -> Content {
    Content {
        powers: test_powers(),
        specials: Vec::new(),
        challenges: Vec::new(),
        bosses: vec![BossDef {
            id: "iron_dealer".to_string(),
            name: "Iron Dealer".to_string(),
            title: String::new(),
            intro: String::new(),
            stage: 4,
            deck: vec![Card::standard(Suit::Clubs, Rank::Ten)],
            stand_value: 17,
            hits_soft_17: false,
            tie_policy: TiePolicy::AllLose,
            hole_card_visible: false,
            extra_chip_loss: 0,
            entry_chip_penalty: 0,
            rewards: vec![BossReward::Chips(25)],
            rare_card_offers: 0,
        }],
        decks: vec![
            test_deck("practice", TraitKind::Adaptable),
            test_deck("stance", TraitKind::PowerStance),
            test_deck("longshot", TraitKind::AllOrNothing),
        ],
    }
}

fn new_run_with_deck(seed: u64, deck: &str) -> RunState {
    let content = test_content();
    let meta = MetaProgress::new_profile(&content);
    let mut run = RunState::new(GameConfig::standard(), content, meta, seed);
    let mut events = EventBus::default();
    run.start_run(deck, &mut events).expect("start test run");
    run
}

fn new_run(seed: u64) -> RunState {
    new_run_with_deck(seed, "practice")
}

fn card(suit: Suit, rank: Rank) -> Card {
    Card::standard(suit, rank)
}

/// Stack the player pile so cards come off the top in the given order.
fn stack(run: &mut RunState, deal_order: &[Card]) {
    let mut cards: Vec<Card> = deal_order.to_vec();
    cards.reverse();
    run.deck = Deck::from_cards(cards);
}

fn bet_and_deal(run: &mut RunState, amount: i64) {
    let mut events = EventBus::default();
    run.place_bet(amount, &mut events).expect("place bet");
    run.deal(&mut events).expect("deal");
}

#[test]
fn natural_against_natural_pushes() {
    let mut run = new_run(1);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ace),
            card(Suit::Clubs, Rank::King),
            card(Suit::Spades, Rank::King),
            card(Suit::Clubs, Rank::Ace),
        ],
    );
    bet_and_deal(&mut run, 10);
    assert_eq!(run.state.phase, Phase::Resolution);
    assert_eq!(run.state.outcome, Some(Outcome::Push));
    assert_eq!(run.state.chips, 50);
}

#[test]
fn player_natural_pays_three_to_two_floored() {
    let mut run = new_run(2);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ace),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Diamonds, Rank::Nine),
        ],
    );
    bet_and_deal(&mut run, 9);
    assert_eq!(run.state.outcome, Some(Outcome::Blackjack));
    // floor(9 * 1.5) = 13
    assert_eq!(run.state.chips, 63);
    assert_eq!(run.stats.blackjacks, 1);
}

#[test]
fn bust_loses_the_bet() {
    let mut run = new_run(3);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Diamonds, Rank::Eight),
            card(Suit::Spades, Rank::Five),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.hit(&mut events).expect("hit");
    assert_eq!(run.state.phase, Phase::Resolution);
    assert_eq!(run.state.outcome, Some(Outcome::Lose));
    assert_eq!(run.state.chips, 40);
    assert_eq!(run.stats.busts, 1);
}

#[test]
fn dealer_stands_on_seventeen_and_lower_total_loses() {
    let mut run = new_run(4);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Diamonds, Rank::Ten),
        ],
    );
    bet_and_deal(&mut run, 5);
    let mut events = EventBus::default();
    run.stand(&mut events).expect("stand");
    // 15 against a standing 17.
    assert_eq!(run.state.outcome, Some(Outcome::Lose));
    assert_eq!(run.state.chips, 45);
    assert!(run.dealer_hand.iter().all(|card| card.face_up));
}

#[test]
fn split_plays_both_hands_in_order() {
    let mut run = new_run(5);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Eight),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Clubs, Rank::Ten),
            card(Suit::Hearts, Rank::Jack),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.split(&mut events).expect("split");
    {
        let split: &SplitState = run.split.as_ref().expect("split state");
        assert_eq!(split.active, 0);
        assert_eq!(split.hands[0].len(), 2);
        assert_eq!(split.hands[1].len(), 2);
        assert_eq!(split.bets, [10, 10]);
    }
    run.stand(&mut events).expect("stand first hand");
    assert_eq!(run.split.as_ref().expect("split state").active, 1);
    assert_eq!(run.state.phase, Phase::PlayerTurn);
    run.stand(&mut events).expect("stand second hand");
    // Both 18s beat the dealer's 17.
    let split = run.split.as_ref().expect("split state");
    assert_eq!(split.outcomes, [Some(Outcome::Win), Some(Outcome::Win)]);
    assert_eq!(run.state.chips, 70);
    assert_eq!(run.stats.splits_played, 1);
    assert_eq!(run.state.stage_wins, 1);
}

#[test]
fn boss_turns_push_into_loss() {
    let mut run = new_run(6);
    run.active_boss = Some("iron_dealer".to_string());
    run.boss_deck = Some(Deck::from_cards(vec![
        // Popped hole-first order: upcard last.
        card(Suit::Diamonds, Rank::Nine),
        card(Suit::Clubs, Rank::Ten),
    ]));
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Nine),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.stand(&mut events).expect("stand");
    // 19 against 19 would push, but every tie goes to the boss.
    assert_eq!(run.state.outcome, Some(Outcome::Lose));
    assert_eq!(run.state.chips, 40);
}

#[test]
fn power_without_edge_is_rejected_without_side_effects() {
    let mut run = new_run(7);
    run.equipped_powers.push("peek".to_string());
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Diamonds, Rank::Ten),
        ],
    );
    bet_and_deal(&mut run, 5);
    run.state.edge = 1;
    let mut events = EventBus::default();
    let result = run.use_power("peek", &mut events);
    assert!(matches!(result, Err(RunError::NotEnoughEdge)));
    assert_eq!(run.state.edge, 1);
    assert!(!run.dealer_hand[1].face_up);
    assert!(!run.can_use_power("peek"));
    run.state.edge = 3;
    assert!(run.can_use_power("peek"));
    run.use_power("peek", &mut events).expect("peek");
    assert!(run.dealer_hand[1].face_up);
    assert_eq!(run.state.edge, 0);
}

#[test]
fn safety_net_cancels_the_bust() {
    let mut run = new_run(8);
    run.equipped_powers.push("safety_net".to_string());
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Clubs, Rank::King),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.hit(&mut events).expect("hit");
    // The king slid back out; the hand lives on at 19.
    assert_eq!(run.state.phase, Phase::PlayerTurn);
    assert_eq!(run.player_hand.len(), 2);
    assert_eq!(run.player_total().total, 19);
    assert_eq!(run.state.edge, 3);
    assert_eq!(run.stats.clutch_saves, 1);
}

#[test]
fn betting_rejections_leave_state_untouched() {
    let mut run = new_run(9);
    let mut events = EventBus::default();
    assert!(matches!(
        run.place_bet(3, &mut events),
        Err(RunError::BetBelowMinimum)
    ));
    assert!(matches!(
        run.place_bet(500, &mut events),
        Err(RunError::NotEnoughChips)
    ));
    assert!(matches!(run.deal(&mut events), Err(RunError::NoBetPlaced)));
    assert_eq!(run.state.phase, Phase::Betting);
    assert_eq!(run.state.current_bet, 0);
    assert_eq!(run.state.chips, 50);
    assert!(run.player_hand.is_empty());
}

#[test]
fn actions_rejected_outside_player_turn() {
    let mut run = new_run(10);
    let mut events = EventBus::default();
    assert!(matches!(
        run.hit(&mut events),
        Err(RunError::InvalidPhase(Phase::Betting))
    ));
    assert!(matches!(
        run.stand(&mut events),
        Err(RunError::InvalidPhase(Phase::Betting))
    ));
    assert!(matches!(
        run.double_down(&mut events),
        Err(RunError::InvalidPhase(Phase::Betting))
    ));
}

#[test]
fn third_win_clears_the_stage() {
    let mut run = new_run(11);
    run.state.stage_wins = 2;
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Diamonds, Rank::Ten),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.stand(&mut events).expect("stand");
    assert_eq!(run.state.outcome, Some(Outcome::Win));
    assert_eq!(run.state.stage_wins, 3);
    assert_eq!(run.state.screen, Screen::StageComplete);
    assert_eq!(run.stats.stages_cleared, 1);
}

#[test]
fn stage_interlude_flows_back_to_the_table() {
    let mut run = new_run(12);
    run.state.stage_wins = 2;
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Diamonds, Rank::Ten),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.stand(&mut events).expect("stand");
    run.advance_stage(&mut events).expect("advance");
    assert_eq!(run.state.stage, 2);
    assert_eq!(run.state.screen, Screen::PowerSelection);
    let offered = run.power_options.clone();
    assert!(!offered.is_empty());
    run.select_power(&offered[0], &mut events).expect("select");
    assert!(run.collected_powers.contains(&offered[0]));
    assert!(run.equipped_powers.contains(&offered[0]));
    assert_eq!(run.state.screen, Screen::CardReward);
    assert_eq!(run.reward_options.len(), 3);
    // No special cards in this catalog: three standard cards, no repeats.
    let mut ranks = Vec::new();
    for option in &run.reward_options {
        match option {
            RewardOption::Standard(card) => {
                assert!(!ranks.contains(&card.rank), "duplicate rank on offer");
                ranks.push(card.rank);
            }
            RewardOption::Special(id) => panic!("unexpected special offer {id}"),
        }
    }
    run.select_card_reward(0, &mut events).expect("take reward");
    assert_eq!(run.added_cards.len(), 1);
    assert_eq!(run.stats.cards_added, 1);
    assert_eq!(run.state.screen, Screen::DeckShop);
    let chips_before = run.state.chips;
    run.remove_deck_card(Suit::Spades, Rank::Ten)
        .expect("remove card");
    assert_eq!(run.state.chips, chips_before - 10);
    assert_eq!(run.stats.cards_removed, 1);
    assert_eq!(run.stats.chips_spent, 10);
    run.leave_shop(&mut events).expect("leave shop");
    // Stage 2 rolls no challenges.
    assert_eq!(run.state.screen, Screen::Game);
    assert_eq!(run.state.phase, Phase::Betting);
    assert_eq!(run.state.stage_wins, 0);
}

#[test]
fn losing_the_last_chips_ends_the_run() {
    let mut run = new_run(13);
    run.state.chips = 5;
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Diamonds, Rank::Ten),
        ],
    );
    bet_and_deal(&mut run, 5);
    let mut events = EventBus::default();
    run.stand(&mut events).expect("stand");
    assert_eq!(run.state.chips, 0);
    assert_eq!(run.state.phase, Phase::GameOver);
    assert_eq!(run.state.screen, Screen::GameOver);
    assert_eq!(run.meta.stats.total_runs, 1);
    assert!(run.meta.dust > 0);
    // The run lands on the deck's lifetime record too.
    let deck_record = run.meta.deck_stats.get("practice").expect("deck record");
    assert_eq!(deck_record.runs, 1);
    assert_eq!(deck_record.victories, 0);
    assert_eq!(deck_record.best_stage, 1);
    assert_eq!(deck_record.hands_played, 1);
}

#[test]
fn double_down_doubles_bet_and_stands() {
    let mut run = new_run(14);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Spades, Rank::Nine),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    assert!(run.can_double_down());
    run.double_down(&mut events).expect("double");
    // 20 against 17 pays the doubled bet.
    assert_eq!(run.state.outcome, Some(Outcome::Win));
    assert_eq!(run.state.chips, 70);
    assert_eq!(run.stats.doubles_played, 1);
}

#[test]
fn split_only_needs_chips_for_the_second_stake() {
    let mut run = new_run(16);
    run.state.chips = 15;
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Eight),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Hearts, Rank::Queen),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    // 15 chips covers the matching 10-chip stake even though it is
    // less than both stakes combined.
    assert!(run.can_split());
    run.split(&mut events).expect("split");
    run.stand(&mut events).expect("stand first hand");
    run.stand(&mut events).expect("stand second hand");
    // Both 18s beat the dealer's 17.
    assert_eq!(run.state.chips, 35);
}

#[test]
fn all_or_nothing_pays_triple_the_base_bet() {
    let mut run = new_run_with_deck(17, "longshot");
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Spades, Rank::Nine),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.double_down(&mut events).expect("double");
    // 20 beats 17: 3x the 10-chip bet as placed, not the doubled stake.
    assert_eq!(run.state.outcome, Some(Outcome::Win));
    assert_eq!(run.state.chips, 80);
}

#[test]
fn all_or_nothing_surcharge_comes_off_the_base_bet() {
    let mut run = new_run_with_deck(18, "longshot");
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Spades, Rank::Two),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.double_down(&mut events).expect("double");
    // 13 loses the doubled 20, plus 25% of the 10-chip bet as placed.
    assert_eq!(run.state.outcome, Some(Outcome::Lose));
    assert_eq!(run.state.chips, 27);
}

#[test]
fn hitting_to_twenty_one_still_pays_the_stand_bonus() {
    let mut run = new_run_with_deck(19, "stance");
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Diamonds, Rank::Six),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.hit(&mut events).expect("hit");
    // Drawing to 21 auto-stands, and the stand bonus lands: +2, then +10.
    assert_eq!(run.state.outcome, Some(Outcome::Win));
    assert_eq!(run.state.chips, 62);
}

#[test]
fn each_split_hand_doubles_on_its_own() {
    let mut run = new_run(20);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Eight),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Spades, Rank::Two),
            card(Suit::Hearts, Rank::Three),
            card(Suit::Clubs, Rank::Nine),
            card(Suit::Hearts, Rank::Ten),
        ],
    );
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.split(&mut events).expect("split");
    run.double_down(&mut events).expect("double first hand");
    {
        let split: &SplitState = run.split.as_ref().expect("split state");
        assert_eq!(split.active, 1);
        assert_eq!(split.doubled, [true, false]);
    }
    // Doubling the first hand leaves the second free to double.
    assert!(run.can_double_down());
    run.double_down(&mut events).expect("double second hand");
    let split = run.split.as_ref().expect("split state");
    assert_eq!(split.doubled, [true, true]);
    assert_eq!(split.bets, [20, 20]);
    // 19 and 21 both beat the dealer's 17 at doubled stakes.
    assert_eq!(run.state.chips, 90);
    assert_eq!(run.stats.doubles_played, 2);
}

#[test]
fn drawing_a_poisoned_card_costs_chips_once() {
    let mut run = new_run(21);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Diamonds, Rank::Two),
        ],
    );
    run.poisoned_cards.push((Suit::Diamonds, Rank::Two, 3));
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.hit(&mut events).expect("hit");
    assert_eq!(run.state.chips, 47);
    // The poison is spent with the card.
    assert!(run.poisoned_cards.is_empty());
    assert_eq!(run.state.phase, Phase::PlayerTurn);
}

#[test]
fn cursed_ace_never_counts_eleven() {
    let mut run = new_run(22);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Diamonds, Rank::Ace),
        ],
    );
    run.cursed_ace = Some(Suit::Diamonds);
    bet_and_deal(&mut run, 10);
    let mut events = EventBus::default();
    run.hit(&mut events).expect("hit");
    // A free ace would make 21 and auto-stand; the cursed one is hard 1.
    assert_eq!(run.player_total().total, 11);
    assert_eq!(run.state.phase, Phase::PlayerTurn);
}

#[test]
fn reset_hand_returns_to_betting() {
    let mut run = new_run(15);
    stack(
        &mut run,
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Diamonds, Rank::Ten),
        ],
    );
    bet_and_deal(&mut run, 5);
    let mut events = EventBus::default();
    run.stand(&mut events).expect("stand");
    run.reset_hand(&mut events).expect("reset");
    assert_eq!(run.state.phase, Phase::Betting);
    assert!(run.player_hand.is_empty());
    assert!(run.dealer_hand.is_empty());
    assert_eq!(run.state.current_bet, 0);
    // The lean pile was rebuilt back above the regen threshold.
    assert!(run.deck.len() >= 10);
}
