use cuties_gameplay::prelude::*;

struct Run {
    reducer: Reducer<'static>,
    state: GameState,
    tick: u64,
}

impl Run {
    fn new() -> Self {
        Self {
            reducer: Reducer::standard(),
            state: GameState::new_at(0),
            tick: 0,
        }
    }

    fn apply(&mut self, line: &str) -> &GameState {
        let action = Action::parse_with(line, self.reducer.catalog()).expect("valid action line");
        self.tick += 1;
        self.state = self.reducer.reduce_at(&self.state, &action, self.tick);
        &self.state
    }

    fn apply_all(&mut self, lines: &[&str]) -> &GameState {
        for line in lines {
            self.apply(line);
        }
        &self.state
    }

    fn last_message(&self) -> &str {
        &self.state.log().latest().expect("journal never empty").message
    }
}

/// Asserts that only the journal differs between two states.
fn assert_only_log_changed(before: &GameState, after: &GameState) {
    assert_eq!(after.location(), before.location());
    assert_eq!(after.coins(), before.coins());
    assert_eq!(after.inventory(), before.inventory());
    assert_eq!(
        after.boss_kills().collect::<Vec<_>>(),
        before.boss_kills().collect::<Vec<_>>()
    );
    assert_eq!(after.relationships(), before.relationships());
    assert_eq!(after.log().len(), before.log().len() + 1);
}

#[test]
fn test_buy_starter_token_from_fresh_run() {
    let mut run = Run::new();
    let state = run.apply_all(&["go sarah", "craft sarah_buy_wound_feet"]).clone();
    assert_eq!(state.coins(), 150);
    assert_eq!(state.inventory().iter().collect::<Vec<_>>(), vec![(ItemId::WoundFeet, 1)]);
    assert_eq!(run.last_message(), "Crafted Wound's Feet (cost: 100 coins).");
}

#[test]
fn test_first_boss_from_fresh_run() {
    let mut run = Run::new();
    let state = run.apply("fight wound").clone();
    assert_eq!(state.coins(), 430);
    assert_eq!(state.item_count(ItemId::WoundFeet), 1);
    assert_eq!(state.kills(BossId::Wound), 1);
    assert_eq!(run.last_message(), "Won vs Wound. +180 coins. Drops: Wound's Feet x1.");
}

#[test]
fn test_wrong_station_only_logs() {
    let mut run = Run::new();
    let before = run.apply_all(&["fight wound", "go sarah"]).clone();
    let after = run.apply("craft sam_craft_spear").clone();
    assert_only_log_changed(&before, &after);
    assert_eq!(run.last_message(), "Can't craft here. Go to Sam's Weaponry.");
}

#[test]
fn test_decompose_unheld_item_only_logs() {
    let mut run = Run::new();
    let before = run.apply("go sam").clone();
    let after = run.apply("decompose spear").clone();
    assert_only_log_changed(&before, &after);
    assert_eq!(run.last_message(), "You don't have Spear to decompose.");
}

#[test]
fn test_locked_boss_only_logs() {
    let mut run = Run::new();
    let before = run.apply("fight wound").clone();
    let after = run.apply("fight shiver_fever").clone();
    assert_only_log_changed(&before, &after);
    assert_eq!(run.last_message(), "Can't fight Shiver & Fever. Defeat Toxic first.");
}

#[test]
fn test_craft_then_decompose_restores_ingredients() {
    let mut run = Run::new();
    let before = run.apply_all(&["fight wound", "go sarah"]).clone();
    run.apply("craft sarah_craft_toxic_tongue");
    let after = run.apply("decompose toxic_tongue").clone();

    assert_eq!(after.item_count(ItemId::WoundFeet), before.item_count(ItemId::WoundFeet));
    assert_eq!(after.item_count(ItemId::ToxicTongue), 0);
    assert_eq!(after.coins(), before.coins() - 200);
    assert_eq!(
        run.last_message(),
        "Decomposed Toxic's Tongue \u{2192} returned: Wound's Feet x1. (Coins not returned)"
    );
}

#[test]
fn test_bonus_does_not_return_after_rank_item_is_spent() {
    let mut run = Run::new();
    let state = run
        .apply_all(&[
            "fight wound",
            "fight toxic",
            "fight shiver_fever",
            "fight disease",
            "fight disease",
        ])
        .clone();
    assert_eq!(state.coins(), 1830);
    assert_eq!(state.item_count(ItemId::WoodenPole), 1);
    assert_eq!(state.relationship_level(Npc::Sarah), 1);

    let state = run.apply_all(&["go sam", "craft sam_craft_spear"]).clone();
    assert_eq!(state.item_count(ItemId::WoodenPole), 0);
    assert_eq!(state.item_count(ItemId::Spear), 1);

    let state = run.apply_all(&["go arena", "fight disease"]).clone();
    assert_eq!(state.kills(BossId::Disease), 3);
    assert_eq!(state.item_count(ItemId::WoodenPole), 0);
    assert_eq!(state.relationship_level(Npc::Sarah), 1);
}

#[test]
fn test_full_run_to_helbard() {
    let mut run = Run::new();
    run.apply_all(&[
        "fight wound",
        "fight toxic",
        "fight shiver_fever",
        "fight disease",
        "fight disease",
        "go sam",
        "craft sam_craft_spear",
        "go arena",
        "fight wound",
        "go sarah",
        "craft sarah_craft_wooden_pole",
    ]);
    assert_eq!(
        run.last_message(),
        "Crafted Wooden Pole (cost: 300 coins)."
    );
    assert_eq!(
        run.state.log().get(1).map(|e| e.message.as_str()),
        Some("Crafted NPC Rank Item: Wooden Pole. Sarah relationship +1.")
    );
    assert_eq!(run.state.relationship_level(Npc::Sarah), 2);

    let state = run
        .apply_all(&[
            "go sam",
            "craft sam_craft_axe",
            "go arena",
            "fight shiver_fever",
            "fight wound",
            "go sam",
            "craft sam_craft_helbard",
        ])
        .clone();
    assert_eq!(state.coins(), 110);
    assert_eq!(state.item_count(ItemId::Helbard), 1);
    assert_eq!(
        inventory_list(&state),
        vec![
            (ItemId::FeverFang, 2),
            (ItemId::Helbard, 1),
            (ItemId::ToxicTongue, 1),
            (ItemId::WoundFeet, 1),
        ]
    );
    assert_eq!(narrative_stage(&state), "Act I \u{2192} Disease confronted");

    let state = run.apply("decompose helbard").clone();
    assert_eq!(state.coins(), 110);
    assert_eq!(state.item_count(ItemId::Helbard), 0);
    assert_eq!(state.item_count(ItemId::Spear), 1);
    assert_eq!(state.item_count(ItemId::Axe), 1);
    assert_eq!(state.item_count(ItemId::ShiverWing), 1);
}

#[test]
fn test_reset_after_progress() {
    let mut run = Run::new();
    run.apply_all(&["fight wound", "go sarah", "craft sarah_craft_toxic_tongue"]);
    let state = run.apply("reset").clone();
    assert_eq!(state, GameState::reset_at(run.tick));
    assert_eq!(state.log().messages().collect::<Vec<_>>(), vec![RESET_MESSAGE]);
}

#[test]
fn test_journal_keeps_newest_thirty() {
    let mut run = Run::new();
    for _ in 0..40 {
        run.apply("go sarah");
    }
    assert_eq!(run.state.log().len(), JOURNAL_CAPACITY);
    assert!(run.state.log().messages().all(|m| m == "Moved to Sarah's Lab."));
}
