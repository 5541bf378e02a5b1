//! Gate Guard example — two NPCs sharing global variables.
//!
//! The player is rude to the gate guard; the innkeeper down the road has
//! heard about it. Options are picked from a fixed list instead of stdin.
//!
//! Run with: cargo run --example gate_guard

use dialogue_engine::core::conversation::Conversation;
use dialogue_engine::core::script::Script;
use dialogue_engine::core::variables::GlobalVariables;
use dialogue_engine::schema::speaker::{NpcId, Speaker};
use std::collections::VecDeque;
use std::path::Path;

fn main() {
    let globals = GlobalVariables::new();

    // --- Gate guard, loaded from the test fixture ---
    let guard_script = Script::load(Path::new("tests/fixtures/gate_guard.ron"))
        .expect("Failed to load gate guard script");
    let mut guard = Conversation::builder()
        .speaker(Speaker::new(NpcId(1), "Guard"))
        .globals(globals.clone())
        .handler(print_action)
        .build(&guard_script)
        .expect("Failed to build guard conversation");

    play(&mut guard, [1, 0]);

    // --- Innkeeper, written inline ---
    let inn_script = Script::from_json(
        r#"{
            "entry": [
                "Welcome to the Prancing Stag! !amused",
                "> Heard anything about me? @gossip",
                "> Just a room, please. !give key"
            ],
            "gossip": [
                "Word is you mouthed off to the guard. !set warned",
                "> Word travels fast. !end"
            ]
        }"#,
    )
    .expect("Failed to parse innkeeper script");
    let mut innkeeper = Conversation::builder()
        .speaker(Speaker::new(NpcId(2), "Innkeeper"))
        .globals(globals.clone())
        .handler(print_action)
        .build(&inn_script)
        .expect("Failed to build innkeeper conversation");

    // Picks an option based on a global set by the other conversation.
    let rude = innkeeper.variable("$rude").is_some();
    play(&mut innkeeper, [if rude { 0 } else { 1 }, 0]);

    println!("\n--- Variables ---");
    println!("$rude   = {:?}", globals.get("$rude"));
    println!("warned  = {:?}", innkeeper.variable("warned"));
    println!("guard sees 'warned'? {:?}", guard.variable("warned"));
}

fn print_action(verb: &str, speaker: &Speaker, args: &[String]) {
    println!("    ({} does '{}' {:?})", speaker.name, verb, args);
}

fn play<const N: usize>(conversation: &mut Conversation, picks: [usize; N]) {
    let mut picks: VecDeque<usize> = picks.into_iter().collect();
    let name = conversation.speaker().name.clone();
    println!("\n=== {} ===", name);

    while let Some(turn) = conversation.next_interaction() {
        if let Some(line) = &turn.npc_line {
            conversation.execute_before_line(line);
            println!("{}: {}", name, line.text().replace('\n', "\n    "));
            conversation
                .execute(line)
                .expect("Script refers to a missing state");
        }
        if !turn.has_options() || conversation.has_ended() {
            continue;
        }

        let pick = picks.pop_front().unwrap_or(0).min(turn.options.len() - 1);
        let option = &turn.options[pick];
        println!("You: {}", option.text());
        conversation.execute_before_line(option);
        conversation
            .execute(option)
            .expect("Script refers to a missing state");
    }
}
