//! Dialogue Preview — play through a dialogue script in the terminal.
//!
//! Usage: dialogue_preview <script.json|script.ron> [--config <path>] [--name <npc>] [--state <name>]
//!
//! Each turn shows the NPC line, then lists the player's options by number.
//! Type the number of an option to pick it, or `q` to quit.
//! Set RUST_LOG=dialogue_engine=debug to watch variables and state changes.

use dialogue_engine::core::config::EngineConfig;
use dialogue_engine::core::conversation::Conversation;
use dialogue_engine::core::script::Script;
use dialogue_engine::schema::speaker::{NpcId, Speaker};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let script_path = args[1].clone();
    let mut config_path = None;
    let mut npc_name = "NPC".to_string();
    let mut start_state = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--name" if i + 1 < args.len() => {
                i += 1;
                npc_name = args[i].clone();
            }
            "--state" if i + 1 < args.len() => {
                i += 1;
                start_state = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let script = match Script::load(Path::new(&script_path)) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("ERROR: Failed to load script: {}", e);
            process::exit(1);
        }
    };

    let config = match config_path {
        Some(ref path) => match EngineConfig::load_from_ron(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: Failed to load config: {}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    println!(
        "Loaded {} states: {}",
        script.len(),
        script.state_names().join(", ")
    );

    let mut conversation = match Conversation::builder()
        .speaker(Speaker::new(NpcId(1), npc_name.clone()))
        .config(config)
        .handler(|verb: &str, _: &Speaker, args: &[String]| {
            if args.is_empty() {
                println!("  [{}]", verb);
            } else {
                println!("  [{} {}]", verb, args.join(" "));
            }
        })
        .build(&script)
    {
        Ok(conversation) => conversation,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if let Some(ref state) = start_state {
        if let Err(e) = conversation.set_state(state) {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    while let Some(turn) = conversation.next_interaction() {
        if let Some(line) = &turn.npc_line {
            conversation.execute_before_line(line);
            for text_line in line.text().lines() {
                println!("{}: {}", npc_name, text_line);
            }
            if let Err(e) = conversation.execute(line) {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        }

        // An `end` on the NPC line closes the conversation before any reply.
        if !turn.has_options() || conversation.has_ended() {
            continue;
        }

        for (n, option) in turn.options.iter().enumerate() {
            let marker = if option.was_visited() { "*" } else { " " };
            println!("{}{}) {}", marker, n + 1, option.text());
        }

        let choice = loop {
            print!("> ");
            stdout.flush().ok();

            let mut input = String::new();
            if stdin.lock().read_line(&mut input).is_err() || input.is_empty() {
                println!();
                return;
            }
            let input = input.trim();
            if input == "q" || input == "quit" {
                println!("Goodbye.");
                return;
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=turn.options.len()).contains(&n) => break n - 1,
                _ => println!("Pick a number between 1 and {}", turn.options.len()),
            }
        };

        let option = &turn.options[choice];
        conversation.execute_before_line(option);
        if let Err(e) = conversation.execute(option) {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }

    println!("\n[conversation over in state '{}']", conversation.current_state());
    let locals = conversation.variables().locals();
    if !locals.is_empty() {
        let mut names: Vec<_> = locals.iter().collect();
        names.sort();
        for (name, value) in names {
            println!("  {} = {}", name, value);
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn print_usage() {
    println!(
        "Usage: dialogue_preview <script.json|script.ron> [--config <path>] [--name <npc>] [--state <name>]"
    );
    println!();
    println!("Plays a dialogue script in the terminal. Pick options by number, 'q' quits.");
}
