//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notewall_core` linkage and optional file logging setup.
//! - Walk one note through the comment-privacy tiers with deterministic output.

use notewall_core::{
    core_version, init_logging, AdjacentIdGraph, CommentPrivacy, LoggingConfig, NoteService,
};
use std::error::Error;
use std::process::ExitCode;

const OWNER: u64 = 1;
const FRIEND: u64 = 2;
const FRIEND_OF_FRIEND: u64 = 3;
const STRANGER: u64 = 9;

fn main() -> ExitCode {
    match LoggingConfig::from_env() {
        Ok(Some(config)) => {
            if let Err(err) = init_logging(&config) {
                eprintln!("logging init failed: {err}");
                return ExitCode::FAILURE;
            }
        }
        Ok(None) => {}
        Err(err) => {
            eprintln!("invalid logging config: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("notewall_core version={}", core_version());
    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo() -> Result<(), Box<dyn Error>> {
    let mut service = NoteService::new(AdjacentIdGraph);
    let note_id = service.add(OWNER, "Weekend plans", "Hiking on Saturday")?;
    let first = service.create_comment(FRIEND, note_id, "Count me in", None)?;
    service.create_comment(STRANGER, note_id, "Which trail?", Some(first))?;
    log::info!("event=demo_seeded module=cli status=ok note_id={note_id}");

    for tier in [
        CommentPrivacy::Everyone,
        CommentPrivacy::Friends,
        CommentPrivacy::FriendsOfFriends,
        CommentPrivacy::OwnerOnly,
    ] {
        service.update_note_privacy(note_id, tier)?;
        for actor in [OWNER, FRIEND, FRIEND_OF_FRIEND, STRANGER] {
            let view = service.get_by_id(actor, note_id, OWNER, false)?;
            println!("tier={} actor={actor} {}", tier.tier(), serde_json::to_string(&view)?);
        }
    }

    let comments = service.get_comments(note_id)?;
    println!("comments={}", serde_json::to_string(&comments)?);
    Ok(())
}
