//! Command parsing.
//!
//! Turns one line of input plus the current world state into a [`Command`]:
//! tokenize, resolve the verb, scan for a direction, partition the rest into
//! object phrases at the first preposition, then bind each phrase against
//! what the player can currently see and hold.
//!
//! Binding scores candidates (exact noun > synonym > partial; every
//! adjective must match) and breaks ties by containment closeness —
//! inventory beats the room, the room beats local scenery. An unresolvable
//! tie surfaces as a disambiguation question; parse failures never charge
//! the player a move.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::{Command, EntityRef, Universal};
use crate::ids::{Direction, ItemId};
use crate::item::{Item, ItemFlag};
use crate::vis::{held_visible_items, visible_items_at};
use crate::vocab::{
    Intent, Preposition, VerbEntry, is_stop_word, is_toggle_verb, lookup_verb, toggle_entry,
};
use crate::world::GameState;

/// One possible referent surfaced by a disambiguation question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: ItemId,
    pub name: String,
}

/// Why a line failed to parse. None of these charge a move.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown verb '{0}'")]
    UnknownVerb(String),
    #[error("could not make sense of '{0}'")]
    NotUnderstood(String),
    #[error("ambiguous reference '{noun}'")]
    Disambiguate { noun: String, candidates: Vec<Candidate> },
}

/// Most recent referents, for "it" and "them".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pronouns {
    pub it: Option<EntityRef>,
    pub them: Option<EntityRef>,
}

impl Pronouns {
    /// Record a successful reference so the next "it"/"them" lands on it.
    pub fn note(&mut self, entity: &EntityRef, plural: bool) {
        if plural {
            self.them = Some(entity.clone());
        } else {
            self.it = Some(entity.clone());
        }
    }
}

/// Parse one line against the current state.
pub fn parse(input: &str, state: &GameState, pronouns: &Pronouns) -> Result<Command, ParseError> {
    let raw_tokens: Vec<String> = input
        .to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation()).to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let tokens: Vec<String> = raw_tokens
        .iter()
        .filter(|t| !is_stop_word(t))
        .cloned()
        .collect();

    if tokens.is_empty() {
        return Err(ParseError::NotUnderstood(input.trim().to_string()));
    }

    // a bare direction is a movement command
    if tokens.len() == 1
        && let Some(dir) = Direction::from_token(&tokens[0])
    {
        return Ok(Command::movement(dir, raw_tokens));
    }

    let head = tokens[0].clone();
    let mut rest: Vec<String> = tokens[1..].to_vec();

    let entry = resolve_verb(&head, &mut rest)?;
    debug!("verb '{head}' -> '{}' {:?}", entry.canonical, entry.intents);

    // movement verb followed by a direction ("go north", "walk east"),
    // or a climb with a vertical direction ("climb up")
    if let Some(first) = rest.first()
        && let Some(dir) = Direction::from_token(first)
    {
        if entry.intents.contains(&Intent::Move) {
            return Ok(Command::movement(dir, raw_tokens));
        }
        if entry.canonical == "climb" {
            return Ok(Command {
                verb: entry.canonical.to_string(),
                intents: vec![Intent::Climb, Intent::Move],
                direction: Some(dir),
                direct: None,
                preposition: None,
                indirect: None,
                raw_tokens,
            });
        }
    }

    // partition the object phrase(s) at the first preposition
    let mut preposition = None;
    let mut direct_tokens: Vec<String> = Vec::new();
    let mut indirect_tokens: Vec<String> = Vec::new();
    for token in rest {
        if preposition.is_none()
            && let Some(prep) = Preposition::from_token(&token)
        {
            preposition = Some(prep);
            continue;
        }
        if preposition.is_none() {
            direct_tokens.push(token);
        } else {
            indirect_tokens.push(token);
        }
    }

    // "look at mailbox", "listen to song": the lone phrase after the
    // preposition is the direct object
    if direct_tokens.is_empty() && !indirect_tokens.is_empty() {
        direct_tokens = std::mem::take(&mut indirect_tokens);
    }

    let direct = resolve_slot(&direct_tokens, state, pronouns)?;
    let indirect = resolve_slot(&indirect_tokens, state, pronouns)?;

    // "look" with a target is an examine
    let intents = if entry.canonical == "look" && direct.is_some() {
        vec![Intent::Examine]
    } else {
        entry.intents.to_vec()
    };

    Ok(Command {
        verb: entry.canonical.to_string(),
        intents,
        direction: None,
        direct,
        preposition,
        indirect,
        raw_tokens,
    })
}

fn resolve_verb(head: &str, rest: &mut Vec<String>) -> Result<VerbEntry, ParseError> {
    if is_toggle_verb(head) {
        if let Some(pos) = rest.iter().position(|t| t == "on" || t == "off") {
            let on = rest[pos] == "on";
            rest.remove(pos);
            return Ok(toggle_entry(on));
        }
        // "turn crank" with no particle reads as a physical manipulation
        return Ok(VerbEntry {
            canonical: "turn",
            intents: &[Intent::MoveObject, Intent::Push],
        });
    }
    lookup_verb(head).ok_or_else(|| ParseError::UnknownVerb(head.to_string()))
}

fn resolve_slot(
    tokens: &[String],
    state: &GameState,
    pronouns: &Pronouns,
) -> Result<Option<EntityRef>, ParseError> {
    if tokens.is_empty() {
        return Ok(None);
    }
    resolve_phrase(tokens, state, pronouns).map(Some)
}

/// Containment closeness; lower binds tighter.
const RANK_INVENTORY: u8 = 0;
const RANK_ROOM: u8 = 1;
const RANK_SCENERY: u8 = 2;

fn resolve_phrase(
    tokens: &[String],
    state: &GameState,
    pronouns: &Pronouns,
) -> Result<EntityRef, ParseError> {
    let phrase = tokens.join(" ");

    // pronouns bind to the most recent matching referent
    if tokens.len() == 1 {
        match tokens[0].as_str() {
            "it" => {
                return pronouns
                    .it
                    .clone()
                    .ok_or_else(|| ParseError::NotUnderstood(phrase.clone()));
            },
            "them" => {
                return pronouns
                    .them
                    .clone()
                    .ok_or_else(|| ParseError::NotUnderstood(phrase.clone()));
            },
            _ => {},
        }
    }

    let (adjectives, noun) = tokens.split_at(tokens.len() - 1);
    let noun = noun[0].as_str();

    let mut best_score = 0u8;
    let mut best: Vec<(ItemId, u8)> = Vec::new(); // (id, rank)
    for (id, rank) in candidate_scope(state) {
        let Some(item) = state.items.get(&id) else { continue };
        let score = score_noun(item, noun);
        if score == 0 || !adjectives_match(item, adjectives) {
            continue;
        }
        if score > best_score {
            best_score = score;
            best.clear();
        }
        if score == best_score {
            best.push((id, rank));
        }
    }

    if !best.is_empty() {
        let top_rank = best.iter().map(|(_, r)| *r).min().unwrap_or(RANK_SCENERY);
        let mut top: Vec<ItemId> = best
            .into_iter()
            .filter(|(_, r)| *r == top_rank)
            .map(|(id, _)| id)
            .collect();
        if top.len() == 1 {
            return Ok(EntityRef::Item(top.remove(0)));
        }
        let candidates = top
            .into_iter()
            .filter_map(|id| {
                state.items.get(&id).map(|item| Candidate {
                    id: item.id.clone(),
                    name: item.name.clone(),
                })
            })
            .collect();
        return Err(ParseError::Disambiguate {
            noun: noun.to_string(),
            candidates,
        });
    }

    // universals always resolve, but real items shadow them
    if adjectives.is_empty()
        && let Some(universal) = Universal::from_token(noun)
    {
        if universal == Universal::Me {
            return Ok(EntityRef::Player);
        }
        return Ok(EntityRef::Universal(universal));
    }

    Err(ParseError::NotUnderstood(phrase))
}

/// Everything the player could mean right now, deduplicated at the
/// closest containment rank.
fn candidate_scope(state: &GameState) -> Vec<(ItemId, u8)> {
    let mut scope: Vec<(ItemId, u8)> = Vec::new();
    let mut push = |id: ItemId, rank: u8| {
        if !scope.iter().any(|(seen, _)| *seen == id) {
            scope.push((id, rank));
        }
    };
    for id in held_visible_items(state) {
        push(id, RANK_INVENTORY);
    }
    for id in visible_items_at(state, &state.player.location) {
        push(id, RANK_ROOM);
    }
    if let Ok(here) = state.location(&state.player.location) {
        for id in &here.local_globals {
            if state.items.get(id).is_some_and(|i| !i.has(ItemFlag::Invisible)) {
                push(id.clone(), RANK_SCENERY);
            }
        }
    }
    scope
}

/// Exact name match beats synonym beats partial word match.
fn score_noun(item: &Item, noun: &str) -> u8 {
    let name = item.name.to_lowercase();
    if name == noun || name.split_whitespace().last() == Some(noun) {
        return 3;
    }
    if item.synonyms.iter().any(|s| s.to_lowercase() == noun) {
        return 2;
    }
    if name.split_whitespace().any(|w| w.starts_with(noun))
        || item.synonyms.iter().any(|s| s.to_lowercase().starts_with(noun))
    {
        return 1;
    }
    0
}

/// Every adjective in the phrase must match a declared adjective or a word
/// of the item's name.
fn adjectives_match(item: &Item, adjectives: &[String]) -> bool {
    adjectives.iter().all(|adj| {
        item.adjectives.iter().any(|a| a.to_lowercase() == adj.as_str())
            || item
                .name
                .to_lowercase()
                .split_whitespace()
                .any(|w| w == adj.as_str())
    })
}
