//! The static verb vocabulary.
//!
//! Maps player-typed verb synonyms to canonical verbs and their intents.
//! A verb may carry more than one intent ("break" is both mung and attack;
//! "pull" may turn out to mean move) — the dispatcher tries them in order.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Canonical meanings a verb can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    Move,
    Look,
    Examine,
    Take,
    Drop,
    Put,
    Open,
    Close,
    Lock,
    Unlock,
    Read,
    Light,
    Extinguish,
    Attack,
    Throw,
    Give,
    Tell,
    Ask,
    Listen,
    Push,
    Pull,
    MoveObject,
    Mung,
    Climb,
    Inventory,
    Wait,
    Save,
    Restore,
    Quit,
}

impl Intent {
    /// Meta intents manage the session rather than the world: they charge
    /// no move and tick no daemons.
    pub fn is_meta(self) -> bool {
        matches!(self, Intent::Save | Intent::Restore | Intent::Quit)
    }
}

/// One vocabulary entry.
#[derive(Debug, Clone, Copy)]
pub struct VerbEntry {
    pub canonical: &'static str,
    pub intents: &'static [Intent],
}

macro_rules! verbs {
    ($($($syn:literal)|+ => $canonical:literal : [$($intent:ident),+]);+ $(;)?) => {{
        let mut table = HashMap::new();
        $(
            let entry = VerbEntry {
                canonical: $canonical,
                intents: &[$(Intent::$intent),+],
            };
            $(table.insert($syn, entry);)+
        )+
        table
    }};
}

lazy_static! {
    /// Synonym -> entry. All keys are lowercase.
    pub static ref VERB_TABLE: HashMap<&'static str, VerbEntry> = verbs! {
        "go" | "walk" | "run" | "travel" | "head" | "proceed" => "go": [Move];
        "look" | "l" | "gaze" | "stare" => "look": [Look];
        "examine" | "x" | "inspect" | "describe" => "examine": [Examine];
        "take" | "get" | "grab" | "hold" | "carry" => "take": [Take];
        "drop" | "release" | "discard" => "drop": [Drop];
        "put" | "place" | "insert" | "stuff" => "put": [Put];
        "open" => "open": [Open];
        "close" | "shut" => "close": [Close];
        "lock" => "lock": [Lock];
        "unlock" => "unlock": [Unlock];
        "read" | "peruse" | "skim" => "read": [Read];
        "light" | "ignite" | "kindle" => "light": [Light];
        "extinguish" | "douse" | "snuff" => "extinguish": [Extinguish];
        "attack" | "kill" | "fight" | "stab" | "slay" | "hit" | "strike" => "attack": [Attack];
        "throw" | "hurl" | "toss" | "chuck" => "throw": [Throw];
        "give" | "hand" | "donate" | "offer" => "give": [Give];
        "tell" | "inform" => "tell": [Tell];
        "ask" | "question" | "query" => "ask": [Ask];
        "listen" | "hear" => "listen": [Listen];
        "push" | "press" | "shove" | "nudge" => "push": [Push];
        "pull" | "tug" | "yank" => "pull": [Pull, MoveObject];
        "move" | "shift" | "slide" | "disturb" => "move": [MoveObject, Push];
        "break" | "mung" | "rip" | "smash" | "destroy" | "tear" => "break": [Mung, Attack];
        "climb" | "scale" | "ascend" => "climb": [Climb];
        "inventory" | "i" | "inv" => "inventory": [Inventory];
        "wait" | "z" | "linger" => "wait": [Wait];
        "save" => "save": [Save];
        "restore" | "load" => "restore": [Restore];
        "quit" | "q" => "quit": [Quit];
    };
}

/// Look a verb token up, resolving the "turn X on" / "switch off X" particle
/// forms: when `token` is "turn" or "switch", the caller passes the command's
/// remaining tokens so the on/off particle can be consumed.
pub fn lookup_verb(token: &str) -> Option<VerbEntry> {
    VERB_TABLE.get(token).copied()
}

/// Entry for a device-toggle verb once its particle is known.
pub fn toggle_entry(on: bool) -> VerbEntry {
    if on {
        VerbEntry {
            canonical: "turn on",
            intents: &[Intent::Light],
        }
    } else {
        VerbEntry {
            canonical: "turn off",
            intents: &[Intent::Extinguish],
        }
    }
}

/// Verbs whose head token needs an on/off particle ("turn", "switch").
pub fn is_toggle_verb(token: &str) -> bool {
    matches!(token, "turn" | "switch")
}

/// Object-phrase prepositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preposition {
    In,
    On,
    With,
    Under,
    Through,
    From,
    To,
    At,
    About,
}

impl Preposition {
    pub fn from_token(token: &str) -> Option<Preposition> {
        use Preposition::*;
        let prep = match token {
            "in" | "into" | "inside" => In,
            "on" | "onto" | "upon" => On,
            "with" | "using" => With,
            "under" | "beneath" | "below" => Under,
            "through" => Through,
            "from" => From,
            "to" => To,
            "at" => At,
            "about" => About,
            _ => return None,
        };
        Some(prep)
    }
}

/// Articles and filler dropped before parsing.
pub fn is_stop_word(token: &str) -> bool {
    matches!(token, "the" | "a" | "an" | "some" | "please")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_share_an_entry() {
        let take = lookup_verb("take").unwrap();
        let get = lookup_verb("get").unwrap();
        assert_eq!(take.canonical, "take");
        assert_eq!(get.canonical, "take");
        assert_eq!(take.intents, &[Intent::Take]);
    }

    #[test]
    fn multi_intent_verbs_list_in_priority_order() {
        let break_entry = lookup_verb("mung").unwrap();
        assert_eq!(break_entry.intents, &[Intent::Mung, Intent::Attack]);
        let pull = lookup_verb("pull").unwrap();
        assert_eq!(pull.intents, &[Intent::Pull, Intent::MoveObject]);
    }

    #[test]
    fn unknown_verbs_miss() {
        assert!(lookup_verb("defenestrate").is_none());
    }

    #[test]
    fn toggle_verbs_resolve_by_particle() {
        assert!(is_toggle_verb("turn"));
        assert!(is_toggle_verb("switch"));
        assert!(!is_toggle_verb("take"));
        assert_eq!(toggle_entry(true).canonical, "turn on");
        assert_eq!(toggle_entry(true).intents, &[Intent::Light]);
        assert_eq!(toggle_entry(false).intents, &[Intent::Extinguish]);
    }

    #[test]
    fn prepositions_parse_with_synonyms() {
        assert_eq!(Preposition::from_token("into"), Some(Preposition::In));
        assert_eq!(Preposition::from_token("using"), Some(Preposition::With));
        assert_eq!(Preposition::from_token("about"), Some(Preposition::About));
        assert_eq!(Preposition::from_token("lantern"), None);
    }

    #[test]
    fn meta_intents_are_flagged() {
        assert!(Intent::Save.is_meta());
        assert!(Intent::Quit.is_meta());
        assert!(!Intent::Take.is_meta());
    }
}
