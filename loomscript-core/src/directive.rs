//! Animation clauses that follow a character name.
//!
//! `Character: Emma - Enters Left - 2nd Dialogue - Delay 300ms`
//!
//! Every clause is tested against [`RULES`] top to bottom and the first rule
//! that matches (and accepts the clause) applies its effect; a clause never
//! contributes more than one effect. Precedence is entrance kind, exit kind,
//! timing, delay. Inside the timing group the exit-anchored ordinals
//! (`Exit On 4th Dialogue`) are tried before the entrance ordinals because
//! they are strictly more specific, and the actor-relative form
//! (`1st Dialogue of @Emma`) is tried before the plain one.
//!
//! Words are matched as case-insensitive substrings. Clauses nothing matches
//! are ignored.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ast::{AnimationSpec, EnterTrigger, EntranceKind, ExitKind, ExitTrigger};

pub const CLAUSE_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Entrance,
    Exit,
    EnterTiming,
    ExitTiming,
    Delay,
}

enum Pattern {
    Words(&'static [&'static str]),
    Re(Regex),
}

type Effect = fn(&mut AnimationSpec, Option<&Captures>) -> bool;

pub struct Rule {
    pub category: Category,
    pattern: Pattern,
    apply: Effect,
}

impl Rule {
    fn words(category: Category, words: &'static [&'static str], apply: Effect) -> Self {
        Rule { category, pattern: Pattern::Words(words), apply }
    }

    fn re(category: Category, re: &str, apply: Effect) -> Self {
        let re = Regex::new(re).unwrap_or_else(|e| panic!("invalid clause pattern {:?}: {}", re, e));
        Rule { category, pattern: Pattern::Re(re), apply }
    }

    /// Apply this rule to `clause`. `lower` is the lowercased clause.
    fn try_apply(&self, spec: &mut AnimationSpec, clause: &str, lower: &str) -> bool {
        match &self.pattern {
            Pattern::Words(words) => words.iter().any(|w| lower.contains(w)) && (self.apply)(spec, None),
            Pattern::Re(re) => match re.captures(clause) {
                Some(caps) => (self.apply)(spec, Some(&caps)),
                None => false,
            },
        }
    }
}

fn capture_usize(caps: Option<&Captures>, group: usize) -> Option<usize> {
    caps?.get(group)?.as_str().parse().ok()
}

fn capture_name(caps: Option<&Captures>, group: usize) -> Option<String> {
    let name = caps?.get(group)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

pub static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use Category::*;
    vec![
        Rule::words(Entrance, &["enters left", "enter left"], |s, _| {
            s.entrance.kind = EntranceKind::SlideFromLeft;
            true
        }),
        Rule::words(Entrance, &["enters right", "enter right"], |s, _| {
            s.entrance.kind = EntranceKind::SlideFromRight;
            true
        }),
        Rule::words(Entrance, &["enters up", "enter up"], |s, _| {
            s.entrance.kind = EntranceKind::SlideUp;
            true
        }),
        Rule::words(Entrance, &["enters down", "enter down"], |s, _| {
            s.entrance.kind = EntranceKind::SlideDown;
            true
        }),
        Rule::words(Entrance, &["fade in", "enters fade", "enter fade"], |s, _| {
            s.entrance.kind = EntranceKind::FadeIn;
            true
        }),
        Rule::words(Exit, &["exit left", "exits left"], |s, _| {
            s.exit.kind = ExitKind::SlideToLeft;
            true
        }),
        Rule::words(Exit, &["exit right", "exits right"], |s, _| {
            s.exit.kind = ExitKind::SlideToRight;
            true
        }),
        Rule::words(Exit, &["exit up", "exits up"], |s, _| {
            s.exit.kind = ExitKind::SlideUp;
            true
        }),
        Rule::words(Exit, &["exit down", "exits down"], |s, _| {
            s.exit.kind = ExitKind::SlideDown;
            true
        }),
        Rule::words(Exit, &["exit fade", "exits fade", "fade out"], |s, _| {
            s.exit.kind = ExitKind::FadeOut;
            true
        }),
        Rule::re(
            ExitTiming,
            r"(?i)\bexits?\s+(?:on|at|after)\s+(\d+)(?:st|nd|rd|th)\s+dialogue\s+of\s+@(.+)$",
            |s, caps| {
                let (Some(n), Some(name)) = (capture_usize(caps, 1), capture_name(caps, 2)) else {
                    return false;
                };
                if n == 0 {
                    return false;
                }
                s.timing.exit_on = ExitTrigger::CharacterDialogue;
                s.timing.exit_character_name = Some(name);
                s.timing.exit_character_dialogue_index = Some(n);
                true
            },
        ),
        Rule::re(
            ExitTiming,
            r"(?i)\bexits?\s+(?:on|at|after)\s+(\d+)(?:st|nd|rd|th)\s+dialogue\b",
            |s, caps| {
                let Some(index) = capture_usize(caps, 1).and_then(|n| n.checked_sub(1)) else {
                    return false;
                };
                s.timing.exit_on = ExitTrigger::SpecificDialogue;
                s.timing.exit_dialogue_index = Some(index);
                true
            },
        ),
        Rule::words(EnterTiming, &["beginning of scene", "scene start"], |s, _| {
            s.timing.enter_on = EnterTrigger::SceneStart;
            true
        }),
        Rule::re(
            EnterTiming,
            r"(?i)\b(\d+)(?:st|nd|rd|th)\s+dialogue\s+of\s+@(.+)$",
            |s, caps| {
                let (Some(n), Some(name)) = (capture_usize(caps, 1), capture_name(caps, 2)) else {
                    return false;
                };
                if n == 0 {
                    return false;
                }
                s.timing.enter_on = EnterTrigger::CharacterDialogue;
                s.timing.trigger_character_name = Some(name);
                s.timing.trigger_character_dialogue_index = Some(n);
                true
            },
        ),
        Rule::re(EnterTiming, r"(?i)\b(?:first|1st)\s+dialogue\b", |s, _| {
            s.timing.enter_on = EnterTrigger::FirstDialogue;
            true
        }),
        Rule::re(EnterTiming, r"(?i)\b(\d+)(?:st|nd|rd|th)\s+dialogue\b", |s, caps| {
            let Some(index) = capture_usize(caps, 1).and_then(|n| n.checked_sub(1)) else {
                return false;
            };
            s.timing.enter_on = EnterTrigger::SpecificDialogue;
            s.timing.trigger_dialogue_index = Some(index);
            true
        }),
        Rule::words(ExitTiming, &["scene end", "end of scene"], |s, _| {
            s.timing.exit_on = ExitTrigger::SceneEnd;
            true
        }),
        Rule::words(ExitTiming, &["last dialogue"], |s, _| {
            s.timing.exit_on = ExitTrigger::LastDialogue;
            true
        }),
        Rule::re(Delay, r"(?i)\bdelay\s+(\d+)\s*ms\b", |s, caps| {
            let Some(ms) = capture_usize(caps, 1).and_then(|n| u32::try_from(n).ok()) else {
                return false;
            };
            s.entrance.delay_ms = ms;
            true
        }),
    ]
});

/// Apply a single clause to `spec`, returning the category of the rule that
/// took it, if any.
pub fn apply_clause(spec: &mut AnimationSpec, clause: &str) -> Option<Category> {
    let clause = clause.trim();
    let lower = clause.to_lowercase();
    let rule = RULES.iter().find(|r| r.try_apply(spec, clause, &lower))?;
    Some(rule.category)
}

/// Build an [`AnimationSpec`] from the clauses after the character name.
pub fn parse_clauses<'c>(clauses: impl IntoIterator<Item = &'c str>) -> AnimationSpec {
    let mut spec = AnimationSpec::default();
    for clause in clauses {
        if apply_clause(&mut spec, clause).is_none() {
            log::debug!("ignoring animation clause {:?}", clause);
        }
    }
    spec
}

/// Split a `Character:` body into the character name and its animation.
pub fn parse_character_directive(body: &str) -> (String, AnimationSpec) {
    let mut parts = body.split(CLAUSE_SEPARATOR).map(str::trim);
    let name = parts.next().unwrap_or_default().to_string();
    (name, parse_clauses(parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_effect_per_clause() {
        let mut spec = AnimationSpec::default();
        // "enters left" wins, the ordinal in the same clause is not applied
        assert_eq!(apply_clause(&mut spec, "Enters Left 3rd Dialogue"), Some(Category::Entrance));
        assert_eq!(spec.entrance.kind, EntranceKind::SlideFromLeft);
        assert_eq!(spec.timing.enter_on, EnterTrigger::SceneStart);
    }

    #[test]
    fn zeroth_dialogue_is_ignored() {
        let mut spec = AnimationSpec::default();
        assert_eq!(apply_clause(&mut spec, "0th Dialogue"), None);
        assert_eq!(spec, AnimationSpec::default());
    }

    #[test]
    fn twenty_first_is_not_first() {
        let mut spec = AnimationSpec::default();
        apply_clause(&mut spec, "21st Dialogue");
        assert_eq!(spec.timing.enter_on, EnterTrigger::SpecificDialogue);
        assert_eq!(spec.timing.trigger_dialogue_index, Some(20));
    }
}
