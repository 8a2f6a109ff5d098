//! Turn a scene graph back into script text.

use std::fmt::Write;

use rustc_hash::FxHashMap;

use crate::ast::{
    AnimationSpec, ChoiceTarget, EnterTrigger, EntranceKind, ExitKind, ExitTrigger, Scene, SceneActor,
};
use crate::directive::CLAUSE_SEPARATOR;

pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Clauses describing everything in `spec` that differs from the defaults.
pub fn clauses(spec: &AnimationSpec) -> Vec<String> {
    let mut out = Vec::new();
    let t = &spec.timing;

    match spec.entrance.kind {
        EntranceKind::SlideFromLeft => out.push("Enters Left".to_string()),
        EntranceKind::SlideFromRight => out.push("Enters Right".to_string()),
        EntranceKind::SlideUp => out.push("Enters Up".to_string()),
        EntranceKind::SlideDown => out.push("Enters Down".to_string()),
        EntranceKind::FadeIn => {}
    }
    match (t.enter_on, t.trigger_dialogue_index, &t.trigger_character_name) {
        (EnterTrigger::FirstDialogue, ..) => out.push("First Dialogue".to_string()),
        (EnterTrigger::SpecificDialogue, Some(i), _) => out.push(format!("{} Dialogue", ordinal(i + 1))),
        (EnterTrigger::CharacterDialogue, _, Some(name)) => {
            let n = t.trigger_character_dialogue_index.unwrap_or(1);
            out.push(format!("{} Dialogue of @{}", ordinal(n), name));
        }
        _ => {}
    }
    if spec.entrance.delay_ms > 0 {
        out.push(format!("Delay {}ms", spec.entrance.delay_ms));
    }
    match spec.exit.kind {
        ExitKind::SlideToLeft => out.push("Exit Left".to_string()),
        ExitKind::SlideToRight => out.push("Exit Right".to_string()),
        ExitKind::SlideUp => out.push("Exit Up".to_string()),
        ExitKind::SlideDown => out.push("Exit Down".to_string()),
        ExitKind::FadeOut => {}
    }
    match (t.exit_on, t.exit_dialogue_index, &t.exit_character_name) {
        (ExitTrigger::LastDialogue, ..) => out.push("Last Dialogue".to_string()),
        (ExitTrigger::SpecificDialogue, Some(i), _) => out.push(format!("Exit On {} Dialogue", ordinal(i + 1))),
        (ExitTrigger::CharacterDialogue, _, Some(name)) => {
            let n = t.exit_character_dialogue_index.unwrap_or(1);
            out.push(format!("Exit On {} Dialogue of @{}", ordinal(n), name));
        }
        _ => {}
    }
    out
}

fn write_actor(buf: &mut String, actor: &SceneActor) {
    let mut line = actor.character_name.clone();
    for clause in clauses(&actor.animation) {
        line.push_str(CLAUSE_SEPARATOR);
        line.push_str(&clause);
    }
    let _ = writeln!(buf, "Character: {}", line);
}

/// Serialize `scenes` as script text.
///
/// Actor directives are written just before the dialogue line they preceded
/// when parsed, so speakers come back the same way. Choices are written with
/// the target's title; unresolved ones keep the title they were written with.
pub fn write_script(scenes: &[Scene]) -> String {
    let titles: FxHashMap<&str, &str> = scenes.iter().map(|s| (s.id.as_str(), s.title.as_str())).collect();
    let mut buf = String::new();

    for (n, scene) in scenes.iter().enumerate() {
        if n > 0 {
            buf.push('\n');
        }
        let _ = writeln!(buf, "# {}", scene.title);
        if !scene.description.is_empty() {
            let _ = writeln!(buf, "Description: {}", scene.description);
        }

        let mut actors = scene.characters.iter().peekable();
        for (i, line) in scene.dialogue.iter().enumerate() {
            while let Some(actor) = actors.next_if(|a| a.cue <= i) {
                write_actor(&mut buf, actor);
            }
            let _ = writeln!(buf, "Dialogue: {}", line.text);
        }
        for actor in actors {
            write_actor(&mut buf, actor);
        }

        for choice in &scene.choices {
            let target = match &choice.target {
                ChoiceTarget::Scene(id) => titles.get(id.as_str()).copied().unwrap_or(id.as_str()),
                ChoiceTarget::Pending(title) | ChoiceTarget::Unresolved(title) => title.as_str(),
            };
            let _ = writeln!(buf, "Choice: {} → {}", choice.text, target);
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::ordinal;

    #[test]
    fn ordinals() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111].iter().map(|&n| ordinal(n)).collect();
        assert_eq!(got, ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th"]);
    }
}
