use loomscript_core::ast::{AnimationSpec, EnterTrigger, EntranceKind, ExitKind, ExitTrigger};
use loomscript_core::directive::{Category, apply_clause, parse_clauses};

fn with(edit: impl FnOnce(&mut AnimationSpec)) -> AnimationSpec {
    let mut spec = AnimationSpec::default();
    edit(&mut spec);
    spec
}

#[test]
fn every_clause_has_one_effect() {
    let cases: [(&[&str], AnimationSpec); 23] = [
        (&["Enters Left"], with(|s| s.entrance.kind = EntranceKind::SlideFromLeft)),
        (&["Enters Right"], with(|s| s.entrance.kind = EntranceKind::SlideFromRight)),
        (&["Enters Up"], with(|s| s.entrance.kind = EntranceKind::SlideUp)),
        (&["Enters Down"], with(|s| s.entrance.kind = EntranceKind::SlideDown)),
        (&["Enters Right", "Fade In"], with(|_| {})),
        (&["Exit Left"], with(|s| s.exit.kind = ExitKind::SlideToLeft)),
        (&["Exit Right"], with(|s| s.exit.kind = ExitKind::SlideToRight)),
        (&["Exit Up"], with(|s| s.exit.kind = ExitKind::SlideUp)),
        (&["Exit Down"], with(|s| s.exit.kind = ExitKind::SlideDown)),
        (&["Exit Left", "Exit Fade"], with(|_| {})),
        (&["Exit Left", "Fade Out"], with(|_| {})),
        (&["First Dialogue", "Beginning of Scene"], with(|_| {})),
        (&["First Dialogue", "Scene Start"], with(|_| {})),
        (&["First Dialogue"], with(|s| s.timing.enter_on = EnterTrigger::FirstDialogue)),
        (&["1st Dialogue"], with(|s| s.timing.enter_on = EnterTrigger::FirstDialogue)),
        (
            &["3rd Dialogue"],
            with(|s| {
                s.timing.enter_on = EnterTrigger::SpecificDialogue;
                s.timing.trigger_dialogue_index = Some(2);
            }),
        ),
        (
            &["2nd Dialogue of @Leo"],
            with(|s| {
                s.timing.enter_on = EnterTrigger::CharacterDialogue;
                s.timing.trigger_character_name = Some("Leo".to_string());
                s.timing.trigger_character_dialogue_index = Some(2);
            }),
        ),
        (&["Last Dialogue"], with(|s| s.timing.exit_on = ExitTrigger::LastDialogue)),
        (&["Last Dialogue", "End of Scene"], with(|_| {})),
        (&["Last Dialogue", "Scene End"], with(|_| {})),
        (
            &["Exit On 4th Dialogue"],
            with(|s| {
                s.timing.exit_on = ExitTrigger::SpecificDialogue;
                s.timing.exit_dialogue_index = Some(3);
            }),
        ),
        (
            &["Exit On 1st Dialogue of @Mia"],
            with(|s| {
                s.timing.exit_on = ExitTrigger::CharacterDialogue;
                s.timing.exit_character_name = Some("Mia".to_string());
                s.timing.exit_character_dialogue_index = Some(1);
            }),
        ),
        // delay belongs to the entrance only
        (&["Delay 500ms"], with(|s| s.entrance.delay_ms = 500)),
    ];

    for (clauses, expected) in cases {
        assert_eq!(parse_clauses(clauses.iter().copied()), expected, "clauses {:?}", clauses);
    }
}

#[test]
fn clauses_match_in_any_case() {
    let spec = parse_clauses(["ENTERS RIGHT", "exit up", "fIrSt DiAlOgUe", "DELAY 20MS"]);
    assert_eq!(spec.entrance.kind, EntranceKind::SlideFromRight);
    assert_eq!(spec.exit.kind, ExitKind::SlideUp);
    assert_eq!(spec.timing.enter_on, EnterTrigger::FirstDialogue);
    assert_eq!(spec.entrance.delay_ms, 20);

    let spec = parse_clauses(["2ND DIALOGUE OF @McKay"]);
    assert_eq!(spec.timing.trigger_character_name.as_deref(), Some("McKay"));
}

#[test]
fn clause_categories() {
    let cases = [
        ("Enters Up", Some(Category::Entrance)),
        ("Fade Out", Some(Category::Exit)),
        ("Scene Start", Some(Category::EnterTiming)),
        ("2nd Dialogue", Some(Category::EnterTiming)),
        ("End of Scene", Some(Category::ExitTiming)),
        ("Exit On 2nd Dialogue", Some(Category::ExitTiming)),
        ("Delay 10ms", Some(Category::Delay)),
        ("Wave Hello", None),
    ];
    for (clause, category) in cases {
        let mut spec = AnimationSpec::default();
        assert_eq!(apply_clause(&mut spec, clause), category, "clause {:?}", clause);
    }
}
