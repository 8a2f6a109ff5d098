use std::collections::HashSet;

use loom_core::config::PlayerConfig;
use loom_core::event::{InputEvent, OutputEvent, TransitionKind};
use loom_core::player::{PlayError, Playthrough};
use loomscript_core::ast::Scene;
use loomscript_core::compile;

const STORY: &str = "\
# Start
Character: Emma
Dialogue: Hello
Dialogue: Pick one
Choice: Left -> Left Room
Choice: Lost -> Nowhere

# Left Room
Dialogue: You went left
";

fn story(src: &str) -> Vec<Scene> {
    compile(src, &HashSet::<String>::new()).scenes
}

fn player(src: &str) -> Playthrough {
    Playthrough::new(story(src), &PlayerConfig::default()).expect("story has scenes")
}

fn is_actor(ev: &OutputEvent, kind: TransitionKind) -> bool {
    matches!(ev, OutputEvent::Actor(t) if t.kind == kind)
}

#[test]
fn walks_a_story_to_the_end() {
    let mut p = player(STORY);

    let out = p.start();
    assert_eq!(out.len(), 3);
    assert!(matches!(&out[0], OutputEvent::EnterScene { scene_id, .. } if scene_id == "scene_0"));
    assert_eq!(
        out[1],
        OutputEvent::ShowDialogue { index: 0, speaker: Some("Emma".to_string()), text: "Hello".to_string() }
    );
    assert!(is_actor(&out[2], TransitionKind::EntranceStarted));
    assert!(p.start().is_empty());

    assert_eq!(p.choose(0), Err(PlayError::NotAtChoice));

    let out = p.next().expect("second line");
    assert_eq!(out.len(), 2);
    assert_eq!(out[1], OutputEvent::ShowChoices { options: vec!["Left".to_string(), "Lost".to_string()] });
    assert_eq!(p.next(), Err(PlayError::AwaitingChoice));

    let out = p.feed(InputEvent::ChoiceMade { index: 0 }).expect("resolved choice");
    assert!(matches!(&out[0], OutputEvent::EnterScene { title, .. } if title == "Left Room"));
    assert_eq!(p.runtime().scene_id(), "scene_1");
    assert_eq!(p.history(), ["scene_0", "scene_1"]);

    assert_eq!(p.next(), Ok(vec![OutputEvent::End]));
    assert!(p.is_finished());
    assert_eq!(p.next(), Err(PlayError::Finished));
}

#[test]
fn bad_choices_change_nothing() {
    let mut p = player(STORY);
    p.start();
    p.next().expect("second line");

    assert_eq!(
        p.choose(1),
        Err(PlayError::UnresolvedChoice { text: "Lost".to_string(), target: "Nowhere".to_string() })
    );
    assert_eq!(p.choose(5), Err(PlayError::ChoiceOutOfRange { index: 5, len: 2 }));
    assert_eq!(p.scene().id, "scene_0");
    assert_eq!(p.line(), Some(1));
}

#[test]
fn errors_read_as_messages() {
    let mut p = player(STORY);
    p.start();
    p.next().expect("second line");

    let err = p.choose(1).expect_err("unresolved choice");
    assert_eq!(err.to_string(), "choice 'Lost' leads to unknown scene 'Nowhere'");
    let err = p.choose(5).expect_err("out of range");
    assert_eq!(err.to_string(), "choice 5 out of range (2 available)");

    let cfg = PlayerConfig { start_scene: Some("Epilogue".to_string()), ..PlayerConfig::default() };
    let err = Playthrough::new(story(STORY), &cfg).err().expect("unknown start scene");
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!(boxed.to_string(), "start scene 'Epilogue' not found");
}

#[test]
fn scene_switch_cancels_pending_animation() {
    let mut p = player(STORY);
    p.start();
    p.next().expect("second line");
    p.choose(0).expect("resolved choice");
    assert!(p.update(10_000).is_empty());
}

#[test]
fn update_reports_actor_transitions() {
    let mut p = player(STORY);
    p.start();
    let out = p.update(800);
    assert_eq!(out.len(), 2);
    assert!(is_actor(&out[0], TransitionKind::Entered));
    assert!(is_actor(&out[1], TransitionKind::EntranceFinished));
}

#[test]
fn start_scene_comes_from_config() {
    let cfg = PlayerConfig { start_scene: Some("Left Room".to_string()), ..PlayerConfig::default() };
    let mut p = Playthrough::new(story(STORY), &cfg).expect("start scene exists");
    assert!(matches!(&p.start()[0], OutputEvent::EnterScene { scene_id, .. } if scene_id == "scene_1"));

    let cfg = PlayerConfig { start_scene: Some("Attic".to_string()), ..PlayerConfig::default() };
    assert!(matches!(
        Playthrough::new(story(STORY), &cfg),
        Err(PlayError::UnknownStartScene(t)) if t == "Attic"
    ));
    assert!(matches!(Playthrough::new(Vec::new(), &PlayerConfig::default()), Err(PlayError::NoScenes)));
}

#[test]
fn scenes_without_dialogue() {
    let mut p = player("# A\nChoice: go -> B\n# B");
    let out = p.start();
    assert_eq!(out[1], OutputEvent::ShowChoices { options: vec!["go".to_string()] });

    let out = p.choose(0).expect("resolved choice");
    assert_eq!(out.len(), 2);
    assert_eq!(out[1], OutputEvent::End);
}

#[test]
fn exit_closes_the_session() {
    let mut p = player(STORY);
    p.start();
    assert_eq!(p.feed(InputEvent::Exit), Ok(vec![OutputEvent::End]));
    assert!(p.close().is_empty());
    assert!(p.update(1000).is_empty());
}
