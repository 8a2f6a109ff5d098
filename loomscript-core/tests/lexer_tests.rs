use loomscript_core::lexer::{Lexer, LineKind, classify};

#[test]
fn basics() {
    let src = r#"
// opening
# The Gate
Description: Rain on stone.
Character: Emma - Enters Left
Dialogue: Who goes there?
Choice: Knock -> Courtyard
"#;
    let lines = Lexer::new(src).run();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0].kind, LineKind::SceneHeader("The Gate".to_string()));
    assert_eq!(lines[0].span.line, 3);
    assert_eq!(lines[1].kind, LineKind::Description("Rain on stone.".to_string()));
    assert_eq!(lines[2].kind, LineKind::CharacterDirective("Emma - Enters Left".to_string()));
    assert_eq!(lines[3].kind, LineKind::Dialogue("Who goes there?".to_string()));
    assert_eq!(lines[4].kind, LineKind::Choice("Knock -> Courtyard".to_string()));
    assert_eq!(lines[4].span.line, 7);
}

#[test]
fn indented_lines_are_trimmed() {
    let lines = Lexer::new("   # Hall   \n\t Dialogue:   hello  ").run();
    assert_eq!(lines[0].kind, LineKind::SceneHeader("Hall".to_string()));
    assert_eq!(lines[1].kind, LineKind::Dialogue("hello".to_string()));
}

#[test]
fn header_needs_space_after_marker() {
    assert_eq!(classify("#Hall"), Some(LineKind::Unknown("#Hall".to_string())));
    assert_eq!(classify("#"), Some(LineKind::SceneHeader(String::new())));
    assert_eq!(classify("#  "), Some(LineKind::SceneHeader(String::new())));
}

#[test]
fn trivia_is_skipped() {
    assert_eq!(classify(""), None);
    assert_eq!(classify("// note"), None);
    assert!(Lexer::new("\n\n   \n// a\n//b").run().is_empty());
}

#[test]
fn prefixes_are_case_sensitive() {
    assert_eq!(classify("dialogue: hi"), Some(LineKind::Unknown("dialogue: hi".to_string())));
}
