pub mod ast;
pub mod character;
pub mod diagnostic;
pub mod directive;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod writer;

pub use ast::{Choice, ChoiceTarget, Scene, SceneActor};
pub use character::Character;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use resolver::KnownCharacters;
pub use writer::write_script;

use lexer::Lexer;
use parser::Parser;

/// Everything one script compiles to.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub scenes: Vec<Scene>,
    pub new_characters: Vec<Character>,
    /// Parser diagnostics first, then the resolver's.
    pub errors: Vec<Diagnostic>,
}

/// Lex, parse and resolve `source` in one go.
pub fn compile<K: KnownCharacters + ?Sized>(source: &str, known: &K) -> Compiled {
    let lines = Lexer::new(source).run();
    let parsed = Parser::new(&lines).parse();
    let resolution = resolver::resolve(&parsed.scenes, known);

    let mut errors = parsed.errors;
    errors.extend(resolution.errors);
    Compiled {
        scenes: resolution.scenes,
        new_characters: resolution.new_characters,
        errors,
    }
}
