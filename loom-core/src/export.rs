use std::fmt::Write;

use loomscript_core::ast::{ChoiceTarget, Scene};

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render the scene graph as a Graphviz digraph.
///
/// Laid-out scenes carry a `pos` attribute (y flipped, Graphviz grows
/// upwards). Unresolved choices end at a red `missing:<title>` node.
pub fn to_dot(scenes: &[Scene]) -> String {
    let mut buf = String::from("digraph story {\n    node [shape=box];\n");
    let mut missing: Vec<&str> = Vec::new();

    for scene in scenes {
        let _ = write!(buf, "    {} [label={}", quote(&scene.id), quote(&scene.title));
        if let Some(p) = scene.position {
            let _ = write!(buf, ", pos=\"{},{}!\"", p.x, -p.y);
        }
        buf.push_str("];\n");
    }

    for scene in scenes {
        for choice in &scene.choices {
            match &choice.target {
                ChoiceTarget::Scene(id) => {
                    let _ = writeln!(buf, "    {} -> {} [label={}];", quote(&scene.id), quote(id), quote(&choice.text));
                }
                ChoiceTarget::Pending(title) | ChoiceTarget::Unresolved(title) => {
                    let node = format!("missing:{}", title);
                    let _ = writeln!(
                        buf,
                        "    {} -> {} [label={}, style=dashed];",
                        quote(&scene.id),
                        quote(&node),
                        quote(&choice.text)
                    );
                    if !missing.contains(&title.as_str()) {
                        missing.push(title);
                    }
                }
            }
        }
    }

    for title in missing {
        let _ = writeln!(
            buf,
            "    {} [label={}, color=red, fontcolor=red];",
            quote(&format!("missing:{}", title)),
            quote(title)
        );
    }
    buf.push_str("}\n");
    buf
}
