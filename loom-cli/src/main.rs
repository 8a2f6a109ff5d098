mod config_gen;
mod setup;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use loom_core::config::CoreConfig;
use loom_core::export::to_dot;
use loom_core::player::{PlayError, Playthrough};
use loom_core::{OutputEvent, StoryProject};
use loomscript_core::Diagnostic;

const USAGE: &str = "usage: loom [--config <path>] <compile|dot|play> [<file-or-dir>] [--out <path>]";

/// A dry run stops after this many scene visits, so cyclic stories end.
const MAX_VISITS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Compile,
    Dot,
    Play,
}

#[derive(Debug)]
struct Args {
    config: String,
    command: Command,
    target: Option<String>,
    out: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = "config.toml".to_string();
    let mut command = None;
    let mut target = None;
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = args.next().context("--config needs a path")?,
            "--out" => out = Some(args.next().context("--out needs a path")?),
            "compile" if command.is_none() => command = Some(Command::Compile),
            "dot" if command.is_none() => command = Some(Command::Dot),
            "play" if command.is_none() => command = Some(Command::Play),
            other if other.starts_with("--") => bail!("unknown flag {}", other),
            other if command.is_some() && target.is_none() => target = Some(other.to_string()),
            other => bail!("unexpected argument {}", other),
        }
    }

    Ok(Args {
        config,
        command: command.context("missing command")?,
        target,
        out,
    })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    setup::init(&args.config);
    log::info!(">>> Loom {:?} <<<", args.command);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the story compiled without diagnostics.
fn run(args: &Args) -> Result<bool> {
    let core_cfg = CoreConfig::from_global();
    let target = args.target.clone().unwrap_or_else(|| core_cfg.system.script_path.clone());

    let mut project = StoryProject::new();
    project.set_layout(core_cfg.layout.clone());
    let errors = load(&mut project, &target)?;
    report(&errors);

    match args.command {
        Command::Compile => {
            let json = serde_json::to_string_pretty(&project.to_json())?;
            emit(args.out.as_deref(), &json)?;
        }
        Command::Dot => emit(args.out.as_deref(), &to_dot(project.sink().scenes()))?,
        Command::Play => {
            let transcript = play(project.sink().scenes().to_vec(), &core_cfg)?;
            emit(args.out.as_deref(), &transcript)?;
        }
    }
    Ok(errors.is_empty())
}

fn load(project: &mut StoryProject, target: &str) -> Result<Vec<Diagnostic>> {
    let path = Path::new(target);
    if path.is_dir() {
        return project.load_project(path);
    }
    log::info!("Loading script from {:?}", path);
    let source = fs::read_to_string(path).with_context(|| format!("Script '{}' not found", target))?;
    log::debug!("Loaded script: {} bytes", source.len());
    Ok(project.import_script(&source))
}

fn report(errors: &[Diagnostic]) {
    for e in errors {
        log::warn!("{}", e);
    }
    if !errors.is_empty() {
        log::warn!("{} diagnostics", errors.len());
    }
}

fn emit(out: Option<&str>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
            }
            fs::write(path, text).with_context(|| format!("writing {}", path))?;
            log::info!("Wrote {}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// Play the story always taking the first choice, one event per line.
fn play(scenes: Vec<loomscript_core::Scene>, cfg: &CoreConfig) -> Result<String> {
    let mut session = Playthrough::new(scenes, &cfg.player)?;
    let mut transcript = String::new();
    let mut record = |events: Vec<OutputEvent>| -> Result<()> {
        for ev in events {
            transcript.push_str(&serde_json::to_string(&ev)?);
            transcript.push('\n');
        }
        Ok(())
    };

    record(session.start())?;
    while !session.is_finished() {
        // let the current line's animations play out before moving on
        for _ in 0..64 {
            record(session.update(cfg.player.tick_ms))?;
        }
        let step = match session.next() {
            Err(PlayError::AwaitingChoice) if session.history().len() >= MAX_VISITS => {
                log::warn!("visit limit of {} reached", MAX_VISITS);
                Ok(session.close())
            }
            Err(PlayError::AwaitingChoice) => session.choose(0),
            other => other,
        };
        match step {
            Ok(events) => record(events)?,
            Err(e) => {
                log::warn!("playthrough stopped: {}", e);
                record(session.close())?;
            }
        }
    }
    Ok(transcript)
}
