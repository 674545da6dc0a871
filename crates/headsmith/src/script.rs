//! Edit scripts: replay a recorded editing session line by line.
//!
//! ```text
//! # paint the front face, branch, then tidy up
//! color #000000
//! size 2
//! paint 9 9
//! stroke 8 8 9 8 10 8
//! undo
//! tool eraser
//! paint 8 8
//! tree
//! jump 1
//! prune 0
//! export out.png
//! ```
//!
//! | command | effect |
//! |---|---|
//! | `tool brush\|eraser\|picker` | select tool |
//! | `color #RRGGBB` | brush colour |
//! | `size N` | brush size |
//! | `paint X Y` | one click: apply tool, then checkpoint |
//! | `stroke X Y [X Y]...` | one drag: apply tool at each point, then checkpoint |
//! | `uv U V` | one click at a texture UV coordinate (origin bottom-left) |
//! | `undo [N]` / `redo [N]` | step back / forward up to N times |
//! | `jump ROW` / `prune ROW` | address a node by timeline row, or `id:HEX` prefix |
//! | `import INPUT` | username, bare base64 or data URI |
//! | `import-file PATH` | PNG file |
//! | `export PATH` | write the canvas as PNG |
//! | `tree` | emit the rendered timeline |
//!
//! Comments must take a whole line. Scripts are parsed completely before
//! anything runs, so a typo on the last line fails before the first stroke
//! is applied.

use std::path::{Path, PathBuf};

use headsmith_history::NodeId;
use headsmith_texture::{CANVAS_SIZE, Color, uv_to_pixel};
use headsmith_types::resolve_node_prefix;

use crate::error::{EditorError, ScriptError};
use crate::lookup::SkinLookup;
use crate::render::render_timeline;
use crate::session::{EditorSession, Tool};

/// Where a `jump` or `prune` lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// Index into the depth-first timeline.
    Row(usize),
    /// Hex prefix of the node id.
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    Color(Color),
    Size(u32),
    /// Apply the tool at each point, then checkpoint once.
    Stroke(Vec<(i32, i32)>),
    Uv(f32, f32),
    Undo(usize),
    Redo(usize),
    Jump(NodeRef),
    Prune(NodeRef),
    Import(String),
    ImportFile(PathBuf),
    Export(PathBuf),
    Tree,
}

/// A parsed command and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

// ============================================================================
// Parsing
// ============================================================================

pub fn load(path: &Path) -> Result<Vec<Step>, ScriptError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source)
}

pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let command = parse_command(text).map_err(|message| ScriptError::Parse { line, message })?;
        steps.push(Step { line, command });
    }
    tracing::debug!(steps = steps.len(), "parsed script");
    Ok(steps)
}

fn parse_command(text: &str) -> Result<Command, String> {
    let (word, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word {
        "tool" => {
            let [name] = args.as_slice() else {
                return Err("usage: tool brush|eraser|picker".into());
            };
            Command::Tool(name.parse().map_err(|_| format!("unknown tool '{name}'"))?)
        }
        "color" | "colour" => {
            let [hex] = args.as_slice() else {
                return Err("usage: color #RRGGBB".into());
            };
            Command::Color(Color::parse(hex).map_err(|e| e.to_string())?)
        }
        "size" => {
            let [n] = args.as_slice() else {
                return Err("usage: size N".into());
            };
            let size: u32 = number(n)?;
            if size == 0 || size > CANVAS_SIZE {
                return Err(format!("size must be between 1 and {CANVAS_SIZE}"));
            }
            Command::Size(size)
        }
        "paint" => {
            let [x, y] = args.as_slice() else {
                return Err("usage: paint X Y".into());
            };
            Command::Stroke(vec![(number(x)?, number(y)?)])
        }
        "stroke" => {
            if args.is_empty() || args.len() % 2 != 0 {
                return Err("usage: stroke X Y [X Y]...".into());
            }
            let points = args
                .chunks_exact(2)
                .map(|pair| -> Result<(i32, i32), String> {
                    Ok((number(pair[0])?, number(pair[1])?))
                })
                .collect::<Result<Vec<_>, String>>()?;
            Command::Stroke(points)
        }
        "uv" => {
            let [u, v] = args.as_slice() else {
                return Err("usage: uv U V".into());
            };
            Command::Uv(number(u)?, number(v)?)
        }
        "undo" => Command::Undo(count(&args)?),
        "redo" => Command::Redo(count(&args)?),
        "jump" => Command::Jump(node_ref(&args)?),
        "prune" => Command::Prune(node_ref(&args)?),
        "import" => {
            if rest.is_empty() {
                return Err("usage: import USERNAME|BASE64|DATA-URI".into());
            }
            Command::Import(rest.to_string())
        }
        "import-file" => Command::ImportFile(path_arg(rest, "import-file PATH")?),
        "export" => Command::Export(path_arg(rest, "export PATH")?),
        "tree" => {
            if !args.is_empty() {
                return Err("tree takes no arguments".into());
            }
            Command::Tree
        }
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("expected a number, got '{s}'"))
}

fn count(args: &[&str]) -> Result<usize, String> {
    match args {
        [] => Ok(1),
        [n] => number(n),
        _ => Err("expected at most one count".into()),
    }
}

fn node_ref(args: &[&str]) -> Result<NodeRef, String> {
    let [target] = args else {
        return Err("expected a timeline row or id:HEX".into());
    };
    match target.strip_prefix("id:") {
        Some(hex) if !hex.is_empty() => Ok(NodeRef::Prefix(hex.to_string())),
        Some(_) => Err("empty id prefix".into()),
        None => number(target).map(NodeRef::Row),
    }
}

fn path_arg(rest: &str, usage: &str) -> Result<PathBuf, String> {
    if rest.is_empty() {
        return Err(format!("usage: {usage}"));
    }
    Ok(PathBuf::from(rest))
}

// ============================================================================
// Execution
// ============================================================================

/// Run parsed steps against a session.
///
/// Returns everything the script asked to print (one entry per `tree`).
/// Stops at the first failing step.
pub fn run(
    session: &mut EditorSession,
    steps: &[Step],
    lookup: &dyn SkinLookup,
) -> Result<Vec<String>, ScriptError> {
    let mut output = Vec::new();
    for step in steps {
        if let Some(text) = execute(session, step, lookup)? {
            output.push(text);
        }
    }
    tracing::info!(steps = steps.len(), nodes = session.history().len(), "script finished");
    Ok(output)
}

fn execute(
    session: &mut EditorSession,
    step: &Step,
    lookup: &dyn SkinLookup,
) -> Result<Option<String>, ScriptError> {
    let line = step.line;
    let editor = |source: EditorError| ScriptError::Editor { line, source };
    tracing::trace!(line, command = ?step.command, "executing");

    match &step.command {
        Command::Tool(tool) => session.set_tool(*tool),
        Command::Color(color) => session.set_brush_color(*color),
        Command::Size(size) => session.set_brush_size(*size),
        Command::Stroke(points) => {
            for &(x, y) in points {
                session.paint(x, y);
            }
            session.end_stroke().map_err(editor)?;
        }
        Command::Uv(u, v) => {
            let (x, y) = uv_to_pixel(*u, *v, CANVAS_SIZE, CANVAS_SIZE);
            session.paint(x, y);
            session.end_stroke().map_err(editor)?;
        }
        Command::Undo(n) => {
            for _ in 0..*n {
                if session.undo().map_err(editor)?.is_none() {
                    tracing::debug!(line, "undo stopped at root");
                    break;
                }
            }
        }
        Command::Redo(n) => {
            for _ in 0..*n {
                if session.redo().map_err(editor)?.is_none() {
                    tracing::debug!(line, "redo stopped at leaf");
                    break;
                }
            }
        }
        Command::Jump(target) => {
            let id = resolve(session, target, line)?;
            session.jump_to(id).map_err(editor)?;
        }
        Command::Prune(target) => {
            let id = resolve(session, target, line)?;
            if session.prune(id).map_err(editor)?.is_none() {
                tracing::info!(line, node = %id, "nothing to prune");
            }
        }
        Command::Import(input) => {
            session.import(input, lookup).map_err(editor)?;
        }
        Command::ImportFile(path) => {
            session.import_file(path).map_err(editor)?;
        }
        Command::Export(path) => session.export_png(path).map_err(editor)?,
        Command::Tree => return Ok(Some(render_timeline(session.history()))),
    }
    Ok(None)
}

fn resolve(session: &EditorSession, target: &NodeRef, line: usize) -> Result<NodeId, ScriptError> {
    let history = session.history();
    match target {
        NodeRef::Row(index) => history
            .timeline()
            .nth(*index)
            .map(|row| row.id)
            .ok_or(ScriptError::NoSuchRow { line, index: *index, rows: history.len() }),
        NodeRef::Prefix(hex) => resolve_node_prefix(history.nodes().map(|n| n.id()), hex)
            .map_err(|source| ScriptError::Node { line, source }),
    }
}

#[cfg(test)]
mod tests {
    use headsmith_texture::SkinCanvas;

    use super::*;
    use crate::EditorConfig;
    use crate::lookup::NoLookup;

    fn session() -> EditorSession {
        EditorSession::new(&EditorConfig::default()).unwrap()
    }

    fn replay(session: &mut EditorSession, source: &str) -> Result<Vec<String>, ScriptError> {
        let steps = parse(source)?;
        run(session, &steps, &NoLookup)
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let steps = parse("# header\n\n  color #000000\n# more\npaint 1 2\n").unwrap();
        assert_eq!(
            steps,
            vec![
                Step { line: 3, command: Command::Color(Color::BLACK) },
                Step { line: 5, command: Command::Stroke(vec![(1, 2)]) },
            ]
        );
    }

    #[test]
    fn test_parse_commands() {
        let steps = parse(
            "tool pick\nsize 3\nstroke 1 1 2 2\nuv 0.5 0.5\nundo 2\nredo\njump 3\nprune id:01ab\ntree\nexport out.png\nimport steve",
        )
        .unwrap();
        let commands: Vec<Command> = steps.into_iter().map(|s| s.command).collect();
        assert_eq!(
            commands,
            vec![
                Command::Tool(Tool::Picker),
                Command::Size(3),
                Command::Stroke(vec![(1, 1), (2, 2)]),
                Command::Uv(0.5, 0.5),
                Command::Undo(2),
                Command::Redo(1),
                Command::Jump(NodeRef::Row(3)),
                Command::Prune(NodeRef::Prefix("01ab".into())),
                Command::Tree,
                Command::Export(PathBuf::from("out.png")),
                Command::Import("steve".into()),
            ]
        );
    }

    #[test]
    fn test_parse_errors_carry_line() {
        for (source, bad_line) in [
            ("color #000000\nfrobnicate", 2),
            ("paint 1", 1),
            ("\n\nstroke 1 2 3", 3),
            ("size 0", 1),
            ("tool bucket", 1),
            ("jump x", 1),
            ("undo 1 2", 1),
            ("color blue", 1),
        ] {
            match parse(source) {
                Err(ScriptError::Parse { line, .. }) => assert_eq!(line, bad_line, "{source:?}"),
                other => panic!("expected parse error for {source:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_replay_branching_session() {
        let mut s = session();
        let out = replay(
            &mut s,
            "color #000000\npaint 9 9\nundo\ncolor #ffffff\npaint 10 10\ntree\njump 1\n",
        )
        .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].lines().count(), 3);
        assert_eq!(s.history().len(), 3);
        // Row 1 is the first branch (black)
        assert_eq!(s.canvas().pick(9, 9), Some(Color::BLACK));
        assert_ne!(s.canvas().pick(10, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_prune_by_row() {
        let mut s = session();
        replay(&mut s, "color #000000\npaint 9 9\npaint 20 9\npaint 30 9\nprune 1\n").unwrap();
        assert_eq!(s.history().len(), 2);
        // Viewpoint was below row 1, so it moved there
        assert_eq!(s.canvas().pick(9, 9), Some(Color::BLACK));
        assert_ne!(s.canvas().pick(20, 9), Some(Color::BLACK));
    }

    #[test]
    fn test_uv_paints_flipped_pixel() {
        let mut s = session();
        // u=0.15, v=0.85 -> (9, 9)
        replay(&mut s, "color #000000\nuv 0.15 0.85\n").unwrap();
        assert_eq!(s.canvas().pick(9, 9), Some(Color::BLACK));
    }

    #[test]
    fn test_undo_count_stops_at_root() {
        let mut s = session();
        replay(&mut s, "color #000000\npaint 9 9\nundo 5\n").unwrap();
        assert_eq!(s.canvas(), &SkinCanvas::base_skin());
    }

    #[test]
    fn test_missing_row_is_error() {
        let mut s = session();
        let err = replay(&mut s, "paint 9 9\njump 7").unwrap_err();
        assert!(matches!(err, ScriptError::NoSuchRow { line: 2, index: 7, rows: 1 }));
    }

    #[test]
    fn test_jump_by_id_prefix() {
        let mut s = session();
        let root = s.history().current_id().unwrap();
        let script = format!("color #000000\npaint 9 9\njump id:{}", root.to_hex());
        replay(&mut s, &script).unwrap();
        assert_eq!(s.history().current_id(), Some(root));
    }

    #[test]
    fn test_unknown_user_reports_line() {
        let mut s = session();
        let err = replay(&mut s, "tree\nimport nobody").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Editor { line: 2, source: EditorError::UnknownUser(_) }
        ));
    }

    #[test]
    fn test_export_and_reimport() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skin.png");
        let mut s = session();
        let script = format!(
            "color #000000\npaint 9 9\nexport {p}\ncolor #ffffff\npaint 9 9\nimport-file {p}",
            p = path.display()
        );
        replay(&mut s, &script).unwrap();
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.canvas().pick(9, 9), Some(Color::BLACK));
    }

    #[test]
    fn test_load_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.hs")).unwrap_err();
        assert!(matches!(err, ScriptError::Read { .. }));
    }
}
