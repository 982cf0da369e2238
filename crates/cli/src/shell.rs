//! Interactive editing shell
//!
//! Line-oriented front end for a [`BuilderStore`]: every command maps onto a
//! store, drag coordinator or property editor operation, and `save` writes
//! the page back into the project file.

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use pagesmith_builder::{
    BuilderConfig, BuilderStore, Direction, DragCoordinator, DragSource, DropOutcome, DropTarget,
    Panel, PropertyEditor,
};
use pagesmith_ir::serialization::{backup_project, load_project, save_project};
use pagesmith_ir::{ComponentId, ComponentKind, Project};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// =============================================================================
// COMMANDS
// =============================================================================

/// Where a moved component goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTo {
    /// Onto another component's slot
    Onto(ComponentId),
    /// One slot up or down
    Step(Direction),
}

/// One parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add {
        kind: ComponentKind,
        before: Option<ComponentId>,
    },
    Move {
        id: ComponentId,
        to: MoveTo,
    },
    Duplicate(ComponentId),
    Delete(ComponentId),
    Select(ComponentId),
    Deselect,
    Set {
        id: ComponentId,
        field: String,
        value: Value,
    },
    Push {
        id: ComponentId,
        field: String,
        value: Option<Value>,
    },
    RemoveItem {
        id: ComponentId,
        field: String,
        index: usize,
    },
    Pull,
    Undo,
    Redo,
    List,
    Show(Option<ComponentId>),
    Save,
    Preview,
    TogglePanel(Panel),
    Help,
    Quit {
        force: bool,
    },
}

impl ShellCommand {
    /// Parse a shell line; `Ok(None)` for blank lines
    pub fn parse(line: &str) -> Result<Option<ShellCommand>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = split_word(line);
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match verb {
            "add" => {
                let kind = args.first().ok_or_else(|| usage("add <type> [before <id>]"))?;
                let kind = ComponentKind::from_name(kind)
                    .ok_or_else(|| anyhow!("Unknown component type '{}'", kind))?;
                let before = match args.get(1..) {
                    Some(["before", id]) => Some(ComponentId::from(*id)),
                    Some([]) | None => None,
                    Some(_) => return Err(usage("add <type> [before <id>]")),
                };
                ShellCommand::Add { kind, before }
            }
            "move" | "mv" => match args.as_slice() {
                [id, "up"] => ShellCommand::Move {
                    id: ComponentId::from(*id),
                    to: MoveTo::Step(Direction::Up),
                },
                [id, "down"] => ShellCommand::Move {
                    id: ComponentId::from(*id),
                    to: MoveTo::Step(Direction::Down),
                },
                [id, target] => ShellCommand::Move {
                    id: ComponentId::from(*id),
                    to: MoveTo::Onto(ComponentId::from(*target)),
                },
                _ => return Err(usage("move <id> <target-id|up|down>")),
            },
            "dup" => ShellCommand::Duplicate(single_id(&args, "dup <id>")?),
            "del" | "rm" => ShellCommand::Delete(single_id(&args, "del <id>")?),
            "select" => ShellCommand::Select(single_id(&args, "select <id>")?),
            "deselect" => ShellCommand::Deselect,
            "set" => {
                let (id, rest) = split_word(rest);
                let (field, raw) = split_word(rest);
                if id.is_empty() || field.is_empty() || raw.is_empty() {
                    return Err(usage("set <id> <field> <value>"));
                }
                ShellCommand::Set {
                    id: ComponentId::from(id),
                    field: field.to_string(),
                    value: parse_value(raw),
                }
            }
            "push" => {
                let (id, rest) = split_word(rest);
                let (field, raw) = split_word(rest);
                if id.is_empty() || field.is_empty() {
                    return Err(usage("push <id> <field> [value]"));
                }
                ShellCommand::Push {
                    id: ComponentId::from(id),
                    field: field.to_string(),
                    value: (!raw.is_empty()).then(|| parse_value(raw)),
                }
            }
            "rm-item" => match args.as_slice() {
                [id, field, index] => ShellCommand::RemoveItem {
                    id: ComponentId::from(*id),
                    field: field.to_string(),
                    index: index
                        .parse()
                        .with_context(|| format!("Invalid index '{}'", index))?,
                },
                _ => return Err(usage("rm-item <id> <field> <index>")),
            },
            "pull" | "reload" => ShellCommand::Pull,
            "undo" | "u" => ShellCommand::Undo,
            "redo" | "r" => ShellCommand::Redo,
            "list" | "ls" => ShellCommand::List,
            "show" => ShellCommand::Show(args.first().map(|id| ComponentId::from(*id))),
            "save" | "w" => ShellCommand::Save,
            "preview" => ShellCommand::Preview,
            "panel" => match args.first().copied() {
                Some("palette") => ShellCommand::TogglePanel(Panel::Palette),
                Some("properties") | Some("props") => ShellCommand::TogglePanel(Panel::Properties),
                _ => return Err(usage("panel <palette|properties>")),
            },
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit { force: false },
            "quit!" | "q!" => ShellCommand::Quit { force: true },
            other => bail!("Unknown command '{}', try 'help'", other),
        };

        Ok(Some(command))
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn single_id(args: &[&str], usage_line: &str) -> Result<ComponentId> {
    match args {
        [id] => Ok(ComponentId::from(*id)),
        _ => Err(usage(usage_line)),
    }
}

fn usage(line: &str) -> anyhow::Error {
    anyhow!("usage: {}", line)
}

/// JSON if it parses, otherwise a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

const HELP: &str = "\
  add <type> [before <id>]        insert a component from the palette
  move <id> <target-id|up|down>   reorder a component
  dup <id> / del <id>             duplicate or delete
  select <id> / deselect          change the selection
  set <id> <field> <value>        edit a field (JSON or plain text)
  push <id> <field> [value]       append a list item (blank if no value)
  rm-item <id> <field> <index>    remove a list item
  undo / redo                     walk the history
  list / show [id]                inspect the page
  preview / panel <name>          toggle preview or a side panel
  pull                            reload the file, dropping unsaved edits
  save                            write the page to the project file
  quit / quit!                    leave (quit! discards unsaved edits)";

// =============================================================================
// SESSION
// =============================================================================

/// Whether the shell keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// An editing session over one project file
pub struct Session {
    path: PathBuf,
    project: Project,
    store: BuilderStore,
    drag: DragCoordinator,
    backed_up: bool,
}

impl Session {
    /// Open a project file and hydrate a store from it
    pub fn open(path: impl AsRef<Path>, config: &BuilderConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let project = load_project(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut store = BuilderStore::create(config);
        store.initialize_from_project(&project)?;
        info!(path = %path.display(), components = store.len(), "shell session opened");

        Ok(Self {
            path,
            project,
            store,
            drag: DragCoordinator::new(),
            backed_up: false,
        })
    }

    pub fn store(&self) -> &BuilderStore {
        &self.store
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Run one command, writing feedback to `out`
    pub fn execute(&mut self, command: ShellCommand, out: &mut impl Write) -> Result<Flow> {
        debug!(?command, "shell command");
        match command {
            ShellCommand::Add { kind, before } => {
                self.drag.begin(DragSource::Palette(kind));
                let target = before.map_or(DropTarget::Canvas, DropTarget::Component);
                let outcome = self.drag.drop_on(target, &mut self.store);
                report(out, &outcome)?;
            }
            ShellCommand::Move { id, to } => {
                let outcome = match to {
                    MoveTo::Step(direction) => self.drag.nudge(&id, direction, &mut self.store),
                    MoveTo::Onto(target) => {
                        self.drag.begin(DragSource::Canvas(id));
                        self.drag.drop_on(DropTarget::Component(target), &mut self.store)
                    }
                };
                report(out, &outcome)?;
            }
            ShellCommand::Duplicate(id) => {
                let copy = self.store.duplicate_component(&id)?;
                writeln!(out, "{} {}", "duplicated as".green(), copy)?;
            }
            ShellCommand::Delete(id) => {
                let removed = self.store.delete_component(&id)?;
                writeln!(out, "{} {} ({})", "deleted".green(), removed.id, removed.kind)?;
            }
            ShellCommand::Select(id) => {
                self.store.select_component(&id)?;
                writeln!(out, "selected {}", id)?;
            }
            ShellCommand::Deselect => self.store.clear_selection(),
            ShellCommand::Set { id, field, value } => {
                PropertyEditor::open(&mut self.store, &id)?.update_field(&field, value)?;
                writeln!(out, "{} {}.{}", "updated".green(), id, field)?;
            }
            ShellCommand::Push { id, field, value } => {
                let mut editor = PropertyEditor::open(&mut self.store, &id)?;
                let index = match value {
                    Some(value) => editor.add_array_item(&field, value)?,
                    None => editor.add_blank_item(&field)?,
                };
                writeln!(out, "{} {}.{}[{}]", "added".green(), id, field, index)?;
            }
            ShellCommand::RemoveItem { id, field, index } => {
                let removed = PropertyEditor::open(&mut self.store, &id)?
                    .remove_array_item(&field, index)?;
                writeln!(out, "{} {}", "removed".green(), removed)?;
            }
            ShellCommand::Pull => {
                let project = load_project(&self.path)?;
                self.store.initialize_from_project(&project)?;
                self.project = project;
                writeln!(out, "reloaded {} components", self.store.len())?;
            }
            ShellCommand::Undo => {
                let label = if self.store.undo() { "undone" } else { "nothing to undo" };
                writeln!(out, "{}", label)?;
            }
            ShellCommand::Redo => {
                let label = if self.store.redo() { "redone" } else { "nothing to redo" };
                writeln!(out, "{}", label)?;
            }
            ShellCommand::List => self.list(out)?,
            ShellCommand::Show(id) => self.show(id, out)?,
            ShellCommand::Save => {
                self.save()?;
                writeln!(out, "{} {}", "saved".green(), self.path.display())?;
            }
            ShellCommand::Preview => {
                let on = self.store.toggle_preview();
                writeln!(out, "preview {}", if on { "on" } else { "off" })?;
            }
            ShellCommand::TogglePanel(panel) => {
                let shown = self.store.toggle_panel(panel);
                writeln!(out, "{:?} panel {}", panel, if shown { "shown" } else { "hidden" })?;
            }
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit { force } => {
                if self.store.has_unsaved_changes() && !force {
                    writeln!(
                        out,
                        "{}",
                        "unsaved changes, 'save' first or 'quit!' to discard".yellow()
                    )?;
                    return Ok(Flow::Continue);
                }
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Write the page back into the project file
    pub fn save(&mut self) -> Result<()> {
        if !self.backed_up {
            backup_project(&self.path)?;
            self.backed_up = true;
        }

        let ticket = self.store.begin_save()?;
        let mut project = self.project.clone();
        project.content = self.store.serialize().into();
        project.touch();

        let written = save_project(&project, &self.path);
        self.store.finish_save(ticket, written.is_ok());
        written?;

        self.project = project;
        Ok(())
    }

    fn list(&self, out: &mut impl Write) -> Result<()> {
        if self.store.is_empty() {
            writeln!(out, "{}", "(empty page)".dimmed())?;
            return Ok(());
        }
        let selected = self.store.selected_id();
        for (index, component) in self.store.components().iter().enumerate() {
            let marker = if Some(&component.id) == selected { "*" } else { " " };
            writeln!(
                out,
                "{}{:>3}  {:<24} {}",
                marker,
                index,
                component.id.to_string().cyan(),
                component.summary()
            )?;
        }
        Ok(())
    }

    fn show(&self, id: Option<ComponentId>, out: &mut impl Write) -> Result<()> {
        let id = id
            .or_else(|| self.store.selected_id().cloned())
            .ok_or_else(|| anyhow!("Nothing selected, use 'show <id>'"))?;
        let component = self
            .store
            .component(&id)
            .ok_or_else(|| anyhow!("Component not found: {}", id))?;

        writeln!(out, "{} ({})", component.id.to_string().bold(), component.kind.label())?;
        for spec in component.kind.fields() {
            writeln!(
                out,
                "  {:<20} {:<10} {}",
                spec.key,
                spec.kind.expected(),
                component.field_or_default(&spec.key)
            )?;
        }
        Ok(())
    }
}

fn report(out: &mut impl Write, outcome: &DropOutcome) -> Result<()> {
    match outcome {
        DropOutcome::Inserted { id, index } => {
            writeln!(out, "{} {} at {}", "inserted".green(), id, index)?
        }
        DropOutcome::Moved { id, from, to } => {
            writeln!(out, "{} {} {} -> {}", "moved".green(), id, from, to)?
        }
        DropOutcome::Ignored(reason) => writeln!(out, "{} {}", "ignored:".yellow(), reason)?,
    }
    Ok(())
}

/// Read commands from `input` until quit or end of input
pub fn run_shell(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(
        out,
        "Editing {} ({} components). Type 'help' for commands.",
        session.project.name.bold(),
        session.store.len()
    )?;

    for line in input.lines() {
        let line = line?;
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{} {}", "error:".red(), e)?;
                continue;
            }
        };
        match session.execute(command, out) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(out, "{} {}", "error:".red(), e)?,
        }
        write!(out, "{} ", ">".bold())?;
        out.flush()?;
    }

    if session.store.has_unsaved_changes() {
        writeln!(out, "{}", "input closed with unsaved changes".yellow())?;
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
