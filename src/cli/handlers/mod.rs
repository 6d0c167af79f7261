use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::controller::{Notice, RowStyle, TaskListController, View};
use crate::io::config_io::load_config;
use crate::io::recovery::{RecoveryLog, read_recovery_entries};
use crate::io::store::FsStore;
use crate::model::config::Config;
use crate::model::task::{TaskState, TaskStatus};
use crate::parse::encode_task;

/// Tasks file used when neither `--file` nor the config names one
pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";

const DEFAULT_RECOVERY_LIMIT: usize = 10;

/// Resolved config and tasks file for one invocation
pub struct Context {
    pub config: Config,
    pub tasks_file: PathBuf,
    /// Whether the tasks file came from `--file` or the config
    pub explicit_file: bool,
    pub json: bool,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Context, Box<dyn std::error::Error>> {
        let cwd = std::env::current_dir()?;
        let config = load_config(cli.config.as_deref(), &cwd)?;
        let (tasks_file, explicit_file) = resolve_tasks_file(cli.file.as_deref(), &config, &cwd);
        Ok(Context {
            config,
            tasks_file,
            explicit_file,
            json: cli.json,
        })
    }

    fn recovery_log(&self) -> Option<RecoveryLog> {
        self.config
            .recovery_log_path(&self.tasks_file)
            .map(RecoveryLog::new)
    }
}

/// `--file`, else `tasks.file` from config, else `tasks.txt` in `cwd`
pub fn resolve_tasks_file(flag: Option<&Path>, config: &Config, cwd: &Path) -> (PathBuf, bool) {
    if let Some(path) = flag {
        return (path.to_path_buf(), true);
    }
    if let Some(path) = &config.tasks.file {
        return (path.clone(), true);
    }
    (cwd.join(DEFAULT_TASKS_FILE), false)
}

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(&cli)?;

    match cli.command {
        None => crate::tui::run(&ctx.config, &ctx.tasks_file, ctx.explicit_file),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&ctx, args),
            Commands::Status => cmd_status(&ctx),
            Commands::Recovery(args) => cmd_recovery(&ctx, args),

            // Write commands
            Commands::Add(args) => cmd_add(&ctx, args),
            Commands::Done(args) => cmd_done(&ctx, args),
            Commands::Undo(args) => cmd_undo(&ctx, args),
            Commands::Toggle(args) => cmd_toggle(&ctx, args),
            Commands::Rm(args) => {
                let stdin = io::stdin();
                cmd_rm(&ctx, args, stdin.lock(), &mut io::stdout())
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Console view
// ---------------------------------------------------------------------------

/// [`View`] for one-shot commands. Rows are not drawn; notices go to
/// stderr and confirmations are read from `input`.
pub struct ConsoleView<R: BufRead> {
    input: R,
    assume_yes: bool,
}

impl<R: BufRead> ConsoleView<R> {
    pub fn new(input: R, assume_yes: bool) -> Self {
        ConsoleView { input, assume_yes }
    }
}

impl<R: BufRead> View for ConsoleView<R> {
    fn append_row(&mut self, _text: &str, _style: RowStyle) {}
    fn replace_row(&mut self, _index: usize, _text: &str, _style: RowStyle) {}
    fn remove_row(&mut self, _index: usize) {}
    fn clear_rows(&mut self) {}
    fn clear_input(&mut self) {}
    fn set_status(&mut self, _status: TaskStatus) {}

    fn show_notice(&mut self, notice: Notice) {
        eprintln!("{}: {}", notice.title, notice.message.replace('\n', " "));
    }

    fn confirm(&mut self, _title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

type Controller<R> = TaskListController<ConsoleView<R>, FsStore>;

/// Build a controller holding the current contents of the tasks file.
/// A missing file is an empty list.
fn open<R: BufRead>(
    ctx: &Context,
    view: ConsoleView<R>,
) -> Result<Controller<R>, Box<dyn std::error::Error>> {
    let mut controller = TaskListController::new(view, FsStore).with_recovery_log(ctx.recovery_log());
    if ctx.tasks_file.exists() {
        controller.load_tasks(&ctx.tasks_file)?;
    }
    Ok(controller)
}

/// Open the tasks file with a view that declines every confirm
fn open_noninteractive(ctx: &Context) -> Result<Controller<io::Empty>, Box<dyn std::error::Error>> {
    open(ctx, ConsoleView::new(io::empty(), false))
}

/// Convert a 1-based task number into a list index
fn task_index(number: usize, len: usize) -> Result<usize, Box<dyn std::error::Error>> {
    if number == 0 || number > len {
        return Err(format!("no task #{} (the list has {} task(s))", number, len).into());
    }
    Ok(number - 1)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let state_filter = args
        .state
        .as_deref()
        .map(|s| {
            TaskState::parse_state(s)
                .ok_or_else(|| format!("invalid state '{}' (expected active or completed)", s))
        })
        .transpose()?;

    let controller = open_noninteractive(ctx)?;
    let tasks = controller.tasks();
    let selected: Vec<(usize, &crate::model::Task)> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| state_filter.is_none_or(|s| t.state() == s))
        .collect();
    let status = controller.compute_status();

    if ctx.json {
        let list = TaskListJson {
            tasks: selected.iter().map(|(i, t)| task_to_json(*i, t)).collect(),
            status,
        };
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        println!("{}", format_task_list(&selected, tasks.len(), status));
    }
    Ok(())
}

fn cmd_status(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let controller = open_noninteractive(ctx)?;
    let status = controller.compute_status();
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", status);
    }
    Ok(())
}

fn cmd_recovery(ctx: &Context, args: RecoveryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = ctx.config.recovery_log_path(&ctx.tasks_file) else {
        println!("Recovery log is disabled.");
        return Ok(());
    };

    let limit = args.limit.unwrap_or(DEFAULT_RECOVERY_LIMIT);
    let entries = read_recovery_entries(&path, Some(limit));

    if ctx.json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No recovery entries in {}", path.display());
        return Ok(());
    }
    for entry in &entries {
        print!("{}", entry.to_display_markdown());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_noninteractive(ctx)?;
    controller.add_task(&args.text.join(" "))?;
    controller.save_tasks(&ctx.tasks_file)?;

    let tasks = controller.tasks();
    if let Some(task) = tasks.last() {
        println!("Added #{}: {}", tasks.len(), task.text);
    }
    Ok(())
}

fn cmd_done(ctx: &Context, args: IndexArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_noninteractive(ctx)?;
    let index = task_index(args.index, controller.tasks().len())?;
    controller.mark_completed(Some(index))?;
    controller.save_tasks(&ctx.tasks_file)?;
    println!(
        "Completed #{}: {}",
        args.index,
        controller.tasks()[index].text
    );
    Ok(())
}

fn cmd_undo(ctx: &Context, args: IndexArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_noninteractive(ctx)?;
    let index = task_index(args.index, controller.tasks().len())?;
    controller.mark_active(Some(index))?;
    controller.save_tasks(&ctx.tasks_file)?;
    println!("Reopened #{}: {}", args.index, controller.tasks()[index].text);
    Ok(())
}

fn cmd_toggle(ctx: &Context, args: IndexArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_noninteractive(ctx)?;
    let index = task_index(args.index, controller.tasks().len())?;
    controller.toggle_completed(Some(index));
    controller.save_tasks(&ctx.tasks_file)?;

    let task = &controller.tasks()[index];
    let verb = if task.completed {
        "Completed"
    } else {
        "Reopened"
    };
    println!("{} #{}: {}", verb, args.index, task.text);
    Ok(())
}

fn cmd_rm<R: BufRead>(
    ctx: &Context,
    args: RmArgs,
    input: R,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open(ctx, ConsoleView::new(input, args.yes))?;
    let index = task_index(args.index, controller.tasks().len())?;
    let line = encode_task(&controller.tasks()[index]);

    if !controller.delete_task(Some(index))? {
        writeln!(out, "Cancelled")?;
        return Ok(());
    }
    controller.save_tasks(&ctx.tasks_file)?;
    writeln!(out, "Deleted #{}: {}", args.index, line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ctx_in(dir: &TempDir, content: Option<&str>) -> Context {
        let tasks_file = dir.path().join("tasks.txt");
        if let Some(content) = content {
            fs::write(&tasks_file, content).unwrap();
        }
        Context {
            config: Config::default(),
            tasks_file,
            explicit_file: true,
            json: false,
        }
    }

    #[test]
    fn test_resolve_tasks_file() {
        let cwd = Path::new("/work");
        let mut config = Config::default();
        assert_eq!(
            resolve_tasks_file(None, &config, cwd),
            (PathBuf::from("/work/tasks.txt"), false)
        );
        config.tasks.file = Some(PathBuf::from("/lists/home.txt"));
        assert_eq!(
            resolve_tasks_file(None, &config, cwd),
            (PathBuf::from("/lists/home.txt"), true)
        );
        assert_eq!(
            resolve_tasks_file(Some(Path::new("x.txt")), &config, cwd),
            (PathBuf::from("x.txt"), true)
        );
    }

    #[test]
    fn test_task_index() {
        assert_eq!(task_index(1, 3).unwrap(), 0);
        assert_eq!(task_index(3, 3).unwrap(), 2);
        let err = task_index(0, 3).unwrap_err();
        assert_eq!(err.to_string(), "no task #0 (the list has 3 task(s))");
        assert!(task_index(4, 3).is_err());
    }

    #[test]
    fn test_console_confirm_reads_answer() {
        let mut view = ConsoleView::new("y\n".as_bytes(), false);
        assert!(view.confirm("Delete Task", "Sure?"));
        let mut view = ConsoleView::new("\n".as_bytes(), false);
        assert!(!view.confirm("Delete Task", "Sure?"));
        let mut view = ConsoleView::new("".as_bytes(), true);
        assert!(view.confirm("Delete Task", "Sure?"));
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx_in(&dir, None);
        let controller = open_noninteractive(&ctx).unwrap();
        assert!(controller.tasks().is_empty());
    }

    #[test]
    fn test_rm_declined_keeps_file() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx_in(&dir, Some("Buy milk\n[Done] Walk dog\n"));
        let mut out = Vec::new();
        let args = RmArgs {
            index: 2,
            yes: false,
        };
        cmd_rm(&ctx, args, "n\n".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Cancelled\n");
        assert_eq!(
            fs::read_to_string(&ctx.tasks_file).unwrap(),
            "Buy milk\n[Done] Walk dog\n"
        );
    }

    #[test]
    fn test_rm_confirmed_deletes_and_logs() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx_in(&dir, Some("Buy milk\n[Done] Walk dog\n"));
        let mut out = Vec::new();
        let args = RmArgs {
            index: 2,
            yes: false,
        };
        cmd_rm(&ctx, args, "yes\n".as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Deleted #2: [Done] Walk dog\n"
        );
        assert_eq!(fs::read_to_string(&ctx.tasks_file).unwrap(), "Buy milk\n");

        let log = ctx.config.recovery_log_path(&ctx.tasks_file).unwrap();
        let entries = read_recovery_entries(&log, None);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].body.contains("[Done] Walk dog"));
    }
}
