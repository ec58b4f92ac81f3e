use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::api_client::{HttpTaskClient, TaskApi};
use crate::model::{AppConfig, FormField, FormState, TaskId};
use crate::ops::controller::TaskController;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a subcommand against the configured API, printing to stdout
pub fn dispatch(cli: Cli, config: &AppConfig) -> CmdResult {
    let Some(command) = cli.command else {
        return Err("no subcommand given".into());
    };
    let client = HttpTaskClient::new(&config.api)?;
    debug!(base_url = client.base_url(), "cli dispatch");
    let mut controller = TaskController::new(client);

    let stdin = io::stdin();
    let mut confirm = |id: &TaskId| prompt_delete(id, &mut stdin.lock(), &mut io::stderr());
    let mut out = io::stdout().lock();
    run_command(&mut controller, command, cli.json, &mut confirm, &mut out)
}

/// Run one command through the controller. `confirm` is asked before a
/// delete without `--yes`.
pub fn run_command<A, C, W>(
    controller: &mut TaskController<A>,
    command: Commands,
    json: bool,
    confirm: &mut C,
    out: &mut W,
) -> CmdResult
where
    A: TaskApi,
    C: FnMut(&TaskId) -> io::Result<bool>,
    W: Write,
{
    match command {
        Commands::List => cmd_list(controller, json, out),
        Commands::Add(args) => cmd_add(controller, args, json, out),
        Commands::Toggle(args) => cmd_toggle(controller, args, json, out),
        Commands::Delete(args) => cmd_delete(controller, args, json, confirm, out),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Surface the controller's error, if the last operation set one
fn check<A: TaskApi>(controller: &TaskController<A>) -> CmdResult {
    match &controller.state().error {
        Some(message) => Err(message.clone().into()),
        None => Ok(()),
    }
}

fn print_tasks<A: TaskApi, W: Write>(
    controller: &TaskController<A>,
    json: bool,
    out: &mut W,
) -> CmdResult {
    let tasks = &controller.state().tasks;
    if json {
        writeln!(out, "{}", tasks_to_json(tasks)?)?;
    } else {
        for line in format_task_list(tasks) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Ask on `output`, read one answer from `input`. Only "y"/"yes" confirms.
pub fn prompt_delete(
    id: &TaskId,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    write!(output, "Delete task {}? [y/N] ", id)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list<A: TaskApi, W: Write>(
    controller: &mut TaskController<A>,
    json: bool,
    out: &mut W,
) -> CmdResult {
    controller.load();
    check(controller)?;
    print_tasks(controller, json, out)
}

fn cmd_add<A: TaskApi, W: Write>(
    controller: &mut TaskController<A>,
    args: AddArgs,
    json: bool,
    out: &mut W,
) -> CmdResult {
    let form = FormState {
        title: args.title,
        description: args.description,
        due_date: args.due,
        priority: args.priority,
    };
    if let Some(field) = form.first_invalid() {
        let message = match field {
            FormField::Title => "--title must not be empty",
            FormField::Description => "--description must not be empty",
            FormField::DueDate => "--due must be a date in YYYY-MM-DD form",
            FormField::Priority => "--priority must be Low, Medium or High",
        };
        return Err(message.into());
    }
    *controller.form_mut() = form;
    controller.submit();
    check(controller)?;
    print_tasks(controller, json, out)
}

fn cmd_toggle<A: TaskApi, W: Write>(
    controller: &mut TaskController<A>,
    args: IdArgs,
    json: bool,
    out: &mut W,
) -> CmdResult {
    // Toggling needs the current record to resend every field
    controller.load();
    check(controller)?;
    controller.toggle_completion(&TaskId::new(args.id));
    check(controller)?;
    print_tasks(controller, json, out)
}

fn cmd_delete<A, C, W>(
    controller: &mut TaskController<A>,
    args: DeleteArgs,
    json: bool,
    confirm: &mut C,
    out: &mut W,
) -> CmdResult
where
    A: TaskApi,
    C: FnMut(&TaskId) -> io::Result<bool>,
    W: Write,
{
    let id = TaskId::new(args.id);
    controller.request_delete(&id);
    if !args.yes && !confirm(&id)? {
        controller.cancel_delete();
        if json {
            writeln!(out, "{}", cancelled_to_json(&id)?)?;
        } else {
            writeln!(out, "cancelled")?;
        }
        return Ok(());
    }
    controller.confirm_delete();
    check(controller)?;
    print_tasks(controller, json, out)
}
