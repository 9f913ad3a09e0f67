use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::{Table, Tabled};
use tasklist_cli::cli::{Cli, Command};
use tasklist_core::bridge::PersistenceBridge;
use tasklist_core::config;
use tasklist_core::controller::Controller;
use tasklist_core::error::AppError;
use tasklist_core::model::Task;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "text")]
    text: String,
    #[tabled(rename = "done")]
    done: &'static str,
    #[tabled(rename = "removed")]
    removed: &'static str,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            done: if task.is_done { "yes" } else { "no" },
            removed: if task.is_removed { "yes" } else { "no" },
        }
    }
}

fn print_tasks_plain(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks to show.");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from_task).collect();
    println!("{}", Table::new(rows));
}

fn print_tasks_json(tasks: &[Task]) {
    println!("{}", serde_json::json!(tasks));
}

fn print_task_json(task: &Task) {
    println!("{}", serde_json::json!(task));
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(controller: &mut Controller, cli: Cli) {
    match cli.command {
        Command::Add { text } => {
            let text = text.unwrap_or_default();
            match controller.create(&text) {
                Some(task) => {
                    if cli.json {
                        print_task_json(&task);
                    } else {
                        println!("Added task: {} ({})", task.text, task.id);
                    }
                }
                None => println!("Nothing to add: task text is empty."),
            }
        }
        Command::Edit { id, new_text } => match controller.edit_text(&id, &new_text) {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else {
                    println!("Updated task: {} ({})", task.text, task.id);
                }
            }
            None => println!("No matching task: {id}"),
        },
        Command::Done { id, set } => match controller.toggle_done(&id, set) {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else if task.is_done {
                    println!("Marked done: {} ({})", task.text, task.id);
                } else {
                    println!("Marked not done: {} ({})", task.text, task.id);
                }
            }
            None => println!("No matching task: {id}"),
        },
        Command::Remove { id } => match controller.toggle_removed(&id) {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else if task.is_removed {
                    println!("Removed task: {} ({})", task.text, task.id);
                } else {
                    println!("Restored task: {} ({})", task.text, task.id);
                }
            }
            None => println!("No matching task: {id}"),
        },
        Command::List { filter } => {
            controller.set_filter(filter.into());
            let snapshot = controller.snapshot();
            if cli.json {
                print_tasks_json(&snapshot.tasks);
            } else {
                print_tasks_plain(&snapshot.tasks);
            }
        }
    }
}

fn run_interactive(controller: &mut Controller) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        run_command(controller, cli);
    }

    Ok(())
}

fn open_controller() -> Result<Controller, AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = config_load.error {
        tracing::warn!(error = %err, "config unreadable, using defaults");
    }

    let bridge = PersistenceBridge::from_config(&config_load.config)?;
    Ok(Controller::new(bridge))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args_os();
    args.next();
    let interactive = args.next().is_none();

    if interactive {
        let mut controller = match open_controller() {
            Ok(controller) => controller,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                std::process::exit(1);
            }
        };
        controller.hydrate().await;

        let result = run_interactive(&mut controller);
        controller.flush().await;
        if let Err(err) = result {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                err.print().ok();
                return;
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let mut controller = match open_controller() {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };
    controller.hydrate().await;
    run_command(&mut controller, cli);
    controller.flush().await;
}
