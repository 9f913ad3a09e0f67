use clap::{Parser, Subcommand, ValueEnum};
use tasklist_core::model::Filter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasklist add "Buy milk"
    Add {
        text: Option<String>,
    },
    /// Edit a task's text
    ///
    /// Example: tasklist edit <ID> "Buy organic milk"
    Edit {
        id: String,
        new_text: String,
    },
    /// Toggle a task between done and not done
    ///
    /// Example: tasklist done <ID>
    /// Example: tasklist done <ID> --set false
    Done {
        id: String,
        #[arg(long)]
        set: Option<bool>,
    },
    /// Remove a task, or restore it when already removed
    ///
    /// Example: tasklist remove <ID>
    Remove {
        id: String,
    },
    /// List tasks matching a filter
    ///
    /// Example: tasklist list
    /// Example: tasklist list --filter removed
    List {
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    #[default]
    All,
    Done,
    Unchecked,
    Removed,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Filter::All,
            FilterArg::Done => Filter::Done,
            FilterArg::Unchecked => Filter::Unchecked,
            FilterArg::Removed => Filter::Removed,
        }
    }
}
