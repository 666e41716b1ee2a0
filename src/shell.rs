// src/shell.rs
//! Interactive session: a list view with a filter panel, and a form view
//! for creating or editing a posting.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::cli::TerminalConfirm;
use crate::controllers::{list_view, App, DeleteOutcome, FilterField, FilterPanel, FormField, View};
use crate::core::JobApi;
use crate::mapper::{JobTypeFilter, SortDirective};
use crate::types::{JobId, JobType};

const HELP: &str = "\
Commands:
  list                      show the current list
  refresh                   fetch the list again
  filter title <text>       set the title filter (draft)
  filter location <text>    set the location filter (draft)
  filter tag <text>         set the tag filter (draft)
  filter type <type|all>    set the job type filter (draft)
  search                    apply the draft filters
  reset                     clear all filters and sorting
  sort <date_desc|date_asc|none>
  add                       create a posting
  edit <id>                 edit a listed posting
  delete <id>               delete a posting
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Refresh,
    Filter(FilterUpdate),
    Search,
    Reset,
    Sort(SortDirective),
    Add,
    Edit(JobId),
    Delete(JobId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Text(FilterField, String),
    JobType(JobTypeFilter),
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let parse_id = |rest: &str| {
        rest.parse::<JobId>()
            .map_err(|_| format!("expected a job id, got '{}'", rest))
    };

    match word {
        "list" | "ls" => Ok(ShellCommand::List),
        "refresh" => Ok(ShellCommand::Refresh),
        "search" => Ok(ShellCommand::Search),
        "reset" => Ok(ShellCommand::Reset),
        "add" => Ok(ShellCommand::Add),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        "edit" => parse_id(rest).map(ShellCommand::Edit),
        "delete" | "rm" => parse_id(rest).map(ShellCommand::Delete),
        "sort" => match rest {
            "date_desc" | "date_asc" | "none" | "" => {
                Ok(ShellCommand::Sort(SortDirective::from_key(rest)))
            }
            other => Err(format!("unknown sort '{}'", other)),
        },
        "filter" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let value = value.trim().to_string();
            let update = match field {
                "title" => FilterUpdate::Text(FilterField::Title, value),
                "location" => FilterUpdate::Text(FilterField::Location, value),
                "tag" | "tags" => FilterUpdate::Text(FilterField::Tags, value),
                "type" | "job_type" => {
                    let job_type = value
                        .parse::<JobTypeFilter>()
                        .map_err(|e| e.to_string())?;
                    FilterUpdate::JobType(job_type)
                }
                other => return Err(format!("unknown filter '{}'", other)),
            };
            Ok(ShellCommand::Filter(update))
        }
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn print_list<A: JobApi>(app: &App<A>) {
    if let Some(banner) = app.fetch_error() {
        eprintln!("! {}", banner);
    }
    print!("{}", list_view::render_jobs(app.jobs()));
}

pub async fn run<A: JobApi>(api: A) -> Result<()> {
    let mut app = App::new(api);
    let mut panel = FilterPanel::new();

    app.refresh().await;
    println!("Job Listings");
    print_list(&app);
    println!("Type 'help' for commands.");

    while let Some(line) = read_line("jobs> ")? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::List => print_list(&app),
            ShellCommand::Refresh => {
                app.refresh().await;
                print_list(&app);
            }
            ShellCommand::Filter(FilterUpdate::Text(field, value)) => {
                panel.set_field(field, value);
            }
            ShellCommand::Filter(FilterUpdate::JobType(job_type)) => {
                panel.set_job_type(job_type);
            }
            ShellCommand::Search => {
                app.apply_criteria(panel.search()).await;
                print_list(&app);
            }
            ShellCommand::Reset => {
                app.apply_criteria(panel.reset()).await;
                print_list(&app);
            }
            ShellCommand::Sort(sort) => {
                app.set_sort(panel.select_sort(sort)).await;
                print_list(&app);
            }
            ShellCommand::Add => {
                app.open_create();
                run_form(&mut app).await?;
            }
            ShellCommand::Edit(id) => {
                if !app.open_edit(id) {
                    eprintln!("Job #{} is not in the current list", id);
                    continue;
                }
                run_form(&mut app).await?;
            }
            ShellCommand::Delete(id) => match app.delete(id, &mut TerminalConfirm).await {
                DeleteOutcome::Deleted => print_list(&app),
                DeleteOutcome::Cancelled => {}
                DeleteOutcome::Failed(alert) => eprintln!("! {}", alert),
            },
        }
    }

    info!("Interactive shell closed");
    Ok(())
}

/// Prompt for each field (blank keeps the current value) until the form is
/// saved or the user gives up.
async fn run_form<A: JobApi>(app: &mut App<A>) -> Result<()> {
    loop {
        let View::Form(form) = app.view() else {
            return Ok(());
        };
        println!("{}", form.heading());
        let current = form.form().clone();

        let text_fields = [
            (FormField::Title, "Job Title", current.title),
            (FormField::Company, "Company Name", current.company),
            (FormField::Location, "Location", current.location),
            (FormField::Tags, "Tags (comma-separated)", current.tags),
        ];
        let mut edits = Vec::new();
        for (field, label, value) in text_fields {
            let Some(input) = read_line(&format!("{} [{}]: ", label, value))? else {
                app.close_form();
                return Ok(());
            };
            if !input.trim().is_empty() {
                edits.push((field, input.trim().to_string()));
            }
        }

        let current_type = current.job_type.map(|t| t.as_str()).unwrap_or("");
        let prompt = format!(
            "Job Type (Full-time/Part-time/Internship/Contract) [{}]: ",
            current_type
        );
        let job_type = match read_line(&prompt)? {
            Some(input) if !input.trim().is_empty() => match input.parse::<JobType>() {
                Ok(job_type) => Some(job_type),
                Err(e) => {
                    eprintln!("{}", e);
                    None
                }
            },
            _ => None,
        };

        if let Some(form) = app.form_mut() {
            for (field, value) in edits {
                form.set_field(field, value);
            }
            if job_type.is_some() {
                form.set_job_type(job_type);
            }
        }

        match app.submit_form().await {
            Some(Ok(saved)) => {
                println!("✓ Saved job #{}", saved.id);
                print_list(app);
                return Ok(());
            }
            Some(Err(e)) => {
                eprintln!("! {}", e);
                let again = read_line("Edit again? [Y/n] ")?.unwrap_or_else(|| "n".to_string());
                if matches!(again.trim().to_lowercase().as_str(), "n" | "no") {
                    app.close_form();
                    return Ok(());
                }
            }
            None => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("list"), Ok(ShellCommand::List));
        assert_eq!(parse_command("  search "), Ok(ShellCommand::Search));
        assert_eq!(parse_command("reset"), Ok(ShellCommand::Reset));
        assert_eq!(parse_command("q"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_command("edit 12"), Ok(ShellCommand::Edit(12)));
        assert_eq!(parse_command("delete 7"), Ok(ShellCommand::Delete(7)));
        assert!(parse_command("delete seven").is_err());
        assert!(parse_command("edit").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_command("sort date_desc"),
            Ok(ShellCommand::Sort(SortDirective::NewestFirst))
        );
        assert_eq!(parse_command("sort none"), Ok(ShellCommand::Sort(SortDirective::Unset)));
        assert!(parse_command("sort title").is_err());
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            parse_command("filter title senior developer"),
            Ok(ShellCommand::Filter(FilterUpdate::Text(
                FilterField::Title,
                "senior developer".to_string()
            )))
        );
        assert_eq!(
            parse_command("filter type Internship"),
            Ok(ShellCommand::Filter(FilterUpdate::JobType(JobTypeFilter::Only(
                JobType::Internship
            ))))
        );
        assert_eq!(
            parse_command("filter type all"),
            Ok(ShellCommand::Filter(FilterUpdate::JobType(JobTypeFilter::All)))
        );
        assert_eq!(
            parse_command("filter location"),
            Ok(ShellCommand::Filter(FilterUpdate::Text(
                FilterField::Location,
                String::new()
            )))
        );
        assert!(parse_command("filter salary 100k").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_command("launch").is_err());
    }
}
