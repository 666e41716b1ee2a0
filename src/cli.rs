// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use crate::controllers::{
    list_view, AutoConfirm, Confirm, Criteria, DeleteOutcome, FormController, FormField,
};
use crate::core::{ApiClient, JobApi};
use crate::mapper::{build_list_query, JobFilters, JobTypeFilter, SortDirective};
use crate::types::{JobId, JobType};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Browse and manage job postings on a job-board backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List postings, optionally filtered and sorted
    List(ListArgs),
    /// Create a new posting
    Add(AddArgs),
    /// Edit an existing posting; unspecified fields keep their current value
    Edit(EditArgs),
    /// Delete a posting
    Delete {
        id: JobId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Interactive session
    Shell,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub tag: String,
    /// Full-time, Part-time, Internship, Contract or all
    #[arg(long, default_value = "all")]
    pub job_type: JobTypeFilter,
    /// date_desc, date_asc or none
    #[arg(long, default_value = "none")]
    pub sort: String,
}

impl ListArgs {
    pub fn criteria(&self) -> Criteria {
        Criteria {
            filters: JobFilters {
                title: self.title.clone(),
                location: self.location.clone(),
                tags: self.tag.clone(),
                job_type: self.job_type,
            },
            sort: SortDirective::from_key(&self.sort),
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub job_type: Option<JobType>,
    /// Comma-separated
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: JobId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub job_type: Option<JobType>,
    #[arg(long)]
    pub tags: Option<String>,
}

/// Confirmation read from the terminal
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, title: &str, description: &str) -> bool {
        print!("{} {} [y/N] ", title, description);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

pub async fn handle_command(command: Command, client: ApiClient) -> Result<()> {
    match command {
        Command::List(args) => {
            let criteria = args.criteria();
            let query = build_list_query(Some(&criteria.filters), criteria.sort);
            let jobs = client
                .list_jobs(query)
                .await
                .context("Failed to load jobs.")?;
            print!("{}", list_view::render_jobs(&jobs));
        }

        Command::Add(args) => {
            let mut form = FormController::create();
            form.set_field(FormField::Title, args.title);
            form.set_field(FormField::Company, args.company);
            form.set_field(FormField::Location, args.location);
            form.set_job_type(args.job_type);
            form.set_field(FormField::Tags, args.tags);

            let saved = form.submit(&client).await?;
            println!("✓ Created job #{}", saved.id);
            print!("{}", list_view::render_job(&saved));
        }

        Command::Edit(args) => {
            let existing = client
                .get_job(args.id)
                .await
                .with_context(|| format!("Failed to load job {}", args.id))?;

            let mut form = FormController::edit(&existing);
            let overrides = [
                (FormField::Title, args.title),
                (FormField::Company, args.company),
                (FormField::Location, args.location),
                (FormField::Tags, args.tags),
            ];
            for (field, value) in overrides {
                if let Some(value) = value {
                    form.set_field(field, value);
                }
            }
            if args.job_type.is_some() {
                form.set_job_type(args.job_type);
            }

            let saved = form.submit(&client).await?;
            println!("✓ Updated job #{}", saved.id);
            print!("{}", list_view::render_job(&saved));
        }

        Command::Delete { id, yes } => {
            let outcome = if yes {
                list_view::delete_job(&client, &mut AutoConfirm(true), id).await
            } else {
                list_view::delete_job(&client, &mut TerminalConfirm, id).await
            };

            match outcome {
                DeleteOutcome::Deleted => println!("✓ Deleted job #{}", id),
                DeleteOutcome::Cancelled => println!("Cancelled"),
                DeleteOutcome::Failed(alert) => anyhow::bail!(alert),
            }
        }

        Command::Shell => {
            info!("Starting interactive shell against {}", client.base_url());
            crate::shell::run(client).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_parse_into_criteria() {
        let cli = Cli::try_parse_from([
            "jobboard",
            "list",
            "--title",
            "engineer",
            "--job-type",
            "Part-time",
            "--sort",
            "date_asc",
        ])
        .unwrap();

        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        let criteria = args.criteria();
        assert_eq!(criteria.filters.title, "engineer");
        assert_eq!(criteria.filters.job_type, JobTypeFilter::Only(JobType::PartTime));
        assert_eq!(criteria.sort, SortDirective::OldestFirst);
    }

    #[test]
    fn test_list_defaults_are_empty_criteria() {
        let cli = Cli::try_parse_from(["jobboard", "list"]).unwrap();

        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.criteria(), Criteria::default());
    }

    #[test]
    fn test_invalid_job_type_is_rejected() {
        let result = Cli::try_parse_from([
            "jobboard",
            "add",
            "--title",
            "Courier",
            "--company",
            "Planet Express",
            "--location",
            "New New York",
            "--job-type",
            "Gig",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_flags() {
        let cli = Cli::try_parse_from([
            "jobboard",
            "--api-url",
            "http://api:5000",
            "delete",
            "7",
            "--yes",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://api:5000"));
        assert!(matches!(cli.command, Command::Delete { id: 7, yes: true }));
    }
}
