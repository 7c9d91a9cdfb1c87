use crate::context::Context;
use crate::download::{dump_all_departments, dump_department};
use crate::error::{AppError, Result};
use crate::pipeline::{extract_all_departments, extract_faculty_data};
use crate::utils::snapshot_dates;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "faculty-scraper", about = "Download and extract BUBT faculty directories")]
pub struct Cli {
    /// Configuration file
    #[arg(global = true, short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract faculty data
    Extract(ExtractArgs),
    /// Download faculty webpages
    Dump(DepartmentArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct DepartmentArgs {
    /// List available departments
    #[arg(short = 'D', long)]
    pub list_depts: bool,
    /// Alias of the department to use
    #[arg(short = 'd', long)]
    pub dept_alias: Option<String>,
    /// Use all departments
    #[arg(short = 'a', long)]
    pub all_dept: bool,
    /// List available snapshot dates of a department
    #[arg(short = 'S', long)]
    pub list_snapshots: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub department: DepartmentArgs,
    /// Date to use when extracting (YYYY-MM-DD). (default: latest)
    #[arg(short, long)]
    pub snapshot: Option<String>,
    /// Output directory (default: department's snapshot directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    ListDepartments,
    ListSnapshots(String),
    Department(String),
    All,
}

impl DepartmentArgs {
    /// Checks flag combinations and decides what the command acts on.
    pub fn selection(&self, snapshot: Option<&str>) -> Result<Selection> {
        if self.list_depts && (self.dept_alias.is_some() || self.all_dept || self.list_snapshots) {
            return Err(invalid(
                "--list-depts cannot be combined with department selection options",
            ));
        }

        if self.list_snapshots && self.dept_alias.is_none() {
            return Err(invalid("--list-snapshots requires --dept-alias"));
        }

        if self.dept_alias.is_some() && self.all_dept {
            return Err(invalid("Cannot use both --dept-alias and --all-dept"));
        }

        if let Some(snapshot) = snapshot {
            if !is_snapshot_date(snapshot) {
                return Err(invalid("Invalid date format. Use YYYY-MM-DD"));
            }
            if self.dept_alias.is_none() {
                return Err(invalid("--snapshot requires --dept-alias"));
            }
        }

        if self.list_depts {
            return Ok(Selection::ListDepartments);
        }

        match (&self.dept_alias, self.list_snapshots, self.all_dept) {
            (Some(alias), true, _) => Ok(Selection::ListSnapshots(alias.clone())),
            (Some(alias), false, _) => Ok(Selection::Department(alias.clone())),
            (None, _, true) => Ok(Selection::All),
            (None, _, false) => Err(invalid(
                "Select a department with --dept-alias or use --all-dept",
            )),
        }
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Cli(message.to_string())
}

pub fn is_snapshot_date(text: &str) -> bool {
    text.len() == 10 && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

pub async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Extract(args) => run_extract(ctx, args).await,
        Command::Dump(args) => run_dump(ctx, args).await,
    }
}

async fn run_extract(ctx: &Context, args: ExtractArgs) -> Result<()> {
    let output_dir = args.output_dir.as_deref();

    match args.department.selection(args.snapshot.as_deref())? {
        Selection::ListDepartments => print_departments(ctx),
        Selection::ListSnapshots(alias) => print_snapshots(ctx, &alias),
        Selection::All => {
            extract_all_departments(ctx, output_dir).await;
        }
        Selection::Department(alias) => {
            let dept = ctx.departments.get(&alias).ok_or_else(|| {
                AppError::Cli(format!(
                    "Scraping config not found for the department {}",
                    alias
                ))
            })?;

            let dates = snapshot_dates(ctx.root_dir(), &alias);
            let date = match args.snapshot {
                Some(date) if dates.contains(&date) => date,
                Some(_) => {
                    return Err(invalid(
                        "Snapshot not found. Use -S to list available snapshot dates.",
                    ))
                }
                None => dates.into_iter().next().ok_or_else(|| {
                    invalid("No snapshot directories were found. Did you forget to run dump command?")
                })?,
            };

            extract_faculty_data(ctx, dept, &date, None, output_dir).await?;
        }
    }

    Ok(())
}

async fn run_dump(ctx: &Context, args: DepartmentArgs) -> Result<()> {
    match args.selection(None)? {
        Selection::ListDepartments => print_departments(ctx),
        Selection::ListSnapshots(alias) => print_snapshots(ctx, &alias),
        Selection::All => {
            dump_all_departments(ctx).await;
        }
        Selection::Department(alias) => {
            let dept = ctx.departments.get(&alias).ok_or_else(|| {
                AppError::Cli(format!("Invalid department alias '{}'", alias))
            })?;
            dump_department(ctx, dept).await?;
        }
    }

    Ok(())
}

fn print_departments(ctx: &Context) {
    println!("---- Available Departments ----\n");
    for (index, dept) in ctx.departments.iter().enumerate() {
        println!("{:>2}. {} ({})", index + 1, dept.name, dept.alias);
    }
}

fn print_snapshots(ctx: &Context, alias: &str) {
    let dates = snapshot_dates(ctx.root_dir(), alias);
    if dates.is_empty() {
        println!(
            "No snapshots available for department: {} Did you forget to dump faculty webpages?",
            alias
        );
        return;
    }

    println!("--- Available Snapshots for {} ---\n", alias);
    for (index, date) in dates.iter().enumerate() {
        let latest = if index == 0 { " (latest)" } else { "" };
        println!("{:>2}. {}{}", index + 1, date, latest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(alias: Option<&str>, all: bool, list_depts: bool, list_snapshots: bool) -> DepartmentArgs {
        DepartmentArgs {
            list_depts,
            dept_alias: alias.map(str::to_string),
            all_dept: all,
            list_snapshots,
        }
    }

    #[test]
    fn parses_extract_flags() {
        let cli = Cli::try_parse_from([
            "faculty-scraper",
            "extract",
            "-d",
            "cse2",
            "-s",
            "2025-01-31",
            "-o",
            "out",
        ])
        .unwrap();

        let Command::Extract(extract) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(extract.department.dept_alias.as_deref(), Some("cse2"));
        assert_eq!(extract.snapshot.as_deref(), Some("2025-01-31"));
        assert_eq!(extract.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn selects_department_or_all() {
        assert_eq!(
            args(Some("eee2"), false, false, false).selection(None).unwrap(),
            Selection::Department("eee2".to_string())
        );
        assert_eq!(args(None, true, false, false).selection(None).unwrap(), Selection::All);
        assert_eq!(
            args(Some("eee2"), false, false, true).selection(None).unwrap(),
            Selection::ListSnapshots("eee2".to_string())
        );
        assert_eq!(
            args(None, false, true, false).selection(None).unwrap(),
            Selection::ListDepartments
        );
    }

    #[test]
    fn rejects_conflicting_flags() {
        assert!(args(Some("eee2"), false, true, false).selection(None).is_err());
        assert!(args(Some("eee2"), true, false, false).selection(None).is_err());
        assert!(args(None, false, false, true).selection(None).is_err());
        assert!(args(None, false, false, false).selection(None).is_err());
    }

    #[test]
    fn validates_snapshot_option() {
        assert!(args(Some("civil"), false, false, false)
            .selection(Some("2025-1-31"))
            .is_err());
        assert!(args(None, true, false, false)
            .selection(Some("2025-01-31"))
            .is_err());
        assert!(args(Some("civil"), false, false, false)
            .selection(Some("2025-01-31"))
            .is_ok());
        assert!(!is_snapshot_date("2025-02-30"));
    }
}
