use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jobboard_core::config::{resolve_with_base, Config, Settings};
use jobboard_core::data_loader::DataLoader;
use jobboard_core::types::{ContractType, DateRange, FilterSet, JobRecord, SearchParams, SearchResult, WorkMode};
use jobboard_search::page_window;
use jobboard_service::{JobBoard, SnapshotSource};

#[derive(Parser, Debug)]
#[command(name = "jobboard", about = "Search job offers stored as JSON files")]
struct Cli {
    /// Directory holding config.toml and config.<env>.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Directory of job JSON files (overrides data.jobs_dir)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, sort and page the listing
    Search(SearchArgs),
    /// Print one job
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// Print the pagination bar for a page out of a total
    Pages { current: usize, total: usize },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Case-insensitive text matched on title, company, description and keywords
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long)]
    contract: Option<ContractType>,
    #[arg(long)]
    work: Option<WorkMode>,
    #[arg(long, default_value_t = 0)]
    salary_min: u64,
    #[arg(long)]
    salary_max: Option<u64>,
    #[arg(long, default_value = "all")]
    date_range: DateRange,
    #[arg(long, default_value = "1")]
    page: NonZeroUsize,
    /// Page size (defaults to search.page_size)
    #[arg(long)]
    limit: Option<NonZeroUsize>,
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn params(&self, settings: &Settings) -> anyhow::Result<SearchParams> {
        let limit = match self.limit {
            Some(limit) => limit,
            None => NonZeroUsize::new(settings.search.page_size).context("search.page_size must be at least 1")?,
        };
        let filters = FilterSet {
            search: self.query.clone(),
            contract: self.contract,
            work: self.work,
            salary_min: self.salary_min,
            salary_max: self.salary_max.unwrap_or(settings.search.salary_ceiling),
            date_range: self.date_range,
        };
        Ok(SearchParams::new(self.page, limit, filters))
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet { return; }
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_board(cli: &Cli, settings: &Settings) -> anyhow::Result<JobBoard<SnapshotSource>> {
    let data_dir = match &cli.data {
        Some(dir) => dir.clone(),
        None => resolve_with_base(&cli.config_dir, &settings.data.jobs_dir),
    };
    let records = DataLoader::new()
        .load_directory(&data_dir)
        .with_context(|| format!("loading jobs from {}", data_dir.display()))?;
    Ok(JobBoard::new(SnapshotSource::new(records)).with_salary_ceiling(settings.search.salary_ceiling))
}

fn print_job(job: &JobRecord) {
    println!("#{} {} | {} | {} | {} | {}", job.id, job.title, job.company, job.contract, job.work, job.location);
    println!("    {} | {} | publié le {}", job.salary, job.experience, job.created_at.format("%Y-%m-%d"));
    if !job.keywords.is_empty() { println!("    [{}]", job.keywords.join(", ")); }
}

fn print_result(result: &SearchResult, active_filters: usize) {
    let plural = if result.total > 1 { "s" } else { "" };
    println!("{} offre{plural} disponible{plural} ({} filtre(s) actif(s))", result.total, active_filters);
    if result.is_empty() {
        println!("Aucune offre ne correspond à ces critères.");
    }
    for job in &result.jobs { print_job(job); }
    if result.total_pages > 1 {
        let bar: Vec<String> = page_window(result.current_page, result.total_pages).iter().map(ToString::to_string).collect();
        println!("Pages: {}", bar.join(" "));
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let env_name = std::env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    let config = Config::load_from(&cli.config_dir, &env_name).context("loading configuration")?;
    Ok(config.settings()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.command {
        Command::Pages { current, total } => {
            println!("{}", serde_json::to_string(&page_window(*current, *total))?);
        }
        Command::Search(args) => {
            let settings = load_settings(&cli)?;
            let board = load_board(&cli, &settings)?;
            let params = args.params(&settings)?;
            let result = board.search(&params).await?;
            if args.json {
                let body = serde_json::json!({
                    "result": result,
                    "pages": page_window(result.current_page, result.total_pages),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_result(&result, params.filters.active_count(settings.search.salary_ceiling));
            }
        }
        Command::Show { id, json } => {
            let settings = load_settings(&cli)?;
            let board = load_board(&cli, &settings)?;
            match board.by_id(*id).await? {
                Some(job) if *json => println!("{}", serde_json::to_string_pretty(&job)?),
                Some(job) => print_job(&job),
                None => anyhow::bail!("no job with id {id}"),
            }
        }
    }
    Ok(())
}
