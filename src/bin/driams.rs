use std::collections::BTreeMap;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use driams_loader::config::{ConfigLoader, ROOT_ENV};
use driams_loader::dataset::{DatasetRequest, load_dataset};
use driams_loader::domain::MissingPolicy;
use driams_loader::encoding::DriamsLabelEncoder;
use driams_loader::error::DriamsError;
use driams_loader::explorer::DatasetExplorer;
use driams_loader::output::{
    AntibioticsResult, JsonOutput, LoadResult, SiteReport, SitesResult, ValidateResult,
    YearsResult,
};
use driams_loader::store::PathStore;
use driams_loader::validate::SiteValidator;

#[derive(Parser)]
#[command(name = "driams")]
#[command(about = "Explore, validate and load DRIAMS MALDI-TOF datasets")]
#[command(version)]
struct Cli {
    /// Data root; overrides driams.json and DRIAMS_ROOT.
    #[arg(long, global = true)]
    root: Option<Utf8PathBuf>,

    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List sites below the data root")]
    Sites,
    #[command(about = "List years available for a site")]
    Years(SiteArgs),
    #[command(about = "List antibiotics per year for a site")]
    Antibiotics(AntibioticsArgs),
    #[command(about = "Check the layout of one or all sites")]
    Validate(ValidateArgs),
    #[command(about = "Load spectra and labels for a species")]
    Load(LoadArgs),
}

#[derive(Args)]
struct SiteArgs {
    site: String,
}

#[derive(Args)]
struct AntibioticsArgs {
    site: String,

    #[arg(long)]
    year: Option<String>,
}

#[derive(Args)]
struct ValidateArgs {
    site: Option<String>,

    #[arg(long)]
    require_specimens: bool,
}

#[derive(Args)]
struct LoadArgs {
    site: String,
    year: String,
    species: String,

    #[arg(required = true)]
    antibiotics: Vec<String>,

    #[arg(long, value_enum, default_value_t = MissingPolicy::RemoveIfAllMissing)]
    missing: MissingPolicy,

    #[arg(long)]
    raw: bool,

    #[arg(long)]
    no_encode: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(driams) = report.downcast_ref::<DriamsError>() {
            return ExitCode::from(map_exit_code(driams));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &DriamsError) -> u8 {
    match error {
        DriamsError::MissingConfig
        | DriamsError::ConfigRead(_)
        | DriamsError::ConfigParse(_)
        | DriamsError::CallerContract(_)
        | DriamsError::UnknownColumn { .. } => 2,
        DriamsError::FileAccess { .. } | DriamsError::Parse { .. } => 3,
        DriamsError::ShapeMismatch { .. } | DriamsError::Filesystem(_) => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let store = match cli.root {
        Some(root) => PathStore::new(root),
        None => {
            ConfigLoader::resolve(cli.config.as_deref(), std::env::var(ROOT_ENV).ok())?.store()
        }
    };

    match cli.command {
        Commands::Sites => run_sites(store),
        Commands::Years(args) => run_years(args, store),
        Commands::Antibiotics(args) => run_antibiotics(args, store),
        Commands::Validate(args) => run_validate(args, store),
        Commands::Load(args) => run_load(args, store),
    }
}

fn run_sites(store: PathStore) -> miette::Result<()> {
    let explorer = DatasetExplorer::new(store);
    let result = SitesResult {
        root: explorer.store().root().to_string(),
        sites: explorer.available_sites()?,
    };
    JsonOutput::print_sites(&result).into_diagnostic()
}

fn run_years(args: SiteArgs, store: PathStore) -> miette::Result<()> {
    let explorer = DatasetExplorer::new(store);
    let result = YearsResult {
        years: explorer.available_years(&args.site)?,
        site: args.site,
    };
    JsonOutput::print_years(&result).into_diagnostic()
}

fn run_antibiotics(args: AntibioticsArgs, store: PathStore) -> miette::Result<()> {
    let explorer = DatasetExplorer::new(store);
    let antibiotics: BTreeMap<String, Vec<String>> = match &args.year {
        Some(year) => [(year.clone(), explorer.available_antibiotics(&args.site, year)?)]
            .into_iter()
            .collect(),
        None => explorer.available_antibiotics_by_year(&args.site)?,
    };
    let result = AntibioticsResult {
        site: args.site,
        antibiotics,
    };
    JsonOutput::print_antibiotics(&result).into_diagnostic()
}

fn run_validate(args: ValidateArgs, store: PathStore) -> miette::Result<()> {
    let validator = SiteValidator::new().require_specimens(args.require_specimens);
    let explorer = DatasetExplorer::with_validator(store, validator);
    let sites = match args.site {
        Some(site) => vec![site],
        None => explorer.available_sites()?,
    };
    let result = ValidateResult {
        sites: sites
            .into_iter()
            .map(|site| {
                let check = explorer.check_site(&site);
                SiteReport {
                    valid: check.is_valid(),
                    site,
                    check,
                }
            })
            .collect(),
    };
    JsonOutput::print_validate(&result).into_diagnostic()
}

fn run_load(args: LoadArgs, store: PathStore) -> miette::Result<()> {
    let encoder = DriamsLabelEncoder::new();
    let mut request = DatasetRequest::new(args.site, args.year, args.species, args.antibiotics)
        .missing_policy(args.missing)
        .raw(args.raw);
    if !args.no_encode {
        request = request.encoder(&encoder);
    }

    let dataset = load_dataset(store.root(), &request)?;
    let result = LoadResult::summarize(
        &request.site,
        &request.year,
        &request.species,
        request.spectra.dir_name(),
        &dataset,
    );
    JsonOutput::print_load(&result).into_diagnostic()
}
