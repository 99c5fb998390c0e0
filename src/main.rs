use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use outage_dashboard::{
    app::App,
    config::{self, Config},
    data::{DataSource, Dataset, MockDataSource},
    metrics::Filters,
    models::{Category, Status},
    nav::Screen,
    report,
    shift_log::InMemoryShiftLog,
    telemetry,
    view::ScreenView,
};

#[derive(Parser)]
#[command(name = "outage_dashboard", version, about = "Power-plant outage dashboard")]
struct Cli {
    /// Seed for the mock dataset (overrides OUTAGE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of work packages to generate (overrides OUTAGE_PROJECT_COUNT)
    #[arg(long, global = true)]
    count: Option<usize>,

    /// Date the mock schedule is anchored to, YYYY-MM-DD (default: today)
    #[arg(long, global = true)]
    anchor: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard (default)
    Tui,
    /// Print one screen's derived view and exit
    Summary {
        /// Screen name or number, e.g. financials or 4
        #[arg(long, default_value = "command-center")]
        screen: Screen,

        /// Keep only these categories (repeatable; default all)
        #[arg(long = "category")]
        categories: Vec<Category>,

        /// Keep only these statuses (repeatable; default all)
        #[arg(long = "status")]
        statuses: Vec<Status>,

        /// Rows in the cost overrun ranking (overrides OUTAGE_TOP_OVERRUNS)
        #[arg(long)]
        top: Option<usize>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, command-line flags win
    let mut config = config::init()?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(count) = cli.count {
        config.project_count = count;
    }
    let anchor = cli.anchor.unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            telemetry::init_file_logging(&config)?;
            run_tui(&config, anchor)
        }
        Command::Summary {
            screen,
            categories,
            statuses,
            top,
            format,
        } => {
            telemetry::init_stderr_logging(&config)?;
            if let Some(top) = top {
                config.top_overruns = top;
            }
            let filters = summary_filters(categories, statuses);
            run_summary(&config, anchor, screen, &filters, format)
        }
    }
}

fn load_dataset(config: &Config, anchor: NaiveDate) -> Result<(Arc<Dataset>, String)> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let source = MockDataSource::new(seed, config.project_count, anchor);
    let dataset = source
        .load()
        .with_context(|| format!("failed to load {}", source.describe()))?;

    info!(
        source = %source.describe(),
        %anchor,
        projects = dataset.projects().len(),
        "dataset loaded"
    );
    Ok((Arc::new(dataset), source.describe()))
}

fn summary_filters(categories: Vec<Category>, statuses: Vec<Status>) -> Filters {
    let mut filters = Filters::all();
    if !categories.is_empty() {
        filters.categories = categories.into_iter().collect::<BTreeSet<_>>();
    }
    if !statuses.is_empty() {
        filters.statuses = statuses.into_iter().collect::<BTreeSet<_>>();
    }
    filters
}

fn run_summary(
    config: &Config,
    anchor: NaiveDate,
    screen: Screen,
    filters: &Filters,
    format: Format,
) -> Result<()> {
    let (dataset, _) = load_dataset(config, anchor)?;
    let view = ScreenView::compute(screen, &dataset, filters, config.top_overruns);

    match format {
        Format::Text => print!("{}", report::render_text(&view)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn run_tui(config: &Config, anchor: NaiveDate) -> Result<()> {
    let (dataset, source) = load_dataset(config, anchor)?;
    let mut app = App::new(
        dataset,
        source,
        Box::new(InMemoryShiftLog::new()),
        config.top_overruns,
        anchor,
    );

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "dashboard exited with an error");
    }
    info!("session ended");

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            if app.handle_key(key.code)? {
                break;
            }
        }
    }

    Ok(())
}
