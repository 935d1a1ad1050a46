use clap::{CommandFactory, Parser};
use refcards::{
    GenerationRequest, PaperSize, PartialGeneratorConfig, PipelineBuilder, PipelineError,
    UrlDisplayStyle,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// Use Mimalloc for the many small allocations of encoding and drawing.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Logo picked up automatically when `--logo` is not given.
const DEFAULT_LOGO_PATH: &str = "public/cursor-logo.png";

/// Generate a printable PDF of QR cards from a list of referral links.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text or CSV file with one link per line
    #[arg(default_value = "links.txt")]
    links: PathBuf,

    /// Where to write the PDF
    #[arg(default_value = "dist/qr-cards.pdf")]
    output: PathBuf,

    /// JSON configuration file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    grid_cols: Option<i64>,

    #[arg(long)]
    grid_rows: Option<i64>,

    /// A4, LETTER or A3
    #[arg(long)]
    paper_size: Option<PaperSize>,

    /// truncated, full or hidden
    #[arg(long)]
    url_display_style: Option<UrlDisplayStyle>,

    #[arg(long)]
    event_name: Option<String>,

    #[arg(long)]
    event_date: Option<String>,

    /// Number printed on the first card
    #[arg(long)]
    start_number: Option<i64>,

    #[arg(long)]
    label_prefix: Option<String>,

    /// PNG or JPEG logo printed above each code
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Maximum number of codes encoded at once (defaults to the CPU count)
    #[arg(long)]
    concurrency: Option<usize>,
}

impl Cli {
    fn flag_overrides(&self) -> PartialGeneratorConfig {
        PartialGeneratorConfig {
            grid_cols: self.grid_cols,
            grid_rows: self.grid_rows,
            paper_size: self.paper_size,
            url_display_style: self.url_display_style,
            event_name: self.event_name.clone(),
            event_date: self.event_date.clone(),
            start_number: self.start_number,
            label_prefix: self.label_prefix.clone(),
            ..Default::default()
        }
    }

    fn resolve_partial_config(&self) -> Result<PartialGeneratorConfig, PipelineError> {
        let base = match &self.config {
            Some(path) => PartialGeneratorConfig::from_json(&fs::read_to_string(path)?)?,
            None => PartialGeneratorConfig::default(),
        };
        Ok(base.merged_with(self.flag_overrides()))
    }

    /// The `--logo` path, or the default logo below `root` when it exists.
    fn logo_path(&self, root: &Path) -> Option<PathBuf> {
        match &self.logo {
            Some(path) => Some(path.clone()),
            None => {
                let default = root.join(DEFAULT_LOGO_PATH);
                default.is_file().then_some(default)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("refcards=warn"))
        .init();

    let cli = Cli::parse();

    if !cli.links.is_file() {
        eprintln!("Links file not found: {}", cli.links.display());
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    }

    let links_text = fs::read_to_string(&cli.links)?;
    let request = GenerationRequest::new(links_text).with_config(cli.resolve_partial_config()?);

    let mut builder = PipelineBuilder::new()
        .with_document_title(format!("QR Cards ({})", cli.links.display()));
    if let Some(logo) = cli.logo_path(Path::new(".")) {
        builder = builder.with_logo_file(logo)?;
    }
    if let Some(concurrency) = cli.concurrency {
        builder = builder.with_concurrency(concurrency);
    }
    let pipeline = builder.build()?;

    let job = pipeline.spawn(request);
    let mut progress = job.progress();
    let printer = tokio::spawn(async move {
        let mut last = None;
        loop {
            let percent = *progress.borrow_and_update();
            if last != Some(percent) {
                print!("\rGenerating... {}%", percent);
                let _ = std::io::stdout().flush();
                last = Some(percent);
            }
            if percent >= 100 || progress.changed().await.is_err() {
                break;
            }
        }
        println!();
    });

    let result = job.join().await;
    let _ = printer.await;
    let output = result?;

    if let Some(parent) = cli.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&cli.output, &output.document)?;

    println!(
        "Cards: {} | Pages: {} | Grid: {}x{} | Paper: {}",
        output.stats.total_codes,
        output.stats.total_pages,
        output.config.grid_cols,
        output.config.grid_rows,
        output.config.paper_size
    );
    println!("Saved to {}", cli.output.display());
    Ok(())
}
