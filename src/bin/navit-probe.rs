//! CLI binary for navit-probe.
//!
//! A thin shim over the library crate that maps subcommands and flags to
//! `ProbeConfig`, runs one entry point and prints its report.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use navit_probe::config::{DEFAULT_DOC_DIR, DEFAULT_MAX_PAGES, DEFAULT_PDF_DIR};
use navit_probe::report::{
    render_document_report, render_generation_report, render_inspection, render_pdf_report,
};
use navit_probe::{
    generate_documents, generate_pdfs, inspect, verify_documents_to_file, verify_pdfs_to_file,
    ModelSelection, PageSelection, ProbeConfig, ProbeConfigBuilder, ProbeProgressCallback,
    ProgressCallback,
};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one log line per item.
struct CliProgressCallback {
    bar: ProgressBar,
    /// What an item is called in the bar, e.g. "documents".
    unit: &'static str,
    start_times: Mutex<HashMap<usize, Instant>>,
}

impl CliProgressCallback {
    /// Spinner until `on_run_start` tells us how many items there are.
    fn new_dynamic(unit: &'static str) -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Loading processors…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            unit,
            start_times: Mutex::new(HashMap::new()),
        })
    }

    fn activate_bar(&self, total: usize) {
        let template = format!(
            "{{spinner:.cyan}} {{prefix:.bold}}  [{{bar:42.green/238}}] {{pos:>3}}/{{len}} {}  {{elapsed_precise}}",
            self.unit
        );
        let progress_style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Running");
    }

    fn elapsed_secs(&self, index: usize) -> f64 {
        self.start_times
            .lock()
            .ok()
            .and_then(|mut m| m.remove(&index))
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl ProbeProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_items: usize) {
        self.activate_bar(total_items);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_items} {}…", self.unit))
        ));
    }

    fn on_item_start(&self, index: usize, _total: usize, label: &str) {
        if let Ok(mut m) = self.start_times.lock() {
            m.insert(index, Instant::now());
        }
        self.bar.set_message(label.to_string());
    }

    fn on_item_complete(&self, index: usize, total: usize, label: &str, outcome: &str) {
        let secs = self.elapsed_secs(index);
        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {:<26}  {}  {}",
            green("✓"),
            index,
            total,
            label,
            outcome,
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_item_error(&self, index: usize, total: usize, label: &str, error: &str) {
        let secs = self.elapsed_secs(index);

        let msg: String = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {:<26}  {}  {}",
            red("✗"),
            index,
            total,
            label,
            red(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, total_items: usize, success_count: usize) {
        let failed = total_items.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} {} processed",
                green("✔"),
                bold(&success_count.to_string()),
                self.unit
            );
        } else {
            eprintln!(
                "{} {}/{} {} processed  ({} failed)",
                if failed == total_items { red("✘") } else { cyan("⚠") },
                bold(&success_count.to_string()),
                total_items,
                self.unit,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Draw the ten raster documents, then verify them with both models
  navit-probe generate-docs
  navit-probe verify-docs

  # Include the fixed 336px control encoder
  navit-probe verify-docs all

  # Build the seven PDFs and verify up to 3 pages of each with Qwen2.5-VL
  navit-probe generate-pdfs
  navit-probe verify-pdfs qwen 3

  # Every page at 200 DPI, JSON on stdout
  navit-probe --json verify-pdfs --pages all --dpi 200 > results.json

  # Use a model's own preprocessor_config.json
  navit-probe --qwen-config ./Qwen2.5-VL-3B/preprocessor_config.json inspect qwen

STATUSES:
  PASS   actual tokens within 50% of the native budget (or a tiny image upscaled)
  FAIL   actual tokens hit a fixed bucket (256, 576, 1024) the native budget does not
  CHECK  outside tolerance without a bucket signature
  ERROR  the preprocessor rejected the image (message kept to 80 characters)
  N/A    the preprocessor reported no token grid

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   libpdfium shared library, or the directory holding it
  NAVIT_FONT        TrueType font for generate-docs (greeked text without one)
  RUST_LOG          Override the log filter (e.g. navit_probe=debug)
  Every other flag also reads a NAVIT_* variable; see --help.
"#;

/// Stress-test documents and token-budget verification for NaViT-style
/// vision preprocessors.
#[derive(Parser, Debug)]
#[command(
    name = "navit-probe",
    version,
    about = "Generate stress-test documents and verify NaViT token budgets",
    long_about = "Generate raster documents and PDFs with extreme aspect ratios and page sizes, \
run them through emulations of the GLM-OCR and Qwen2.5-VL image preprocessors (plus a fixed \
336px control), and classify whether each model kept the native resolution.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Patch side in pixels used for the expected budget.
    #[arg(long, global = true, env = "NAVIT_PATCH_SIZE", default_value_t = 14,
          value_parser = clap::value_parser!(u32).range(1..))]
    patch_size: u32,

    /// preprocessor_config.json overriding the GLM-OCR defaults.
    #[arg(long, global = true, env = "NAVIT_GLM_CONFIG")]
    glm_config: Option<PathBuf>,

    /// preprocessor_config.json overriding the Qwen2.5-VL defaults.
    #[arg(long, global = true, env = "NAVIT_QWEN_CONFIG")]
    qwen_config: Option<PathBuf>,

    /// libpdfium shared library, or the directory holding it.
    #[arg(long, global = true, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Print the report as JSON on stdout instead of tables.
    #[arg(long, global = true, env = "NAVIT_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, global = true, env = "NAVIT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "NAVIT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "NAVIT_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the ten raster stress-test documents.
    GenerateDocs {
        /// Output directory.
        #[arg(long, env = "NAVIT_DOC_DIR", default_value = DEFAULT_DOC_DIR)]
        out_dir: PathBuf,

        /// TrueType font for document text.
        #[arg(long, env = "NAVIT_FONT")]
        font: Option<PathBuf>,
    },

    /// Build the seven multi-page stress-test PDFs.
    GeneratePdfs {
        /// Output directory.
        #[arg(long, env = "NAVIT_PDF_DIR", default_value = DEFAULT_PDF_DIR)]
        out_dir: PathBuf,
    },

    /// Verify the raster documents against the selected models.
    VerifyDocs {
        #[arg(value_enum, default_value = "both")]
        model: ModelArg,

        /// Directory holding the generated documents.
        #[arg(long, env = "NAVIT_DOC_DIR", default_value = DEFAULT_DOC_DIR)]
        doc_dir: PathBuf,

        /// Result file. Default: <doc-dir>/document_navit_results.json.
        #[arg(short, long, env = "NAVIT_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Render sampled PDF pages and verify them against the selected models.
    VerifyPdfs {
        #[arg(value_enum, default_value = "both")]
        model: ModelArg,

        /// Pages sampled per PDF: first, last and evenly spaced ones.
        #[arg(default_value_t = DEFAULT_MAX_PAGES as u64,
              value_parser = clap::value_parser!(u64).range(1..))]
        max_pages: u64,

        /// Directory holding the generated PDFs.
        #[arg(long, env = "NAVIT_PDF_DIR", default_value = DEFAULT_PDF_DIR)]
        pdf_dir: PathBuf,

        /// Rendering DPI (72–400).
        #[arg(long, env = "NAVIT_DPI", default_value_t = 150,
              value_parser = clap::value_parser!(u32).range(72..=400))]
        dpi: u32,

        /// Explicit pages instead of sampling: all, 5, 3-15, or 1,3,5,7.
        #[arg(long, env = "NAVIT_PAGES")]
        pages: Option<String>,

        /// Result file. Default: <pdf-dir>/pdf_navit_results.json.
        #[arg(short, long, env = "NAVIT_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Print each model processor's attributes.
    Inspect {
        #[arg(value_enum, default_value = "both")]
        model: ModelArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModelArg {
    Glm,
    Qwen,
    Both,
    Fixed,
    All,
}

impl From<ModelArg> for ModelSelection {
    fn from(v: ModelArg) -> Self {
        match v {
            ModelArg::Glm => ModelSelection::Glm,
            ModelArg::Qwen => ModelSelection::Qwen,
            ModelArg::Both => ModelSelection::Both,
            ModelArg::Fixed => ModelSelection::Fixed,
            ModelArg::All => ModelSelection::All,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let g = &cli.global;

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !g.quiet && !g.no_progress && !g.json;
    let filter = if g.verbose {
        "debug"
    } else if g.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress = |unit: &'static str| -> Option<ProgressCallback> {
        show_progress
            .then(|| CliProgressCallback::new_dynamic(unit) as Arc<dyn ProbeProgressCallback>)
    };

    match &cli.command {
        Command::GenerateDocs { out_dir, font } => {
            let mut builder = base_builder(g, progress("documents")).doc_dir(out_dir);
            if let Some(font) = font {
                builder = builder.font_path(font);
            }
            let config = builder.build().context("Invalid configuration")?;
            let report = generate_documents(&config).context("Document generation failed")?;
            emit(g, &report, || render_generation_report(&report))?;
        }

        Command::GeneratePdfs { out_dir } => {
            let config = base_builder(g, progress("PDFs"))
                .pdf_dir(out_dir)
                .build()
                .context("Invalid configuration")?;
            let report = generate_pdfs(&config).context("PDF generation failed")?;
            emit(g, &report, || render_generation_report(&report))?;
        }

        Command::VerifyDocs { model, doc_dir, output } => {
            let config = base_builder(g, progress("documents"))
                .models((*model).into())
                .doc_dir(doc_dir)
                .build()
                .context("Invalid configuration")?;
            let (report, path) = verify_documents_to_file(&config, output.as_deref())
                .context("Document verification failed")?;
            emit(g, &report, || render_document_report(&report))?;
            if !g.quiet && !g.json {
                eprintln!("{} Results: {}", green("✔"), bold(&path.display().to_string()));
            }
        }

        Command::VerifyPdfs {
            model,
            max_pages,
            pdf_dir,
            dpi,
            pages,
            output,
        } => {
            let selection = match pages {
                Some(s) => parse_pages(s)?,
                None => PageSelection::Spread(*max_pages as usize),
            };
            let config = base_builder(g, progress("PDFs"))
                .models((*model).into())
                .pdf_dir(pdf_dir)
                .dpi(*dpi)
                .pages(selection)
                .build()
                .context("Invalid configuration")?;
            let (report, path) = verify_pdfs_to_file(&config, output.as_deref())
                .context("PDF verification failed")?;
            emit(g, &report, || render_pdf_report(&report))?;
            if !g.quiet && !g.json {
                eprintln!("{} Results: {}", green("✔"), bold(&path.display().to_string()));
            }
        }

        Command::Inspect { model } => {
            let config = base_builder(g, None)
                .models((*model).into())
                .build()
                .context("Invalid configuration")?;
            let models = inspect(&config).context("Failed to load processors")?;
            if g.json {
                let value: serde_json::Map<String, serde_json::Value> = models
                    .iter()
                    .map(|(family, attrs)| {
                        let attrs: serde_json::Map<String, serde_json::Value> = attrs
                            .iter()
                            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                            .collect();
                        (family.key().to_string(), serde_json::Value::Object(attrs))
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&value).context("Failed to serialise attributes")?
                );
            } else if !g.quiet {
                print!("{}", render_inspection(&models));
            }
        }
    }

    Ok(())
}

/// Builder with the flags every subcommand shares.
fn base_builder(g: &GlobalArgs, progress: Option<ProgressCallback>) -> ProbeConfigBuilder {
    let mut builder = ProbeConfig::builder().patch_size(g.patch_size);
    if let Some(path) = &g.glm_config {
        builder = builder.glm_preprocessor(path);
    }
    if let Some(path) = &g.qwen_config {
        builder = builder.qwen_preprocessor(path);
    }
    if let Some(path) = &g.pdfium_lib {
        builder = builder.pdfium_lib_path(path);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    builder
}

/// Print `value` as JSON under `--json`, otherwise the rendered tables.
fn emit<T: serde::Serialize>(
    g: &GlobalArgs,
    value: &T,
    render: impl FnOnce() -> String,
) -> Result<()> {
    if g.json {
        let json = serde_json::to_string_pretty(value).context("Failed to serialise report")?;
        println!("{json}");
    } else if !g.quiet {
        print!("{}", render());
    }
    Ok(())
}

/// Parse `--pages` string into `PageSelection`.
fn parse_pages(s: &str) -> Result<PageSelection> {
    let s = s.trim().to_lowercase();

    if s == "all" {
        return Ok(PageSelection::All);
    }

    // Range: "3-15"
    if let Some((start, end)) = s.split_once('-') {
        let start: usize = start
            .trim()
            .parse()
            .context("Invalid start page in range")?;
        let end: usize = end.trim().parse().context("Invalid end page in range")?;

        if start < 1 {
            anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", start);
        }
        if start > end {
            anyhow::bail!("Invalid page range '{}-{}': start must be <= end", start, end);
        }
        return Ok(PageSelection::Range(start, end));
    }

    // Set: "1,3,5,7"
    if s.contains(',') {
        let pages: Vec<usize> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid page number: '{}'", p.trim()))
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(&p) = pages.iter().find(|&&p| p < 1) {
            anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", p);
        }
        return Ok(PageSelection::Set(pages));
    }

    // Single page: "5"
    let page: usize = s.parse().context("Invalid page number")?;
    if page < 1 {
        anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", page);
    }
    Ok(PageSelection::Single(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_parse() {
        assert_eq!(parse_pages("all").unwrap(), PageSelection::All);
        assert_eq!(parse_pages(" 7 ").unwrap(), PageSelection::Single(7));
        assert_eq!(parse_pages("3-15").unwrap(), PageSelection::Range(3, 15));
        assert_eq!(parse_pages("1,3,5").unwrap(), PageSelection::Set(vec![1, 3, 5]));
        assert!(parse_pages("0").is_err());
        assert!(parse_pages("9-2").is_err());
        assert!(parse_pages("1,x").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
