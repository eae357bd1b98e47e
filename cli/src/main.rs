//! pagesource CLI - map page collections to typed records and documents

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagesource::render::{self, record_to_markdown};
use pagesource::schema::PropertyKind;
use pagesource::{
    BlockRegistry, ContentOptions, ContentSource, FetchOptions, FieldMode, FixtureSource,
    JsonFormat, RenderOptions, RuleSet, TypedRecord,
};

#[derive(Parser)]
#[command(name = "pagesource")]
#[command(version)]
#[command(about = "Map page collections to typed records, Markdown, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and map every record of a collection
    Records {
        /// Snapshot file with collections and pages
        #[arg(value_name = "FIXTURE")]
        fixture: PathBuf,

        /// Collection to query
        #[arg(short, long, env = "PAGESOURCE_COLLECTION")]
        collection: String,

        /// Field rules file
        #[arg(short, long, value_name = "FILE")]
        rules: PathBuf,

        /// Also map each record's page content
        #[arg(long)]
        content: bool,

        /// Leave out failing records instead of failing
        #[arg(long)]
        skip_failing: bool,

        /// Fail on unsupported blocks instead of dropping them
        #[arg(long)]
        strict_blocks: bool,

        /// Let content failures follow --skip-failing instead of aborting
        #[arg(long)]
        keep_going: bool,

        /// Report every failing field of a record
        #[arg(long)]
        all_errors: bool,

        /// Maximum number of concurrent content fetches
        #[arg(long, default_value = "1")]
        concurrency: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Include YAML frontmatter (Markdown output)
        #[arg(long)]
        frontmatter: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Fetch and map the content of one page
    Page {
        /// Snapshot file with collections and pages
        #[arg(value_name = "FIXTURE")]
        fixture: PathBuf,

        /// Page to map
        #[arg(value_name = "PAGE_ID")]
        page_id: String,

        /// Fail on unsupported blocks instead of dropping them
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: Format,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List supported field kinds and block types
    Kinds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    /// Markdown
    #[value(alias = "md")]
    Markdown,
    /// Plain text
    Text,
    /// JSON
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Records {
            fixture,
            collection,
            rules,
            content,
            skip_failing,
            strict_blocks,
            keep_going,
            all_errors,
            concurrency,
            format,
            frontmatter,
            compact,
            output,
        }) => {
            let options = FetchOptions::new()
                .with_content(content)
                .with_skip_failing(skip_failing)
                .with_allow_unknown_block_types(!strict_blocks)
                .with_abort_on_content_failure(!keep_going)
                .with_field_mode(if all_errors {
                    FieldMode::CollectAll
                } else {
                    FieldMode::FirstFailure
                })
                .with_max_concurrency(concurrency);
            let render_options = RenderOptions::new().with_frontmatter(frontmatter);
            cmd_records(
                &fixture,
                &collection,
                &rules,
                &options,
                format,
                &render_options,
                json_format(compact),
                output.as_deref(),
            )
        }
        Some(Commands::Page {
            fixture,
            page_id,
            strict,
            format,
            max_heading,
            compact,
            output,
        }) => {
            let options = ContentOptions::new().with_allow_unknown_block_types(!strict);
            let render_options = RenderOptions::new().with_max_heading(max_heading);
            cmd_page(
                &fixture,
                &page_id,
                &options,
                format,
                &render_options,
                json_format(compact),
                output.as_deref(),
            )
        }
        Some(Commands::Kinds { json }) => cmd_kinds(json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!(
                "{}",
                "Usage: pagesource <records|page|kinds|version> ...".yellow()
            );
            println!("       pagesource --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(message.to_string());
    pb
}

#[allow(clippy::too_many_arguments)]
fn cmd_records(
    fixture: &Path,
    collection: &str,
    rules: &Path,
    options: &FetchOptions,
    format: Format,
    render_options: &RenderOptions,
    json: JsonFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = FixtureSource::from_path(fixture)?;
    let rules = RuleSet::from_path(rules)?;
    let content = ContentSource::new(source, collection, rules);

    let pb = spinner("Fetching records...");
    let fetched = content.fetch_records(options);
    pb.finish_and_clear();
    let records = fetched?;

    log::info!("{} records mapped from {}", records.len(), collection);
    let rendered = render_records(&records, format, render_options, json)?;
    write_output(output, &rendered)
}

fn render_records(
    records: &[TypedRecord],
    format: Format,
    render_options: &RenderOptions,
    json: JsonFormat,
) -> pagesource::Result<String> {
    match format {
        Format::Json => render::records_to_json(records, json),
        Format::Markdown => {
            let documents = records
                .iter()
                .map(|record| record_to_markdown(record, render_options))
                .collect::<pagesource::Result<Vec<_>>>()?;
            Ok(documents.join("\n\n"))
        }
        Format::Text => {
            let documents = records
                .iter()
                .filter_map(|record| record.content.as_ref())
                .map(render::to_text)
                .collect::<pagesource::Result<Vec<_>>>()?;
            Ok(documents.join("\n\n"))
        }
    }
}

fn cmd_page(
    fixture: &Path,
    page_id: &str,
    options: &ContentOptions,
    format: Format,
    render_options: &RenderOptions,
    json: JsonFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = FixtureSource::from_path(fixture)?;
    let content = ContentSource::new(source, "", RuleSet::new());
    let tree = content.fetch_page_content(page_id, options)?;

    let rendered = match format {
        Format::Markdown => render::to_markdown(&tree, render_options)?,
        Format::Text => render::to_text(&tree)?,
        Format::Json => render::to_json(&tree, json)?,
    };
    write_output(output, &rendered)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_kinds(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = BlockRegistry::with_defaults();
    let fields: Vec<&str> = PropertyKind::ALL.iter().map(|k| k.as_str()).collect();
    let blocks = registry.supported_types();

    if json {
        let value = serde_json::json!({ "fields": fields, "blocks": blocks });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Field kinds".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for kind in PropertyKind::ALL {
        println!("{}: {}", kind.as_str().bold(), kind.value_type());
    }

    println!();
    println!("{}", "Block types".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for block_type in blocks {
        println!("{}", block_type);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagesource".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Schema-driven page collection mapper");
    println!();
    println!("License: MIT");
}
