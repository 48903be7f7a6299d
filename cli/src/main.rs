//! techspec CLI - Technical Specification document assembler

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use techspec::request::find_section_content;
use techspec::{
    render, resolve_with_retry, segment, Chunk, CommandResolver, GenerationRequest,
    GraphvizRenderer, JsonFormat, RenderOptions, RetryPolicy, TechSpec, TechSpecResult,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "techspec")]
#[command(version)]
#[command(about = "Assemble Technical Specification documents from generated section content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the .docx document from a JSON request
    Build {
        /// Request file ({results, template_sections})
        #[arg(value_name = "REQUEST")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        assemble: AssembleArgs,

        /// Do not ask the word processor to refresh fields on open
        #[arg(long)]
        no_update_fields: bool,

        /// Update page numbers with an office program after writing
        #[arg(long)]
        resolve: bool,

        /// Office program used by --resolve
        #[arg(long, env = "TECHSPEC_RESOLVER", default_value = "soffice")]
        resolver: PathBuf,

        /// Attempts before giving up on field resolution
        #[arg(long, default_value = "5")]
        attempts: u32,

        /// Seconds between resolution attempts
        #[arg(long, default_value = "1")]
        retry_delay: u64,
    },

    /// Preview the document as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Request file
        #[arg(value_name = "REQUEST")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        assemble: AssembleArgs,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Leave out the index page
        #[arg(long)]
        no_index: bool,

        /// Escape Markdown special characters in text
        #[arg(long)]
        escape: bool,
    },

    /// Preview the document as plain text
    Text {
        /// Request file
        #[arg(value_name = "REQUEST")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        assemble: AssembleArgs,

        /// Leave out the index page
        #[arg(long)]
        no_index: bool,
    },

    /// Dump the assembled document model as JSON
    Json {
        /// Request file
        #[arg(value_name = "REQUEST")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        assemble: AssembleArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show sections, kinds, chunk counts and bookmarks
    Inspect {
        /// Request file
        #[arg(value_name = "REQUEST")]
        input: PathBuf,
    },

    /// Split a markdown file into text and table chunks
    Segment {
        /// Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output chunks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Options shared by every command that assembles a document.
#[derive(clap::Args)]
struct AssembleArgs {
    /// Document title
    #[arg(long, env = "TECHSPEC_TITLE")]
    title: Option<String>,

    /// Graphviz `dot` program used for the flow diagram
    #[arg(long, env = "TECHSPEC_DOT", default_value = "dot")]
    dot: PathBuf,

    /// Skip diagram rendering (the placeholder text is used)
    #[arg(long)]
    no_diagram: bool,

    /// Leave out the attribution line
    #[arg(long)]
    no_attribution: bool,
}

impl AssembleArgs {
    fn builder(&self) -> TechSpec {
        let mut spec = TechSpec::new();
        if let Some(ref title) = self.title {
            spec = spec.with_title(title.clone());
        }
        if !self.no_diagram {
            spec = spec.with_diagram_renderer(GraphvizRenderer::new().with_program(&self.dot));
        }
        if self.no_attribution {
            spec = spec.without_attribution();
        }
        spec
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            assemble,
            no_update_fields,
            resolve,
            resolver,
            attempts,
            retry_delay,
        } => {
            let policy = RetryPolicy::new()
                .with_max_attempts(attempts)
                .with_delay(Duration::from_secs(retry_delay));
            let resolver = resolve.then(|| CommandResolver::libreoffice(resolver));
            cmd_build(
                &input,
                output.as_deref(),
                &assemble,
                !no_update_fields,
                resolver.as_ref().map(|r| (r, &policy)),
            )
        }
        Commands::Markdown {
            input,
            output,
            assemble,
            frontmatter,
            no_index,
            escape,
        } => {
            let options = RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_index(!no_index)
                .with_escaping(escape);
            cmd_markdown(&input, output.as_deref(), &assemble, options)
        }
        Commands::Text {
            input,
            output,
            assemble,
            no_index,
        } => cmd_text(
            &input,
            output.as_deref(),
            &assemble,
            RenderOptions::new().with_index(!no_index),
        ),
        Commands::Json {
            input,
            output,
            assemble,
            compact,
        } => cmd_json(&input, output.as_deref(), &assemble, compact),
        Commands::Inspect { input } => cmd_inspect(&input),
        Commands::Segment { input, json } => cmd_segment(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Failed to generate document:".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_request(input: &Path) -> CliResult<GenerationRequest> {
    let file = fs::File::open(input)?;
    Ok(GenerationRequest::from_reader(std::io::BufReader::new(file))?)
}

fn assemble(
    input: &Path,
    args: &AssembleArgs,
    render_options: RenderOptions,
) -> CliResult<TechSpecResult> {
    let request = read_request(input)?;
    Ok(args
        .builder()
        .with_render_options(render_options)
        .build(&request)?)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_build(
    input: &Path,
    output: Option<&Path>,
    args: &AssembleArgs,
    update_fields: bool,
    resolver: Option<(&CommandResolver, &RetryPolicy)>,
) -> CliResult<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(render::DEFAULT_FILE_NAME));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Assembling document...");
    let request = read_request(input)?;
    let result = args
        .builder()
        .with_update_fields(update_fields)
        .build(&request)?;

    match resolver {
        None => {
            pb.set_message("Writing package...");
            result.save(&output)?;
        }
        Some((resolver, policy)) => {
            // The office program names its output after the input file.
            let file_name = output
                .file_name()
                .ok_or_else(|| format!("invalid output path: {}", output.display()))?;
            let staging = output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .join(".techspec-unresolved");
            fs::create_dir_all(&staging)?;
            let unresolved = staging.join(file_name);

            pb.set_message("Writing package...");
            result.save(&unresolved)?;

            pb.set_message("Updating page numbers...");
            match resolve_with_retry(resolver, policy, &unresolved, &output) {
                Ok(_) => {
                    fs::remove_dir_all(&staging)?;
                }
                Err(e) => {
                    // Keep the unresolved document; fields refresh on open.
                    fs::rename(&unresolved, &output)?;
                    fs::remove_dir_all(&staging)?;
                    pb.suspend(|| {
                        eprintln!("{} {}", "Warning:".yellow().bold(), e);
                    });
                }
            }
        }
    }

    pb.finish_and_clear();

    let stats = result.stats();
    println!("{} {}", "Saved to".green(), output.display());
    println!(
        "  {} {} sections, {} tables, {} images",
        "└─".dimmed(),
        stats.section_count,
        stats.table_count,
        stats.image_count
    );
    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    args: &AssembleArgs,
    options: RenderOptions,
) -> CliResult<()> {
    let markdown = assemble(input, args, options)?.to_markdown()?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    args: &AssembleArgs,
    options: RenderOptions,
) -> CliResult<()> {
    let text = assemble(input, args, options)?.to_text()?;
    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    args: &AssembleArgs,
    compact: bool,
) -> CliResult<()> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = assemble(input, args, RenderOptions::new())?.to_json(format)?;
    write_or_print(output, &json)
}

fn cmd_inspect(input: &Path) -> CliResult<()> {
    let request = read_request(input)?;
    let sections = request.sections();

    println!("{}", "Request".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Template sections".bold(), sections.len());
    println!("{}: {}", "Results".bold(), request.results.len());
    println!();

    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());
    for (i, section) in sections.iter().enumerate() {
        let content = find_section_content(&request.results, &section.title);
        let (text, tables) = segment(content).fold((0, 0), |(t, b), chunk| match chunk {
            Chunk::Text(_) => (t + 1, b),
            Chunk::Table(_) => (t, b + 1),
        });
        let status = if content.is_some() {
            format!("{} text, {} table", text, tables).normal()
        } else {
            "no content".yellow()
        };
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            section.title.bold(),
            format!("[{}]", section.kind).dimmed(),
            status
        );
    }
    println!();

    let result = TechSpec::new().build(&request)?;
    println!("{}", "Bookmarks".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());
    for entry in &result.document().index {
        println!("  {} {}", entry.bookmark_id().green(), entry.label());
    }
    println!(
        "\n{}: {}",
        "Page references".bold(),
        result.placeholders().len()
    );
    Ok(())
}

fn cmd_segment(input: &Path, json: bool) -> CliResult<()> {
    let content = fs::read_to_string(input)?;
    let chunks: Vec<Chunk> = segment(content.as_str()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    for (i, chunk) in chunks.iter().enumerate() {
        let kind = if chunk.is_table() {
            "table".magenta()
        } else {
            "text".blue()
        };
        println!("{} {}", format!("#{}", i + 1).bold(), kind);
        println!("{}", chunk.as_str());
        println!("{}", "─".repeat(40).dimmed());
    }
    println!("{} {} chunks", "Done!".green().bold(), chunks.len());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "techspec".cyan().bold(), techspec::VERSION);
    println!("Technical Specification document assembler");
    println!();
    println!("License: MIT");
}
