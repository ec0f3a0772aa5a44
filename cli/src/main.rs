//! amboss-extract CLI - article content extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use amboss_extract::convert::{convert_file, ConvertOptions};
use amboss_extract::extract::require_identifier;
use amboss_extract::{ArticleExtractor, ExtractOptions, OutputFormat, RenderOptions};

#[derive(Parser)]
#[command(name = "amboss-extract")]
#[command(version)]
#[command(
    about = "Extract saved AMBOSS article pages to text, Markdown, HTML, and JSON",
    long_about = None
)]
struct Cli {
    /// Saved article HTML file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Log every extraction step
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one saved article
    Convert {
        /// Saved article HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format: text, markdown, html, json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Output file or existing directory (stdout if not specified)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Override the article title
        #[arg(long)]
        title: Option<String>,

        /// Include YAML frontmatter (Markdown)
        #[arg(long)]
        frontmatter: bool,

        /// Base URL for relative image sources
        #[arg(long, env = "AMBOSS_BASE_URL")]
        base_url: Option<String>,

        /// Maximum nesting depth before content is flattened
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Convert every article listed in a file
    Batch {
        /// File with one saved article path per line
        #[arg(value_name = "LIST")]
        list: PathBuf,

        /// Output format: text, markdown, html, json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "amboss_content")]
        output: PathBuf,
    },

    /// Show article information
    Info {
        /// Saved article HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            format,
            output,
            title,
            frontmatter,
            base_url,
            max_depth,
        }) => {
            let mut extract = ExtractOptions::new().with_trace(cli.verbose);
            if let Some(title) = title {
                extract = extract.with_title(title);
            }
            if let Some(base_url) = base_url {
                extract = extract.with_base_url(base_url);
            }
            if let Some(depth) = max_depth {
                extract = extract.with_max_depth(depth);
            }
            let options = ConvertOptions::new()
                .with_extract_options(extract)
                .with_render_options(RenderOptions::new().with_frontmatter(frontmatter))
                .with_format(format);
            cmd_convert(&input, output.as_deref(), &options)
        }
        Some(Commands::Batch {
            list,
            format,
            output,
        }) => cmd_batch(&list, format, &output, cli.verbose),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: text to stdout
            if let Some(input) = cli.input {
                let options = ConvertOptions::new()
                    .with_extract_options(ExtractOptions::new().with_trace(cli.verbose));
                cmd_convert(&input, None, &options)
            } else {
                println!("{}", "Usage: amboss-extract <FILE>".yellow());
                println!("       amboss-extract --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = convert_file(input, options)?;

    if let Some(output) = output {
        let out_path = output_path(input, output, options.output_format)?;
        fs::write(&out_path, &result.content)?;
        eprintln!(
            "{} {} ({} bytes)",
            "Wrote".green(),
            out_path.display(),
            result.content_len()
        );
    } else {
        print!("{}", result.content);
    }

    if !result.warnings.is_empty() {
        eprintln!(
            "{} {} extraction warning(s), see `amboss-extract info`",
            "Note:".yellow(),
            result.warnings.len()
        );
    }

    Ok(())
}

/// Where `convert -o` writes. A directory gets `<identifier>.<ext>`, named
/// after the input file.
fn output_path(
    input: &Path,
    output: &Path,
    format: OutputFormat,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if !output.is_dir() {
        return Ok(output.to_path_buf());
    }
    let identifier = require_identifier(&input.to_string_lossy())?;
    Ok(output.join(format!("{}.{}", identifier, format.extension())))
}

/// One line of a batch list file.
enum BatchEntry {
    File(PathBuf),
    Url(String),
}

/// Outcome of one batch entry, for the summary file.
enum BatchOutcome {
    Saved { source: String, filename: String },
    Failed { source: String, reason: String },
    Skipped { source: String, reason: String },
}

impl BatchOutcome {
    fn line(&self) -> String {
        match self {
            BatchOutcome::Saved { source, filename } => format!("✓ {} -> {}", source, filename),
            BatchOutcome::Failed { source, reason } => format!("✗ {}: {}", source, reason),
            BatchOutcome::Skipped { source, reason } => format!("- {} ({})", source, reason),
        }
    }
}

/// Parse a list file: blank lines and `#` comments are ignored.
fn read_batch_list(path: &Path) -> Result<Vec<BatchEntry>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let entries = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            if line.starts_with("http://") || line.starts_with("https://") {
                BatchEntry::Url(line.to_string())
            } else {
                BatchEntry::File(PathBuf::from(line))
            }
        })
        .collect();
    Ok(entries)
}

fn cmd_batch(
    list: &Path,
    format: OutputFormat,
    output_dir: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = read_batch_list(list)?;
    if entries.is_empty() {
        return Err(format!("No entries found in {}", list.display()).into());
    }

    fs::create_dir_all(output_dir)?;

    let options = ConvertOptions::new()
        .with_extract_options(ExtractOptions::new().with_trace(verbose))
        .with_format(format);

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut outcomes = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let index = i + 1;
        let outcome = match entry {
            BatchEntry::Url(url) => {
                log::warn!("Skipping {}: fetching live pages is not supported", url);
                BatchOutcome::Skipped {
                    source: url.clone(),
                    reason: "save the rendered page and list its file instead".to_string(),
                }
            }
            BatchEntry::File(path) => {
                pb.set_message(path.display().to_string());
                let source = path.display().to_string();
                match convert_file(path, &options) {
                    Ok(result) => {
                        let filename = result.suggested_filename(index, format);
                        match fs::write(output_dir.join(&filename), &result.content) {
                            Ok(()) => BatchOutcome::Saved { source, filename },
                            Err(e) => BatchOutcome::Failed {
                                source,
                                reason: e.to_string(),
                            },
                        }
                    }
                    Err(e) => BatchOutcome::Failed {
                        source,
                        reason: e.to_string(),
                    },
                }
            }
        };

        if let BatchOutcome::Failed { ref source, ref reason } = outcome {
            pb.println(format!("{} {}: {}", "✗".red(), source, reason));
        }
        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    let saved = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Saved { .. }))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Failed { .. }))
        .count();
    let skipped = outcomes.len() - saved - failed;

    let mut summary = String::new();
    summary.push_str("AMBOSS Extraction Summary\n");
    summary.push_str("=========================\n");
    summary.push_str(&format!("Total entries: {}\n", outcomes.len()));
    summary.push_str(&format!("Successful: {}\n", saved));
    summary.push_str(&format!("Failed: {}\n", failed));
    summary.push_str(&format!("Skipped: {}\n", skipped));
    summary.push_str(&format!("Format: {}\n\n", format));
    summary.push_str("Results:\n");
    summary.push_str(&"-".repeat(50));
    summary.push('\n');
    for outcome in &outcomes {
        summary.push_str(&outcome.line());
        summary.push('\n');
    }

    let summary_path = output_dir.join(format!("_summary_{}.txt", format));
    fs::write(&summary_path, summary)?;

    println!(
        "\n{} {} saved, {} failed, {} skipped",
        "Done!".green().bold(),
        saved,
        failed,
        skipped
    );
    println!("{} {}", "Summary:".dimmed(), summary_path.display());

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = ArticleExtractor::new().extract_file(input)?;
    let stats = result.stats();

    if json {
        let value = serde_json::json!({
            "metadata": result.document.metadata(),
            "stats": stats,
            "warnings": result.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let metadata = result.document.metadata();

    println!("{}", "Article Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref identifier) = metadata.identifier {
        println!("{}: {}", "Identifier".bold(), identifier);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Content boxes".bold(), stats.content_box_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    println!();
    println!("{}", "Warnings".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if result.warnings.is_empty() {
        println!("{}", "None".green());
    } else {
        for warning in &result.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "amboss-extract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Article content extraction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_batch_list() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("list.txt");
        fs::write(
            &list,
            "# saved pages\n\nsaved/gout.html\n  https://next.amboss.com/us/article/x  \nsaved/sepsis.html\n",
        )
        .unwrap();

        let entries = read_batch_list(&list).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[0], BatchEntry::File(ref p) if p == Path::new("saved/gout.html")));
        assert!(matches!(entries[1], BatchEntry::Url(ref u) if u == "https://next.amboss.com/us/article/x"));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let article = dir.path().join("gout.html");
        fs::write(
            &article,
            r#"<html><head><title>Gout - AMBOSS</title></head><body><div class="baseStyles"><p>Uric acid</p></div></body></html>"#,
        )
        .unwrap();
        let list = dir.path().join("list.txt");
        fs::write(
            &list,
            format!("{}\n{}\n", dir.path().join("missing.html").display(), article.display()),
        )
        .unwrap();

        let out = dir.path().join("out");
        cmd_batch(&list, OutputFormat::Markdown, &out, false).unwrap();

        assert!(out.join("page_002_Gout.md").exists());
        let summary = fs::read_to_string(out.join("_summary_markdown.txt")).unwrap();
        assert!(summary.contains("Successful: 1\nFailed: 1\n"));
    }

    #[test]
    fn test_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = Path::new("saved/gout.html");

        let file = dir.path().join("gout.md");
        assert_eq!(output_path(input, &file, OutputFormat::Markdown).unwrap(), file);
        assert_eq!(
            output_path(input, dir.path(), OutputFormat::Json).unwrap(),
            dir.path().join("gout.json")
        );

        let err = output_path(Path::new(""), dir.path(), OutputFormat::Text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<amboss_extract::Error>(),
            Some(amboss_extract::Error::InvalidSource(_))
        ));
    }

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::parse_from([
            "amboss-extract",
            "convert",
            "page.html",
            "-f",
            "md",
            "--max-depth",
            "4",
        ]);
        match cli.command {
            Some(Commands::Convert {
                format, max_depth, ..
            }) => {
                assert_eq!(format, OutputFormat::Markdown);
                assert_eq!(max_depth, Some(4));
            }
            _ => panic!("expected convert"),
        }
    }
}
