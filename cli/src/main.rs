//! textpost CLI - split markdown documents into laid-out posts

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use textpost::export::export_timestamp;
use textpost::{
    ExportOptions, ExportPlan, ExportScope, JsonFormat, Region, Textpost, TextpostResult,
};

#[derive(Parser)]
#[command(name = "textpost")]
#[command(author = "textpost contributors")]
#[command(version)]
#[command(about = "Split markdown documents into laid-out social media posts", long_about = None)]
struct Cli {
    /// Input markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Skip malformed header lines instead of ignoring the whole header
    #[arg(long, global = true, env = "TEXTPOST_LENIENT")]
    lenient: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to all formats (JSON, text, normalized markdown)
    Convert {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert a document to JSON post views
    Json {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert a document to plain text
    Text {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit an `[image: alt]` line per image
        #[arg(long)]
        images: bool,

        /// Keep `==` highlight delimiters
        #[arg(long)]
        keep_highlights: bool,
    },

    /// Show a per-post summary
    Info {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show the resolved layout of each post
    Layout {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show the image export plan
    Plan {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only export this post (1-based)
        #[arg(long)]
        post: Option<usize>,

        /// Device pixels per logical pixel
        #[arg(long, default_value = "2")]
        pixel_ratio: f32,

        /// File name prefix
        #[arg(long, env = "TEXTPOST_PREFIX")]
        prefix: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let lenient = cli.lenient;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), lenient),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, lenient),
        Some(Commands::Text {
            input,
            output,
            images,
            keep_highlights,
        }) => cmd_text(&input, output.as_deref(), images, keep_highlights, lenient),
        Some(Commands::Info { input }) => cmd_info(&input, lenient),
        Some(Commands::Layout { input }) => cmd_layout(&input, lenient),
        Some(Commands::Plan {
            input,
            post,
            pixel_ratio,
            prefix,
        }) => cmd_plan(&input, post, pixel_ratio, prefix, lenient),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), lenient)
            } else {
                println!("{}", "Usage: textpost <FILE> [OUTPUT]".yellow());
                println!("       textpost --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn builder(lenient: bool) -> Textpost {
    if lenient {
        Textpost::new().lenient()
    } else {
        Textpost::new()
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_posts", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing posts...");
    let result = builder(lenient).with_images(true).parse_file(input)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = result.to_json(JsonFormat::Pretty)?;
    fs::write(output_dir.join("posts.json"), &json)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = result.to_text()?;
    fs::write(output_dir.join("posts.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Writing markdown...");
    fs::write(output_dir.join("document.md"), result.document().text())?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} posts.json", "├─".dimmed());
    println!("  {} posts.txt", "├─".dimmed());
    println!("  {} document.md", "└─".dimmed());

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = builder(lenient).parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_or_print(output, &result.to_json(format)?)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    images: bool,
    keep_highlights: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = builder(lenient).with_images(images);
    if keep_highlights {
        builder = builder.keep_highlights();
    }

    let result = builder.parse_file(input)?;
    write_or_print(output, &result.to_text()?)
}

fn cmd_info(input: &Path, lenient: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = builder(lenient).parse_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Posts".bold(), result.post_count());
    println!("{}: {}", "Characters".bold(), result.document().len());

    for view in &result.views {
        println!();
        println!("{}", format!("Post {}", view.index + 1).cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Theme".bold(), view.theme);
        println!("{}: {}", "Image position".bold(), view.layout.image_position.name());
        println!(
            "{}: {}",
            "Vertical align".bold(),
            view.layout.vertical_alignment.name()
        );
        println!("{}: {}", "Images".bold(), view.images.len());
        println!("{}: {}", "Highlights".bold(), view.highlights.len());
        println!("{}: {}", "Words".bold(), view.text.split_whitespace().count());

        for (key, value) in &view.metadata.extra {
            println!("{}: {}", key.bold(), value);
        }
    }

    Ok(())
}

fn cmd_layout(input: &Path, lenient: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = builder(lenient).parse_file(input)?;

    for view in &result.views {
        let layout = &view.layout;
        let order = layout
            .regions()
            .iter()
            .map(|region| match region {
                Region::Image => "image",
                Region::Text => "text",
            })
            .collect::<Vec<_>>()
            .join(" → ");

        println!(
            "{} {} {:?}, {}, images {}% (max {}%), text {:?}, gap {}rem{}",
            format!("Post {}:", view.index + 1).bold(),
            layout.image_position.name(),
            layout.flow_direction,
            order,
            layout.image_share.target_percent,
            layout.image_share.max_percent,
            layout.text_alignment,
            layout.gap_rem,
            if layout.image_scrolls { ", scrolls" } else { "" },
        );
    }

    Ok(())
}

fn cmd_plan(
    input: &Path,
    post: Option<usize>,
    pixel_ratio: f32,
    prefix: Option<String>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result: TextpostResult = builder(lenient).parse_file(input)?;

    let scope = match post {
        Some(0) => return Err("post numbers start at 1".into()),
        Some(n) => ExportScope::Current(n - 1),
        None => ExportScope::All,
    };

    let mut options = ExportOptions::new()
        .with_pixel_ratio(pixel_ratio)
        .with_timestamp(export_timestamp(chrono::Utc::now()));
    if let Some(prefix) = prefix {
        options = options.with_prefix(prefix);
    }

    let plan: ExportPlan = result.export_plan(scope, &options)?;

    println!("{}", "Export Plan".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for request in &plan.requests {
        println!(
            "{} {}x{} {}",
            request.file_name,
            request.pixel_width(),
            request.pixel_height(),
            request.background.to_hex().dimmed()
        );
    }

    println!("\n{} {} images planned", "Done!".green().bold(), plan.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "textpost".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown post layout tool");
    println!();
    println!("License: MIT");
}
