use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use exiframe::exif::{MetadataRecord, FIELD_TABLE};
use exiframe::{config, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "exiframe",
    version,
    about = "Frame a JPEG photo and caption it with its camera, lens and exposure data"
)]
struct Cli {
    /// Path to the image file (required)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Use a black frame with white text (default white frame)
    #[arg(long)]
    black: bool,

    /// Do not draw the frame around the photo
    #[arg(long = "no-frame")]
    no_frame: bool,

    /// Do not draw the camera and lens lines
    #[arg(long = "no-model")]
    no_model: bool,

    /// Directory to write the framed copy to (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Bold font file for the camera and exposure lines
    #[arg(long = "font-bold", value_name = "TTF")]
    font_bold: Option<PathBuf>,

    /// Regular font file for the lens and date lines
    #[arg(long = "font-regular", value_name = "TTF")]
    font_regular: Option<PathBuf>,

    /// Path to config file (default: exiframe.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default exiframe.json and exit
    #[arg(long)]
    init: bool,

    /// Print the extracted metadata and exit
    #[arg(long = "show-exif")]
    show_exif: bool,

    /// With --show-exif, print the metadata as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let Some(file) = cli.file.as_deref() else {
        anyhow::bail!("No input file specified. Use -f <FILE> (see --help for usage).");
    };

    // Handle --show-exif
    if cli.show_exif {
        let record = pipeline::read_record(file)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            print_record(file, &record);
        }
        return Ok(());
    }

    // Load config, then let flags override it
    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.black {
        config.frame.dark = true;
    }
    if cli.no_frame {
        config.frame.no_frame = true;
    }
    if cli.no_model {
        config.frame.no_model = true;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.display().to_string());
    }
    if let Some(font) = &cli.font_bold {
        config.fonts.bold = Some(font.display().to_string());
    }
    if let Some(font) = &cli.font_regular {
        config.fonts.regular = Some(font.display().to_string());
    }

    log::info!("Processing: {}", file.display());
    let result = pipeline::process_image(file, &config)?;

    if let (Some(w), Some(h)) = (result.record.pixel_x_dimension, result.record.pixel_y_dimension) {
        log::debug!("  Recorded size: {w} x {h}");
    }
    log::info!("Wrote {}", result.output.display());

    Ok(())
}

// ANSI color codes
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Print every extracted field, marking absent ones.
fn print_record(path: &std::path::Path, record: &MetadataRecord) {
    println!();
    println!("{BOLD}File:{RESET} {}", path.display());
    println!("{DIM}{}{RESET}", "═".repeat(60));

    for descriptor in &FIELD_TABLE {
        let tag_col = format!("{:<24}", descriptor.field.name());
        match record.get(descriptor.field) {
            Some(value) => println!("  {tag_col} : {value}"),
            None => println!("  {DIM}{tag_col} : (not present){RESET}"),
        }
    }

    if record.is_empty() {
        println!();
        println!("  {DIM}(no known fields found){RESET}");
    }
    println!();
}
