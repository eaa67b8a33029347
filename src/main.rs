//! # labelzpl CLI
//!
//! Command-line interface for compiling label templates to ZPL.
//!
//! ## Usage
//!
//! ```bash
//! # Compile a template with {{placeholders}} to stdout
//! labelzpl compile label.json
//!
//! # Compile with sample values and send to a printer
//! labelzpl compile --literal label.json --send 192.168.1.40
//!
//! # List the variables a batch has to supply
//! labelzpl variables label.json
//!
//! # One label per row, encoding the EPC column into each tag
//! labelzpl batch label.json --rows rows.json --write-epc epc -o out.zpl
//!
//! # Just the RFID write block
//! labelzpl rfid-write --epc 3034257BF7194E4000001A85
//! ```

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use labelzpl::{
    LabelError, LabelSink, PrinterConfig, TcpSink,
    batch::{self, ColumnMap, RfidWrite, RfidWriteColumns, Row},
    document::{CompileOptions, Template, variable_display_names},
    protocol::rfid::{RfidField, RfidScheme, is_rfid_field},
    render::{Bitmap, DefaultRenderer, rasterize_images},
};
use tracing_subscriber::EnvFilter;

/// labelzpl - Label template to ZPL compiler
#[derive(Parser, Debug)]
#[command(name = "labelzpl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a template to one ZPL document
    Compile {
        /// Template JSON file
        template: PathBuf,

        /// Print sample values instead of {{placeholders}}
        #[arg(long)]
        literal: bool,

        /// Printer preset overriding the template's DPI
        #[arg(long, value_name = "NAME")]
        printer: Option<String>,

        /// Write ZPL to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Send to a network printer (host or host:port)
        #[arg(long, value_name = "HOST")]
        send: Option<String>,

        /// Save each rasterized image as a PNG in this directory
        #[arg(long, value_name = "DIR")]
        preview_dir: Option<PathBuf>,
    },

    /// List fillable variables and their display names
    Variables {
        /// Template JSON file
        template: PathBuf,
    },

    /// Fill a template from rows, one label per row
    Batch {
        /// Template JSON file
        template: PathBuf,

        /// Rows JSON file: an array of objects keyed by column name
        #[arg(long, value_name = "FILE")]
        rows: PathBuf,

        /// Column to variable mapping (repeatable); defaults to same-name columns
        #[arg(long = "map", value_name = "COL=VAR")]
        map: Vec<String>,

        /// Column whose value is written to the EPC bank
        #[arg(long, value_name = "COL")]
        write_epc: Option<String>,

        /// Column whose value is written to the User Data bank
        #[arg(long, value_name = "COL")]
        write_user_data: Option<String>,

        /// Printer preset overriding the template's DPI
        #[arg(long, value_name = "NAME")]
        printer: Option<String>,

        /// Write ZPL to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Send each label to a network printer (host or host:port)
        #[arg(long, value_name = "HOST")]
        send: Option<String>,
    },

    /// Print an RFID write block
    RfidWrite {
        /// Hex value for the EPC bank
        #[arg(long, value_name = "HEX")]
        epc: Option<String>,

        /// Hex value for the User Data bank
        #[arg(long, value_name = "HEX")]
        user_data: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so ZPL on stdout stays clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), LabelError> {
    match command {
        Commands::Compile {
            template,
            literal,
            printer,
            output,
            send,
            preview_dir,
        } => {
            let template = load_template(&template, printer.as_deref())?;
            let bitmaps = rasterize(&template)?;

            if let Some(dir) = preview_dir {
                save_previews(&dir, &bitmaps)?;
            }

            let options = CompileOptions::default()
                .with_placeholders(!literal)
                .with_image_cache(image_cache(bitmaps));
            let zpl = template.compile(&options);

            write_output(output.as_deref(), &zpl)?;
            if let Some(host) = send {
                TcpSink::new(&host).send(&zpl)?;
                eprintln!("Sent to {}", host);
            }
        }

        Commands::Variables { template } => {
            let template = load_template(&template, None)?;
            for (field, display) in variable_display_names(&template.elements) {
                let marker = if is_rfid_field(&field) { " (rfid)" } else { "" };
                println!("{}\t{}{}", field, display, marker);
            }
        }

        Commands::Batch {
            template,
            rows,
            map,
            write_epc,
            write_user_data,
            printer,
            output,
            send,
        } => {
            let template = load_template(&template, printer.as_deref())?;
            let rows: Vec<Row> = serde_json::from_str(&read_file(&rows)?)?;

            let column_map = if map.is_empty() {
                let columns = batch::row_columns(&rows);
                batch::auto_column_map(
                    columns.iter().map(String::as_str),
                    &template.fillable_variables(),
                )
            } else {
                parse_column_map(&map)?
            };
            tracing::info!(rows = rows.len(), mapped = ?column_map, "batch");

            let options = CompileOptions::default().with_image_cache(image_cache(rasterize(&template)?));
            let doc = template.compile(&options);

            let rfid_columns = RfidWriteColumns {
                epc: write_epc,
                user_data: write_user_data,
            };
            let docs = if rfid_columns.is_empty() {
                batch::batch_from_rows(&doc, &rows, &column_map)
            } else {
                batch::batch_with_rfid_writes(
                    &doc,
                    &rows,
                    &column_map,
                    &rfid_columns,
                    &RfidScheme::V1,
                )
            };

            write_output(output.as_deref(), &docs.join("\n"))?;
            if let Some(host) = send {
                let sent = TcpSink::new(&host).send_all(docs.iter().map(String::as_str))?;
                eprintln!("Sent {} labels to {}", sent, host);
            }
        }

        Commands::RfidWrite { epc, user_data } => {
            let writes: Vec<RfidWrite> = [(RfidField::Epc, epc), (RfidField::UserData, user_data)]
                .into_iter()
                .filter_map(|(field, value)| Some(RfidWrite::new(field, value?)))
                .collect();
            println!("{}", batch::build_rfid_write(&writes));
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String, LabelError> {
    std::fs::read_to_string(path).map_err(|e| {
        LabelError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Load a template, applying a printer preset's DPI when given.
fn load_template(path: &Path, printer: Option<&str>) -> Result<Template, LabelError> {
    let mut template = Template::from_json(&read_file(path)?)?;
    if let Some(name) = printer {
        let preset = PrinterConfig::by_name(name).ok_or_else(|| {
            let known: Vec<&str> = PrinterConfig::ALL.iter().map(|p| p.key).collect();
            LabelError::Template(format!(
                "Unknown printer '{}'. Available: {}",
                name,
                known.join(", ")
            ))
        })?;
        template.canvas.dpi = preset.dpi;
    }
    Ok(template)
}

/// Run the async image pre-pass, skipping the runtime when there are no images.
fn rasterize(template: &Template) -> Result<HashMap<String, Bitmap>, LabelError> {
    if template.images().next().is_none() {
        return Ok(HashMap::new());
    }
    let runtime = tokio::runtime::Runtime::new()?;
    let renderer = DefaultRenderer::new()?;
    Ok(runtime.block_on(rasterize_images(
        &template.elements,
        &template.canvas,
        &renderer,
    )))
}

fn image_cache(bitmaps: HashMap<String, Bitmap>) -> HashMap<String, String> {
    bitmaps
        .into_iter()
        .map(|(id, bitmap)| (id, bitmap.to_graphic_field().to_string()))
        .collect()
}

/// Save each bitmap as `{id}.png`, with unsafe filename characters replaced.
fn save_previews(dir: &Path, bitmaps: &HashMap<String, Bitmap>) -> Result<(), LabelError> {
    std::fs::create_dir_all(dir)?;
    for (id, bitmap) in bitmaps {
        let name: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let path = dir.join(format!("{}.png", name));
        bitmap
            .to_gray_image()
            .save(&path)
            .map_err(|e| LabelError::Image(format!("Failed to save PNG: {}", e)))?;
        eprintln!("Saved preview {}", path.display());
    }
    Ok(())
}

fn parse_column_map(pairs: &[String]) -> Result<ColumnMap, LabelError> {
    pairs
        .iter()
        .map(|pair| {
            let (column, variable) = pair.split_once('=').ok_or_else(|| {
                LabelError::Template(format!("Invalid --map '{}', expected COL=VAR", pair))
            })?;
            Ok((column.trim().to_string(), variable.trim().to_string()))
        })
        .collect()
}

fn write_output(path: Option<&Path>, zpl: &str) -> Result<(), LabelError> {
    match path {
        Some(path) => {
            std::fs::write(path, zpl)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", zpl),
    }
    Ok(())
}
