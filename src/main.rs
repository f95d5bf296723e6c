use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use arbor::ast::Program;
use arbor::ast_printer::AstPrinter;
use arbor::lexer;
use arbor::prepro;
use arbor::{ArborError, Interpreter};

/// Exit status for lexical and syntax errors.
const EXIT_STATIC: i32 = 65;
/// Exit status for runtime errors.
const EXIT_RUNTIME: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Arbor language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes an .arbor file, printing each token
    Tokenize { filename: PathBuf },

    /// Parses an .arbor file and prints its syntax tree
    Parse {
        filename: PathBuf,

        /// Print the tree as JSON instead of the indented dump
        #[arg(long)]
        json: bool,
    },

    /// Runs an .arbor program
    Run {
        filename: PathBuf,

        /// Print the syntax tree before the program output
        #[arg(long)]
        show_ast: bool,
    },
}

/// Reads an `.arbor` file and applies the pre-filter.
fn read_source(filename: &Path) -> Result<String> {
    if filename.extension().and_then(|ext| ext.to_str()) != Some("arbor") {
        bail!("{:?} must have the .arbor extension", filename);
    }

    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let text = String::from_utf8(buf)
        .map_err(ArborError::from)
        .context(format!("{:?} is not valid UTF-8", filename))?;

    Ok(prepro::filter(&text))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("arbor::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Reports an interpreter error and exits with the matching status.
fn fail(e: ArborError) -> ! {
    debug!("Exiting on error: {:?}", e);
    eprintln!("{}", e);

    if e.is_static() {
        std::process::exit(EXIT_STATIC);
    }
    std::process::exit(EXIT_RUNTIME);
}

fn parse_or_exit(source: &str) -> Program {
    match arbor::parse(source) {
        Ok(program) => {
            info!("Program parsed successfully");
            program
        }
        Err(e) => fail(e),
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename } => {
            info!("Running Tokenize subcommand");
            let source = read_source(&filename)?;

            for token in lexer::tokens(&source) {
                match token {
                    Ok(token) => println!("{}", token),
                    Err(e) => fail(e),
                }
            }
        }

        Commands::Parse { filename, json } => {
            info!("Running Parse subcommand");
            let source = read_source(&filename)?;
            let program = parse_or_exit(&source);

            if json {
                let rendered =
                    serde_json::to_string_pretty(&program).context("Failed to render AST")?;
                println!("{}", rendered);
            } else {
                print!("{}", AstPrinter::print(&program));
            }
        }

        Commands::Run { filename, show_ast } => {
            info!("Running Run subcommand");
            let source = read_source(&filename)?;
            debug!("Filtered input:\n {}", source);

            let program = parse_or_exit(&source);

            if show_ast {
                println!("{}", "=".repeat(50));
                print!("{}", AstPrinter::print(&program));
                println!("{}", "=".repeat(50));
            }

            let mut interpreter = Interpreter::stdout();
            if let Err(e) = interpreter.interpret(&program) {
                fail(e);
            }

            info!("Program executed successfully");
        }
    }

    Ok(())
}
