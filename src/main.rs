//! jp-ruby - CLI

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use jp_ruby::frontend::lexer::tokenize;
use jp_ruby::util::i18n::{t_cur_simple, MSG};
use jp_ruby::util::logger;
use jp_ruby::{
    collect_sources, run_file, transpile_files, write_output, Config, ConfigError, RunError, NAME,
    VERSION,
};

/// Ruby with Japanese keywords
#[derive(Parser, Debug)]
#[command(name = "jp-ruby")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transpile and run a source file
    Run {
        /// Source file to run
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Config file (default: discovered .jp-ruby.yml)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Ruby interpreter to use
        #[arg(long, value_name = "PATH")]
        ruby: Option<PathBuf>,

        /// Arguments passed to the program
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Transpile files or directories to Ruby
    Transpile {
        /// Source files, or directories searched for *.jrb
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Config file (default: discovered .jp-ruby.yml)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Write .rb files here instead of stdout
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Dump the token stream of a source file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print version information
    Version,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        logger::init_debug();
    } else {
        logger::init();
    }

    match args.command {
        Commands::Run {
            file,
            config,
            ruby,
            args,
        } => match run_file(&file, config.as_deref(), ruby.as_deref(), &args) {
            Ok(warnings) => {
                eprint!("{}", warnings);
                ExitCode::SUCCESS
            }
            Err(err) => {
                report_run_error(&err);
                exit_code(err.exit_code())
            }
        },
        Commands::Transpile {
            paths,
            config,
            out_dir,
        } => finish(transpile(&paths, config, out_dir)),
        Commands::Tokens { file, json } => finish(dump_tokens(&file, json)),
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            ExitCode::SUCCESS
        }
    }
}

fn transpile(
    paths: &[PathBuf],
    config: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::resolve(paths.first().map(PathBuf::as_path), config.as_deref())?;
    let table = config.build_keyword_table()?;
    let sources = collect_sources(paths)?;

    if out_dir.is_none() && sources.len() > 1 {
        bail!("--out-dir is required when transpiling more than one file");
    }

    let results = transpile_files(&sources, &table);
    for (source, result) in sources.iter().zip(results) {
        let transpiled = result?;
        match &out_dir {
            Some(dir) => {
                write_output(source, &transpiled, dir)?;
            }
            None => print!("{}", transpiled.code),
        }
    }
    Ok(())
}

fn dump_tokens(
    file: &Path,
    json: bool,
) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let tokens = tokenize(&source);
    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }
    for (i, token) in tokens.iter().enumerate() {
        println!("{:>5} {:<12} {:?}", i, token.kind.to_string(), token.text);
    }
    Ok(())
}

fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let header = if err.downcast_ref::<ConfigError>().is_some() {
                MSG::ConfigErrorHeader
            } else {
                MSG::ErrorHeader
            };
            print_error(header, &format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn report_run_error(err: &RunError) {
    match err {
        RunError::Syntax { message } => print_error(MSG::SyntaxErrorHeader, message),
        // quiet non-zero exit
        RunError::HostFailed { message, .. } if message.trim().is_empty() => {}
        RunError::HostFailed { message, .. } => print_error(MSG::RunErrorHeader, message),
        RunError::Config(e) => print_error(MSG::ConfigErrorHeader, &e.to_string()),
        other => print_error(MSG::ErrorHeader, &other.to_string()),
    }
}

fn print_error(
    header: MSG,
    message: &str,
) {
    eprintln!("{}: {}", t_cur_simple(header).red().bold(), message.trim_end());
}

fn exit_code(status: i32) -> ExitCode {
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
