use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    rc::Rc,
    time::Instant,
};

use clap::Parser;
use exprtree::{display_error, init_logging, lexer::lexer::tokenize, parser::parser::build_tree};

/// Parse a source file into its expression tree
#[derive(Parser, Debug)]
#[command(name = "exprtree")]
#[command(about = "Tokenize and parse a source file into an expression tree", long_about = None)]
struct Cli {
    /// Source file to parse (reads stdin when neither FILE nor -c is given)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Parse inline source code
    #[arg(short = 'c', long = "command", value_name = "CODE", conflicts_with = "file")]
    command: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(long = "tokens")]
    tokens: bool,
}

fn read_source(cli: &Cli) -> io::Result<(String, String)> {
    if let Some(code) = &cli.command {
        return Ok((code.clone(), String::from("shell")));
    }

    match &cli.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            Ok((read_to_string(path)?, file_name))
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((source, String::from("stdin")))
        }
    }
}

fn main() -> ExitCode {
    if let Err(error) = init_logging("warn") {
        eprintln!("Warning: logging disabled: {}", error);
    }

    let cli = Cli::parse();

    let (source, file_name) = match read_source(&cli) {
        Ok(read) => read,
        Err(error) => {
            eprintln!("Error: failed to read source: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &source);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(elapsed = ?start.elapsed(), "tokenized");

    if cli.tokens {
        for token in &tokens {
            println!("{}", token);
        }
        return ExitCode::SUCCESS;
    }

    let parse_start = Instant::now();
    let tree = match build_tree(tokens, Rc::new(file_name)) {
        Ok(tree) => tree,
        Err(error) => {
            display_error(&error, &source);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(elapsed = ?parse_start.elapsed(), "parsed");

    print!("{}", tree);
    ExitCode::SUCCESS
}
