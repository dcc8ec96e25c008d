use std::{fs::read_to_string, io::Read, path::PathBuf, process::exit};

use clap::{Parser, ValueEnum};

use sable::{
    assembler::assembler::assemble, display_error, errors::errors::Error, lexer::lexer::lex,
    parser::parser::parse,
};

#[derive(Parser)]
#[command(version, about = "Front end for the Sable language", long_about = None)]
struct Cli {
    /// Source file to read; standard input when omitted
    input: Option<PathBuf>,

    /// Which stage of the pipeline to serialize to stdout
    #[arg(long, value_enum, default_value = "program")]
    emit: Emit,
}

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    Tokens,
    Statements,
    Program,
}

fn main() {
    let cli = Cli::parse();

    let (source, file_name) = match &cli.input {
        Some(path) => {
            let source = match read_to_string(path) {
                Ok(source) => source,
                Err(error) => {
                    eprintln!("Failed to read {}: {}", path.display(), error);
                    exit(1);
                }
            };
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (source, Some(file_name))
        }
        None => {
            let mut buffer = String::new();
            if let Err(error) = std::io::stdin().read_to_string(&mut buffer) {
                eprintln!("Failed to read standard input: {}", error);
                exit(1);
            }
            (buffer, None)
        }
    };

    match run(cli.emit, source.clone(), file_name) {
        Ok(output) => println!("{}", output),
        Err(error) => {
            display_error(&error, &source);
            exit(1);
        }
    }
}

fn run(emit: Emit, source: String, file: Option<String>) -> Result<String, Error> {
    let tokens = lex(source, file)?;
    if let Emit::Tokens = emit {
        return Ok(to_json(&tokens));
    }

    let statements = parse(tokens)?;
    if let Emit::Statements = emit {
        return Ok(to_json(&statements));
    }

    let program = assemble(statements)?;
    Ok(to_json(&program))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).expect("failed to serialize output")
}
