// cipp: parse cipp programs and explore their syntax trees

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cipp::parser::Parser;
use cipp::printer::print_program;
use cipp::ui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Explore,
    Check,
    Dump,
    Format,
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--check | --dump | --fmt] <file.cipp>", program_name);
    eprintln!();
    eprintln!("  (no flag)   open the syntax tree explorer");
    eprintln!("  --check     parse and report a summary");
    eprintln!("  --dump      print the syntax tree");
    eprintln!("  --fmt       print the program in canonical form");
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("cipp");

    let mut mode = Mode::Explore;
    let mut input_path: Option<&str> = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--check" => mode = Mode::Check,
            "--dump" => mode = Mode::Dump,
            "--fmt" => mode = Mode::Format,
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                print_usage(program_name);
                bail!("Unknown option '{}'", flag);
            }
            path => {
                if input_path.is_some() {
                    bail!("Only one input file is supported");
                }
                input_path = Some(path);
            }
        }
    }

    let Some(path) = input_path else {
        eprintln!("Error: No input file provided");
        eprintln!();
        print_usage(program_name);
        std::process::exit(1);
    };

    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' not found", path);
        std::process::exit(1);
    }

    let source = fs::read_to_string(path).with_context(|| format!("Reading {}", path))?;

    if mode == Mode::Explore {
        return explore(path, &source);
    }

    eprintln!("Parsing {}...", path);
    let mut parser = match Parser::new(&source) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} function(s).",
        program.functions.len()
    );
    if !parser.is_at_end() {
        eprintln!(
            "Warning: {} trailing token(s) after the last function were ignored",
            parser.remaining()
        );
    }

    match mode {
        Mode::Dump => println!("{:#?}", program),
        Mode::Format => print!("{}", print_program(&program)),
        Mode::Check | Mode::Explore => {}
    }

    Ok(())
}

fn explore(path: &str, source: &str) -> Result<()> {
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let mut app = App::new(file_name, source);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Running the explorer")
}
