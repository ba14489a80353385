// Vixie: shading language front end with a token and syntax tree viewer

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use getopts::{Fail, Options};
use ratatui::{backend::CrosstermBackend, Terminal};

use vixie::logger;
use vixie::parser::lexer::Lexer;
use vixie::parser::parse::parse;
use vixie::parser::pretty::PrettyPrinter;
use vixie::ui::App;

const EXIT_USAGE: i32 = 1;
const EXIT_SYNTAX: i32 = 2;

/// What the command line asked for
enum Command {
    Usage,
    Tokens(String),
    Dump(String),
    View(String),
}

fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("t", "tokens", "print the token stream and exit");
    opts.optflag("d", "dump", "print the syntax tree and exit");
    opts.optflagmulti(
        "v",
        "verbose",
        "log lexer/parser activity to stderr (repeat for trace)",
    );
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser; returns the command and the `-v` count
fn parse_options(opts: &Options, args: &[String]) -> Result<(Command, usize), Fail> {
    let matches = opts.parse(args.iter().skip(1))?;
    let verbosity = matches.opt_count("v");

    if matches.opt_present("h") {
        return Ok((Command::Usage, verbosity));
    }

    let input = match matches.free.len() {
        0 => return Err(Fail::OptionMissing(String::from("FILE"))),
        1 => matches.free[0].clone(),
        _ => return Err(Fail::UnrecognizedOption(matches.free[1].clone())),
    };

    let command = match (matches.opt_present("t"), matches.opt_present("d")) {
        (true, true) => {
            return Err(Fail::UnexpectedArgument(String::from(
                "--tokens and --dump are exclusive",
            )))
        }
        (true, false) => Command::Tokens(input),
        (false, true) => Command::Dump(input),
        (false, false) => Command::View(input),
    };

    Ok((command, verbosity))
}

fn read_source(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Err(format!("File '{}' not found", path).into());
    }

    Ok(fs::read_to_string(path)?)
}

fn print_tokens(source: &str) -> i32 {
    for token in Lexer::new(source) {
        match token {
            Ok(token) => println!("{}", token),
            Err(e) => {
                eprintln!("{}", e);
                return EXIT_SYNTAX;
            }
        }
    }

    0
}

fn dump_tree(source: &str) -> i32 {
    match parse(source) {
        Ok(program) => {
            let mut printer = PrettyPrinter::new().with_locations();
            print!("{}", printer.print_program(&program));
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_SYNTAX
        }
    }
}

fn run_viewer(source: String) -> Result<(), Box<dyn std::error::Error>> {
    // Lex and parse before the terminal switches to raw mode so log output
    // stays readable
    let mut app = App::new(source);
    if let Some(e) = app.error() {
        log::warn!("{}", e);
    }

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

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(|s| s.as_str()).unwrap_or("vixie");
    let opts = get_opts();
    let usage = opts.usage(&format!("Usage: {} [OPTIONS] FILE", program));

    let (command, verbosity) = match parse_options(&opts, &args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", usage);
            process::exit(EXIT_USAGE);
        }
    };

    if let Err(e) = logger::init(verbosity) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let path = match command {
        Command::Usage => {
            println!("{}", usage);
            return Ok(());
        }
        Command::Tokens(ref path) | Command::Dump(ref path) | Command::View(ref path) => {
            path.clone()
        }
    };

    let source = match read_source(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_USAGE);
        }
    };
    log::debug!("read {} bytes from {}", source.len(), path);

    match command {
        Command::Tokens(_) => process::exit(print_tokens(&source)),
        Command::Dump(_) => process::exit(dump_tree(&source)),
        _ => run_viewer(source),
    }
}
