use std::{
    io::{self, BufRead, Write},
    process,
    time::Instant,
};

use clap::Parser as ClapParser;
use shunt::{
    ast::ast::SyntaxTree,
    errors::errors::Error,
    lexer::lexer::{tokenize, Lexer},
    parser::parser::parse,
    pipeline::parse_source,
    render_error,
};

#[derive(ClapParser, Debug)]
#[command(name = "shunt", about = "Tokenize and parse expressions with a shunting-yard parser")]
struct Cli {
    /// Expressions to parse. Starts an interactive prompt when none are given.
    #[arg(value_name = "EXPR")]
    exprs: Vec<String>,

    /// Print the token stream of each input.
    #[arg(short, long)]
    tokens: bool,

    /// Print how long each stage took.
    #[arg(short, long)]
    verbose: bool,

    /// Run the lexer and parser on separate threads.
    #[arg(long)]
    threaded: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.exprs.is_empty() {
        if let Err(err) = repl(&cli) {
            eprintln!("error: {}", err);
            process::exit(1);
        }
        return;
    }

    let mut failed = false;
    for text in &cli.exprs {
        failed |= !run(&cli, text);
    }

    if failed {
        process::exit(1);
    }
}

fn repl(cli: &Cli) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        if !line.trim().is_empty() {
            run(cli, line.trim_end());
        }
    }
}

/// Parses one input and prints the result. Returns false on error.
fn run(cli: &Cli, text: &str) -> bool {
    let start = Instant::now();

    if cli.tokens {
        match tokenize(text.to_string(), None) {
            Ok(tokens) => tokens.iter().for_each(|token| token.debug()),
            Err(error) => {
                print!("{}", render_error(&error, text));
                return false;
            }
        }

        if cli.verbose {
            println!("Tokenized in {:?}", start.elapsed());
        }
    }

    let parse_start = Instant::now();
    let result = parse_text(cli, text);

    if cli.verbose {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    match result {
        Ok(trees) => {
            let rendered: Vec<String> = trees.iter().map(SyntaxTree::to_string).collect();
            println!("{} -> {}", text, rendered.join(" "));
            true
        }
        Err(error) => {
            print!("{}", render_error(&error, text));
            false
        }
    }
}

fn parse_text(cli: &Cli, text: &str) -> Result<Vec<SyntaxTree>, Error> {
    if cli.threaded {
        return parse_source(text, None);
    }

    let mut lexer = Lexer::new(text.chars(), None);
    let (_, result) = parse(lexer.by_ref());

    match (result, lexer.error()) {
        (Err(_), Some(error)) => Err(error.clone()),
        (result, _) => result,
    }
}
