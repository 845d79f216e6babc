use clap::{ArgAction, Parser as _};
use colored::Colorize;
use infixtree::{print_in_order, Parser, Source, DEMO_EXPRESSIONS};
use std::io::{self, BufRead, Write};
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Parse single-digit infix arithmetic into an expression tree, and print its in-order traversal.
#[derive(clap::Parser, Debug)]
#[command(name = "infixtree", version, about, long_about = None)]
struct Cli {
    /// Expressions to parse. If none are given, reads one expression per line from stdin.
    expressions: Vec<String>,

    /// Run the built-in demonstration expressions
    #[arg(long, conflicts_with = "expressions")]
    demo: bool,

    /// Also print each tree as an s-expression
    #[arg(short, long)]
    tree: bool,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run(&cli, stdin.lock(), &mut stdout.lock(), &mut io::stderr());
    if let Err(err) = &result {
        eprintln!("{}", format!("Error: {}", err).red());
    }
    process::exit(exit_code(&result));
}

/// 0 if every expression was well formed, 1 if any was malformed, 2 if the run itself failed.
fn exit_code(result: &Result<bool, infixtree::Error>) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Parse and print every expression, continuing past malformed ones. Returns whether all of them
/// were well formed.
fn run<R: BufRead, W: Write, E: Write>(
    cli: &Cli,
    input: R,
    out: &mut W,
    err_out: &mut E,
) -> Result<bool, infixtree::Error> {
    let parser = Parser::new()?;
    let sources = collect_sources(cli, input)?;
    tracing::info!(count = sources.len(), "parsing expressions");

    let mut all_ok = true;
    for source in &sources {
        match parser.parse(source) {
            Ok(tree) => {
                print_in_order(&tree, out)?;
                if cli.tree {
                    writeln!(out, "{}", tree)?;
                }
            }
            Err(err) => {
                out.flush()?;
                write!(err_out, "{}", err)?;
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

/// The expressions to run: the demo inputs, the command line arguments, or else the non-blank
/// lines of `input`.
fn collect_sources<R: BufRead>(cli: &Cli, input: R) -> io::Result<Vec<Source>> {
    if cli.demo {
        return Ok(DEMO_EXPRESSIONS
            .iter()
            .map(|expr| Source::new("demo", (*expr).to_owned()))
            .collect());
    }
    if !cli.expressions.is_empty() {
        return Ok(cli
            .expressions
            .iter()
            .enumerate()
            .map(|(i, expr)| Source::new(&format!("argv[{}]", i + 1), expr.clone()))
            .collect());
    }

    let mut sources = vec![];
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        sources.push(Source::new(&format!("stdin line {}", i + 1), line));
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;
    use std::io::Read;

    struct Output {
        result: Result<bool, infixtree::Error>,
        out: String,
        err: String,
    }

    fn run_cli(args: &[&str], stdin: &str) -> Output {
        let cli = Cli::try_parse_from(std::iter::once("infixtree").chain(args.iter().copied()))
            .unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = run(&cli, stdin.as_bytes(), &mut out, &mut err);
        Output {
            result,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    struct BrokenInput;

    impl Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "stdin closed"))
        }
    }

    #[test]
    fn test_continues_after_malformed_expression() {
        let output = run_cli(&["1+2", "+1", "3"], "");
        assert!(!output.result.unwrap());
        assert_eq!(output.out, "1+2\n3\n");
        assert!(output.err.contains("operator '+' is missing an operand"));
        assert!(output.err.contains("argv[2]:1:1"));
        assert_eq!(exit_code(&Ok(false)), 1);
    }

    #[test]
    fn test_all_well_formed() {
        let output = run_cli(&["1 * 2 + 3"], "");
        assert!(output.result.unwrap());
        assert_eq!(output.out, "1*2+3\n");
        assert_eq!(output.err, "");
        assert_eq!(exit_code(&Ok(true)), 0);
    }

    #[test]
    fn test_demo() {
        let output = run_cli(&["--demo"], "9");
        assert!(output.result.unwrap());
        assert_eq!(output.out, "1+2+3\n1+2*3\n1*2+3\n");
    }

    #[test]
    fn test_demo_conflicts_with_expressions() {
        assert!(Cli::try_parse_from(["infixtree", "--demo", "1+2"]).is_err());
    }

    #[test]
    fn test_tree_flag() {
        let output = run_cli(&["--tree", "1 + 2 * 3", "1*2+3"], "");
        assert_eq!(
            output.out,
            "1+2*3\n(+ 1 (* 2 3))\n1*2+3\n(+ (* 1 2) 3)\n"
        );
    }

    #[test]
    fn test_stdin_skips_blank_lines() {
        let output = run_cli(&[], "1+2\n\n   \n4 / 2\n12\n");
        assert!(!output.result.unwrap());
        assert_eq!(output.out, "1+2\n4/2\n");
        assert!(output.err.contains("stdin line 5:1:2"));
    }

    #[test]
    fn test_io_error_fails_the_run() {
        let cli = Cli::try_parse_from(["infixtree"]).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let input = io::BufReader::new(BrokenInput);
        let result = run(&cli, input, &mut out, &mut err);
        assert!(matches!(result, Err(infixtree::Error::Io(_))));
        assert_eq!(exit_code(&result), 2);
        assert!(out.is_empty());
    }
}
