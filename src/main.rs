use std::process;

use clap::Parser as ClapParser;
use tracing::Level;

use multicalc::calc_conversions::{convert, round_for_display};
use multicalc::calc_evaluator::{evaluate, format_result};
use multicalc::calc_history::{History, DEFAULT_HISTORY_FILE};
use multicalc::calc_theme::Theme;
use multicalc::calc_types::{CalcError, Mode};
use multicalc::calc_ui::{self, App};

#[derive(ClapParser)]
#[command(author, version, about = "MultiCalc - a multi-mode calculator")]
struct Args {
    /// Evaluate an expression (or, with --convert, an amount) and exit
    #[arg(long)]
    eval: Option<String>,

    /// Conversion rule key applied to the --eval amount, e.g. "cm→m"
    #[arg(long)]
    convert: Option<String>,

    /// Calculator mode
    #[arg(long, default_value = "standard")]
    mode: String,

    /// History file path
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    history_file: String,

    /// Start in the light theme
    #[arg(long)]
    light: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let mode: Mode = match args.mode.parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    // Headless one-shot evaluation; this is what the test suite drives
    if let Some(ref input) = args.eval {
        match run_headless(input, args.convert.as_deref(), mode) {
            Ok(output) => {
                println!("{}", output);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        }
    }

    let history = History::load(&args.history_file);
    let theme = Theme::new(!args.light);
    let mut app = App::new(mode, theme, history);

    if let Err(e) = calc_ui::run(&mut app) {
        eprintln!("Terminal error: {}", e);
        process::exit(1);
    }
}

fn run_headless(input: &str, convert_key: Option<&str>, mode: Mode) -> Result<String, CalcError> {
    if let Some(key) = convert_key {
        let amount: f64 = input
            .trim()
            .parse()
            .map_err(|_| CalcError::evaluation("Enter a valid number first"))?;
        Ok(format_result(round_for_display(convert(amount, key))))
    } else {
        let value = evaluate(input, mode)?;
        Ok(format_result(value))
    }
}
