use color_print::ceprintln;
use mipsdis::{parser, Config, MachLangParser};
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file, one 32-bit binary instruction per line
    input: String,

    /// YAML render configuration
    #[clap(short, long)]
    config: Option<String>,

    /// Render registers by name ($t0) instead of number ($8)
    #[clap(short = 'n', long)]
    reg_names: bool,

    /// Print the decoded fields after each instruction
    #[clap(short, long)]
    dump: bool,

    /// Print progress on stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            err.print_diag(args.config.as_deref().unwrap_or(""), &[]);
            return ExitCode::FAILURE;
        }
    };
    let mut style = config.style();
    style.reg_names |= args.reg_names;
    let dump = config.dump || args.dump;

    if args.verbose {
        ceprintln!("<s>1. Read File</>");
        eprintln!("  < {}", args.input);
    }
    let lines = match parser::read_lines(&args.input) {
        Ok(lines) => lines,
        Err(err) => {
            err.print_diag(&args.input, &[]);
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        ceprintln!("<s>2. Decode {} Lines</>", lines.len());
    }
    let parser = match MachLangParser::parse(&lines, style).into_result() {
        Ok(parser) => parser,
        Err(err) => {
            err.print_diag(&args.input, &lines);
            ceprintln!("<red,bold>Format of input file is incorrect</>");
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        ceprintln!("<s>3. Print {} Instructions</>", parser.len());
    }
    for inst in parser {
        println!("{}\t{}", inst.encoding(), inst.assembly());
        if dump {
            println!("    {}", inst.cformat());
        }
    }

    ExitCode::SUCCESS
}
