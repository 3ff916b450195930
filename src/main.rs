use clap::{Arg, Command};
use siskin::{repl, runner};
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("siskin")
        .about("An interpreter for a small dynamically typed expression language")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pretty")
                .short('p')
                .long("pretty")
                .help("Render errors as annotated source reports")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let pretty = matches.get_flag("pretty");

    if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path, pretty);
    } else {
        repl::start(pretty);
    }
}

fn run_file(path: &str, pretty: bool) {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        process::exit(1);
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let outcome = runner::run(&source, path.to_str(), pretty);
            process::exit(outcome.exit_code());
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}
