//! Command-line interface for mathml-norm
//! This binary normalizes a MathML file: it runs the external MathMLCan
//! canonicalizer (unless told not to) and then applies the structural pass.
//!
//! Usage:
//!   mathml-norm <file.xml>                      - canonicalize + normalize, compact XML to stdout
//!   mathml-norm <file.xml> --pretty-print       - same, indented output
//!   mathml-norm <file.xml> --no-canonicalize    - structural pass only, no JVM required
//!   mathml-norm <file.xml> --emit json          - dump the normalized tree as JSON

use clap::{Arg, ArgAction, Command};
use mathml_norm::mathml::{Canonicalize, MathMlCan, Passthrough, Pipeline};
use std::process;

const DEFAULT_JAR: &str =
    "MathMLCan/target/mathml-canonicalizer-1.3.1-jar-with-dependencies.jar";

fn main() {
    let matches = Command::new("mathml-norm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Normalize a MathML file into a canonical, comparison-friendly form")
        .arg(
            Arg::new("xml")
                .help("MathML file to normalize")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("jar")
                .long("jar")
                .default_value(DEFAULT_JAR)
                .help("MathMLCan jar file"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .default_value("config.xml")
                .help("MathMLCan config file"),
        )
        .arg(
            Arg::new("logging-properties")
                .long("logging-properties")
                .help("Java properties file configuring the canonicalizer's logging"),
        )
        .arg(
            Arg::new("pretty-print")
                .long("pretty-print")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the output"),
        )
        .arg(
            Arg::new("no-canonicalize")
                .long("no-canonicalize")
                .action(ArgAction::SetTrue)
                .help("Skip the external canonicalizer and run only the structural pass"),
        )
        .arg(
            Arg::new("emit")
                .long("emit")
                .value_parser(["xml", "json"])
                .default_value("xml")
                .help("Output representation"),
        )
        .get_matches();

    // clap enforces presence of the positional argument
    let path = matches
        .get_one::<String>("xml")
        .cloned()
        .unwrap_or_default();

    let markup = match std::fs::read_to_string(&path) {
        Ok(markup) => markup,
        Err(err) => fail(&path, &err),
    };

    let canonicalizer: Box<dyn Canonicalize> = if matches.get_flag("no-canonicalize") {
        Box::new(Passthrough)
    } else {
        let mut can = MathMlCan::new(
            matches
                .get_one::<String>("jar")
                .cloned()
                .unwrap_or_else(|| DEFAULT_JAR.to_string()),
        );
        if let Some(config) = matches.get_one::<String>("config") {
            can = can.with_config(config);
        }
        if let Some(properties) = matches.get_one::<String>("logging-properties") {
            can = can.with_logging_properties(properties);
        }
        Box::new(can)
    };

    let pipeline = Pipeline::new(canonicalizer).pretty(matches.get_flag("pretty-print"));

    let output = match matches.get_one::<String>("emit").map(String::as_str) {
        Some("json") => match pipeline.normalize_markup(&markup) {
            Ok(tree) => match serde_json::to_string_pretty(&tree) {
                Ok(json) => json,
                Err(err) => fail(&path, &err),
            },
            Err(err) => fail(&path, &err),
        },
        _ => match pipeline.run(&markup) {
            Ok(xml) => xml,
            Err(err) => fail(&path, &err),
        },
    };

    println!("{}", output);
}

fn fail(path: &str, err: &dyn std::fmt::Display) -> ! {
    eprintln!("Error while processing: {}", path);
    eprintln!("{}", err);
    process::exit(1);
}
