//! Command-line interface for espmorfo-rs
//!
//! Usage:
//!   espmorfo [OPTIONS] <TEXT>
//!   echo "Llevó la perra al parque" | espmorfo
//!
//! Options:
//!   -r, --rules <DIR>   Path to a rule pack directory
//!   -p, --pack <NAME>   Name of an installed rule pack (default: general)
//!   -m, --mode <MODE>   label, features, lemma, nominalize, split or path
//!   -j, --json          Output as JSON
//!   -h, --help          Show help

use espmorfo_rs::rule_pack::{self, RulePack, DEFAULT_RULE_PACK};
use espmorfo_rs::Analyzer;
use serde_json::json;
use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;

fn print_help() {
    eprintln!(
        r#"espmorfo-rs - Spanish morphological analyzer

USAGE:
    espmorfo [OPTIONS] [TEXT]
    echo "Llevó la perra al parque" | espmorfo

OPTIONS:
    -r, --rules <DIR>   Path to a rule pack directory
    -p, --pack <NAME>   Name of an installed rule pack (default: general)
    -m, --mode <MODE>   What to print for each token:
                          label       lemma and features (default)
                          features    chosen reading
                          lemma       dictionary root
                          nominalize  preferred nominalization
                          split       the text with contractions split
                          path        entity category of the whole text
    -j, --json          Output as JSON
    -h, --help          Show this help message

EXAMPLES:
    espmorfo "Llevó la perra al parque"
    espmorfo -m lemma -r ./rule_packs/general "cantamos"
    echo "familiarizar" | espmorfo -m nominalize -j
"#
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Label,
    Features,
    Lemma,
    Nominalize,
    Split,
    Path,
}

impl Mode {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "label" => Some(Mode::Label),
            "features" => Some(Mode::Features),
            "lemma" => Some(Mode::Lemma),
            "nominalize" => Some(Mode::Nominalize),
            "split" => Some(Mode::Split),
            "path" => Some(Mode::Path),
            _ => None,
        }
    }
}

fn option_value(args: &[String], i: usize, option: &str, what: &str) -> String {
    match args.get(i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires {}", option, what);
            std::process::exit(1);
        }
    }
}

fn load(rules_dir: Option<PathBuf>, pack_name: Option<String>) -> Analyzer {
    let path = match rules_dir {
        Some(dir) => dir,
        None => {
            let name = pack_name.unwrap_or_else(|| DEFAULT_RULE_PACK.to_string());
            if !rule_pack::rule_pack_exists(&name, None) {
                eprintln!(
                    "Error: rule pack '{}' not found at {}",
                    name,
                    rule_pack::rule_pack_path(&name, None).display()
                );
                std::process::exit(1);
            }
            rule_pack::rule_pack_path(&name, None)
        }
    };

    match RulePack::load(&path).and_then(RulePack::into_analyzer) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error loading rule pack '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing to JSON: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut rules_dir: Option<PathBuf> = None;
    let mut pack_name: Option<String> = None;
    let mut mode = Mode::Label;
    let mut json_output = false;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-j" | "--json" => {
                json_output = true;
            }
            "-r" | "--rules" => {
                i += 1;
                rules_dir = Some(PathBuf::from(option_value(&args, i, "--rules", "a directory")));
            }
            "-p" | "--pack" => {
                i += 1;
                pack_name = Some(option_value(&args, i, "--pack", "a rule pack name"));
            }
            "-m" | "--mode" => {
                i += 1;
                let value = option_value(&args, i, "--mode", "a mode");
                mode = match Mode::parse(&value) {
                    Some(m) => m,
                    None => {
                        eprintln!("Error: unknown mode '{}'", value);
                        print_help();
                        std::process::exit(1);
                    }
                };
            }
            arg if !arg.starts_with('-') => {
                text = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read from stdin if no text provided
    let input_text = if let Some(t) = text {
        t
    } else {
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => lines.push(l),
                Err(e) => {
                    eprintln!("Error reading stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
        lines.join("\n")
    };

    if input_text.trim().is_empty() {
        eprintln!("Error: No input text provided");
        print_help();
        std::process::exit(1);
    }

    let mut analyzer = load(rules_dir, pack_name);
    let tokens: Vec<&str> = input_text.split_whitespace().collect();

    match mode {
        Mode::Label => {
            let labels = analyzer.label(&input_text);
            if json_output {
                print_json(&json!(labels));
            } else {
                for label in &labels {
                    println!("{}", label);
                }
            }
        }
        Mode::Features => {
            let records: Vec<_> = tokens
                .iter()
                .map(|t| (*t, analyzer.extract_word_features(t, None)))
                .collect();
            if json_output {
                let rows: Vec<_> = records
                    .iter()
                    .map(|(t, r)| json!({ "text": t, "features": r }))
                    .collect();
                print_json(&json!(rows));
            } else {
                for (t, record) in &records {
                    println!("{}\t{}", t, record);
                }
            }
        }
        Mode::Lemma | Mode::Nominalize => {
            let results: Vec<(&str, String)> = tokens
                .iter()
                .map(|t| {
                    let out = if mode == Mode::Lemma {
                        analyzer.lemmatize(t, None)
                    } else {
                        analyzer.nominalize(t)
                    };
                    (*t, out)
                })
                .collect();
            if json_output {
                let key = if mode == Mode::Lemma { "lemma" } else { "nominal" };
                let rows: Vec<_> = results
                    .iter()
                    .map(|(t, out)| json!({ "text": t, key: out }))
                    .collect();
                print_json(&json!(rows));
            } else {
                for (t, out) in &results {
                    println!("{}\t{}", t, out);
                }
            }
        }
        Mode::Split => {
            let split = analyzer.split_contractions(&input_text);
            if json_output {
                print_json(&json!({ "text": input_text, "split": split }));
            } else {
                println!("{}", split);
            }
        }
        Mode::Path => {
            let empty: [&str; 0] = [];
            let path = analyzer.resolve_path(input_text.trim(), &empty, &empty);
            if json_output {
                print_json(&json!({ "text": input_text.trim(), "path": path }));
            } else {
                println!("{}", path.join(" > "));
            }
        }
    }
}
