// src/bin/gosubset.rs
use gosubset_parser::{parse_source_with, Config};
use std::process::ExitCode;

const USAGE: &str = "usage: gosubset [--print | --ast] [--go-semis] [--max-depth N] <file.go>";

// ----------------- arg parsing -----------------

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == key {
            return it.next().map(|s| s.as_str());
        }
    }
    None
}

fn arg_u32(args: &[String], key: &str, default: u32) -> u32 {
    arg_value(args, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// Last argument that is neither a flag nor a flag's value.
fn input_path(args: &[String]) -> Option<&str> {
    let mut path = None;
    let mut it = args.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--max-depth" => {
                it.next();
            }
            s if s.starts_with("--") => {}
            s => path = Some(s),
        }
    }
    path
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let Some(path) = input_path(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let config = Config::new()
        .insert_semicolons(has_flag(&args, "--go-semis"))
        .max_depth(arg_u32(&args, "--max-depth", Config::DEFAULT_MAX_DEPTH));

    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::from(2);
        }
    };

    match parse_source_with(&source, &config) {
        Ok(file) => {
            if has_flag(&args, "--ast") {
                println!("{file:#?}");
            } else if has_flag(&args, "--print") {
                print!("{file}");
            } else {
                println!(
                    "package {}: {} imports, {} declarations",
                    file.package_name,
                    file.imports.len(),
                    file.decls.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let d = e.diag();
            eprintln!("{path}:{}: {:?} error: {}", d.position, d.kind, d.message);
            ExitCode::FAILURE
        }
    }
}
