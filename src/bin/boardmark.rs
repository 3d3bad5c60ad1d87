//! Command-line interface for boardmark
//! This binary tokenizes post bodies and thread dumps so the token trees and reply indexes can be
//! inspected outside of a rendering layer.
//!
//! Usage:
//!   boardmark tokenize `<path>` [--format `<format>`] [--limit `<n>`]  - Tokenize a post body (`-` reads stdin)
//!   boardmark replies `<path>`                                      - Build the reply index of a thread dump
//!   boardmark list-formats                                        - List all available output formats
//!
//! Every command accepts `--config <file>` to layer a TOML file over the built-in defaults.
//! Logging is controlled with `RUST_LOG`.

use boardmark::config::{BoardmarkConfig, Overrides};
use boardmark::markup::formats::OutputFormat;
use boardmark::markup::{scan, PostText, ReferenceCollector, ReplyIndex};
use clap::{value_parser, Arg, Command};
use serde::Deserialize;
use std::io::{self, Read};
use std::path::Path;

fn main() {
    env_logger::init();

    let matches = Command::new("boardmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting post markup tokenization")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("tokenize")
                .about("Tokenize a post body and print the token tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the post body, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(|name: &str| name.parse::<OutputFormat>())
                        .help("Output format (see 'list-formats')"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .value_parser(value_parser!(u64))
                        .help("Stop after this many top-level tokens (0 for no limit)"),
                ),
        )
        .subcommand(
            Command::new("replies")
                .about("Build the reply index of a thread dump")
                .arg(
                    Arg::new("path")
                        .help("JSON file with the thread's posts ({\"id\", \"message\"} objects)")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(Path::new);

    match matches.subcommand() {
        Some(("tokenize", tokenize_matches)) => {
            let path = tokenize_matches.get_one::<String>("path").unwrap();
            let overrides = Overrides {
                format: tokenize_matches.get_one::<OutputFormat>("format").copied(),
                max_tokens: tokenize_matches.get_one::<u64>("limit").copied(),
            };
            handle_tokenize_command(path, &load_config(config_path, &overrides));
        }
        Some(("replies", replies_matches)) => {
            let path = replies_matches.get_one::<String>("path").unwrap();
            handle_replies_command(path, &load_config(config_path, &Overrides::default()));
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn load_config(path: Option<&Path>, overrides: &Overrides) -> BoardmarkConfig {
    BoardmarkConfig::load(path, overrides).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    })
}

fn read_source(path: &str) -> String {
    let result = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

fn print_output(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Handle the tokenize command
fn handle_tokenize_command(path: &str, config: &BoardmarkConfig) {
    let source = read_source(path);

    let mut references = ReferenceCollector::new();
    let scanner = scan(&source, &mut references);
    let tokens: Vec<_> = match config.output.token_limit() {
        Some(limit) => scanner.take(limit).collect(),
        None => scanner.collect(),
    };
    let post = PostText {
        tokens,
        references: references.into_references(),
    };

    let output = config
        .output
        .format
        .render(&post, config)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    print_output(&output);
}

#[derive(Debug, Deserialize)]
struct ThreadPost {
    id: u64,
    message: String,
}

/// A thread dump is either a bare list of posts or a thread object carrying them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThreadDump {
    Posts(Vec<ThreadPost>),
    Thread { posts: Vec<ThreadPost> },
}

impl ThreadDump {
    fn posts(&self) -> &[ThreadPost] {
        match self {
            ThreadDump::Posts(posts) | ThreadDump::Thread { posts } => posts,
        }
    }
}

/// Handle the replies command
fn handle_replies_command(path: &str, config: &BoardmarkConfig) {
    let source = read_source(path);
    let dump: ThreadDump = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing thread dump: {}", e);
        std::process::exit(1);
    });

    let index = ReplyIndex::from_messages(
        dump.posts()
            .iter()
            .map(|post| (post.id, post.message.as_str())),
    );

    let output = if config.json.pretty {
        serde_json::to_string_pretty(&index)
    } else {
        serde_json::to_string(&index)
    };
    let output = output.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    print_output(&output);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in OutputFormat::ALL {
        println!("  {}", format);
        println!("    {}", format.description());
    }
}
