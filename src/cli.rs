use std::env;
use std::io::{self, Write};
use wordvec::{Model, parse};

pub enum Command {
    Import { path: String },
    Load { path: String },
    Save { path: String },
    Lookup { words: Vec<String> },
    Similarity { word1: String, word2: String },
    Nearest { words: Vec<String>, n: usize },
    Analogy { positives: Vec<String>, negatives: Vec<String>, n: usize },
    Count,
}

/// Parse a command from a provided argument vector
/// This is used both for command-line args and REPL input
pub fn parse_command_from_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command provided. Use: import, load, save, lookup, similarity, nearest, analogy, count".to_string());
    }

    let command = &args[1];

    match command.as_str() {
        "import" => parse_import(&args),
        "load" => parse_load(&args),
        "save" => parse_save(&args),
        "lookup" => parse_lookup(&args),
        "similarity" => parse_similarity(&args),
        "nearest" => parse_nearest(&args),
        "analogy" => parse_analogy(&args),
        "count" => parse_count(&args),
        _ => Err(format!("Unknown command: {}. Available: import, load, save, lookup, similarity, nearest, analogy, count", command)),
    }
}

/// Parse the 'import' command
/// Usage: wordvec import <tsv_path>
fn parse_import(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'import' command requires a file path. Usage: import <tsv_path>".to_string());
    }
    let path = args[2].clone();
    Ok(Command::Import { path })
}

/// Parse the 'load' command
/// Usage: wordvec load <path>
fn parse_load(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'load' command requires a file path. Usage: load <path>".to_string());
    }
    let path = args[2].clone();
    Ok(Command::Load { path })
}

/// Parse the 'save' command
/// Usage: wordvec save <path>
fn parse_save(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'save' command requires a file path. Usage: save <path>".to_string());
    }
    let path = args[2].clone();
    Ok(Command::Save { path })
}

/// Parse the 'lookup' command
/// Usage: wordvec lookup <word> [word ...]
fn parse_lookup(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "lookup"
    // args[2..] = words (required, at least 1)
    if args.len() < 3 {
        return Err("'lookup' command requires at least one word. Usage: lookup <word> [word ...]".to_string());
    }

    Ok(Command::Lookup { words: args[2..].to_vec() })
}

/// Parse the 'similarity' command
/// Usage: wordvec similarity <word1> <word2>
fn parse_similarity(args: &[String]) -> Result<Command, String> {
    if args.len() < 4 {
        return Err("'similarity' command requires two words. Usage: similarity <word1> <word2>".to_string());
    }

    Ok(Command::Similarity { word1: args[2].clone(), word2: args[3].clone() })
}

/// Split a trailing [--n <number>] flag off an argument tail
fn split_n_flag(args: &[String], default_n: usize) -> Result<(Vec<String>, usize), String> {
    if args.len() >= 2 && args[args.len() - 2] == "--n" {
        match args[args.len() - 1].parse::<usize>() {
            Ok(n) => {
                if n == 0 {
                    return Err("Invalid --n value: '0'. Must be a positive integer.".to_string());
                }
                return Ok((args[..args.len() - 2].to_vec(), n));
            }
            Err(_) => {
                return Err(format!("Invalid --n value: '{}'. Must be a positive integer.", args[args.len() - 1]));
            }
        }
    }

    Ok((args.to_vec(), default_n))
}

/// Parse the 'nearest' command
/// Usage: wordvec nearest <word> [word ...] [--n <number>]
fn parse_nearest(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "nearest"
    // args[2..] = words and optional --n flag
    if args.len() < 3 {
        return Err("'nearest' command requires at least one word. Usage: nearest <word> [word ...] [--n <number>]".to_string());
    }

    let (words, n) = split_n_flag(&args[2..], 10)?;
    if words.is_empty() {
        return Err("'nearest' command requires at least one word before --n".to_string());
    }

    Ok(Command::Nearest { words, n })
}

/// Parse the 'analogy' command
/// Usage: wordvec analogy <positive> [positive ...] - <negative> [negative ...] [--n <number>]
fn parse_analogy(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "analogy"
    // args[2..] = positive words, a "-" separator, negative words, optional --n flag
    if args.len() < 3 {
        return Err("'analogy' command requires words. Usage: analogy <positive ...> - <negative ...> [--n <number>]".to_string());
    }

    let (words, n) = split_n_flag(&args[2..], 10)?;

    let separator = match words.iter().position(|w| w == "-") {
        Some(index) => index,
        None => return Err("'analogy' command requires a '-' between positive and negative words".to_string()),
    };

    let positives = words[..separator].to_vec();
    let negatives = words[separator + 1..].to_vec();

    if positives.is_empty() || negatives.is_empty() {
        return Err("'analogy' command requires at least one word on each side of '-'".to_string());
    }

    Ok(Command::Analogy { positives, negatives, n })
}

/// Parse the 'count' command
/// Usage: wordvec count
fn parse_count(args: &[String]) -> Result<Command, String> {
    // Count takes no arguments
    if args.len() > 2 {
        eprintln!("Warning: 'count' command takes no arguments, ignoring extras");
    }

    Ok(Command::Count)
}

/// Load a model file, picking the format from the extension:
/// .tsv and .txt parse as embedding records, anything else as bincode
pub fn load_model_file(path: &str) -> Result<Model, String> {
    if path.ends_with(".tsv") || path.ends_with(".txt") {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Fail to read '{}': {}", path, e))?;
        return parse::parse_model(&text);
    }

    Model::load(path)
}

/// REPL mode - interactive session with an in-memory model
pub fn run_repl(model: &mut Model) {
    println!("wordvec - Word Embedding Query Engine");
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("wordvec> ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_help();
            continue;
        }

        let mut args: Vec<String> = vec!["wordvec".to_string()];
        args.extend(input.split_whitespace().map(|s| s.to_string()));

        let command = match parse_command_from_args(&args) {
            Ok(cmd) => cmd,
            Err(error) => {
                eprintln!("Error: {}", error);
                continue;
            }
        };

        execute_command(model, command);
    }
}

/// Single-command mode - load model from path, execute one query
/// Usage: wordvec <model_path> <command> [args...]
pub fn run_single_command() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: wordvec <model_path> <command> [args...]");
        std::process::exit(1);
    }

    let model_path = &args[1];

    // Load existing model or start empty (import creates the file)
    let mut model = if std::path::Path::new(model_path).exists() {
        match load_model_file(model_path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error loading '{}': {}", model_path, e);
                std::process::exit(1);
            }
        }
    } else {
        Model::new()
    };

    // Rebuild args: shift so args[1] becomes the command
    let shifted_args: Vec<String> = std::iter::once(args[0].clone())
        .chain(args[2..].iter().cloned())
        .collect();

    let command = match parse_command_from_args(&shifted_args) {
        Ok(cmd) => cmd,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    };

    // Import replaces the model, so write it back to the model path
    let save_back = matches!(command, Command::Import { .. });
    execute_command(&mut model, command);

    if save_back {
        if let Err(e) = model.save(model_path) {
            eprintln!("Error saving '{}': {}", model_path, e);
            std::process::exit(1);
        }
    }
}

fn execute_command(model: &mut Model, command: Command) {
    match command {
        Command::Import { path } => {
            match load_model_file(&path) {
                Ok(loaded) => {
                    let count = loaded.count();
                    *model = loaded;
                    println!("Imported {} words from '{}'", count, path);
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Load { path } => {
            match Model::load(&path) {
                Ok(loaded) => {
                    let count = loaded.count();
                    *model = loaded;
                    println!("Model loaded from '{}' ({} words)", path, count);
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Save { path } => {
            match model.save(&path) {
                Ok(()) => println!("Model saved to '{}'", path),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Lookup { words } => {
            let requests: Vec<&str> = words.iter().map(String::as_str).collect();
            for (word, found) in words.iter().zip(model.lookup_batch(&requests)) {
                match found {
                    Some(wv) => println!("{}: {:?}", word, wv.values),
                    None => eprintln!("Error: Word '{}' not in vocabulary", word),
                }
            }
        }

        Command::Similarity { word1, word2 } => {
            match model.similarity(&word1, &word2) {
                Some(score) => println!("similarity({}, {}) = {:.4}", word1, word2, score),
                None => eprintln!("Error: '{}' or '{}' not in vocabulary", word1, word2),
            }
        }

        Command::Nearest { words, n } => {
            let queries: Vec<&str> = words.iter().map(String::as_str).collect();
            match model.most_similar(&queries, n, &[]) {
                Ok(lists) => {
                    for (word, list) in words.iter().zip(lists) {
                        if list.is_empty() {
                            println!("'{}': no results", word);
                            continue;
                        }
                        println!("Nearest to '{}':", word);
                        for (rank, dist) in list.iter().enumerate() {
                            println!("{}. {} ({:.4})", rank + 1, dist.word, dist.score);
                        }
                    }
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Analogy { positives, negatives, n } => {
            let pos: Vec<&str> = positives.iter().map(String::as_str).collect();
            let neg: Vec<&str> = negatives.iter().map(String::as_str).collect();
            match model.analogy(&pos, &neg, n) {
                Ok(results) => {
                    if results.is_empty() {
                        println!("No results (a query word may be out of vocabulary)");
                    } else {
                        println!("{} - {}:", positives.join(" + "), negatives.join(" + "));
                        for (rank, dist) in results.iter().enumerate() {
                            println!("{}. {} ({:.4})", rank + 1, dist.word, dist.score);
                        }
                    }
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Count => println!("{}", model.count()),
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  import <tsv_path>                       - Import embeddings from a TSV file");
    println!("  load <path>                             - Load a saved model");
    println!("  save <path>                             - Save the model to a file");
    println!("  lookup <word> [word ...]                - Print stored vectors");
    println!("  similarity <word1> <word2>              - Cosine similarity of two words");
    println!("  nearest <word> [word ...] [--n N]       - Nearest neighbors (default n=10)");
    println!("  analogy <pos ...> - <neg ...> [--n N]   - Analogy query (default n=10)");
    println!("  count                                   - Show vocabulary size");
    println!("  help                                    - Show this help");
    println!("  exit, quit                              - Exit the program");
}
