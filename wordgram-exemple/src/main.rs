use std::fs::File;
use std::io::Read;
use std::path::Path;

use wordgram_core::model::language_model::LanguageModel;
use wordgram_core::model::markers::SentenceMarkers;

/// Fallback corpus used when no file is given on the command line.
const SAMPLE_CORPUS: &[&str] = &[
    "the cat sat on the mat",
    "the cat ran to the door",
    "the dog sat on the rug",
    "the dog ran to the cat",
    "a bird sat on the dog",
];

/// Reads a text file and returns all its lines as a `Vec<String>`.
fn read_file<P: AsRef<Path>>(filename: P) -> std::io::Result<Vec<String>> {
    let mut contents = String::new();
    File::open(filename)?.read_to_string(&mut contents)?;
    Ok(contents.lines().map(str::to_owned).collect())
}

/// Turns one-sentence-per-line text into the flat token stream the model
/// expects: whitespace-split tokens, each sentence wrapped in the
/// begin/end markers. Tokenization is the caller's job, not the model's.
fn tokenize(lines: &[String], markers: &SentenceMarkers) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        tokens.push(markers.begin().to_owned());
        tokens.extend(line.split_whitespace().map(str::to_owned));
        tokens.push(markers.end().to_owned());
    }
    tokens
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Train on a file passed as the first argument, or on the built-in sample
    let lines = match std::env::args().nth(1) {
        Some(path) => read_file(path)?,
        None => SAMPLE_CORPUS.iter().map(|line| (*line).to_owned()).collect(),
    };

    // Order 2 builds a bigram model; order 1 would build a unigram model.
    // Any other order is rejected at construction.
    let mut model = LanguageModel::new(2)?;

    let tokens = tokenize(&lines, model.markers());
    model.train(tokens);

    println!(
        "Trained an order-{} model on {} corpus tokens, vocabulary size {}",
        model.order(),
        model.corpus().len(),
        model.vocabulary().len()
    );

    // Scoring never needs markers in the query and never fails on short
    // sequences; a sequence with no full bigram scores 1.0
    let queries = [
        vec!["the".to_owned(), "cat".to_owned()],
        vec!["the".to_owned(), "unicorn".to_owned()],
        vec!["cat".to_owned()],
    ];
    for query in &queries {
        println!("Score of '{}': {}", query.join(" "), model.score(query)?);
    }

    // Calling score or generate before train fails with a distinct error
    match LanguageModel::new(2)?.generate_sentence() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Untrained model is rejected: {}", e),
    }

    // Generate 10 sentences using the trained model
    for (i, sentence) in model.generate(10)?.iter().enumerate() {
        println!("Generated sentence {}: {}", i + 1, sentence.join(" "));
    }

    Ok(())
}
