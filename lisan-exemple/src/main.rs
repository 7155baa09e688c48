use rand::SeedableRng;
use rand::rngs::StdRng;

use lisan_core::Language;
use lisan_core::corpus;
use lisan_core::evaluation::{cross_entropy, perplexity};
use lisan_core::model::NGramModel;
use lisan_core::text::{RuleTokenizer, Tokenizer, normalize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A tiny corpus, one sentence per line
    let raw = [
        "The cat sat on the mat.",
        "The dog sat on the log!",
        "A cat and a dog met in London.",
        "The cat ran after the dog.",
        "Visit https://www.bbc.co.uk for 24/7 news.",
    ];

    // Normalize (lowercase, no URL, no punctuation, no digits) then tokenize
    let tokenizer = RuleTokenizer;
    let mut sentences = Vec::new();
    for line in raw {
        let tokens = tokenizer.tokenize(&normalize(Some(line), Language::English), Language::English)?;
        println!("{:?}", tokens);
        sentences.push(tokens);
    }

    // The first 80% of the sentences (floored) are used for training
    let (train, eval) = corpus::split(&sentences, 0.8)?;
    println!("{} training / {} evaluation sentences", train.len(), eval.len());

    // Bigram model with add-one smoothing
    let model = NGramModel::fit(2, train)?;
    println!("Vocabulary size: {}", model.vocabulary_size());
    println!("count(the) = {}", model.context_count(&["the"]));

    // Smoothed probabilities, unseen pairs are never 0
    for word in ["cat", "dog", "mat", "london"] {
        println!("P({} | the) = {:.4}", word, model.score(word, &["the"]));
    }

    // Most likely continuations of "the"
    for (word, count) in model.continuations(&["the"]) {
        println!("the -> {} ({})", word, count);
    }

    // Perplexity on held-out and on training sentences
    println!("Perplexity (held-out): {}", perplexity(&model, eval));
    println!("Perplexity (training): {}", perplexity(&model, train));
    if let Some(h) = cross_entropy(&model, eval) {
        println!("Cross-entropy (held-out): {:.3} bits", h);
    }

    // An empty evaluation set has no perplexity
    let nothing: Vec<Vec<String>> = Vec::new();
    println!("Perplexity (empty): {}", perplexity(&model, &nothing));

    // Generate 5 sentences, seeded so the output is reproducible
    let mut rng = StdRng::seed_from_u64(42);
    for i in 0..5 {
        let words = model.generate(10, &["the"], &mut rng);
        println!("Generated sentence {}: the {}", i + 1, words.join(" "));
    }

    // Unsupported languages are rejected
    match "french".parse::<Language>() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    Ok(())
}
