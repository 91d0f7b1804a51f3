use simcheck::{vectorize, Corpus, SimilarityConfig, SimilarityEngine, TfidfVectorizer, Vectorized};

fn main() -> anyhow::Result<()> {
    println!("=== simcheck Basic Usage Example ===\n");

    let engine = SimilarityEngine::new(SimilarityConfig::default())?;

    // Example 1: Normalization
    println!("--- Example 1: Normalize mixed text ---");
    let text = "🎉 今天是2023年10月1日，#国庆节# 快乐！@所有人";
    println!("Raw:        {}", text);
    println!("Normalized: {}", engine.normalize(text)?);

    // Example 2: Score a few pairs
    println!("\n--- Example 2: Pairwise similarity ---");
    let pairs = [
        ("他每天早上都去公园跑步。", "他每天早上都会去公园跑步。"),
        (
            "数学中的微积分是由牛顿和莱布尼茨发明的。",
            "篮球比赛中，三分球是指在三分线外投进的球。",
        ),
        ("", "这是一段正常的文本内容。"),
    ];
    for (original, candidate) in pairs {
        let score = engine.compute_similarity(original, candidate)?;
        println!("{:.2}  {:?} vs {:?}", score, original, candidate);
    }

    // Example 3: Full comparison report
    println!("\n--- Example 3: Comparison report ---");
    let corpus = Corpus::from_texts(
        "数据结构包括数组、链表、树和图等基本类型，是计算机编程的基础。",
        "数据结构包括数组、链表、树和图等基本类型，是计算机开发的重要知识。",
        engine.tokenizer(),
    )?;
    let comparison = engine.compare(&corpus);
    println!("Original tokens:  {}", comparison.original_tokens);
    println!("Candidate tokens: {}", comparison.candidate_tokens);
    println!(
        "Vocabulary: {}, shared: {}, score: {}",
        comparison.vocabulary_size, comparison.shared_terms, comparison.score
    );

    // Example 4: Reusing a vectorizer refits from scratch
    println!("\n--- Example 4: Reused vectorizer ---");
    let mut vectorizer = TfidfVectorizer::default();
    vectorizer.fit(&["rust cargo crate", "rust borrow"]);
    println!("First fit:  {:?}", vectorizer.vocabulary().terms());
    vectorizer.fit(&["tokio async", "async await"]);
    println!("Second fit: {:?}", vectorizer.vocabulary().terms());

    // Example 5: Degenerate input
    println!("\n--- Example 5: Empty vocabulary ---");
    match vectorize("", "", &Default::default()) {
        Vectorized::EmptyVocabulary => println!("Both documents empty: score is 0.00"),
        Vectorized::Vectors(..) => println!("unexpected vectors"),
    }

    if let Some(stats) = engine.cache_stats() {
        println!(
            "\nCache: {} hits, {} misses, {}/{} entries",
            stats.hits, stats.misses, stats.len, stats.capacity
        );
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
