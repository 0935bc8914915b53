use data_loader::RawCorpus;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/tmdb");

    println!("Loading movie metadata...\n");

    let start = Instant::now();
    let corpus = RawCorpus::load_from_files(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let stats = corpus.stats();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movie rows: {}", stats.movie_rows);
    println!("Credit rows: {}", stats.credit_rows);
    println!("Unmatched: {}", stats.unmatched);
    println!("Incomplete: {}", stats.incomplete);
    println!("Duplicates: {}", stats.duplicates);
    println!("Kept: {}", stats.kept);
    println!("\nPerformance: {:.0} rows/second",
             stats.movie_rows as f64 / elapsed.as_secs_f64());
}
