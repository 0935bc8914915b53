use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::RawCorpus;
use metadata_client::{DEFAULT_API_URL, TmdbClient};
use pipeline::{Model, PipelineConfig};
use recommender::{Recommendation, Recommender};
use server::{EnrichedRecommendation, RecommendationService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// ReelMatch - Content-based Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-match")]
#[command(about = "Recommends movies with similar story, genres, cast and director", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build model artifacts from movies.csv and credits.csv
    Build {
        /// Directory holding movies.csv and credits.csv
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Directory to write the artifacts into
        #[arg(short, long, default_value = "artifacts")]
        out: PathBuf,

        /// YAML pipeline configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the vocabulary size
        #[arg(long)]
        max_features: Option<usize>,

        /// Fold tokens to lowercase
        #[arg(long)]
        lowercase: bool,
    },

    /// Get the movies most similar to a title
    Recommend {
        /// Movie title (case-insensitive exact match)
        #[arg(long)]
        title: String,

        /// Directory holding built artifacts
        #[arg(long, default_value = "artifacts")]
        model_dir: PathBuf,

        /// YAML pipeline configuration (for the result count)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Metadata service key; enables posters and descriptions
        #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Metadata service root
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Directory holding built artifacts
        #[arg(long, default_value = "artifacts")]
        model_dir: PathBuf,
    },

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Directory holding built artifacts
        #[arg(long, default_value = "artifacts")]
        model_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            data_dir,
            out,
            config,
            max_features,
            lowercase,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(max_features) = max_features {
                config.max_features = max_features;
            }
            config.lowercase |= lowercase;
            config.validate().context("Invalid pipeline configuration")?;
            handle_build(data_dir, out, config).await?
        }
        Commands::Recommend {
            title,
            model_dir,
            config,
            api_key,
            api_url,
        } => {
            let config = load_config(config.as_deref())?;
            let model = load_model(&model_dir).await?;
            let recommender = Recommender::from_config(model, &config);
            handle_recommend(recommender, &title, api_key, api_url).await?
        }
        Commands::Search { title, model_dir } => {
            let model = load_model(&model_dir).await?;
            handle_search(&model, &title)
        }
        Commands::Benchmark {
            requests,
            model_dir,
        } => {
            let model = load_model(&model_dir).await?;
            handle_benchmark(Recommender::new(model), requests).await?
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

async fn load_model(model_dir: &Path) -> Result<Arc<Model>> {
    let start = Instant::now();
    let dir = model_dir.to_path_buf();
    let model = tokio::task::spawn_blocking(move || Model::load(&dir))
        .await?
        .with_context(|| {
            format!(
                "Failed to load model from {} (run `reel-match build` first)",
                model_dir.display()
            )
        })?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        model.movies().len(),
        start.elapsed()
    );
    Ok(Arc::new(model))
}

/// Handle the 'build' command
async fn handle_build(data_dir: PathBuf, out: PathBuf, config: PipelineConfig) -> Result<()> {
    println!("Loading movie metadata from {}...", data_dir.display());
    let start = Instant::now();

    // Parsing and vectorizing are CPU-bound and run on rayon
    let model = tokio::task::spawn_blocking(move || -> Result<Model> {
        let corpus = RawCorpus::load_from_files(&data_dir)
            .context("Failed to load movie metadata")?;
        let stats = corpus.stats();
        info!(
            movie_rows = stats.movie_rows,
            credit_rows = stats.credit_rows,
            kept = stats.kept,
            duplicates = stats.duplicates,
            "Joined corpus"
        );
        let model = Model::build(&corpus, &config)?;
        model.save(&out)?;
        Ok(model)
    })
    .await??;

    println!(
        "{} Built model for {} movies ({} features) in {:?}",
        "✓".green(),
        model.movies().len(),
        model.vocabulary().len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    recommender: Recommender,
    title: &str,
    api_key: Option<String>,
    api_url: String,
) -> Result<()> {
    match api_key {
        Some(api_key) => {
            let client = TmdbClient::new(api_key)?.with_base_url(api_url);
            let service = RecommendationService::from_recommender(recommender, client);
            let recommendations = service.recommend(title).await?;
            print_enriched(title, &recommendations);
        }
        None => {
            let recommendations = recommender.recommend_by_title(title)?;
            print_recommendations(title, &recommendations);
        }
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(model: &Model, title: &str) {
    let matches = model.movies().search(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for entry in matches.iter().take(20) {
        println!("{}: {}", entry.id, entry.title);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(recommender: Recommender, requests: usize) -> Result<()> {
    let movie_count = recommender.movies().len();
    if requests == 0 || movie_count == 0 {
        bail!("Benchmark needs at least one request and one movie");
    }

    // Random corpus rows to query
    let movie_ids: Vec<_> = (0..requests)
        .filter_map(|_| {
            let index = rand::random::<u32>() as usize % movie_count;
            recommender.movies().get(index).map(|entry| entry.id)
        })
        .collect();

    let wall_clock = Instant::now();
    let mut handles = vec![];
    for movie_id in movie_ids {
        let recommender = recommender.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            recommender.recommend(movie_id)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_recommendations(title: &str, recommendations: &[Recommendation]) {
    println!("{}", format!("Movies like '{}':", title).bold().blue());
    for (position, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (position + 1).to_string().green(),
            rec.title,
            rec.score
        );
    }
}

fn print_enriched(title: &str, recommendations: &[EnrichedRecommendation]) {
    println!("{}", format!("Movies like '{}':", title).bold().blue());
    for rec in recommendations {
        println!(
            "{}. {} - Score: {:.3}",
            rec.rank.to_string().green(),
            rec.title,
            rec.score
        );
        println!("   Poster: {}", rec.details.poster_url);
        println!("   {}", rec.details.description);
    }
}
