use anyhow::{bail, Context, Result};
use clap::Parser;
use sentiment_nlp::{
    sentiment_bars, word_clouds, wordcount_sankey, AnalysisConfig, DocumentRegistry,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Compare word usage and sentiment across text files
#[derive(Parser, Debug)]
#[command(name = "sentiment-nlp", version)]
struct Cli {
    /// Text files or directories to register
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Label for each file argument, in order (defaults to the path)
    #[arg(short, long)]
    label: Vec<String>,

    /// Extension of files picked up from directories
    #[arg(long, default_value = "txt")]
    ext: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep the K most frequent words per document in the flow diagram
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Keep only these words in the flow diagram (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    words: Option<Vec<String>>,

    /// Directory the charts are written to
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start_time = Instant::now();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(k) = cli.top_k {
        config = config.top_k(k);
    }
    if let Some(words) = cli.words.clone() {
        config = config.word_list(words);
    }
    config.validate().context("Invalid settings")?;

    // Step 1: Register documents
    println!("Step 1: Registering documents...");
    let mut registry = config.registry();
    register_paths(&mut registry, &cli)?;

    if registry.is_empty() {
        bail!("No .{} files found in the given paths", cli.ext);
    }
    println!("✓ Registered {} documents\n", registry.len());

    // Step 2: Summary
    println!("Step 2: Document statistics\n");
    for doc in registry.documents() {
        let top: Vec<String> = doc
            .stats
            .wordcount
            .top_k(5)
            .iter()
            .map(|(w, n)| format!("{}={}", w, n))
            .collect();
        println!(
            "  {} - {} words, {} distinct, compound {:+.3} (pos {:.3}, neg {:.3})",
            doc.label,
            doc.stats.wordcount.total(),
            doc.stats.wordcount.len(),
            doc.stats.sentiment.compound,
            doc.stats.sentiment.pos,
            doc.stats.sentiment.neg,
        );
        println!("    top: {}", top.join(", "));
    }

    // Step 3: Render charts
    println!("\nStep 3: Rendering charts...");
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", cli.out_dir.display()))?;

    let clouds = word_clouds(&registry, &config.render).context("Failed to render word clouds")?;
    write_chart(&cli.out_dir, "wordclouds.svg", &clouds)?;

    let bars = sentiment_bars(&registry, &config.render).context("Failed to render sentiment chart")?;
    write_chart(&cli.out_dir, "sentiment.svg", &bars)?;

    // Filtering rewrites the stored word counts, so the flow diagram goes last
    let sankey = wordcount_sankey(&mut registry, &config.filter, &config.render)
        .context("Failed to render flow diagram")?;
    write_chart(&cli.out_dir, "sankey.svg", &sankey)?;

    println!(
        "\n✓ Done in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn register_paths(registry: &mut DocumentRegistry, cli: &Cli) -> Result<()> {
    let mut labels = cli.label.iter();

    for path in &cli.paths {
        if path.is_dir() {
            let added = registry
                .register_dir(path, &cli.ext)
                .with_context(|| format!("Failed to register directory: {}", path.display()))?;
            println!("  {} - {} files", path.display(), added.len());
            continue;
        }

        let label = labels.next().map(|s| s.as_str());
        registry
            .register(path, label, None)
            .with_context(|| format!("Failed to register: {}", path.display()))?;
        println!("  {}", label.map(str::to_string).unwrap_or_else(|| path.display().to_string()));
    }

    if labels.next().is_some() {
        tracing::warn!("more labels than file arguments, extra labels ignored");
    }
    Ok(())
}

fn write_chart(dir: &Path, name: &str, svg: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("  ✓ {}", path.display());
    Ok(())
}
