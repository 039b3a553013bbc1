use anyhow::{Context, Result};
use clap::Parser;
use morpheval::{
    evaluate, evaluate_with_diff, Corpus, DivByZeroStrat, ErrorFormat, Vocabulary,
};
use std::io;
use std::path::PathBuf;

/// Scores tokenizer/tagger output against a gold corpus. Both files use the
/// tagged line format: `surface<TAB>feat1,feat2,...`, one token per line,
/// with `EOS` lines closing sentences. The score table goes to stderr so
/// that error reports on stdout can be redirected on their own.
#[derive(Debug, Parser)]
#[command(name = "morpheval", version)]
struct Args {
    /// System output file
    system: PathBuf,
    /// Gold reference file
    gold: PathBuf,
    /// Depth of feature comparison; level 0 scores segmentation only
    #[arg(short, long, default_value_t = 0)]
    level: usize,
    /// Emit per-sentence error reports: segmentation (alias: seg) or tag
    /// (alias: pos)
    #[arg(short, long, value_name = "FORMAT")]
    error_format: Option<String>,
    /// Training corpus whose surface forms become the seen vocabulary
    #[arg(short = 't', long, conflicts_with = "dictionary")]
    train: Option<PathBuf>,
    /// Dictionary whose first comma-separated field becomes the seen
    /// vocabulary
    #[arg(short = 'd', long)]
    dictionary: Option<PathBuf>,
    /// Disable ANSI colors in error reports
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let error_format = args
        .error_format
        .as_deref()
        .map(str::parse::<ErrorFormat>)
        .transpose()?;

    let system = Corpus::from_path(&args.system, args.level)
        .with_context(|| format!("reading system output {}", args.system.display()))?;
    let gold = Corpus::from_path(&args.gold, args.level)
        .with_context(|| format!("reading gold reference {}", args.gold.display()))?;
    log::info!(
        "system: {} sentences, {} tokens; gold: {} sentences, {} tokens",
        system.len(),
        system.token_count(),
        gold.len(),
        gold.token_count()
    );

    let vocabulary = match (&args.train, &args.dictionary) {
        (Some(path), _) => Vocabulary::from_training_path(path)
            .with_context(|| format!("reading training corpus {}", path.display()))?,
        (None, Some(path)) => Vocabulary::from_dictionary_path(path)
            .with_context(|| format!("reading dictionary {}", path.display()))?,
        (None, None) => Vocabulary::default(),
    };
    if !vocabulary.is_empty() {
        log::info!("vocabulary: {} surface forms", vocabulary.len());
    }

    let zero_division = DivByZeroStrat::default();
    let reporter = match error_format {
        Some(format) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            evaluate_with_diff(
                &system,
                &gold,
                &vocabulary,
                args.level,
                zero_division,
                format,
                !args.no_color,
                &mut out,
            )?
        }
        None => evaluate(&system, &gold, &vocabulary, args.level, zero_division)?,
    };
    eprint!("{}", reporter);
    Ok(())
}
