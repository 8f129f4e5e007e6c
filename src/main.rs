//! connalign - mine discourse-connective translations from a word-aligned corpus
//!
//! # Usage
//!
//! ```bash
//! # Build both word-alignment indexes from an eflomal/fast_align output
//! connalign index europarl.align europarl.de europarl.it -s de -t it
//!
//! # Bootstrap the connective lexicons for three rounds
//! connalign mine europarl.align europarl.de europarl.it -s de -t it \
//!     --source-lexicon dimlex.xml --target-lexicon lico.xml -i 3
//!
//! # Pull example sentences for one connective pair
//! connalign concordance europarl.de europarl.it obwohl sebbene
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;

use connalign::alignment_io::{
    connectives_file_name, counts_file_name, lexicon_file_name, load_lexicon, load_relations, load_word_index,
    rounds_file_name, save_json, word_alignment_file_name,
};
use connalign::concordance::{find_examples, write_examples, DEFAULT_MAX_TOKENS};
use connalign::config::{load_config_from_file, Config};
use connalign::mining::build_indexes;
use connalign::relations::{annotate, RelationMap};
use connalign::{Direction, LanguageSide, ParallelCorpus, Result, Session};

#[derive(Parser, Debug)]
#[command(name = "connalign", version, about = "Bootstrapped discourse-connective alignment mining")]
struct Cli {
    /// More output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the source→target and target→source word-alignment indexes
    Index(IndexArgs),
    /// Grow both connective lexicons from seed lexicons
    Mine(MineArgs),
    /// Extract example sentence pairs for one connective pair
    Concordance(ConcordanceArgs),
}

#[derive(Args, Debug)]
struct CorpusArgs {
    /// Alignment text file in Pharaoh format
    word_alignment: PathBuf,
    /// Corpus with source sentences
    source_corpus: PathBuf,
    /// Corpus with target sentences
    target_corpus: PathBuf,
}

#[derive(Args, Debug)]
struct Languages {
    /// Source language code
    #[arg(short = 's', long)]
    source_lang: String,
    /// Target language code
    #[arg(short = 't', long)]
    target_lang: String,
}

#[derive(Args, Debug)]
struct IndexArgs {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[command(flatten)]
    languages: Languages,
    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct MineArgs {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[command(flatten)]
    languages: Languages,
    /// Seed connectives of the source language (.json array, DimLex/LiCo .xml, or one per line)
    #[arg(long)]
    source_lexicon: PathBuf,
    /// Seed connectives of the target language (.json array, DimLex/LiCo .xml, or one per line)
    #[arg(long)]
    target_lexicon: PathBuf,
    /// Precomputed source→target word-alignment index; built from the corpus if absent
    #[arg(long)]
    source_index: Option<PathBuf>,
    /// Precomputed target→source word-alignment index; built from the corpus if absent
    #[arg(long)]
    target_index: Option<PathBuf>,
    /// TOML file with [mining] and [filter] settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Language the first round probes ("source" or "target")
    #[arg(long, default_value = "source")]
    start: String,
    /// Minimum probability of a single-word alignment
    #[arg(short, long)]
    word_threshold: Option<f64>,
    /// Minimum probability of a phrase alignment
    #[arg(short, long)]
    phrase_threshold: Option<f64>,
    /// Minimum count of a single-word alignment
    #[arg(long)]
    word_count: Option<usize>,
    /// Minimum count of a phrase alignment
    #[arg(long)]
    phrase_count: Option<usize>,
    /// Number of rounds
    #[arg(short, long)]
    iterations: Option<usize>,
    /// Discourse relations of source connectives (DimLex/LiCo .xml or a JSON map)
    #[arg(long)]
    source_relations: Option<PathBuf>,
    /// Discourse relations of target connectives (DimLex/LiCo .xml or a JSON map)
    #[arg(long)]
    target_relations: Option<PathBuf>,
    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ConcordanceArgs {
    source_corpus: PathBuf,
    target_corpus: PathBuf,
    source_connective: String,
    target_connective: String,
    /// Skip sentence pairs longer than this many tokens
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: usize,
    /// Output directory
    #[arg(short, long, default_value = "example_sentences")]
    out_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Command::Index(args) => run_index(&args),
        Command::Mine(args) => run_mine(&args),
        Command::Concordance(args) => run_concordance(&args),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_corpus(args: &CorpusArgs) -> Result<ParallelCorpus> {
    ParallelCorpus::load(&args.word_alignment, &args.source_corpus, &args.target_corpus)
}

fn run_index(args: &IndexArgs) -> Result<()> {
    let corpus = load_corpus(&args.corpus)?;
    let (source_index, target_index) = build_indexes(&corpus);
    let (src, tgt) = (&args.languages.source_lang, &args.languages.target_lang);

    let source_path = args.out_dir.join(word_alignment_file_name(src, tgt));
    let target_path = args.out_dir.join(word_alignment_file_name(tgt, src));
    save_json(&source_path, &source_index)?;
    save_json(&target_path, &target_index)?;
    println!("Saved {}", source_path.display());
    println!("Saved {}", target_path.display());
    Ok(())
}

fn run_mine(args: &MineArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config_from_file(path)?,
        None => Config::default(),
    };
    let params = &mut config.mining;
    if let Some(value) = args.word_threshold {
        params.word_threshold = value;
    }
    if let Some(value) = args.phrase_threshold {
        params.phrase_threshold = value;
    }
    if let Some(value) = args.word_count {
        params.word_min_count = value;
    }
    if let Some(value) = args.phrase_count {
        params.phrase_min_count = value;
    }
    if let Some(value) = args.iterations {
        params.limit = value;
    }
    params.validate()?;

    let corpus = load_corpus(&args.corpus)?;
    let (mut built_source, mut built_target) = match (&args.source_index, &args.target_index) {
        (Some(_), Some(_)) => (None, None),
        _ => {
            let (source, target) = build_indexes(&corpus);
            (Some(source), Some(target))
        }
    };
    let source_index = match &args.source_index {
        Some(path) => load_word_index(path)?,
        None => built_source.take().unwrap_or_default(),
    };
    let target_index = match &args.target_index {
        Some(path) => load_word_index(path)?,
        None => built_target.take().unwrap_or_default(),
    };

    let (src, tgt) = (&args.languages.source_lang, &args.languages.target_lang);
    let source = LanguageSide::new(src.as_str(), load_lexicon(&args.source_lexicon)?, source_index)
        .with_excluded_values(config.filter.excluded_for(src));
    let target = LanguageSide::new(tgt.as_str(), load_lexicon(&args.target_lexicon)?, target_index)
        .with_excluded_values(config.filter.excluded_for(tgt));
    info!(
        source_seeds = source.lexicon.len(),
        target_seeds = target.lexicon.len(),
        "loaded seed lexicons"
    );

    if Direction::parse(&args.start).is_none() {
        warn!(start = %args.start, "start is neither \"source\" nor \"target\"; no rounds will run");
    }
    let mut session = Session::new(corpus, source, target);
    session.find_connectives(&args.start, &config.mining)?;

    let source_relations = load_optional_relations(args.source_relations.as_deref())?;
    let target_relations = load_optional_relations(args.target_relations.as_deref())?;

    for (direction, from, to) in [(Direction::Source, src, tgt), (Direction::Target, tgt, src)] {
        let side = session.side(direction);
        // Relations are keyed by language, so they swap with the direction.
        let (own, other) = match direction {
            Direction::Source => (&source_relations, &target_relations),
            Direction::Target => (&target_relations, &source_relations),
        };
        if !side.probabilities.is_empty() {
            let table = annotate(&side.probabilities, own, other);
            let path = args.out_dir.join(connectives_file_name(from, to));
            save_json(&path, &table)?;
            println!("Saved {}", path.display());
        }
        if !side.counts.is_empty() {
            let path = args.out_dir.join(counts_file_name(from, to));
            save_json(&path, &side.counts)?;
        }
        save_json(&args.out_dir.join(lexicon_file_name(from)), &side.lexicon)?;
    }
    save_json(&args.out_dir.join(rounds_file_name(src, tgt)), session.history())?;

    for report in session.history() {
        println!(
            "round {} ({}): probed {}, new {}",
            report.round,
            report.direction,
            report.probed,
            report.harvested.len()
        );
    }
    Ok(())
}

fn load_optional_relations(path: Option<&Path>) -> Result<RelationMap> {
    match path {
        Some(path) => load_relations(path),
        None => Ok(RelationMap::new()),
    }
}

fn run_concordance(args: &ConcordanceArgs) -> Result<()> {
    let corpus = ParallelCorpus::load_unaligned(&args.source_corpus, &args.target_corpus)?;
    let lines = find_examples(&corpus, &args.source_connective, &args.target_connective, args.max_tokens);
    match write_examples(&args.out_dir, &args.source_connective, &args.target_connective, &lines)? {
        Some(path) => println!("Saved {} example(s) to {}", lines.len(), path.display()),
        None => println!("No output"),
    }
    Ok(())
}
