use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{error, info, warn};

use lisan_core::Language;
use lisan_core::config::PipelineConfig;
use lisan_core::pipeline::{Annotators, LanguageReport, Pipeline, load_articles};

/// Command line of the batch pipeline.
///
/// Every option left unset keeps the value of the config file (or the
/// built-in default when no config file is given).
#[derive(Parser, Debug)]
#[command(author, version, about = "English/Arabic news corpus analysis", long_about = None)]
struct Cli {
	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, global = true, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, global = true, action = ArgAction::Count)]
	quiet: u8,

	/// JSON configuration file
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Languages to run, in order (comma separated)
	#[arg(short, long, value_name = "LANG", value_delimiter = ',', default_values = ["english", "arabic"])]
	languages: Vec<Language>,

	/// English articles file
	#[arg(long, value_name = "PATH")]
	english: Option<PathBuf>,

	/// Arabic articles file
	#[arg(long, value_name = "PATH")]
	arabic: Option<PathBuf>,

	/// English word -> POS tag lexicon
	#[arg(long, value_name = "PATH")]
	english_lexicon: Option<PathBuf>,

	/// Arabic word -> POS tag lexicon
	#[arg(long, value_name = "PATH")]
	arabic_lexicon: Option<PathBuf>,

	/// English entity gazetteer
	#[arg(long, value_name = "PATH")]
	english_gazetteer: Option<PathBuf>,

	/// Arabic entity gazetteer
	#[arg(long, value_name = "PATH")]
	arabic_gazetteer: Option<PathBuf>,

	/// N-gram order
	#[arg(short = 'n', long, value_name = "N")]
	order: Option<usize>,

	/// Share of sentences used for training
	#[arg(short, long, value_name = "RATIO")]
	split: Option<f64>,

	/// Generate up to this many words from each model
	#[arg(short, long, value_name = "COUNT")]
	generate: Option<usize>,

	/// Seed of the generation RNG
	#[arg(long, value_name = "SEED")]
	seed: Option<u64>,

	/// Also write the structured reports to this file
	#[arg(long, value_name = "PATH")]
	json: Option<PathBuf>,
}

impl Cli {
	/// Loads the config file (if any) and applies the command line overrides.
	fn pipeline_config(&self) -> Result<PipelineConfig> {
		let mut config = match &self.config {
			Some(path) => PipelineConfig::from_file(path)
				.with_context(|| format!("failed to load config {}", path.display()))?,
			None => PipelineConfig::default(),
		};

		if let Some(path) = &self.english {
			config.english_path = path.clone();
		}
		if let Some(path) = &self.arabic {
			config.arabic_path = path.clone();
		}
		if let Some(path) = &self.english_lexicon {
			config.english_lexicon = Some(path.clone());
		}
		if let Some(path) = &self.arabic_lexicon {
			config.arabic_lexicon = Some(path.clone());
		}
		if let Some(path) = &self.english_gazetteer {
			config.english_gazetteer = Some(path.clone());
		}
		if let Some(path) = &self.arabic_gazetteer {
			config.arabic_gazetteer = Some(path.clone());
		}
		if let Some(n) = self.order {
			config.n_gram_order = n;
		}
		if let Some(ratio) = self.split {
			config.train_split_ratio = ratio;
		}
		if let Some(words) = self.generate {
			config.generate_words = words;
		}
		if let Some(seed) = self.seed {
			config.seed = seed;
		}

		config.validate().context("invalid configuration")?;
		Ok(config)
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let config = cli.pipeline_config()?;
	let pipeline = Pipeline::new(config.clone())?;

	let (reports, failed) = run_all(&pipeline, &config, &cli.languages);
	for report in &reports {
		println!("{}\n", report);
	}

	if let Some(path) = &cli.json {
		write_reports(path, &reports)?;
		info!("wrote {} report(s) to {}", reports.len(), path.display());
	}

	if !failed.is_empty() {
		let names: Vec<String> = failed.iter().map(|(language, _)| language.to_string()).collect();
		anyhow::bail!("{} language(s) failed: {}", failed.len(), names.join(", "));
	}
	Ok(())
}

/// Runs every language in order. A failing language is logged and skipped,
/// the others still run.
fn run_all(
	pipeline: &Pipeline,
	config: &PipelineConfig,
	languages: &[Language],
) -> (Vec<LanguageReport>, Vec<(Language, anyhow::Error)>) {
	let mut reports = Vec::new();
	let mut failed = Vec::new();
	for &language in languages {
		match run_language(pipeline, config, language) {
			Ok(Some(report)) => reports.push(report),
			Ok(None) => {}
			Err(e) => {
				error!("{:#}", e);
				failed.push((language, e));
			}
		}
	}
	(reports, failed)
}

/// Runs one language. Returns `None` when the language has no articles.
fn run_language(pipeline: &Pipeline, config: &PipelineConfig, language: Language) -> Result<Option<LanguageReport>> {
	let path = config.articles_path(language);
	let articles =
		load_articles(path).with_context(|| format!("failed to load {} articles from {}", language, path.display()))?;
	if articles.is_empty() {
		warn!("no {} articles, skipping", language);
		return Ok(None);
	}

	let annotators = Annotators::load(config, language);
	let report = pipeline
		.run(language, &articles, &annotators)
		.with_context(|| format!("{} pipeline failed", language))?;
	Ok(Some(report))
}

fn write_reports(path: &Path, reports: &[LanguageReport]) -> Result<()> {
	let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
	serde_json::to_writer_pretty(BufWriter::new(file), reports)
		.with_context(|| format!("failed to write {}", path.display()))?;
	Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
	use log::LevelFilter;

	let level = match (quiet, verbose) {
		(0, 0) => LevelFilter::Info,
		(0, 1) => LevelFilter::Debug,
		(0, _) => LevelFilter::Trace,
		(1, _) => LevelFilter::Warn,
		_ => LevelFilter::Error,
	};

	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
	builder.format_timestamp_millis();
	builder.filter_level(level);
	let _ = builder.try_init();
}
