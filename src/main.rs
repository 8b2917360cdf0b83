use filmfluent::processor::{self, FileReport, ProcessOpts};
use filmfluent::{analysis, serialiser};

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use env_logger::{Builder, Env};
use log::error;

fn main() {
    init_logger();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

fn init_logger() {
    let env = Env::default().filter_or("RUST_LOG", "warn,filmfluent=info");
    Builder::from_env(env)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .target(env_logger::Target::Stderr)
        .init();
}

#[derive(ClapParser)]
#[command(about = "Parse SRT subtitles and collect word statistics for language learning")]
struct Cli {
    #[arg(
        value_name = "PATH",
        help = "The subtitle file, or directory with --batch. If not supplied, you will be prompted for it."
    )]
    path: Option<PathBuf>,
    #[arg(
        long,
        help = "Process every .srt file in the given directory."
    )]
    batch: bool,
    #[arg(
        long,
        help = "Write the analysis of each file to <file>.analysis.json."
    )]
    json: bool,
    #[arg(long, help = "Count stopwords in the word frequencies.")]
    include_stopwords: bool,
    #[arg(
        long,
        value_name = "N",
        default_value_t = analysis::DEFAULT_TOP_WORDS,
        help = "Number of most common words to keep."
    )]
    top: usize,
    #[arg(short, long, help = "Only print the parse summary.")]
    quiet: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let path = match cli.path.clone() {
        Some(path) => path,
        None => prompt_for_path(cli.batch)?,
    };
    let opts = ProcessOpts {
        include_stopwords: cli.include_stopwords,
        top_words: cli.top,
    };

    if cli.batch {
        let files = processor::srt_files_in(&path)?;
        println!(
            "Batch processing {} SRT files in: {}",
            files.len(),
            path.display()
        );
        let mut processed = 0;
        for file in &files {
            match process_one(file, &opts, &cli) {
                Ok(()) => processed += 1,
                Err(err) => error!("{:#}", err),
            }
        }
        println!(
            "\nBatch processing complete. Processed {} files.",
            processed
        );
        if processed == 0 && !files.is_empty() {
            return Err(anyhow!("None of the files could be processed."));
        }
        Ok(())
    } else {
        process_one(&path, &opts, &cli)
    }
}

fn prompt_for_path(batch: bool) -> Result<PathBuf> {
    print!("{}", prompt_text(batch));
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    let line = line.trim();
    if line.is_empty() {
        return Err(anyhow!("No path was supplied."));
    }
    Ok(PathBuf::from(line))
}

fn prompt_text(batch: bool) -> &'static str {
    if batch {
        "Please enter the path to the directory of SRT subtitle files: "
    } else {
        "Please enter the path to the SRT subtitle file: "
    }
}

fn process_one(path: &Path, opts: &ProcessOpts, cli: &Cli) -> Result<()> {
    let report = processor::process_file(path, opts)?;
    print_report(&report, cli.quiet);

    if cli.json {
        let out = serialiser::analysis_path(path);
        serialiser::serialise(&report.analysis, &out)
            .with_context(|| format!("Failed to export analysis to '{}'", out.display()))?;
        println!("Analysis saved to {}", out.display());
    }
    Ok(())
}

fn print_report(report: &FileReport, quiet: bool) {
    println!(
        "\nSuccessfully parsed {} subtitle entries.",
        report.subtitle_count
    );
    println!("First subtitle: \"{}\"", report.first_subtitle);
    println!("Last subtitle: \"{}\"", report.last_subtitle);
    if quiet {
        return;
    }

    let analysis = &report.analysis;
    println!("\nAnalysis Results:");
    println!("Title: {}", report.movie.title);
    match report.movie.release_year {
        Some(year) => println!("Year: {}", year),
        None => println!("Year: unknown"),
    }
    if let Some(encoding) = report.encoding {
        println!("Encoding: {}", encoding);
    }
    println!("Total words: {}", analysis.total_words);
    println!("Unique words: {}", analysis.unique_words);
    println!("Total sentences: {}", analysis.total_sentences);
    println!(
        "Words per sentence: {:.2}",
        analysis.average_words_per_sentence()
    );
    println!("Average word length: {:.2}", analysis.average_word_length());
    println!("\nTop 10 words:");
    for wc in analysis.top_words.iter().take(10) {
        println!("  {}: {}", wc.word, wc.count);
    }
}
