//! Command-line entry point: writes the Spring Boot 3 deck.
//!
//! ```sh
//! slidesmith                                   # built-in table, Spring_Boot_3_Presentation.pptx
//! slidesmith -c talk.yaml -o talk.pptx --verify
//! slidesmith --no-clobber -vv
//! ```

use clap::{ArgAction, Parser};
use slidesmith::Error;
use slidesmith::deck::{DEFAULT_OUTPUT, GenerateOptions, OverwritePolicy, generate_from};
use slidesmith::ooxml::pptx::{Package, TITLE_AND_CONTENT};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generate the Spring Boot 3 PowerPoint deck
#[derive(Parser, Debug)]
#[command(
    name = "slidesmith",
    about = "Generate a PowerPoint deck with one Title and Content slide per entry",
    version
)]
struct Args {
    /// YAML content table (defaults to the built-in Spring Boot 3 table)
    #[arg(short, long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Output file, replaced if it already exists
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Slide layout index each slide is created from
    #[arg(short, long, value_name = "INDEX", default_value_t = TITLE_AND_CONTENT)]
    layout: usize,

    /// Fail instead of replacing an existing output file
    #[arg(long)]
    no_clobber: bool,

    /// Reopen the written file and check slide count and titles
    #[arg(long)]
    verify: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            output: self.output.clone(),
            layout_index: self.layout,
            overwrite: if self.no_clobber {
                OverwritePolicy::Refuse
            } else {
                OverwritePolicy::Overwrite
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG, when set, takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let report = generate_from(args.content.as_deref(), &args.options())?;

    if args.verify {
        verify(&report.output, &report.slide_titles)
            .map_err(|e| format!("verification failed: {}", e))?;
        log::info!(
            "Verified {} slides in {}",
            report.slide_titles.len(),
            report.output.display()
        );
    }

    println!(
        "Presentation created successfully: {} ({} slides)",
        report.output.display(),
        report.slide_count
    );
    Ok(())
}

/// Reopen the deck at `path` and check it has exactly `titles`, in order.
fn verify(path: &Path, titles: &[String]) -> slidesmith::Result<()> {
    let pkg = Package::open(path)?;
    let pres = pkg.presentation()?;
    let slides = pres.slides()?;

    if slides.len() != titles.len() {
        return Err(Error::InvalidFormat(format!(
            "expected {} slides, found {}",
            titles.len(),
            slides.len()
        )));
    }

    for (i, (slide, expected)) in slides.iter().zip(titles).enumerate() {
        let title = slide.title()?;
        if title.as_deref() != Some(expected.as_str()) {
            return Err(Error::InvalidFormat(format!(
                "slide {} title is {:?}, expected {:?}",
                i + 1,
                title,
                expected
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidesmith::deck::{ContentTable, SlideContent, generate};
    use tempfile::TempDir;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn two_slide_deck(dir: &TempDir) -> PathBuf {
        let options = GenerateOptions {
            output: dir.path().join("deck.pptx"),
            ..GenerateOptions::default()
        };
        let table = ContentTable::new(vec![
            SlideContent::new("First", "a"),
            SlideContent::new("Second", "b"),
        ]);
        generate(&table, &options).unwrap().output
    }

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["slidesmith"]).unwrap();
        assert_eq!(args.options(), GenerateOptions::default());
        assert!(args.content.is_none());
        assert!(!args.verify);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::try_parse_from([
            "slidesmith", "-c", "talk.yaml", "-o", "talk.pptx", "-l", "5", "--no-clobber", "-vv",
        ])
        .unwrap();
        let options = args.options();

        assert_eq!(args.content.as_deref(), Some(Path::new("talk.yaml")));
        assert_eq!(options.output, PathBuf::from("talk.pptx"));
        assert_eq!(options.layout_index, 5);
        assert_eq!(options.overwrite, OverwritePolicy::Refuse);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_layout_must_be_a_number() {
        assert!(Args::try_parse_from(["slidesmith", "--layout", "one"]).is_err());
    }

    #[test]
    fn test_verify_matching_deck() {
        let dir = TempDir::new().unwrap();
        let path = two_slide_deck(&dir);
        verify(&path, &titles(&["First", "Second"])).unwrap();
    }

    #[test]
    fn test_verify_rejects_wrong_title() {
        let dir = TempDir::new().unwrap();
        let path = two_slide_deck(&dir);

        let err = verify(&path, &titles(&["First", "Third"])).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(ref msg) if msg.starts_with("slide 2 title")));
    }

    #[test]
    fn test_verify_rejects_wrong_count() {
        let dir = TempDir::new().unwrap();
        let path = two_slide_deck(&dir);

        let err = verify(&path, &titles(&["First"])).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(ref msg) if msg == "expected 1 slides, found 2"));
    }

    #[test]
    fn test_run_with_verify_and_no_clobber() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("deck.pptx");
        let output_arg = output.to_str().unwrap();

        let args = Args::try_parse_from(["slidesmith", "-o", output_arg, "--verify"]).unwrap();
        run(&args).unwrap();
        assert_eq!(
            Package::open(&output).unwrap().presentation().unwrap().slide_count().unwrap(),
            14
        );

        let args = Args::try_parse_from(["slidesmith", "-o", output_arg, "--no-clobber"]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(err.to_string().starts_with("generation failed while saving: "));
    }
}
