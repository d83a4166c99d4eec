//! CLI command for transcribing a commu directory

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{BOOK, DISK, GEAR, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::names::{NameCacheOptions, load_or_build};
use crate::transcript::{
    MissingTextPolicy, TranscribeOptions, discover_chapters, transcribe_chapters,
};
use crate::utils::expand_path;

/// Arguments of the `transcribe` command
pub struct TranscribeArgs<'a> {
    pub source: &'a Path,
    pub output_dir: &'a Path,
    pub common_strings: &'a Path,
    pub names_file: &'a Path,
    pub force_regen_names: bool,
    pub delimiter: char,
    pub strict: bool,
    pub parallel: bool,
    pub quiet: bool,
}

/// Transcribe every chapter in `args.source` and write one JSON transcript
pub fn execute(args: &TranscribeArgs<'_>) -> anyhow::Result<()> {
    let start = Instant::now();
    let source = expand_path(args.source);
    let output_dir = expand_path(args.output_dir);
    let common_strings = expand_path(args.common_strings);
    let names_file = expand_path(args.names_file);

    if !args.quiet {
        print_step(1, 4, BOOK, "Loading character names...");
    }
    let name_options = NameCacheOptions::new()
        .with_common_strings(&common_strings)
        .with_cache_path(&names_file)
        .with_force_regenerate(args.force_regen_names);
    let names = load_or_build(&name_options)?;

    let options = TranscribeOptions::new()
        .with_delimiter(args.delimiter)
        .with_missing_text(if args.strict {
            MissingTextPolicy::Abort
        } else {
            MissingTextPolicy::Skip
        })
        .with_parallel(args.parallel)
        .with_exclude(&common_strings)
        .with_exclude(&names_file);

    if !args.quiet {
        print_step(2, 4, LOOKING_GLASS, &format!("Scanning {}...", source.display()));
    }
    let sources = discover_chapters(&source, &options.exclude)?;

    if !args.quiet {
        print_step(3, 4, GEAR, &format!("Merging {} chapters...", sources.len()));
    }
    let run = if args.quiet {
        transcribe_chapters(&sources, &names, &options, |_| {})
    } else {
        let pb = simple_bar(sources.len() as u64, "Merging");
        let run = transcribe_chapters(&sources, &names, &options, |p| {
            pb.set_message(p.chapter.clone());
            pb.inc(1);
        });
        pb.finish_and_clear();
        run
    };

    if !args.quiet {
        print_step(4, 4, DISK, "Saving transcript...");
    }
    let path = run.write_to_dir(&output_dir)?;

    if !args.quiet {
        println!(
            "Transcribed {} chapters ({} lines, {} warnings) to {}",
            run.success_count(),
            run.document.line_count(),
            run.warning_count(),
            path.display()
        );
        for failure in &run.failures {
            println!("  Skipped {}: {}", failure.source.id, failure.error);
        }
        print_done(start.elapsed());
    }

    Ok(())
}
