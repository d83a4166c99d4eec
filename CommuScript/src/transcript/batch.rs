//! Whole-directory transcription
//!
//! Finds the chapter file pairs in a source directory, merges every chapter
//! and assembles the results into one [`TranscriptDocument`]. Chapters are
//! independent: one failing never stops the others.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::merge::{ChapterReport, ChapterSource, transcribe_chapter};
use super::options::TranscribeOptions;
use super::types::TranscriptDocument;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::names::NameCache;
use crate::utils::{file_stem_str, write_pretty_json};

/// Progress information during a transcription run
#[derive(Debug, Clone)]
pub struct TranscribeProgress {
    /// Current chapter number (1-indexed)
    pub current: usize,
    /// Total number of chapters
    pub total: usize,
    /// Placeholder id of the chapter being processed
    pub chapter: String,
}

/// A chapter that was dropped from the transcript
#[derive(Debug)]
pub struct ChapterFailure {
    pub source: ChapterSource,
    pub error: Error,
}

/// Result of transcribing a directory
#[derive(Debug)]
pub struct TranscriptRun {
    /// Name of the output document, derived from the first event file
    pub document_id: String,
    /// Every chapter that merged successfully, in file name order
    pub document: TranscriptDocument,
    /// Warnings per successful chapter, keyed by chapter id
    pub diagnostics: Vec<(String, Diagnostics)>,
    /// Chapters that failed and were left out
    pub failures: Vec<ChapterFailure>,
}

impl TranscriptRun {
    /// Number of chapters in the document
    pub fn success_count(&self) -> usize {
        self.document.len()
    }

    /// Number of chapters left out
    pub fn fail_count(&self) -> usize {
        self.failures.len()
    }

    /// Total warnings across all chapters
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().map(|(_, d)| d.len()).sum()
    }

    /// Write the document to `<output_dir>/<document_id>.json`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written.
    pub fn write_to_dir<P: AsRef<Path>>(&self, output_dir: P) -> Result<PathBuf> {
        let path = output_dir.as_ref().join(format!("{}.json", self.document_id));
        tracing::info!("saving transcript to {}...", path.display());
        write_pretty_json(&path, &self.document)?;
        Ok(path)
    }
}

/// Find and pair the chapter files directly inside `dir`
///
/// `.json` event files and `.txt` string tables are each sorted by name and
/// paired positionally. Files listed in `exclude` are ignored.
///
/// # Errors
/// Returns [`Error::NoChapterFiles`] if no event file is found, or a walk error.
pub fn discover_chapters<P: AsRef<Path>>(dir: P, exclude: &[PathBuf]) -> Result<Vec<ChapterSource>> {
    let dir = dir.as_ref();
    tracing::info!("checking {} for commu data...", dir.display());

    let excluded: Vec<PathBuf> = exclude.iter().map(|p| canonical(p)).collect();
    let mut json_files = Vec::new();
    let mut txt_files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || excluded.contains(&canonical(path)) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(".json") {
            json_files.push(path.to_path_buf());
        } else if name.ends_with(".txt") {
            txt_files.push(path.to_path_buf());
        }
    }

    tracing::debug!(
        "found {} .json files and {} .txt files",
        json_files.len(),
        txt_files.len()
    );
    if json_files.is_empty() {
        return Err(Error::NoChapterFiles {
            dir: dir.to_path_buf(),
        });
    }
    if json_files.len() != txt_files.len() {
        tracing::warn!(
            "{} event files but {} text files; unpaired files are ignored",
            json_files.len(),
            txt_files.len()
        );
    }

    json_files.sort();
    txt_files.sort();
    Ok(json_files
        .into_iter()
        .zip(txt_files)
        .map(|(events, text)| ChapterSource::new(events, text))
        .collect())
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Output document name: the first three `_`-separated parts of an event file name
///
/// `main_01_op_001.json` → `main_01_op`
pub fn document_id(events: &Path) -> String {
    let stem = file_stem_str(events, ".json");
    stem.split('_').take(3).collect::<Vec<_>>().join("_")
}

/// Transcribe every chapter of a source directory
///
/// # Errors
/// Returns an error only if chapter discovery fails; chapter failures are
/// collected in [`TranscriptRun::failures`].
pub fn transcribe_directory<P: AsRef<Path>>(
    dir: P,
    names: &NameCache,
    options: &TranscribeOptions,
) -> Result<TranscriptRun> {
    let sources = discover_chapters(dir, &options.exclude)?;
    Ok(transcribe_chapters(&sources, names, options, |_| {}))
}

/// Transcribe the given chapters, reporting progress per chapter
///
/// Output order always follows `sources`, even when `options.parallel` is set.
pub fn transcribe_chapters<F>(
    sources: &[ChapterSource],
    names: &NameCache,
    options: &TranscribeOptions,
    progress: F,
) -> TranscriptRun
where
    F: Fn(&TranscribeProgress) + Send + Sync,
{
    let total = sources.len();
    let processed = AtomicUsize::new(0);

    let process = |source: &ChapterSource| {
        let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("({current}/{total}) working through chapter {}...", source.id);
        progress(&TranscribeProgress {
            current,
            total,
            chapter: source.id.clone(),
        });
        transcribe_chapter(source, names, options)
    };

    let results: Vec<Result<ChapterReport>> = if options.parallel {
        sources.par_iter().map(process).collect()
    } else {
        sources.iter().map(process).collect()
    };

    let mut run = TranscriptRun {
        document_id: sources
            .first()
            .map(|s| document_id(&s.events))
            .unwrap_or_default(),
        document: TranscriptDocument::new(),
        diagnostics: Vec::new(),
        failures: Vec::new(),
    };

    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(report) => {
                report.diagnostics.log(&report.chapter.id);
                run.diagnostics.push((report.chapter.id.clone(), report.diagnostics));
                run.document.chapters.push(report.chapter);
            }
            Err(error) => {
                tracing::warn!("{error}");
                run.failures.push(ChapterFailure {
                    source: source.clone(),
                    error,
                });
            }
        }
    }

    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(Path::new("src/main_01_op_001.json")), "main_01_op");
        assert_eq!(document_id(Path::new("event_xx.json")), "event_xx");
    }

    #[test]
    fn test_discover_pairs_sorted_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "b_002.json",
            "a_001.json",
            "b_002_jp.gtx.txt",
            "a_001_jp.gtx.txt",
            "notes.md",
            "names.json",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c_003.json"), "").unwrap();

        let sources = discover_chapters(dir.path(), &[dir.path().join("names.json")]).unwrap();

        let pairs: Vec<_> = sources
            .iter()
            .map(|s| {
                (
                    s.id.as_str(),
                    s.text.file_name().unwrap().to_string_lossy().into_owned(),
                )
            })
            .collect();
        assert_eq!(
            pairs,
            [
                ("a_001", "a_001_jp.gtx.txt".to_string()),
                ("b_002", "b_002_jp.gtx.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_discover_empty_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover_chapters(dir.path(), &[]),
            Err(Error::NoChapterFiles { .. })
        ));
    }
}
