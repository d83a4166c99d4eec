use commuscript::prelude::*;
use commuscript::transcript::MergeStage;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const COMMON: &str = "ui_ok^OK|display_character_1^春香|display_character_7^Alice|ui_cancel^Cancel";

fn write_chapter(dir: &Path, stem: &str, events: &str, text: &str) {
    fs::write(dir.join(format!("{stem}.json")), events).unwrap();
    fs::write(dir.join(format!("{stem}_jp.gtx.txt")), text).unwrap();
}

fn names() -> NameCache {
    NameCache::from_common_strings(COMMON, '|').unwrap().0
}

fn opening_events() -> &'static str {
    r#"{
        "header": { "title": "main_01_op" },
        "datas": {
            "CutRecord": [
                { "command": "actor_text", "arg1": "1003", "arg4": "1", "arg5": "1", "arg6": "op_1003" },
                { "command": "actor_text", "arg1": "1000", "arg4": "null", "arg5": "null", "arg6": "op_1000" },
                { "command": "camera", "arg1": "zoom" },
                { "command": "actor_text", "arg1": "1001", "arg4": "7", "arg5": "9", "arg6": "op_1001" },
                { "command": "actor_text", "arg1": "1004", "arg4": "40", "arg5": "41", "arg6": "op_1004" },
                { "command": "actor_text", "arg1": "1005", "arg4": "1", "arg5": "1", "arg6": "op_1005" }
            ],
            "Scenario": [
                { "command": "select1", "arg1": "op_sel_1002", "arg2": "*2000" },
                { "command": "select1", "arg1": "op_sel_999", "arg2": "*3000" }
            ]
        }
    }"#
}

fn opening_text() -> String {
    [
        "op_title^はじまりの日",
        "op_synopsis^A new day begins",
        "op_1000^翌朝……",
        "op_1001^Good morning!",
        "op_sel_1002^Say hello",
        "op_sel_999^Stay silent",
        "op_1003^おはようございます！",
        "op_1004^(nobody)",
        "op_1005^Let's go.",
        "op_1006_null^テキスト無し",
    ]
    .join("|")
}

#[test]
fn test_transcribe_directory_end_to_end() {
    let dir = tempdir().unwrap();
    write_chapter(dir.path(), "main_01_op_001", opening_events(), &opening_text());
    write_chapter(
        dir.path(),
        "main_01_op_002",
        r#"{ "header": { "title": "main_01_ed" }, "datas": { "CutRecord": [
            { "command": "actor_text", "arg1": 1000, "arg4": "1", "arg5": "1", "arg6": "ed_1000" }
        ] } }"#,
        "ed_1000^See you tomorrow.",
    );

    let run = transcribe_directory(dir.path(), &names(), &TranscribeOptions::new()).unwrap();

    assert_eq!(run.document_id, "main_01_op");
    assert_eq!(run.fail_count(), 0);
    assert_eq!(run.success_count(), 2);

    let op = &run.document.chapters[0];
    assert_eq!(op.id, "main_01_op");
    assert_eq!(op.title.as_deref(), Some("はじまりの日"));
    assert_eq!(
        op.lines,
        vec![
            ResolvedLine::new(1000, "---", "翌朝……"),
            ResolvedLine::new(1001, "Alice", "Good morning!"),
            ResolvedLine::new(1002, "[button]", "Say hello"),
            ResolvedLine::new(1003, "春香", "おはようございます！"),
            ResolvedLine::new(1005, "春香", "Let's go."),
        ]
    );

    let ed = &run.document.chapters[1];
    assert_eq!(ed.id, "main_01_ed");
    assert_eq!(ed.title, None);
    assert_eq!(ed.lines, vec![ResolvedLine::new(1000, "春香", "See you tomorrow.")]);

    let (chapter_id, diagnostics) = &run.diagnostics[0];
    assert_eq!(chapter_id, "main_01_op");
    assert!(diagnostics.any(|w| matches!(w, Warning::SpeakerFallback { line_id: 1001, .. })));
    assert!(diagnostics.any(|w| matches!(w, Warning::UnresolvedSpeaker { line_id: 1004, .. })));
    assert!(diagnostics.any(|w| matches!(
        w,
        Warning::UnplaceableChoice { line_id: 999, reason: UnplaceableReason::BeforeFirst, .. }
    )));
    assert!(diagnostics.any(|w| matches!(w, Warning::NullTextSkipped { id } if id == "op_1006_null")));
}

#[test]
fn test_every_chapter_is_strictly_increasing() {
    let dir = tempdir().unwrap();
    write_chapter(dir.path(), "ev_01_a_001", opening_events(), &opening_text());

    let options = TranscribeOptions::new().with_parallel(true);
    let run = transcribe_directory(dir.path(), &names(), &options).unwrap();

    assert!(!run.document.is_empty());
    for chapter in &run.document.chapters {
        assert!(chapter.is_monotonic(), "chapter {} is out of order", chapter.id);
    }
}

#[test]
fn test_broken_chapter_is_dropped_and_run_continues() {
    let dir = tempdir().unwrap();
    write_chapter(dir.path(), "main_02_a_001", opening_events(), "op_1000^fine|no separator here");
    write_chapter(
        dir.path(),
        "main_02_a_002",
        r#"{ "header": { "title": "second" }, "datas": { "CutRecord": [
            { "command": "actor_text", "arg1": "1000", "arg4": "7", "arg5": "7", "arg6": "s_1000" }
        ] } }"#,
        "s_1000^Still here.",
    );

    let run = transcribe_directory(dir.path(), &names(), &TranscribeOptions::new()).unwrap();

    assert_eq!(run.success_count(), 1);
    assert_eq!(run.document.chapters[0].id, "second");
    assert_eq!(run.fail_count(), 1);

    let failure = &run.failures[0];
    assert_eq!(failure.source.id, "main_02_a_001");
    match &failure.error {
        Error::Chapter { stage, source, .. } => {
            assert_eq!(*stage, MergeStage::ParsingText);
            assert!(matches!(**source, Error::MalformedStringEntry { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_records_do_not_drop_the_chapter() {
    let dir = tempdir().unwrap();
    write_chapter(
        dir.path(),
        "main_01_op_001",
        r#"{ "header": { "title": "main_01_op" }, "datas": {
            "CutRecord": [
                { "command": "actor_text", "arg1": "1000", "arg4": "1", "arg5": "1", "arg6": "op_1000" },
                { "command": "actor_text", "arg1": "1001", "arg4": "null", "arg5": "", "arg6": "op_1001" },
                { "command": "actor_text", "arg1": "oops", "arg4": "1", "arg5": "1", "arg6": "op_1003" },
                { "command": "actor_text", "arg1": "1002", "arg4": "1", "arg5": "1", "arg6": "op_1002" }
            ],
            "Scenario": [ { "command": "select1", "arg1": "op_sel_x", "arg2": "*2000" } ]
        } }"#,
        "op_1000^Hello.|op_1001^(empty ref)|op_1002^Bye.|op_1003^lost|op_sel_x^Wave",
    );

    let run = transcribe_directory(dir.path(), &names(), &TranscribeOptions::new()).unwrap();

    assert_eq!(run.fail_count(), 0);
    assert_eq!(run.success_count(), 1);
    assert_eq!(
        run.document.chapters[0].lines,
        vec![
            ResolvedLine::new(1000, "春香", "Hello."),
            ResolvedLine::new(1002, "春香", "Bye."),
        ]
    );

    let (_, diagnostics) = &run.diagnostics[0];
    assert!(diagnostics.any(|w| matches!(
        w,
        Warning::InvalidEvent { command, field: "arg1", .. } if command == "select1"
    )));
    assert!(diagnostics.any(|w| matches!(
        w,
        Warning::InvalidEvent { command, field: "arg1", .. } if command == "actor_text"
    )));
    assert!(diagnostics.any(|w| matches!(w, Warning::UnresolvedSpeaker { line_id: 1001, .. })));
}

#[test]
fn test_strict_mode_drops_chapter_with_missing_text() {
    let dir = tempdir().unwrap();
    write_chapter(
        dir.path(),
        "main_03_a_001",
        r#"{ "header": { "title": "gap" }, "datas": { "CutRecord": [
            { "command": "actor_text", "arg1": "1000", "arg4": "1", "arg5": "1", "arg6": "missing" }
        ] } }"#,
        "other^text",
    );

    let lenient = transcribe_directory(dir.path(), &names(), &TranscribeOptions::new()).unwrap();
    assert_eq!(lenient.success_count(), 1);
    assert!(lenient.document.chapters[0].lines.is_empty());

    let strict = TranscribeOptions::new().with_missing_text(MissingTextPolicy::Abort);
    let run = transcribe_directory(dir.path(), &names(), &strict).unwrap();
    assert_eq!(run.success_count(), 0);
    assert!(matches!(
        &run.failures[0].error,
        Error::Chapter { stage: MergeStage::Resolving, .. }
    ));
}

#[test]
fn test_write_and_read_back_transcript() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("commu");
    fs::create_dir(&src).unwrap();
    write_chapter(&src, "main_04_op_001", opening_events(), &opening_text());

    let run = transcribe_directory(&src, &names(), &TranscribeOptions::new()).unwrap();
    let out = run.write_to_dir(dir.path().join("out")).unwrap();

    assert_eq!(out.file_name().unwrap(), "main_04_op.json");
    let json = fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"speaker\": \"春香\""));
    assert!(json.starts_with("[\n    {"));
    let back: TranscriptDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(back, run.document);
}

#[test]
fn test_name_cache_files_next_to_chapters_are_ignored() {
    let dir = tempdir().unwrap();
    write_chapter(dir.path(), "main_05_op_001", opening_events(), &opening_text());

    let options = NameCacheOptions::new()
        .with_common_strings(dir.path().join("CM_jp.gtx.txt"))
        .with_cache_path(dir.path().join("character_names.json"));
    fs::write(&options.common_strings, COMMON).unwrap();
    let names = load_or_build(&options).unwrap();
    assert!(options.cache_path.is_file());

    let transcribe = TranscribeOptions::new()
        .with_exclude(&options.common_strings)
        .with_exclude(&options.cache_path);
    let run = transcribe_directory(dir.path(), &names, &transcribe).unwrap();

    assert_eq!(run.success_count(), 1);
    assert_eq!(run.fail_count(), 0);
}
