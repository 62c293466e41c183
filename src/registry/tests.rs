use super::*;
use crate::counter::count;
use crate::parser::{TextParser, WORDCOUNT};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn words(counts: &WordCount) -> Vec<&str> {
    counts.words().collect()
}

/// Registry holding the two canonical sample documents under "a.txt" and "b.txt"
fn sample_registry(dir: &TempDir) -> DocumentRegistry {
    let a = write_file(dir, "a.txt", "The cat sat on the mat");
    let b = write_file(dir, "b.txt", "The dog ran in the park");

    let mut registry = DocumentRegistry::new();
    registry.register(&a, Some("a.txt"), None).unwrap();
    registry.register(&b, Some("b.txt"), None).unwrap();
    registry
}

fn fixed_parser(text: &'static str) -> impl Parser {
    move |_path: &Path| -> Result<ParseResult> {
        Ok(ParseResult::new(count(text), Sentiment::default(), text))
    }
}

// ========================================================================
// Registration Tests
// ========================================================================

#[test]
fn test_register_two_documents() {
    let dir = tempfile::tempdir().unwrap();
    let registry = sample_registry(&dir);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.labels().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);

    let a = registry.wordcount("a.txt").unwrap();
    assert_eq!(words(a), vec!["cat", "sat", "mat"]);
    assert!(a.iter().all(|(_, n)| n == 1));

    let b = registry.wordcount("b.txt").unwrap();
    assert_eq!(words(b), vec!["dog", "ran", "park"]);

    assert_eq!(registry.raw_text("a.txt"), Some("cat sat mat"));
    assert!(registry.sentiment("b.txt").is_some());
}

#[test]
fn test_register_default_label_is_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "The cat sat on the mat");

    let mut registry = DocumentRegistry::new();
    registry.register(&path, None, None).unwrap();

    let label = path.display().to_string();
    assert!(registry.contains(&label));
    assert_eq!(registry.document(&label).unwrap().source, path);
}

#[test]
fn test_register_empty_filename() {
    let mut registry = DocumentRegistry::new();
    let err = registry.register("", Some("x"), None).unwrap_err();

    assert!(matches!(err, NlpError::Validation(_)));
    assert!(registry.is_empty());
}

#[test]
fn test_register_empty_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "cat");

    let mut registry = DocumentRegistry::new();
    let err = registry.register(&path, Some("  "), None).unwrap_err();
    assert!(matches!(err, NlpError::Validation(_)));
}

#[test]
fn test_register_missing_file_keeps_prior_documents() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);

    let err = registry
        .register(dir.path().join("missing.txt"), Some("c"), None)
        .unwrap_err();

    assert!(matches!(err, NlpError::NotFound(_)));
    assert_eq!(registry.len(), 2);
    assert!(!registry.contains("c"));
}

#[test]
fn test_register_overwrites_duplicate_label() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);
    let c = write_file(&dir, "c.txt", "Bright sunny morning");

    registry.register(&c, Some("a.txt"), None).unwrap();

    assert_eq!(registry.len(), 2);
    // Keeps its original position
    assert_eq!(registry.labels().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);

    let a = registry.wordcount("a.txt").unwrap();
    assert!(!a.contains("cat"), "statistics must be replaced, not merged");
    assert_eq!(words(a), vec!["bright", "sunny", "morning"]);
    assert_eq!(registry.document("a.txt").unwrap().source, c);
}

#[test]
fn test_register_overwrite_drops_old_custom_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "ignored");

    let tagged = |_path: &Path| -> Result<ParseResult> {
        Ok(ParseResult::new(count("x"), Sentiment::default(), "x").with_custom("tag", "first"))
    };

    let mut registry = DocumentRegistry::new();
    registry.register(&path, Some("doc"), Some(&tagged)).unwrap();
    assert_eq!(registry.custom("tag").count(), 1);

    registry.register(&path, Some("doc"), None).unwrap();
    assert_eq!(registry.custom("tag").count(), 0);
}

#[test]
fn test_register_reject_duplicate_label() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "The cat sat on the mat");
    let b = write_file(&dir, "b.txt", "The dog ran in the park");

    let mut registry = DocumentRegistry::new().duplicate_policy(DuplicateLabelPolicy::Reject);
    registry.register(&a, Some("doc"), None).unwrap();
    let err = registry.register(&b, Some("doc"), None).unwrap_err();

    assert!(matches!(err, NlpError::DuplicateLabel(ref l) if l == "doc"));
    assert_eq!(words(registry.wordcount("doc").unwrap()), vec!["cat", "sat", "mat"]);
}

#[test]
fn test_register_custom_parser() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "ignored");

    let parser = |_path: &Path| -> Result<ParseResult> {
        Ok(ParseResult::new(count("alpha beta alpha"), Sentiment::default(), "alpha beta alpha")
            .with_custom("lines", 3))
    };

    let mut registry = DocumentRegistry::new();
    registry.register(&path, Some("custom"), Some(&parser)).unwrap();

    assert_eq!(registry.wordcount("custom").unwrap().get("alpha"), Some(2));
    let lines: Vec<_> = registry.custom("lines").collect();
    assert_eq!(lines, vec![("custom", &serde_json::json!(3))]);
}

#[test]
fn test_register_custom_parser_error_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "ignored");

    let failing = |path: &Path| -> Result<ParseResult> {
        Err(NlpError::Parser {
            path: path.display().to_string(),
            message: "bad header".to_string(),
        })
    };

    let mut registry = DocumentRegistry::new();
    let err = registry.register(&path, Some("x"), Some(&failing)).unwrap_err();

    assert!(matches!(err, NlpError::Parser { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_register_rejects_builtin_custom_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "ignored");

    let shadowing = |_path: &Path| -> Result<ParseResult> {
        Ok(ParseResult::new(count("a"), Sentiment::default(), "a").with_custom(WORDCOUNT, 1))
    };

    let mut registry = DocumentRegistry::new();
    let err = registry.register(&path, None, Some(&shadowing)).unwrap_err();
    assert!(matches!(err, NlpError::Validation(_)));
}

#[test]
fn test_register_selects_parser_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let txt = write_file(&dir, "a.txt", "The cat sat on the mat");
    let rev = write_file(&dir, "b.rev", "anything");

    let mut parsers = ParserRegistry::new();
    parsers.register("rev", fixed_parser("five star review"));

    let mut registry = DocumentRegistry::with_parsers(parsers);
    registry.register(&txt, Some("txt"), None).unwrap();
    registry.register(&rev, Some("rev"), None).unwrap();

    assert_eq!(registry.raw_text("txt"), Some("cat sat mat"));
    assert_eq!(registry.raw_text("rev"), Some("five star review"));
}

#[test]
fn test_explicit_parser_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let txt = write_file(&dir, "a.txt", "The cat sat on the mat");
    let explicit = fixed_parser("explicit");

    let mut registry = DocumentRegistry::new();
    registry.register(&txt, Some("a"), Some(&explicit)).unwrap();

    assert_eq!(registry.raw_text("a"), Some("explicit"));
}

#[test]
fn test_register_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    write_file(&dir, "b.txt", "The dog ran in the park");
    write_file(&dir, "a.txt", "The cat sat on the mat");
    write_file(&dir, "nested/c.TXT", "Green hills");
    write_file(&dir, "skip.md", "Not a text file");

    let mut registry = DocumentRegistry::new();
    let labels = registry.register_dir(dir.path(), "txt").unwrap();

    assert_eq!(labels.len(), 3);
    assert!(labels[0].ends_with("a.txt"));
    assert!(labels[1].ends_with("b.txt"));
    assert!(labels.iter().all(|l| registry.contains(l)));
    assert!(!registry.labels().any(|l| l.ends_with("skip.md")));
}

#[test]
fn test_register_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = DocumentRegistry::new();

    let err = registry
        .register_dir(dir.path().join("nope"), "txt")
        .unwrap_err();
    assert!(matches!(err, NlpError::NotFound(_)));
}

#[cfg(unix)]
#[test]
fn test_register_dir_broken_link_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "a.txt", "The cat sat on the mat");
    fs::create_dir(dir.path().join("nested")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("nested/b.txt")).unwrap();

    let mut registry = DocumentRegistry::new();
    let err = registry.register_dir(dir.path(), "txt").unwrap_err();

    assert!(matches!(err, NlpError::NotFound(ref p) if p.ends_with("b.txt")), "{:?}", err);
    assert!(registry.is_empty(), "no file is registered when the walk fails");
}

#[cfg(unix)]
#[test]
fn test_register_dir_symlink_loop_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "a.txt", "The cat sat on the mat");
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

    let mut registry = DocumentRegistry::new();
    let err = registry.register_dir(dir.path(), "txt").unwrap_err();

    assert!(matches!(err, NlpError::Validation(ref m) if m.contains("symlink loop")));
    assert!(registry.is_empty());
}

#[cfg(unix)]
#[test]
fn test_register_dir_follows_file_links() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_file(&dir, "a.txt", "The cat sat on the mat");
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

    let mut registry = DocumentRegistry::new();
    let labels = registry.register_dir(dir.path(), "txt").unwrap();

    assert_eq!(labels.len(), 2);
    assert_eq!(registry.raw_text(&labels[1]), Some("cat sat mat"));
}

// ========================================================================
// Filter Tests
// ========================================================================

#[test]
fn test_filter_top_k_ties_keep_first_occurrence() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);

    registry.filter_wordcount(&WordcountFilter::top_k(2)).unwrap();

    // All counts are 1, so the tie-break keeps the first two words seen
    assert_eq!(words(registry.wordcount("a.txt").unwrap()), vec!["cat", "sat"]);
    assert_eq!(words(registry.wordcount("b.txt").unwrap()), vec!["dog", "ran"]);
}

#[test]
fn test_filter_top_k_keeps_largest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "ignored");
    let parser = fixed_parser("a b b c c c d d d d e");

    let mut registry = DocumentRegistry::new();
    registry.register(&path, Some("doc"), Some(&parser)).unwrap();
    let before = registry.wordcount("doc").unwrap().clone();

    registry.filter_wordcount(&WordcountFilter::top_k(3)).unwrap();
    let after = registry.wordcount("doc").unwrap();

    assert_eq!(after.len(), 3);
    let mut prior: Vec<usize> = before.iter().map(|(_, n)| n).collect();
    prior.sort_unstable_by(|a, b| b.cmp(a));
    let kept: Vec<usize> = after.iter().map(|(_, n)| n).collect();
    assert_eq!(kept, prior[..3].to_vec());
}

#[test]
fn test_filter_top_k_bounds_every_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);

    for k in [5, 2, 1] {
        registry.filter_wordcount(&WordcountFilter::top_k(k)).unwrap();
        for (_, counts) in registry.wordcounts() {
            assert!(counts.len() <= k);
        }
    }
}

#[test]
fn test_filter_word_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);

    let filter = WordcountFilter::words(["mat", "dog", "unicorn"]);
    registry.filter_wordcount(&filter).unwrap();

    assert_eq!(words(registry.wordcount("a.txt").unwrap()), vec!["mat"]);
    assert_eq!(words(registry.wordcount("b.txt").unwrap()), vec!["dog"]);

    let allowed = filter.word_list.unwrap();
    for (_, counts) in registry.wordcounts() {
        assert!(counts.words().all(|w| allowed.contains(w)));
    }
}

#[test]
fn test_filter_word_list_ignores_top_k() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);

    let filter = WordcountFilter {
        word_list: Some(["cat", "sat", "mat"].iter().map(|s| s.to_string()).collect()),
        top_k: 1,
    };
    registry.filter_wordcount(&filter).unwrap();

    assert_eq!(registry.wordcount("a.txt").unwrap().len(), 3);
    assert!(registry.wordcount("b.txt").unwrap().is_empty());
}

#[test]
fn test_filter_is_not_reversible() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);
    let snapshot = registry.snapshot();

    registry.filter_wordcount(&WordcountFilter::top_k(1)).unwrap();
    registry.filter_wordcount(&WordcountFilter::top_k(3)).unwrap();

    // Second pass works on already-filtered data
    assert_eq!(registry.wordcount("a.txt").unwrap().len(), 1);
    assert_eq!(snapshot[0].stats.wordcount.len(), 3);
}

#[test]
fn test_filter_zero_top_k() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);

    let err = registry
        .filter_wordcount(&WordcountFilter::top_k(0))
        .unwrap_err();

    assert!(matches!(err, NlpError::Validation(_)));
    assert_eq!(registry.wordcount("a.txt").unwrap().len(), 3);
}

#[test]
fn test_filter_leaves_other_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);

    registry.filter_wordcount(&WordcountFilter::top_k(1)).unwrap();
    assert_eq!(registry.raw_text("a.txt"), Some("cat sat mat"));
}

#[test]
fn test_filter_default() {
    let filter = WordcountFilter::default();
    assert_eq!(filter.top_k, DEFAULT_TOP_K);
    assert!(filter.word_list.is_none());
}

// ========================================================================
// Statistic View Tests
// ========================================================================

#[test]
fn test_statistic_view() {
    let dir = tempfile::tempdir().unwrap();
    let registry = sample_registry(&dir);

    let texts = registry.statistic("raw_text");
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], ("a.txt", Statistic::Text("cat sat mat")));

    assert!(registry.statistic("missing").is_empty());
}

#[test]
fn test_statistic_names_diverge_across_parsers() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = sample_registry(&dir);
    assert!(!registry.statistic_names().contains(&"lines".to_string()));

    let path = write_file(&dir, "c.txt", "ignored");
    let parser = |_path: &Path| -> Result<ParseResult> {
        Ok(ParseResult::new(count("z"), Sentiment::default(), "z").with_custom("lines", 1))
    };
    registry.register(&path, Some("c"), Some(&parser)).unwrap();

    assert_eq!(
        registry.statistic_names(),
        vec!["wordcount", "sentiment", "raw_text", "lines"]
    );
    assert_eq!(registry.statistic("lines").len(), 1);
    assert_eq!(registry.statistic("wordcount").len(), 3);
}

#[test]
fn test_statistic_serializes_untagged() {
    let dir = tempfile::tempdir().unwrap();
    let registry = sample_registry(&dir);

    let counts = registry.document("a.txt").unwrap().statistic(WORDCOUNT).unwrap();
    let json = serde_json::to_value(counts).unwrap();
    assert_eq!(json, serde_json::json!({"cat": 1, "sat": 1, "mat": 1}));
}

#[test]
fn test_default_text_parser_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.txt", "The cat sat on the mat");

    let mut registry = DocumentRegistry::new();
    registry.register(&path, Some("a"), None).unwrap();

    let expected = TextParser::new().parse(&path).unwrap();
    assert_eq!(registry.document("a").unwrap().stats, expected);
}
