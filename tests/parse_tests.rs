// Tests for console output parsing - public API only

use testlens::config::{Config, ParserConfig};
use testlens::parse::parse_output;

#[test]
fn test_zero_result_lines_yield_empty_map() {
    let text = "\
$ web-test-runner --coverage

Running 3 test files...

Chromium: |██████████| 3/3 test files | 0 passed, 0 failed
";
    let map = parse_output(text, &ParserConfig::default());
    assert!(map.is_empty());
}

#[test]
fn test_two_passing_lines() {
    let map = parse_output("   ✓ test one\n   ✓ test two\n", &ParserConfig::default());

    assert_eq!(map.len(), 2);
    assert!(map["test one"].passed);
    assert!(map["test two"].passed);
}

#[test]
fn test_two_failing_lines_without_detail_blocks() {
    let map = parse_output("   𐄂 test one\n   𐄂 test two\n", &ParserConfig::default());

    assert_eq!(map.len(), 2);
    assert!(!map["test one"].passed);
    assert!(map["test one"].message.is_none());
    assert!(!map["test two"].passed);
    assert!(map["test two"].message.is_none());
}

#[test]
fn test_ansi_codes_are_stripped_before_matching() {
    let map = parse_output(
        "   \x1b[32m✓\x1b[0m test with ANSI\n",
        &ParserConfig::default(),
    );

    assert_eq!(map.len(), 1);
    assert!(map["test with ANSI"].passed);
}

#[test]
fn test_failure_block_message_is_attached_by_short_title() {
    let text = "\
src/cookies.spec.ts:

   𐄂 finds all matching cookies

❌ CookieSerializer > loadAllMatching > finds all matching cookies
   AssertionError: expected [] to deeply equal [ { name: 'session' } ]

Chromium: |██████████| 8/9 test files | 12 passed, 1 failed
";
    let map = parse_output(text, &ParserConfig::default());

    let outcome = &map["finds all matching cookies"];
    assert!(!outcome.passed);
    let message = outcome.message.as_ref().expect("message attached");
    assert!(message.contains("AssertionError"));
}

#[test]
fn test_continuation_text_never_becomes_a_key() {
    let text = "\
   ✓ renders the dialog
         expected output was very long and
         wrapped onto continuation lines here
   ✓ closes the dialog
";
    let map = parse_output(text, &ParserConfig::default());

    assert_eq!(map.len(), 2);
    assert!(map.contains_key("renders the dialog"));
    assert!(map.contains_key("closes the dialog"));
}

#[test]
fn test_parsing_is_idempotent() {
    let text = "\
   ✓ one
   𐄂 two

❌ suite > two
   Error: broke

Finished running tests in 1.2s
";
    let first = parse_output(text, &ParserConfig::default());
    let second = parse_output(text, &ParserConfig::default());
    assert_eq!(first, second);
}

#[test]
fn test_truncated_trailing_block_is_still_captured() {
    let text = "\
   𐄂 cut off
❌ suite > cut off
   Error: the capture ended mid-bl";
    let map = parse_output(text, &ParserConfig::default());

    let outcome = &map["cut off"];
    assert!(!outcome.passed);
    assert!(outcome.message.as_ref().unwrap().contains("ended mid-bl"));
}

#[test]
fn test_adjacent_failure_blocks_stay_separate() {
    let text = "\
   𐄂 first
   𐄂 second
❌ suite > first
   detail one
❌ suite > second
   detail two
Finished running tests
";
    let map = parse_output(text, &ParserConfig::default());

    assert_eq!(map["first"].message.as_deref(), Some("detail one"));
    assert_eq!(map["second"].message.as_deref(), Some("detail two"));
}

#[test]
fn test_terminator_vocabulary_is_configurable() {
    let toml = r#"
[parser]
browser_labels = ["MyCustomRunner"]
finished_markers = ["=== done ==="]
"#;
    let config = Config::parse(toml).unwrap();

    let text = "\
   𐄂 custom
❌ suite > custom
   detail line
MyCustomRunner: all files done
";
    let map = parse_output(text, &config.parser);
    assert_eq!(map["custom"].message.as_deref(), Some("detail line"));

    // The default labels are gone, so "Chromium" no longer terminates
    let text = "\
   𐄂 custom
❌ suite > custom
   detail line
Chromium: swallowed into the body
=== done ===
";
    let map = parse_output(text, &config.parser);
    assert!(map["custom"].message.as_ref().unwrap().contains("Chromium"));
}

#[test]
fn test_interleaved_browser_noise_between_results() {
    let text = "\
Chromium: running 4 files
   ✓ first
Webkit: running 4 files
   ✓ second
";
    let map = parse_output(text, &ParserConfig::default());
    assert_eq!(map.len(), 2);
}
