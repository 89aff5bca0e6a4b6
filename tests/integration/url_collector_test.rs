// Tests for URL collection from pasted lines

use bvdl::commands::download::collect_urls;
use bvdl::core::{classify_line, extract_url, LineVerdict};
use bvdl::ui::{InputEvent, ScriptedInput};

#[test]
fn test_share_text_scenario() {
    let mut input = ScriptedInput::from_lines(&["见 https://www.bilibili.com/video/BV1xyz 真好", ""]);

    let urls = collect_urls(&mut input);

    assert_eq!(urls, vec!["https://www.bilibili.com/video/BV1xyz"]);
}

#[test]
fn test_empty_first_line_stops_immediately() {
    let mut input = ScriptedInput::from_lines(&[""]);
    assert!(collect_urls(&mut input).is_empty());
    assert_eq!(input.prompts().len(), 1);
}

#[test]
fn test_rejected_lines_do_not_count() {
    let mut input = ScriptedInput::from_lines(&[
        "not a link",
        "https://www.youtube.com/watch?v=abc",
        "https://b23.tv/AbC123",
        "",
    ]);

    let urls = collect_urls(&mut input);

    assert_eq!(urls, vec!["https://b23.tv/AbC123"]);
    // The counter in the prompt only advances on accepted URLs
    assert_eq!(
        input.prompts(),
        &[
            "URL #1 (Enter to finish): ",
            "URL #1 (Enter to finish): ",
            "URL #1 (Enter to finish): ",
            "URL #2 (Enter to finish): ",
        ]
    );
}

#[test]
fn test_duplicates_are_kept_in_order() {
    let mut input = ScriptedInput::from_lines(&[
        "https://www.bilibili.com/video/BV1a",
        "https://b23.tv/zz",
        "https://www.bilibili.com/video/BV1a",
        "",
    ]);

    assert_eq!(
        collect_urls(&mut input),
        vec![
            "https://www.bilibili.com/video/BV1a",
            "https://b23.tv/zz",
            "https://www.bilibili.com/video/BV1a",
        ]
    );
}

#[test]
fn test_end_of_input_keeps_collected_urls() {
    let mut input = ScriptedInput::from_lines(&["https://b23.tv/one"]);
    assert_eq!(collect_urls(&mut input), vec!["https://b23.tv/one"]);
}

#[test]
fn test_interrupt_discards_everything() {
    let mut input = ScriptedInput::new(vec![
        InputEvent::Line("https://b23.tv/one".to_string()),
        InputEvent::Interrupted,
        InputEvent::Line("https://b23.tv/two".to_string()),
    ]);

    assert!(collect_urls(&mut input).is_empty());
    assert_eq!(input.remaining(), 1);
}

#[test]
fn test_extracted_substring_only() {
    let lines = vec![
        (
            "【MV】好歌 https://www.bilibili.com/video/BV1GJ411x7h7/?share_source=copy_web&vd_source=abc 分享自哔哩哔哩",
            "https://www.bilibili.com/video/BV1GJ411x7h7/?share_source=copy_web&vd_source=abc",
        ),
        ("快看https://b23.tv/q1W2e3", "https://b23.tv/q1W2e3"),
        (
            "https://bilibili.com/video/BV1xyz",
            "https://bilibili.com/video/BV1xyz",
        ),
    ];

    for (line, expected) in lines {
        assert_eq!(extract_url(line).as_deref(), Some(expected), "Line: {}", line);
        assert_eq!(classify_line(line), LineVerdict::Accept(expected.to_string()));
    }
}
