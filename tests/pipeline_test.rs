//! Integration tests for the parse pipeline.

use textpost::layout::{resolve_layout, FlowDirection, ImagePosition, TextAlignment, VerticalAlign};
use textpost::model::{Document, PostMetadata, Theme};
use textpost::parser::{annotate, parse_posts, parse_posts_with_options, segment, split_posts};
use textpost::{parse_document, parse_document_with_options, OwnedFragment, ParseOptions};

fn create_sample_document() -> String {
    [
        "---\ntheme: dark\n---\nHello ==world==",
        "Second post",
        "---\nimagePosition: left\nverticalAlign: middle\n---\n![a](blob:1)\nText here\n![b](blob:2)",
        "---\ntheme: sunset\nimagePosition: diagonal\nauthor: sam\n---\nClosing ==thoughts==",
    ]
    .join("\n===\n")
}

#[test]
fn test_two_post_example() {
    let posts = parse_posts("---\ntheme: dark\n---\nHello ==world==\n===\nSecond post");
    assert_eq!(posts.len(), 2);

    assert_eq!(posts[0].metadata.theme, "dark");
    assert_eq!(posts[0].metadata.image_position, "top");
    assert_eq!(posts[0].body, "Hello ==world==");
    let fragments: Vec<_> = annotate(&posts[0].body)
        .map(|f| f.to_owned_fragment())
        .collect();
    assert_eq!(
        fragments,
        vec![
            OwnedFragment::Plain("Hello ".to_string()),
            OwnedFragment::Highlighted("world".to_string()),
        ]
    );

    assert_eq!(posts[1].metadata, PostMetadata::default());
    assert_eq!(posts[1].body, "Second post");
}

#[test]
fn test_images_with_left_layout() {
    let views = parse_document("---\nimagePosition: left\n---\n![a](blob:1)\nText here\n![b](blob:2)");
    let view = &views[0];

    let sources: Vec<_> = view.images.iter().map(|i| i.source.as_str()).collect();
    assert_eq!(sources, vec!["blob:1", "blob:2"]);
    assert_eq!(view.text, "\nText here\n");
    assert_eq!(view.layout.flow_direction, FlowDirection::Row);
    assert!(view.layout.image_first());
}

#[test]
fn test_unknown_position_resolves_as_top() {
    assert_eq!(resolve_layout("diagonal", "top"), resolve_layout("top", "top"));
}

#[test]
fn test_no_separator_single_post() {
    let text = "# Title\n\nJust one post with === inline";
    let blocks: Vec<_> = split_posts(text).collect();
    assert_eq!(blocks, vec![text]);

    let posts = parse_posts(text);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, text);
}

#[test]
fn test_header_merges_over_defaults() {
    let posts = parse_posts("---\nverticalAlign: bottom\n---\nBody text");
    let metadata = &posts[0].metadata;

    assert_eq!(metadata.theme, "default");
    assert_eq!(metadata.image_position, "top");
    assert_eq!(metadata.vertical_align, "bottom");
    assert_eq!(posts[0].body, "Body text");
}

#[test]
fn test_segment_is_idempotent() {
    let bodies = [
        "![a](x.png) text ![b](y.png)",
        "!![a](x)[b](y)",
        "nested ![![a](x)](y) marker",
        "no images",
    ];

    for body in bodies {
        let once = segment(body);
        let twice = segment(&once.stripped_body);
        assert!(twice.images.is_empty(), "body {:?}", body);
        assert_eq!(twice.stripped_body, once.stripped_body);
    }
}

#[test]
fn test_layout_total_over_all_inputs() {
    let positions = ["top", "bottom", "left", "right", "", "diagonal", "LEFT "];
    let aligns = ["top", "middle", "bottom", "", "sideways"];

    for position in positions {
        for align in aligns {
            let layout = resolve_layout(position, align);
            assert!(ImagePosition::ALL.contains(&layout.image_position));
            assert!(VerticalAlign::ALL.contains(&layout.vertical_alignment));
        }
    }

    let layout = resolve_layout("right", "bottom");
    assert_eq!(layout.flow_direction, FlowDirection::Row);
    assert!(!layout.image_first());
    assert_eq!(layout.text_alignment, TextAlignment::End);
}

#[test]
fn test_full_document_views() {
    let views = parse_document(&create_sample_document());
    assert_eq!(views.len(), 4);

    assert_eq!(views[0].theme, Theme::Dark);
    assert_eq!(views[2].layout.vertical_alignment, VerticalAlign::Middle);
    assert_eq!(views[2].images.len(), 2);

    let last = &views[3];
    assert_eq!(last.theme, Theme::Sunset);
    assert_eq!(last.layout.image_position, ImagePosition::Top);
    assert_eq!(last.metadata.get("author"), Some("sam"));
    assert_eq!(last.highlights.len(), 1);
}

#[test]
fn test_parallel_matches_sequential() {
    let text = vec![create_sample_document(); 10].join("\n===\n");

    let parallel = parse_document(&text);
    let sequential = parse_document_with_options(&text, &ParseOptions::new().sequential());

    assert_eq!(parallel.len(), 40);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_reparse_is_deterministic() {
    let doc = Document::new(create_sample_document());
    assert_eq!(doc.posts(), doc.posts());
    assert_eq!(
        doc.views(&ParseOptions::default()),
        doc.views(&ParseOptions::default())
    );
}

#[test]
fn test_lenient_mode_keeps_partial_header() {
    let text = "---\ntheme: forest\njust words\n---\nBody";

    let strict = parse_posts(text);
    assert!(!strict[0].has_header);
    assert_eq!(strict[0].body, text);

    let lenient = parse_posts_with_options(text, &ParseOptions::new().lenient());
    assert!(lenient[0].has_header);
    assert_eq!(lenient[0].metadata.theme, "forest");
    assert_eq!(lenient[0].body, "Body");
}

#[test]
fn test_unmatched_markers_are_literal() {
    let views = parse_document("a ==b and ![alt](  \nnext line== c");
    let view = &views[0];

    assert!(view.images.is_empty());
    assert!(view.highlights.is_empty());
    assert_eq!(view.text, "a ==b and ![alt](  \nnext line== c");
}
