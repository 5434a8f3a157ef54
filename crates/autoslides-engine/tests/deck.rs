use autoslides_engine::{ConvertError, DeckOptions, Layout, convert};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

const LECTURE: &str = r"---
title: Demo
---
# Rust Basics

Rust is fast. It is **memory safe**.

## Lists

- one
- two
  - nested

```rust
fn main() {}
```

| Item | Qty |
|:-----|----:|
| apple | 3 |

$$
a &= b \\
c &= d
$$
";

#[test]
fn test_lecture_renders_to_deck() {
    let deck = convert(LECTURE, &DeckOptions::default()).unwrap();

    assert_eq!(deck.len(), 7);
    assert_snapshot!("lecture", deck.to_string());
}

#[test]
fn test_every_slide_is_followed_by_a_separator() {
    let deck = convert(LECTURE, &DeckOptions::default()).unwrap();

    let rendered = deck.to_string();

    assert_eq!(rendered.matches("\n\n---\n\n").count(), deck.len());
    assert!(rendered.ends_with("</div>\n\n---\n\n"));
}

#[rstest]
#[case(6, 2)]
#[case(3, 4)]
#[case(12, 1)]
#[case(1, 12)]
fn test_long_code_block_follows_line_budget(#[case] lines: usize, #[case] expected_slides: usize) {
    let code = (1..=12).map(|i| format!("let x{i} = {i};\n")).collect::<String>();
    let markdown = format!("```rust\n{code}```\n");
    let options = DeckOptions {
        layout: Layout::new(50, lines),
        ..DeckOptions::default()
    };

    let deck = convert(&markdown, &options).unwrap();

    assert_eq!(deck.len(), expected_slides);
    assert!(deck.slides().iter().all(|slide| slide.starts_with("```rust\n")));
}

#[test]
fn test_title_level_controls_title_slides() {
    let markdown = "# One\n\n## Two\n\n### Three\n\nBody.";
    let options = DeckOptions {
        title_level: 1,
        ..DeckOptions::default()
    };

    let deck = convert(markdown, &options).unwrap();

    assert_eq!(
        deck.slides(),
        &[
            "class: center, middle\n# One".to_string(),
            "# Three\n\n- Body.".to_string(),
        ]
    );
}

#[test]
fn test_inline_math_survives_conversion() {
    let deck = convert("Ratio $\\frac{a}{b}$ holds. Done.", &DeckOptions::default()).unwrap();

    assert_eq!(
        deck.slides(),
        &["- Ratio $\\frac{a}{b}$ holds.\n- Done.".to_string()]
    );
}

#[test]
fn test_html_block_is_reported() {
    let err = convert("# Page\n\n<table>\n</table>\n", &DeckOptions::default()).unwrap_err();

    assert!(matches!(err, ConvertError::UnsupportedNode { .. }));
    assert_eq!(err.offset(), Some(8));
    assert_eq!(err.to_string(), "Unsupported html block at byte 8");
}

#[test]
fn test_code_keeps_backslashes_and_dollars() {
    let fence = "```sh\ndocker run -e A=$HOME \\\n  -e B=$PATH img\n```";

    let deck = convert(fence, &DeckOptions::default()).unwrap();

    assert_eq!(deck.slides(), &[fence.to_string()]);

    let deck = convert("Run `echo $A\\n$B` now.", &DeckOptions::default()).unwrap();

    assert_eq!(deck.slides(), &["- Run `echo $A\\n$B` now.".to_string()]);
}

#[test]
fn test_underscores_in_inline_math_are_not_emphasis() {
    let deck = convert("Let $(a)_{i}$ and $x_{j}$ hold.", &DeckOptions::default()).unwrap();

    assert_eq!(deck.slides(), &["- Let $(a)_{i}$ and $x_{j}$ hold.".to_string()]);
}

#[test]
fn test_display_math_row_starting_with_plus_stays_math() {
    let deck = convert("$$\na \\\\\n+ b\n$$\n", &DeckOptions::default()).unwrap();

    assert_eq!(deck.slides(), &["<div>\n$$\na\\\\\n+ b\n$$\n</div>".to_string()]);
}

#[test]
fn test_footnote_definition_is_reported() {
    let err = convert("Claim[^1].\n\n[^1]: Source.", &DeckOptions::default()).unwrap_err();

    assert!(matches!(err, ConvertError::UnsupportedNode { .. }));
    assert_eq!(err.offset(), Some(12));
    assert_eq!(err.to_string(), "Unsupported footnote definition at byte 12");
}
