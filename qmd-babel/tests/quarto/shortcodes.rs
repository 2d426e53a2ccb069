use crate::common::{pandoc, quarto, stable};
use qmd_babel::format::Format;
use qmd_babel::formats::QuartoFormat;
use qmd_babel::tree::Block;
use rstest::rstest;

#[test]
fn test_shortcode_round_trips_exactly() {
    assert_eq!(quarto("{{< meta title >}}"), "{{< meta title >}}\n");
}

#[test]
fn test_shortcode_is_a_leaf_with_raw() {
    let doc = QuartoFormat::default()
        .parse("{{< include \"_setup.qmd\" >}}")
        .unwrap();
    let [Block::Leaf(leaf)] = doc.blocks.as_slice() else {
        panic!("expected a leaf, got {:?}", doc.blocks);
    };
    assert_eq!(leaf.name, "shortcode");
    assert_eq!(leaf.attributes.get("raw"), Some("include \"_setup.qmd\""));
}

#[rstest]
#[case("{{< include \"_setup.qmd\" >}}")]
#[case("{{< video https://example.com/v.mp4 title=\"A \\\"quoted\\\" title\" >}}")]
#[case("{{< var version >}}")]
#[case("{{< kbd Shift-Ctrl-P >}}")]
fn test_shortcode_values_survive(#[case] input: &str) {
    assert_eq!(stable(&QuartoFormat::default(), input), format!("{input}\n"));
}

#[rstest]
#[case("Title: {{< meta title >}}")]
#[case("{{{< meta title >}}}")]
#[case("    {{< meta title >}}")]
#[case("{{< a >}} {{< b >}}")]
fn test_shortcode_lookalikes_are_text(#[case] input: &str) {
    let doc = QuartoFormat::default().parse(input).unwrap();
    assert!(
        matches!(doc.blocks.as_slice(), [Block::Markdown(_)]),
        "expected plain markdown for {input:?}, got {:?}",
        doc.blocks
    );
    assert_eq!(quarto(input), format!("{input}\n"));
}

#[test]
fn test_indented_shortcode_loses_indent() {
    assert_eq!(
        stable(&QuartoFormat::default(), "  {{< pagebreak >}}"),
        "{{< pagebreak >}}\n"
    );
}

#[test]
fn test_shortcode_in_code_block_is_untouched() {
    let input = "```qmd\n{{< meta title >}}\n```";
    let doc = QuartoFormat::default().parse(input).unwrap();
    assert!(matches!(doc.blocks.as_slice(), [Block::Code(_)]));
    assert_eq!(quarto(input), format!("{input}\n"));
}

#[test]
fn test_pandoc_ignores_shortcodes() {
    let doc = qmd_babel::formats::PandocFormat::default()
        .parse("{{< meta title >}}")
        .unwrap();
    assert!(matches!(doc.blocks.as_slice(), [Block::Markdown(_)]));
    assert_eq!(pandoc("{{< meta title >}}"), "{{< meta title >}}\n");
}

#[test]
fn test_shortcode_inside_div() {
    assert_eq!(
        quarto("::: {.column}\n{{< embed nb.ipynb#fig >}}\n:::"),
        "::: {.column}\n{{< embed nb.ipynb#fig >}}\n:::\n"
    );
}

#[test]
fn test_shortcode_directive_syntax_is_text() {
    let input = "::shortcode{raw=\"meta title\"}";
    let doc = QuartoFormat::default().parse(input).unwrap();
    assert!(matches!(doc.blocks.as_slice(), [Block::Markdown(_)]));
    assert_eq!(quarto(input), format!("{input}\n"));
}
