use crate::common::{pandoc, stable};
use insta::assert_snapshot;
use qmd_babel::format::Format;
use qmd_babel::formats::PandocFormat;
use qmd_babel::tree::{Block, ContainerBody};

#[test]
fn test_nested_divs() {
    let input = "::: {.outer}\nOuter content.\n\n::: {.inner}\nInner content.\n:::\n\nMore outer.\n:::";
    assert_snapshot!(stable(&PandocFormat::default(), input), @r"
    ::: {.outer}
    Outer content.

    ::: {.inner}
    Inner content.
    :::

    More outer.
    :::
    ");
}

#[test]
fn test_nesting_is_kept_in_tree() {
    let doc = PandocFormat::default()
        .parse("::: {.outer}\nA\n::: {.inner}\nB\n:::\nC\n:::")
        .unwrap();
    let [Block::Container(outer)] = doc.blocks.as_slice() else {
        panic!("expected one outer div, got {:?}", doc.blocks);
    };
    assert_eq!(outer.attributes.classes, vec!["outer"]);
    let ContainerBody::Blocks(children) = &outer.body else {
        panic!("div body should hold blocks");
    };
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], Block::Markdown("A".to_string()));
    assert_eq!(children[2], Block::Markdown("C".to_string()));
    let Block::Container(inner) = &children[1] else {
        panic!("expected inner div");
    };
    assert_eq!(inner.attributes.classes, vec!["inner"]);
    assert_eq!(
        inner.body,
        ContainerBody::Blocks(vec![Block::Markdown("B".to_string())])
    );
}

#[test]
fn test_div_attributes_put_classes_first() {
    assert_eq!(
        pandoc("::: {#my-id .my-class}\nContent\n:::"),
        "::: {.my-class #my-id}\nContent\n:::\n"
    );
}

#[test]
fn test_named_div() {
    assert_eq!(
        pandoc("::: callout-note {#tip key=\"v\" .wide}\nBe careful.\n:::"),
        "::: callout-note {.wide #tip key=\"v\"}\nBe careful.\n:::\n"
    );
    assert_eq!(pandoc("::: aside\nx\n:::"), "::: aside\nx\n:::\n");
}

#[test]
fn test_deep_nesting_beyond_distinct_strengths() {
    let input = "::: {.a}\n::: {.b}\n::: {.c}\n::: {.d}\nx\n:::\n:::\n:::\n:::";
    assert_eq!(stable(&PandocFormat::default(), input), format!("{input}\n"));
}

#[test]
fn test_longer_fences_are_normalized() {
    assert_eq!(
        pandoc(":::::: {.wide} ::::::\ntext\n::::::"),
        "::: {.wide}\ntext\n:::\n"
    );
}

#[test]
fn test_empty_div() {
    assert_eq!(pandoc("::: {.empty}\n:::"), "::: {.empty}\n:::\n");
}

#[test]
fn test_stray_closer_is_preserved() {
    let input = "Text\n\n:::\n\nMore";
    assert_eq!(stable(&PandocFormat::default(), input), "Text\n\n:::\n\nMore\n");
}

#[test]
fn test_unclosed_div_is_closed_at_end() {
    assert_eq!(
        stable(&PandocFormat::default(), "::: {.a}\ntext"),
        "::: {.a}\ntext\n:::\n"
    );
}

#[test]
fn test_blocks_are_separated_by_one_blank_line() {
    assert_eq!(
        pandoc("Intro\n::: {.a}\nbody\n:::\nOutro\n\n\n"),
        "Intro\n\n::: {.a}\nbody\n:::\n\nOutro\n"
    );
}
