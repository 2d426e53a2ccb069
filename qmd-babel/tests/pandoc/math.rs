use crate::common::{pandoc, stable};
use insta::assert_snapshot;
use qmd_babel::format::Format;
use qmd_babel::formats::PandocFormat;
use qmd_babel::tree::{Block, ContainerBody};

#[test]
fn test_labeled_math_keeps_all_attributes() {
    assert_eq!(
        pandoc("$$\nx^2\n$$ {#eq:test .important key=\"value\"}"),
        "$$\nx^2\n$$ {#eq:test .important key=\"value\"}\n"
    );
}

#[test]
fn test_math_label_uses_id_first() {
    assert_eq!(
        pandoc("$$\nx\n$$ {.big #eq:a}"),
        "$$\nx\n$$ {#eq:a .big}\n"
    );
}

#[test]
fn test_math_without_label() {
    assert_eq!(pandoc("$$\nE=mc^2\n$$"), "$$\nE=mc^2\n$$\n");
}

#[test]
fn test_math_content_is_not_markdown() {
    let input = "$$\n\\begin{aligned}\na_1 * b_2 &= [x] \\\\\n:::\n\\end{aligned}\n$$";
    assert_eq!(stable(&PandocFormat::default(), input), format!("{input}\n"));
}

#[test]
fn test_math_content_is_trimmed() {
    assert_eq!(pandoc("$$\n\n  x + y\n\n$$"), "$$\nx + y\n$$\n");
}

#[test]
fn test_single_line_math() {
    assert_eq!(
        pandoc("$$ E=mc^2 $$ {#eq:inline}"),
        "$$ E=mc^2 $$ {#eq:inline}\n"
    );
    assert_eq!(pandoc("$$a[0]$$"), "$$ a[0] $$\n");
}

#[test]
fn test_single_line_math_is_a_leaf() {
    let doc = PandocFormat::default()
        .parse("$$ \\left[ x \\right] $$ {#eq:br}")
        .unwrap();
    let [Block::Leaf(leaf)] = doc.blocks.as_slice() else {
        panic!("expected a leaf, got {:?}", doc.blocks);
    };
    assert_eq!(leaf.name, "math");
    assert_eq!(leaf.label.as_deref(), Some("\\left[ x \\right]"));
    assert_eq!(leaf.attributes.id.as_deref(), Some("eq:br"));
}

#[test]
fn test_math_block_is_a_raw_container() {
    let doc = PandocFormat::default().parse("$$\na\n\nb\n$$ {#eq:x}").unwrap();
    let [Block::Container(math)] = doc.blocks.as_slice() else {
        panic!("expected a container, got {:?}", doc.blocks);
    };
    assert_eq!(math.name, "math");
    assert_eq!(
        math.body,
        ContainerBody::Raw(vec!["a".to_string(), String::new(), "b".to_string()])
    );
}

#[test]
fn test_math_inside_div() {
    let input = "::: {.box}\nSee below.\n\n$$\nx = 1\n$$ {#eq:one}\n:::";
    assert_snapshot!(stable(&PandocFormat::default(), input), @r"
    ::: {.box}
    See below.

    $$
    x = 1
    $$ {#eq:one}
    :::
    ");
}

#[test]
fn test_math_in_inline_code_is_untouched() {
    assert_eq!(
        pandoc("Use `$$ ... $$` for display math."),
        "Use `$$ ... $$` for display math.\n"
    );
}

#[test]
fn test_unclosed_math_is_kept() {
    assert_eq!(
        stable(&PandocFormat::default(), "Intro\n\n$$\nx^2"),
        "Intro\n\n$$\nx^2\n"
    );
}

#[test]
fn test_colon_only_lines_stay_inside_math() {
    let input = "$$\na\n:::::\nb\n$$";
    assert_eq!(
        stable(&PandocFormat::default(), input),
        format!("{input}\n")
    );
}

#[test]
fn test_colon_only_lines_stay_inside_nested_math() {
    let input = "::: {.a}\n::: {.b}\n$$\nx\n:::\ny\n$$\n:::\n:::";
    let doc = PandocFormat::default().parse(input).unwrap();
    let [Block::Container(outer)] = doc.blocks.as_slice() else {
        panic!("expected one div, got {:?}", doc.blocks);
    };
    let ContainerBody::Blocks(outer_children) = &outer.body else {
        panic!("expected blocks");
    };
    let [Block::Container(inner)] = outer_children.as_slice() else {
        panic!("expected the inner div, got {outer_children:?}");
    };
    let ContainerBody::Blocks(inner_children) = &inner.body else {
        panic!("expected blocks");
    };
    let [Block::Container(math)] = inner_children.as_slice() else {
        panic!("expected only math in the inner div, got {inner_children:?}");
    };
    assert_eq!(
        math.body,
        ContainerBody::Raw(vec!["x".to_string(), ":::".to_string(), "y".to_string()])
    );

    assert_eq!(
        stable(&PandocFormat::default(), input),
        format!("{input}\n")
    );
}

#[test]
fn test_unclosed_math_inside_div_keeps_the_div_closer() {
    assert_eq!(
        stable(&PandocFormat::default(), "::: {.a}\n$$\nx\n:::"),
        "::: {.a}\n$$\nx\n:::\n"
    );
}

#[test]
fn test_directive_lookalikes_stay_text() {
    let input = "::math[x]\n\n\\::math[y]";
    let doc = PandocFormat::default().parse(input).unwrap();
    assert!(matches!(doc.blocks.as_slice(), [Block::Markdown(_)]));
    assert_eq!(pandoc(input), format!("{input}\n"));
}
