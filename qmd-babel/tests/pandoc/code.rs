use crate::common::{pandoc, stable};
use qmd_babel::embedded::EmbeddedFormatters;
use qmd_babel::error::{EmbedError, FormatError, ParseError};
use qmd_babel::format::Format;
use qmd_babel::formats::PandocFormat;
use qmd_babel::tree::Block;

#[test]
fn test_fenced_code_is_opaque() {
    let input = "```markdown\n::: {.callout}\n$$\nE=mc^2\n$$\n:::\n```";
    let doc = PandocFormat::default().parse(input).unwrap();
    let [Block::Code(code)] = doc.blocks.as_slice() else {
        panic!("expected a code block, got {:?}", doc.blocks);
    };
    assert_eq!(code.language(), Some("markdown"));
    assert!(code.body().contains("$$\nE=mc^2\n$$"));
    assert_eq!(stable(&PandocFormat::default(), input), format!("{input}\n"));
}

#[test]
fn test_tilde_fence_inside_div() {
    let input = "::: {.example}\n~~~~\n:::\n~~~~\n:::";
    assert_eq!(pandoc(input), format!("{input}\n"));
}

#[test]
fn test_indented_code_is_opaque() {
    let input = "Example:\n\n    ::: {.x}\n    $$";
    assert_eq!(pandoc(input), format!("{input}\n"));
}

#[test]
fn test_html_comment_is_opaque() {
    let input = "<!--\n::: {.draft}\n-->\n\nText";
    assert_eq!(pandoc(input), format!("{input}\n"));
}

#[test]
fn test_front_matter_is_preserved() {
    let input = "---\ntitle: Test\nauthor: Author\n---\n\nContent here.";
    assert_eq!(pandoc(input), format!("{input}\n"));
}

#[test]
fn test_embedded_formatter_runs_on_known_languages() {
    let mut embedded = EmbeddedFormatters::new();
    embedded.register(
        "sql",
        Box::new(|code: &str, _: &str| -> Result<String, EmbedError> {
            Ok(code.to_uppercase())
        }),
    );
    embedded.register(
        "json",
        Box::new(|_: &str, language: &str| -> Result<String, EmbedError> {
            Err(EmbedError::new(language, "unexpected end of input"))
        }),
    );
    let format = PandocFormat::default().with_embedded(embedded);

    assert_eq!(
        format.format("```sql\nselect *\nfrom t\n```").unwrap(),
        "```sql\nSELECT *\nFROM T\n```\n"
    );
    assert_eq!(
        format.format("```json\n{\"a\":\n```").unwrap(),
        "```json\n{\"a\":\n```\n"
    );
    assert_eq!(
        format.format("```rust\nfn main(){}\n```").unwrap(),
        "```rust\nfn main(){}\n```\n"
    );
}

#[test]
fn test_malformed_attributes_are_positioned() {
    let err = PandocFormat::default()
        .format("Intro\n\n::: {.a key=\"unterminated}\nbody\n:::")
        .unwrap_err();
    match err {
        FormatError::Parse(ParseError::InvalidAttributes { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected InvalidAttributes, got {other:?}"),
    }
}

#[test]
fn test_unclosed_code_inside_div_is_closed_before_the_div() {
    let input = "::: {.a}\n```\ncode\n:::";
    let out = stable(&PandocFormat::default(), input);
    assert_eq!(out, "::: {.a}\n```\ncode\n:::\n```\n:::\n");

    let doc = PandocFormat::default().parse(input).unwrap();
    let [Block::Container(div)] = doc.blocks.as_slice() else {
        panic!("expected one div, got {:?}", doc.blocks);
    };
    assert!(matches!(
        &div.body,
        qmd_babel::tree::ContainerBody::Blocks(children)
            if matches!(children.as_slice(), [Block::Code(code)] if code.closing.as_deref() == Some("```"))
    ));
}
