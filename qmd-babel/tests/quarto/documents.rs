use crate::common::{quarto, stable};
use qmd_babel::formats::QuartoFormat;
use qmd_babel::{format_source, Dialect, FormatRegistry};

const DOCUMENT: &str = "# Title

$$
E=mc^2
$$ {#eq:test}

::: {.note}
Content
:::

{{< meta title >}}";

#[test]
fn test_mixed_document_round_trips() {
    assert_eq!(
        stable(&QuartoFormat::default(), DOCUMENT),
        format!("{DOCUMENT}\n")
    );
}

#[test]
fn test_mixed_document_snapshot() {
    let source = "---
title: Report
---

::: {#fig-layout layout-ncol=2 .column-page}
$$
\\int_0^1 f(x)\\,dx
$$ {#eq:area}

{{< embed analysis.ipynb#fig-plot >}}
:::

See @eq:area.";
    insta::assert_snapshot!(quarto(source), @r#"
    ---
    title: Report
    ---

    ::: {.column-page #fig-layout layout-ncol="2"}
    $$
    \int_0^1 f(x)\,dx
    $$ {#eq:area}

    {{< embed analysis.ipynb#fig-plot >}}
    :::

    See @eq:area.
    "#);
}

#[test]
fn test_citations_and_definition_lists_pass_through() {
    let source = "As shown [@smith2020, pp. 33-35; @doe2019].

Term
:   Definition of the term.";
    assert_eq!(quarto(source), format!("{source}\n"));
}

#[test]
fn test_format_source_picks_dialect() {
    assert_eq!(
        format_source("{{< pagebreak >}}", Dialect::Quarto).unwrap(),
        "{{< pagebreak >}}\n"
    );
    assert_eq!(
        format_source("::: {#a .b}\nx\n:::", Dialect::Pandoc).unwrap(),
        "::: {.b #a}\nx\n:::\n"
    );
}

#[test]
fn test_registry_formats_by_filename() {
    let registry = FormatRegistry::default();
    let name = registry
        .detect_format_from_filename("chapters/intro.qmd")
        .unwrap();
    assert_eq!(name, "quarto");
    assert_eq!(
        registry.format("::: {#a .b}\n{{< var x >}}\n:::", &name).unwrap(),
        "::: {.b #a}\n{{< var x >}}\n:::\n"
    );
}
