use relata_export::markdown::to_markup;

#[test]
fn inline_emphasis() {
    let html = to_markup("**Olá** Acme Corp e *itálico*").html;
    assert!(html.contains("<strong>Olá</strong> Acme Corp"));
    assert!(html.contains("<em>itálico</em>"));
}

#[test]
fn headings_lists_and_quotes() {
    let md = "# Escopo\n\n## Achados\n\n- um\n- dois\n\n1. primeiro\n\n> citação\n";
    let html = to_markup(md).html;
    assert!(html.contains("<h1>Escopo</h1>"));
    assert!(html.contains("<h2>Achados</h2>"));
    assert!(html.contains("<ul>"));
    assert!(html.contains("<li>dois</li>"));
    assert!(html.contains("<ol>"));
    assert!(html.contains("<blockquote>"));
}

#[test]
fn tables_are_supported() {
    let md = "| Host | Severidade |\n|------|------------|\n| web01 | Alta |\n";
    let html = to_markup(md).html;
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>Host</th>"));
    assert!(html.contains("<td>web01</td>"));
}

#[test]
fn strikethrough_is_supported() {
    let html = to_markup("~~corrigido~~").html;
    assert!(html.contains("<del>corrigido</del>"));
}

#[test]
fn fenced_code_is_highlighted_and_escaped() {
    let md = "```rust\nfn main() { let ok = 1 < 2; }\n```\n";
    let html = to_markup(md).html;
    assert!(html.contains("<pre"));
    assert!(html.contains("main"));
    assert!(html.contains("&lt;"));
    assert!(!html.contains("```"));
}

#[test]
fn unknown_fence_language_still_renders() {
    let html = to_markup("```no-such-language\nplain text\n```\n").html;
    assert!(html.contains("<pre"));
    assert!(html.contains("plain text"));
}

#[test]
fn inline_code() {
    let html = to_markup("use `nmap -sV`").html;
    assert!(html.contains("<code>nmap -sV</code>"));
}

#[test]
fn raw_html_is_escaped() {
    let block = to_markup("<script>alert(1)</script>\n").html;
    assert!(!block.contains("<script>"));
    assert!(block.contains("&lt;script&gt;"));

    let inline = to_markup("texto <b>negrito</b> fim").html;
    assert!(!inline.contains("<b>"));
    assert!(inline.contains("&lt;b&gt;"));
}

#[test]
fn image_urls_are_collected_in_order() {
    let md = "![a](https://cdn.example.com/a.png)\n\ntexto\n\n![b](img/b.jpg \"B\")\n";
    let markup = to_markup(md);
    assert_eq!(
        markup.image_urls,
        vec!["https://cdn.example.com/a.png".to_string(), "img/b.jpg".to_string()]
    );
    assert!(markup.html.contains("src=\"https://cdn.example.com/a.png\""));
}

#[test]
fn empty_image_destinations_are_not_collected() {
    let markup = to_markup("![vazio]() e ![espaço]( <> ) e ![ok](x.png)");
    assert_eq!(markup.image_urls, vec!["x.png".to_string()]);
}

#[test]
fn malformed_markdown_degrades_to_text() {
    let html = to_markup("**sem fechamento").html;
    assert!(html.contains("**sem fechamento"));
}

#[test]
fn empty_input_is_empty_fragment() {
    let markup = to_markup("");
    assert!(markup.html.is_empty());
    assert!(markup.image_urls.is_empty());
}
