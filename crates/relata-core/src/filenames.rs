//! Download filename conventions.
//!
//! Pure string functions. Names are deliberately ASCII-only: they go into a
//! plain `Content-Disposition: attachment; filename="..."` header with no
//! RFC 5987 `filename*` variant, so accented letters are replaced too
//! ("Relatório" becomes "Relat_rio").

/// `relatorio_<title>_<client>.pdf`
pub fn report_pdf(title: &str, client_name: &str) -> String {
    format!(
        "relatorio_{}_{}.pdf",
        sanitize_component(title),
        sanitize_component(client_name)
    )
}

pub fn template_json(id: i64) -> String {
    format!("template_{id}.json")
}

/// Replace anything that is not an ASCII letter, digit, `-`, `_` or `.`
/// with `_`, one underscore per `char`. Spaces and non-ASCII letters become
/// underscores like everything else.
pub fn sanitize_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
