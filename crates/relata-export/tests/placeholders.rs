use jiff::civil::date;

use relata_core::models::placeholder::Placeholder;
use relata_export::placeholders::{PlaceholderContext, long_date, resolve};

fn ctx() -> PlaceholderContext<'static> {
    PlaceholderContext {
        report_number: "4002506",
        title: "Teste de Intrusão",
        client_name: "Acme Corp",
        company_name: "Segura Ltda",
        today: date(2025, 6, 26),
    }
}

#[test]
fn replaces_report_tokens() {
    let out = resolve(
        "Relatório {{REPORT_NUMBER}}: {{REPORT_TITLE}} para {{REPORT_CLIENT}} por {{COMPANY_NAME}}",
        &ctx(),
    );
    assert_eq!(
        out,
        "Relatório 4002506: Teste de Intrusão para Acme Corp por Segura Ltda"
    );
}

#[test]
fn replaces_date_tokens() {
    let c = ctx();
    assert_eq!(resolve("{{CURRENT_DATE}}", &c), "26/06/2025");
    assert_eq!(resolve("{{CURRENT_DATE_FULL}}", &c), "26 de Junho de 2025");
    assert_eq!(resolve("{{CURRENT_YEAR}}", &c), "2025");
    assert_eq!(resolve("{{CURRENT_MONTH}}", &c), "06");
    assert_eq!(resolve("{{CURRENT_DAY}}", &c), "26");
}

#[test]
fn legacy_aliases_match_current_tokens() {
    let c = ctx();
    assert_eq!(
        resolve("{{PROPOSAL_NUMBER}}", &c),
        resolve("{{REPORT_NUMBER}}", &c)
    );
    assert_eq!(
        resolve("{{PROPOSAL_TITLE}}", &c),
        resolve("{{REPORT_TITLE}}", &c)
    );
    assert_eq!(resolve("{{CLIENT_NAME}}", &c), resolve("{{REPORT_CLIENT}}", &c));
}

#[test]
fn every_catalog_token_is_replaced() {
    let c = ctx();
    for placeholder in Placeholder::ALL {
        let out = resolve(&placeholder.key(), &c);
        assert!(!out.contains("{{"), "{} was left unresolved", placeholder.name());
        assert_eq!(out, c.value(placeholder));
    }
}

#[test]
fn unknown_and_malformed_tokens_are_kept() {
    let c = ctx();
    assert_eq!(resolve("{{FOO_BAR}}", &c), "{{FOO_BAR}}");
    assert_eq!(resolve("{{client_name}}", &c), "{{client_name}}");
    assert_eq!(resolve("{{ CLIENT_NAME }}", &c), "{{ CLIENT_NAME }}");
    assert_eq!(resolve("{CLIENT_NAME}", &c), "{CLIENT_NAME}");
    assert_eq!(resolve("{{CLIENT_NAME}", &c), "{{CLIENT_NAME}");
}

#[test]
fn adjacent_and_repeated_tokens() {
    let c = ctx();
    assert_eq!(
        resolve("{{REPORT_NUMBER}}{{CURRENT_YEAR}}", &c),
        "40025062025"
    );
    assert_eq!(
        resolve("{{CLIENT_NAME}} e {{CLIENT_NAME}}", &c),
        "Acme Corp e Acme Corp"
    );
}

#[test]
fn substituted_values_are_not_rescanned() {
    let c = PlaceholderContext {
        client_name: "{{COMPANY_NAME}}",
        ..ctx()
    };
    assert_eq!(resolve("Cliente: {{CLIENT_NAME}}", &c), "Cliente: {{COMPANY_NAME}}");
}

#[test]
fn empty_and_token_free_text_pass_through() {
    let c = ctx();
    assert_eq!(resolve("", &c), "");
    assert_eq!(resolve("sem marcadores { } {{}}", &c), "sem marcadores { } {{}}");
}

#[test]
fn long_date_pads_day_and_names_month() {
    assert_eq!(long_date(date(2025, 1, 5)), "05 de Janeiro de 2025");
    assert_eq!(long_date(date(2024, 3, 31)), "31 de Março de 2024");
    assert_eq!(long_date(date(2023, 12, 1)), "01 de Dezembro de 2023");
}
