use relata_core::error::CoreError;
use relata_core::filenames;
use relata_core::models::block::{BlockFavorite, BlockRecord, DEFAULT_BLOCK_TYPE};
use relata_core::models::pdf_config::{HeaderImagePlacement, PdfConfigRecord};
use relata_core::models::placeholder::Placeholder;
use relata_core::models::report::{CreatedAt, ReportRecord, ReportStatus, next_report_number};
use relata_core::models::template::{Template, TemplateExport};

fn block(title: &str, order: i32) -> BlockRecord {
    BlockRecord {
        title: title.to_string(),
        content: String::new(),
        order,
        block_type: DEFAULT_BLOCK_TYPE.to_string(),
        page_break_before: false,
    }
}

#[test]
fn report_record_accepts_storage_payload() {
    let json = r#"{
        "id": 7,
        "proposal_number": "4002506",
        "report_number": "4002506",
        "title": "Relatório X",
        "client_name": "Acme Corp",
        "created_at": "2025-06-26T14:30:00Z",
        "blocks": [
            {"title": "B", "content": "two", "order": 2},
            {"title": "A", "content": "one", "order": 1, "page_break_before": true}
        ]
    }"#;

    let report: ReportRecord = serde_json::from_str(json).unwrap();
    assert_eq!(report.number(), "4002506");
    assert_eq!(report.status, ReportStatus::Draft);
    assert_eq!(report.created_at.display_date(), "26/06/2025");

    let ordered = report.ordered_blocks().unwrap();
    assert_eq!(ordered[0].title, "A");
    assert!(ordered[0].page_break_before);
    assert_eq!(ordered[1].title, "B");
    assert_eq!(ordered[1].block_type, "text");
}

#[test]
fn legacy_number_used_when_current_missing() {
    let json = r#"{"id": 1, "proposal_number": "123", "title": "t",
        "client_name": "c", "created_at": "hoje", "blocks": []}"#;
    let report: ReportRecord = serde_json::from_str(json).unwrap();
    assert_eq!(report.number(), "123");
}

#[test]
fn created_at_variants_format() {
    let naive: CreatedAt = serde_json::from_str(r#""2024-01-05T09:00:00.123456""#).unwrap();
    assert!(matches!(naive, CreatedAt::Civil(_)));
    assert_eq!(naive.display_date(), "05/01/2024");

    let text: CreatedAt = serde_json::from_str(r#""5 de Janeiro""#).unwrap();
    assert_eq!(text.display_date(), "5 de Janeiro");
}

#[test]
fn ordered_blocks_is_stable_for_equal_orders() {
    let report = ReportRecord {
        id: 1,
        report_number: "1".to_string(),
        proposal_number: None,
        title: String::new(),
        client_name: String::new(),
        created_at: CreatedAt::Text(String::new()),
        status: ReportStatus::Sent,
        template_id: None,
        blocks: Some(vec![block("first", 0), block("second", 0), block("zero", -1)]),
    };
    let titles: Vec<&str> = report
        .ordered_blocks()
        .unwrap()
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(titles, ["zero", "first", "second"]);
}

#[test]
fn missing_block_container_is_an_error() {
    let json = r#"{"id": 1, "title": "t", "client_name": "c", "created_at": "x"}"#;
    let report: ReportRecord = serde_json::from_str(json).unwrap();
    assert!(matches!(
        report.ordered_blocks(),
        Err(CoreError::MissingField(field)) if field == "blocks"
    ));
}

#[test]
fn next_number_scans_numeric_values() {
    assert_eq!(next_report_number(Vec::<String>::new()), "4002506");
    assert_eq!(next_report_number(["abc", ""]), "4002506");
    assert_eq!(next_report_number(["4002506", "4002510", "x", "4002507"]), "4002511");
}

#[test]
fn template_import_normalizes_order() {
    let json = r#"{
        "name": "  Pentest Web  ",
        "blocks": [
            {"title": "Escopo", "content": "...", "order": 9},
            {"title": "Achados", "content": "...", "order": 9, "page_break_before": true}
        ]
    }"#;
    let template = TemplateExport::from_json(json).unwrap();
    assert_eq!(template.name, "Pentest Web");
    assert_eq!(template.description, "");
    assert_eq!(template.blocks[0].order, 0);
    assert_eq!(template.blocks[1].order, 1);
    assert!(template.blocks[1].page_break_before);
}

#[test]
fn template_import_rejects_incomplete_files() {
    let no_name = TemplateExport::from_json(r#"{"blocks": []}"#);
    assert!(matches!(no_name, Err(CoreError::InvalidTemplate(_))));

    let blank_name = TemplateExport::from_json(r#"{"name": " ", "blocks": []}"#);
    assert!(matches!(blank_name, Err(CoreError::InvalidTemplate(_))));

    let no_blocks = TemplateExport::from_json(r#"{"name": "x"}"#);
    assert!(matches!(no_blocks, Err(CoreError::InvalidTemplate(_))));

    let garbage = TemplateExport::from_json("not json");
    assert!(matches!(garbage, Err(CoreError::Serialization(_))));
}

#[test]
fn template_export_round_trips_through_import() {
    let template = Template {
        id: 3,
        name: "Infra".to_string(),
        description: "Rede interna".to_string(),
        blocks: vec![block("b", 1), block("a", 0)],
    };
    let exported = template.to_export();
    assert_eq!(exported.blocks[0].title, "a");

    let imported = TemplateExport::from_json(&exported.to_json().unwrap()).unwrap();
    assert_eq!(imported, exported);
}

#[test]
fn favorite_becomes_block_at_order() {
    let favorite = BlockFavorite {
        id: 1,
        name: "Conclusão padrão".to_string(),
        title: "Conclusão".to_string(),
        content: "Obrigado, {{CLIENT_NAME}}.".to_string(),
        block_type: "text".to_string(),
        page_break_before: true,
    };
    let block = favorite.to_block(4);
    assert_eq!(block.order, 4);
    assert_eq!(block.title, "Conclusão");
    assert!(block.page_break_before);
}

#[test]
fn pdf_config_record_tolerates_partial_rows() {
    let config: PdfConfigRecord =
        serde_json::from_str(r#"{"company_name": "Acme", "header_image_placement": "full_width"}"#)
            .unwrap();
    assert_eq!(config.company_name.as_deref(), Some("Acme"));
    assert_eq!(config.header_image_placement, Some(HeaderImagePlacement::FullWidth));
    assert_eq!(config.paper_size, None);
}

#[test]
fn placeholder_catalog_is_consistent() {
    for placeholder in Placeholder::ALL {
        assert_eq!(Placeholder::from_name(placeholder.name()), Some(placeholder));
        assert!(placeholder.key().starts_with("{{"));
        assert!(placeholder.key().ends_with("}}"));
    }
    assert_eq!(Placeholder::ReportNumber.key(), "{{REPORT_NUMBER}}");
    assert!(Placeholder::ClientName.is_legacy());
    assert_eq!(Placeholder::ClientName.canonical(), Placeholder::ReportClient);
    assert!(!Placeholder::CompanyName.is_legacy());
    assert_eq!(Placeholder::from_name("report_number"), None);
}

#[test]
fn report_filename_replaces_unsafe_characters() {
    assert_eq!(
        filenames::report_pdf("Relatorio Final", "Acme Corp"),
        "relatorio_Relatorio_Final_Acme_Corp.pdf"
    );
    assert_eq!(
        filenames::report_pdf("Teste/\"x\"", "Ação"),
        "relatorio_Teste__x__A__o.pdf"
    );
    assert_eq!(filenames::template_json(12), "template_12.json");
}

#[test]
fn filename_components_are_ascii_only() {
    assert_eq!(filenames::sanitize_component("Relatório Final"), "Relat_rio_Final");
    assert_eq!(filenames::sanitize_component("  São Paulo  "), "S_o_Paulo");
    assert_eq!(filenames::sanitize_component("v1.2-final_ok"), "v1.2-final_ok");
    assert!(
        filenames::report_pdf("Relatório", "Ünico")
            .chars()
            .all(|c| c.is_ascii())
    );
}
