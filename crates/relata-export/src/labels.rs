use serde::{Deserialize, Serialize};

/// Fixed wording printed on every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Caption at the top of the first page.
    pub title_caption: String,
    /// Prefix of the creation date in the client block.
    pub date_label: String,
    /// Running footer reads `{page_word} N {page_of_word} M`.
    pub page_word: String,
    pub page_of_word: String,
    pub header_image_alt: String,
    pub footer_image_alt: String,
    /// Lines closing the footer.
    pub attribution: Vec<String>,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title_caption: "RELATÓRIO DE PENTEST".to_string(),
            date_label: "Data".to_string(),
            page_word: "Página".to_string(),
            page_of_word: "de".to_string(),
            header_image_alt: "Cabeçalho".to_string(),
            footer_image_alt: "Rodapé".to_string(),
            attribution: vec![
                "Este relatório foi gerado automaticamente pelo sistema de Relatórios de Pentest."
                    .to_string(),
                "Para mais informações, entre em contato conosco.".to_string(),
            ],
        }
    }
}
