use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Dynamic tokens that may appear in titles, header/footer text and block
/// content. Keys are matched literally and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Placeholder {
    ReportNumber,
    ReportTitle,
    ReportClient,
    CurrentDate,
    CurrentDateFull,
    CurrentYear,
    CurrentMonth,
    CurrentDay,
    CompanyName,
    /// Legacy alias of [`Placeholder::ReportNumber`].
    ProposalNumber,
    /// Legacy alias of [`Placeholder::ReportTitle`].
    ProposalTitle,
    /// Legacy alias of [`Placeholder::ReportClient`].
    ClientName,
}

impl Placeholder {
    /// Catalog order used by the placeholder picker: current tokens first,
    /// legacy aliases last.
    pub const ALL: [Placeholder; 12] = [
        Placeholder::ReportNumber,
        Placeholder::ReportTitle,
        Placeholder::ReportClient,
        Placeholder::CurrentDate,
        Placeholder::CurrentDateFull,
        Placeholder::CurrentYear,
        Placeholder::CurrentMonth,
        Placeholder::CurrentDay,
        Placeholder::CompanyName,
        Placeholder::ProposalNumber,
        Placeholder::ProposalTitle,
        Placeholder::ClientName,
    ];

    /// Token name without the surrounding braces.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::ReportNumber => "REPORT_NUMBER",
            Placeholder::ReportTitle => "REPORT_TITLE",
            Placeholder::ReportClient => "REPORT_CLIENT",
            Placeholder::CurrentDate => "CURRENT_DATE",
            Placeholder::CurrentDateFull => "CURRENT_DATE_FULL",
            Placeholder::CurrentYear => "CURRENT_YEAR",
            Placeholder::CurrentMonth => "CURRENT_MONTH",
            Placeholder::CurrentDay => "CURRENT_DAY",
            Placeholder::CompanyName => "COMPANY_NAME",
            Placeholder::ProposalNumber => "PROPOSAL_NUMBER",
            Placeholder::ProposalTitle => "PROPOSAL_TITLE",
            Placeholder::ClientName => "CLIENT_NAME",
        }
    }

    /// The literal token as written in text, e.g. `{{REPORT_NUMBER}}`.
    pub fn key(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Placeholder::ReportNumber => "Número do Relatório",
            Placeholder::ReportTitle => "Título do Relatório",
            Placeholder::ReportClient => "Cliente",
            Placeholder::CurrentDate => "Data Atual",
            Placeholder::CurrentDateFull => "Data Completa",
            Placeholder::CurrentYear => "Ano Atual",
            Placeholder::CurrentMonth => "Mês Atual",
            Placeholder::CurrentDay => "Dia Atual",
            Placeholder::CompanyName => "Nome da Empresa",
            Placeholder::ProposalNumber => "Número do Relatório (antigo)",
            Placeholder::ProposalTitle => "Título do Relatório (antigo)",
            Placeholder::ClientName => "Nome do Cliente (antigo)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Placeholder::ReportNumber => "Ex: 5001001",
            Placeholder::ReportTitle => "Título atual do relatório",
            Placeholder::ReportClient => "Nome do cliente do relatório",
            Placeholder::CurrentDate => "Ex: 26/06/2025",
            Placeholder::CurrentDateFull => "Ex: 26 de Junho de 2025",
            Placeholder::CurrentYear => "Ex: 2025",
            Placeholder::CurrentMonth => "Ex: 06",
            Placeholder::CurrentDay => "Ex: 26",
            Placeholder::CompanyName => "Nome configurado da empresa",
            Placeholder::ProposalNumber => "Ex: 4002506 - Use {{REPORT_NUMBER}}",
            Placeholder::ProposalTitle => "Use {{REPORT_TITLE}}",
            Placeholder::ClientName => "Use {{REPORT_CLIENT}}",
        }
    }

    pub fn is_legacy(self) -> bool {
        self.canonical() != self
    }

    /// The current-naming token this one aliases (itself if not legacy).
    pub fn canonical(self) -> Self {
        match self {
            Placeholder::ProposalNumber => Placeholder::ReportNumber,
            Placeholder::ProposalTitle => Placeholder::ReportTitle,
            Placeholder::ClientName => Placeholder::ReportClient,
            other => other,
        }
    }
}
