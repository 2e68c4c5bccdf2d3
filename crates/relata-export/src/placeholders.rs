//! Placeholder substitution for titles, header/footer text and block content.
//!
//! Substitution is a single left-to-right pass: text produced by a
//! replacement is never scanned again, so a client named `{{COMPANY_NAME}}`
//! stays literally that.

use std::borrow::Cow;
use std::sync::LazyLock;

use jiff::civil::Date;
use regex::{Captures, Regex};

use relata_core::models::placeholder::Placeholder;

use crate::request::ReportRenderRequest;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z0-9_]+)\}\}").expect("static token pattern"));

const MONTHS_PT_BR: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Values available to placeholders during one render.
#[derive(Debug, Clone)]
pub struct PlaceholderContext<'a> {
    pub report_number: &'a str,
    pub title: &'a str,
    pub client_name: &'a str,
    pub company_name: &'a str,
    /// Date used for the `CURRENT_*` tokens.
    pub today: Date,
}

impl<'a> PlaceholderContext<'a> {
    pub fn from_request(request: &'a ReportRenderRequest) -> Self {
        Self {
            report_number: &request.report_number,
            title: &request.title,
            client_name: &request.client_name,
            company_name: &request.style.company_name,
            today: request.render_date,
        }
    }

    pub fn value(&self, placeholder: Placeholder) -> Cow<'a, str> {
        match placeholder {
            Placeholder::ReportNumber | Placeholder::ProposalNumber => {
                Cow::Borrowed(self.report_number)
            }
            Placeholder::ReportTitle | Placeholder::ProposalTitle => Cow::Borrowed(self.title),
            Placeholder::ReportClient | Placeholder::ClientName => Cow::Borrowed(self.client_name),
            Placeholder::CompanyName => Cow::Borrowed(self.company_name),
            Placeholder::CurrentDate => Cow::Owned(self.today.strftime("%d/%m/%Y").to_string()),
            Placeholder::CurrentDateFull => Cow::Owned(long_date(self.today)),
            Placeholder::CurrentYear => Cow::Owned(self.today.strftime("%Y").to_string()),
            Placeholder::CurrentMonth => Cow::Owned(self.today.strftime("%m").to_string()),
            Placeholder::CurrentDay => Cow::Owned(self.today.strftime("%d").to_string()),
        }
    }
}

/// `26 de Junho de 2025`
pub fn long_date(date: Date) -> String {
    let month = MONTHS_PT_BR[(date.month() - 1) as usize];
    format!("{} de {} de {}", date.strftime("%d"), month, date.year())
}

/// Replace every recognized `{{TOKEN}}` in `text`. Unknown tokens are kept
/// verbatim.
pub fn resolve(text: &str, context: &PlaceholderContext<'_>) -> String {
    if text.is_empty() {
        return String::new();
    }

    TOKEN
        .replace_all(text, |caps: &Captures<'_>| match Placeholder::from_name(&caps[1]) {
            Some(placeholder) => context.value(placeholder).into_owned(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
