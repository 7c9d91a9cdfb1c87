//! Per-site extraction strategies.
//!
//! Every department site lays out its listing cards and profile pages
//! differently. An [`Extractor`] knows one layout and turns a card element
//! or a saved profile page into a partial [`FacultyRecord`]; the pipeline
//! merges the two.

mod civil;
mod contact_cell;
mod cse;
mod eee;
mod general;

use crate::error::ExtractError;
use crate::model::{ContactField, FacultyRecord};
use crate::normalize::{categorize_email_by_domain, element_text, simplify_contact_info};
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    /// bubt.edu.bd `faculty_member` pages, used for every department without
    /// its own site.
    General,
    /// Same layout as `General`, but the card's image alt is not a faculty code.
    Civil,
    /// eee.bubt.edu.bd
    Eee,
    /// cse.bubt.edu.bd
    Cse,
}

impl Extractor {
    pub fn for_alias(alias: &str) -> Self {
        match alias {
            "civil" => Extractor::Civil,
            "eee2" => Extractor::Eee,
            "cse2" => Extractor::Cse,
            _ => Extractor::General,
        }
    }

    /// Parses one card of the faculty listing page.
    pub fn parse_card(&self, card: ElementRef) -> Result<FacultyRecord, ExtractError> {
        match self {
            Extractor::General => general::parse_card(card),
            Extractor::Civil => civil::parse_card(card),
            Extractor::Eee => eee::parse_card(card),
            Extractor::Cse => cse::parse_card(card),
        }
    }

    /// Reads and parses a saved profile page.
    pub async fn parse_page(&self, path: &Path) -> Result<FacultyRecord, ExtractError> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ExtractError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        self.parse_page_html(&html)
    }

    pub fn parse_page_html(&self, html: &str) -> Result<FacultyRecord, ExtractError> {
        let document = Html::parse_document(html);
        match self {
            Extractor::General | Extractor::Civil => general::parse_page(&document),
            Extractor::Eee => eee::parse_page(&document),
            Extractor::Cse => cse::parse_page(&document),
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Extractor::General => "general",
            Extractor::Civil => "civil",
            Extractor::Eee => "eee",
            Extractor::Cse => "cse",
        };
        f.write_str(name)
    }
}

fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::SelectorError(format!("{}: {}", css, e)))
}

fn select_first<'a>(
    scope: &ElementRef<'a>,
    css: &'static str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    Ok(scope.select(&selector(css)?).next())
}

fn require<'a>(scope: &ElementRef<'a>, css: &'static str) -> Result<ElementRef<'a>, ExtractError> {
    select_first(scope, css)?.ok_or(ExtractError::MissingElement(css))
}

/// Text of the first match, or an empty string when nothing matches.
fn text_of(scope: &ElementRef, css: &'static str) -> Result<String, ExtractError> {
    Ok(select_first(scope, css)?
        .map(|element| element_text(&element))
        .unwrap_or_default())
}

fn attr_of(scope: &ElementRef, css: &'static str, attr: &str) -> Result<String, ExtractError> {
    Ok(select_first(scope, css)?
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default())
}

fn email_field(text: &str) -> ContactField {
    categorize_email_by_domain(text)
        .map(|bundle| simplify_contact_info(&bundle))
        .into()
}
