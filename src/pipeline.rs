//! Turns a saved snapshot into a JSON file of faculty records.

use crate::context::Context;
use crate::department::DepartmentConfig;
use crate::error::{ExtractError, Result};
use crate::extract::Extractor;
use crate::model::FacultyRecord;
use crate::utils::{
    listing_page_path, profile_page_id, profile_page_path, save_json, snapshot_dates, snapshot_dir,
};
use crate::{log_debug, log_error, log_info, log_warn};
use scraper::Html;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info_span, Instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub output: PathBuf,
    pub records: usize,
    pub card_failures: usize,
    pub page_failures: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
}

/// Extracts one department snapshot.
///
/// Cards that fail to parse are skipped. A card whose profile page is
/// missing or unparsable is kept with its card data only. Failing to read
/// the listing page or to write the output aborts the run.
pub async fn extract_faculty_data(
    ctx: &Context,
    dept: &DepartmentConfig,
    date: &str,
    extractor: Option<Extractor>,
    output_dir: Option<&Path>,
) -> Result<ExtractionSummary> {
    let span = info_span!("extract", alias = %dept.alias);
    run_extraction(ctx, dept, date, extractor, output_dir)
        .instrument(span)
        .await
}

async fn run_extraction(
    ctx: &Context,
    dept: &DepartmentConfig,
    date: &str,
    extractor: Option<Extractor>,
    output_dir: Option<&Path>,
) -> Result<ExtractionSummary> {
    let extractor = extractor.unwrap_or_else(|| {
        log_debug!("[extract] Extractor wasn't provided, determining from alias");
        Extractor::for_alias(&dept.alias)
    });

    log_info!("[extract] Using the dump created at {} ({} extractor)", date, extractor);
    let start = Instant::now();

    let snapshot = snapshot_dir(ctx.root_dir(), &dept.alias, date);
    let listing_path = listing_page_path(&snapshot, &dept.alias);
    let listing = tokio::fs::read_to_string(&listing_path)
        .await
        .map_err(|source| ExtractError::Io {
            path: listing_path.clone(),
            source,
        })?;

    let (cards, card_failures) = parse_cards(extractor, dept, &listing)?;

    let mut faculties = Vec::with_capacity(cards.len());
    let mut page_failures = 0;

    for card in cards {
        match parse_profile_page(extractor, &snapshot, &card).await {
            Ok(page) => faculties.push(card.merge_page(page)),
            Err(e) => {
                log_error!(
                    "[extract] [{}] Failed to extract data from faculty page: {}",
                    card.faculty_code,
                    e
                );
                page_failures += 1;
                faculties.push(card);
            }
        }
    }

    log_info!(
        "[extract] Finished extracting ({:.2}s)",
        start.elapsed().as_secs_f64()
    );

    let output = match output_dir {
        Some(dir) => dir.join(format!("{}-{}.json", dept.alias, date)),
        None => snapshot.join(format!("{}.json", dept.alias)),
    };
    save_json(&faculties, &output).await?;
    log_info!("[extract] Written data to {}", output.display());

    Ok(ExtractionSummary {
        output,
        records: faculties.len(),
        card_failures,
        page_failures,
    })
}

/// Parses every listing card. The document is dropped before any await.
fn parse_cards(
    extractor: Extractor,
    dept: &DepartmentConfig,
    listing: &str,
) -> Result<(Vec<FacultyRecord>, usize)> {
    let document = Html::parse_document(listing);
    let selector = dept
        .faculty_list()
        .ok_or_else(|| ExtractError::SelectorError(dept.faculty_list_selector.clone()))?;

    let elements: Vec<_> = document.select(&selector).collect();
    if elements.is_empty() {
        log_warn!(
            "[extract] No faculty cards matched '{}'",
            dept.faculty_list_selector
        );
    } else {
        log_info!("[extract] Found {} faculties", elements.len());
    }

    let mut failures = 0;
    let mut cards = Vec::with_capacity(elements.len());
    for element in elements {
        match extractor.parse_card(element) {
            Ok(card) => cards.push(card),
            Err(e) => {
                log_error!("[extract] Failed to extract data from faculty card: {}", e);
                failures += 1;
            }
        }
    }

    Ok((cards, failures))
}

async fn parse_profile_page(
    extractor: Extractor,
    snapshot: &Path,
    card: &FacultyRecord,
) -> std::result::Result<FacultyRecord, ExtractError> {
    let page_id = profile_page_id(&card.profile_url)
        .ok_or_else(|| ExtractError::MissingProfileId(card.profile_url.clone()))?;

    extractor
        .parse_page(&profile_page_path(snapshot, page_id))
        .await
}

/// Extracts the newest snapshot of every configured department. One
/// department failing never stops the others.
pub async fn extract_all_departments(ctx: &Context, output_dir: Option<&Path>) -> BatchSummary {
    let total = ctx.departments.len();
    let mut succeeded = 0;

    log_info!("[extract] Starting extraction of {} departments", total);

    for dept in ctx.departments.iter() {
        let dates = snapshot_dates(ctx.root_dir(), &dept.alias);
        let Some(latest) = dates.first() else {
            log_error!("[extract] No snapshot folder found for {}", dept.alias);
            continue;
        };

        match extract_faculty_data(ctx, dept, latest, None, output_dir).await {
            Ok(_) => succeeded += 1,
            Err(e) => log_error!(&e => "[extract] Extraction failed for {}", dept.alias),
        }
    }

    log_info!(
        "[extract] Extracted faculties from {}/{} departments",
        succeeded,
        total
    );

    BatchSummary { succeeded, total }
}
