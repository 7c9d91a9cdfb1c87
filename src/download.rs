//! Saves a department's listing page and every linked profile page into
//! today's snapshot. Best effort: a failed profile is logged and skipped,
//! a failed listing page fails the department.

use crate::client::Client;
use crate::context::Context;
use crate::department::DepartmentConfig;
use crate::error::Result;
use crate::utils::{ensure_snapshot_dir, listing_page_path, profile_page_id, profile_page_path, save_html};
use crate::{log_error, log_info, log_warn};
use scraper::Html;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info_span, Instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub snapshot: PathBuf,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// A profile link found on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLink {
    pub page_id: String,
    pub url: String,
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub async fn dump_department(ctx: &Context, dept: &DepartmentConfig) -> Result<DumpSummary> {
    let span = info_span!("dump", alias = %dept.alias);
    run_dump(ctx, dept).instrument(span).await
}

async fn run_dump(ctx: &Context, dept: &DepartmentConfig) -> Result<DumpSummary> {
    let snapshot = ensure_snapshot_dir(ctx.root_dir(), &dept.alias, &today())?;
    let mut summary = DumpSummary {
        snapshot: snapshot.clone(),
        ..Default::default()
    };

    let client = Client::for_site(&dept.base_url)?;
    let listing_path = listing_page_path(&snapshot, &dept.alias);
    log_info!("[dump] Downloading faculty list page: {}", listing_path.display());

    let listing = match client.get(&dept.base_url).await {
        Ok(response) => response.content,
        Err(e) => {
            log_error!(&e => "[dump] Failed to download faculty list page");
            return Err(e);
        }
    };
    save_html(&listing, &listing_path)?;

    let links = profile_links(dept, &listing);
    if links.is_empty() {
        log_warn!("[dump] No faculty members found.");
        return Ok(summary);
    }
    log_info!("[dump] Found {} faculty members.", links.len());

    let delay = Duration::from_millis(ctx.config.request_delay_ms);

    for link in links {
        let file_path = profile_page_path(&snapshot, &link.page_id);
        if file_path.exists() {
            log_info!("[dump] Already downloaded: {}", file_path.display());
            summary.skipped += 1;
            continue;
        }

        let url = profile_url(dept, &link);
        match client.get(&url).await {
            Ok(response) => {
                save_html(&response.content, &file_path)?;
                log_info!("[dump] Downloaded: {}", file_path.display());
                summary.downloaded += 1;
            }
            Err(e) => {
                log_error!(&e => "[dump] Error downloading {}", url);
                summary.failed += 1;
            }
        }

        tokio::time::sleep(delay).await;
    }

    log_info!("[dump] Downloaded all faculty members.");
    Ok(summary)
}

/// Profile links of every listing card, in page order.
pub fn profile_links(dept: &DepartmentConfig, listing: &str) -> Vec<ProfileLink> {
    let (Some(cards), Some(link)) = (dept.faculty_list(), dept.profile_link()) else {
        return Vec::new();
    };

    let document = Html::parse_document(listing);
    let mut links = Vec::new();

    for card in document.select(&cards) {
        let Some(href) = card
            .select(&link)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            log_warn!("[dump] Faculty member has no profile link.");
            continue;
        };

        let Some(page_id) = profile_page_id(href) else {
            log_warn!("[dump] Unable to determine filename from URL: {}", href);
            continue;
        };

        links.push(ProfileLink {
            page_id: page_id.to_string(),
            url: href.to_string(),
        });
    }

    links
}

/// Sites with a url suffix serve details at `<suffix>/<pageId>/`; the
/// others are fetched from the card link itself.
pub fn profile_url(dept: &DepartmentConfig, link: &ProfileLink) -> String {
    match &dept.url_suffix {
        Some(suffix) => format!("{}/{}/", suffix.trim_end_matches('/'), link.page_id),
        None => link.url.clone(),
    }
}

/// Dumps every configured department in order.
pub async fn dump_all_departments(ctx: &Context) -> usize {
    let mut done = 0;
    for dept in ctx.departments.iter() {
        match dump_department(ctx, dept).await {
            Ok(_) => done += 1,
            Err(e) => log_error!(&e => "[dump] Dump failed for {}", dept.alias),
        }
    }
    done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::department::{Department, DepartmentRegistry};
    use crate::error::AppError;

    const LISTING: &str = r#"
        <div id="nav-allfaculty">
          <div class="single_faculty_wrapper"><div class="fac_title"><a href="https://cse.bubt.edu.bd/facultydetails/171/">A</a></div></div>
          <div class="single_faculty_wrapper"><div class="fac_title"><span>no link</span></div></div>
          <div class="single_faculty_wrapper"><div class="fac_title"><a href="/facultydetails/204">B</a></div></div>
        </div>"#;

    #[test]
    fn collects_profile_links_in_order() {
        let registry = DepartmentRegistry::builtin();
        let cse = registry.get("cse2").unwrap();

        let links = profile_links(cse, LISTING);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].page_id, "171");
        assert_eq!(links[1].page_id, "204");
        assert_eq!(
            profile_url(cse, &links[1]),
            "https://cse.bubt.edu.bd/facultydetails/204/"
        );
    }

    #[test]
    fn falls_back_to_card_link_without_suffix() {
        let registry = DepartmentRegistry::builtin();
        let english = registry.get("english").unwrap();
        let link = ProfileLink {
            page_id: "88".to_string(),
            url: "https://bubt.edu.bd/home/faculty_details/88".to_string(),
        };
        assert_eq!(profile_url(english, &link), link.url);
    }

    #[tokio::test]
    async fn unreachable_listing_fails_the_department() {
        let root = std::env::temp_dir().join("faculty_dump_unreachable");
        let _ = std::fs::remove_dir_all(&root);
        let config = AppConfig::from_toml(&format!("root_dir = '{}'", root.display())).unwrap();
        let departments = DepartmentRegistry::from_configs(vec![DepartmentConfig::new(
            "offline",
            Department::English,
            "http://127.0.0.1:9/faculty",
        )]);
        let ctx = Context::new(config, departments);

        let dept = ctx.departments.get("offline").unwrap();
        let err = dump_department(&ctx, dept).await.unwrap_err();
        assert!(matches!(err, AppError::Client(_)));
        assert_eq!(dump_all_departments(&ctx).await, 0);
    }

    #[test]
    fn today_is_an_iso_date() {
        let date = today();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }
}
