use crate::error::Result;
pub use crate::{log_debug, log_error};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// `<root>/<alias>`
pub fn department_dir(root: &Path, alias: &str) -> PathBuf {
    root.join(alias)
}

/// `<root>/<alias>/<date>`
pub fn snapshot_dir(root: &Path, alias: &str, date: &str) -> PathBuf {
    department_dir(root, alias).join(date)
}

/// Saved faculty listing page of a snapshot.
pub fn listing_page_path(snapshot: &Path, alias: &str) -> PathBuf {
    snapshot.join(format!("{}.html", alias.to_lowercase()))
}

pub fn profile_page_path(snapshot: &Path, page_id: &str) -> PathBuf {
    snapshot.join(format!("{}.html", page_id))
}

/// Last non-empty path segment of a profile url, used as the page file name.
pub fn profile_page_id(url: &str) -> Option<&str> {
    url.split('/').filter(|segment| !segment.is_empty()).last()
}

pub fn ensure_snapshot_dir(root: &Path, alias: &str, date: &str) -> Result<PathBuf> {
    let path = snapshot_dir(root, alias, date);
    ensure_directory(&path)?;
    log_debug!("[utils] Ensured snapshot folder {}", path.display());
    Ok(path)
}

/// Snapshot dates of a department, newest first. An unreadable department
/// folder yields an empty list.
pub fn snapshot_dates(root: &Path, alias: &str) -> Vec<String> {
    let base = department_dir(root, alias);
    let pattern = format!(
        "{}/*",
        Pattern::escape(&base.to_string_lossy())
    );

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            log_error!("[utils] Failed to list snapshot dates of {}: {}", alias, e);
            return Vec::new();
        }
    };

    let mut dates: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log_error!("[utils] Failed to read snapshot entry of {}: {}", alias, e);
                None
            }
        })
        .filter(|path| path.is_dir())
        .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .collect();

    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
}

pub fn save_html(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    fs::write(path, content)?;
    log_debug!("[utils] Saved HTML content to {}", path.display());
    Ok(())
}

/// Compact JSON, written asynchronously.
pub async fn save_json(data: &impl serde::Serialize, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json_string = serde_json::to_string(data)?;
    tokio::fs::write(path, json_string).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("faculty_utils_{}", name));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn page_id_is_last_non_empty_segment() {
        assert_eq!(
            profile_page_id("https://cse.bubt.edu.bd/facultydetails/171/"),
            Some("171")
        );
        assert_eq!(profile_page_id("/home/faculty_details/jane-roe"), Some("jane-roe"));
        assert_eq!(profile_page_id(""), None);
        assert_eq!(profile_page_id("///"), None);
    }

    #[test]
    fn lists_snapshot_dates_newest_first() {
        let root = tmp_dir("dates");
        for date in ["2024-01-15", "2025-03-02", "2024-11-30"] {
            fs::create_dir_all(root.join("english").join(date)).unwrap();
        }
        fs::write(root.join("english").join("notes.txt"), "not a snapshot").unwrap();

        assert_eq!(
            snapshot_dates(&root, "english"),
            vec!["2025-03-02", "2024-11-30", "2024-01-15"]
        );
    }

    #[test]
    fn missing_department_has_no_snapshots() {
        let root = tmp_dir("no_dept");
        assert!(snapshot_dates(&root, "finance").is_empty());
    }

    #[test]
    fn listing_page_uses_lowercase_alias() {
        let path = listing_page_path(Path::new("/data/cse2/2025-01-01"), "CSE2");
        assert_eq!(path, PathBuf::from("/data/cse2/2025-01-01/cse2.html"));
    }

    #[tokio::test]
    async fn writes_compact_json() {
        let root = tmp_dir("json");
        let path = root.join("nested").join("out.json");
        save_json(&vec!["a", "b"], &path).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"["a","b"]"#);
    }
}
