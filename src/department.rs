//! Department enumeration, free-text mapping and the static table of
//! department sites.

use crate::error::{ConfigError, Result};
use crate::log_warn;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Computer Science and Engineering")]
    ComputerScienceEngineering,
    #[serde(rename = "Electrical and Electronic Engineering")]
    ElectricalElectronicEngineering,
    #[serde(rename = "Mathematics & Statistics")]
    MathematicsStatistics,
    #[serde(rename = "Textile Engineering")]
    TextileEngineering,
    #[serde(rename = "Civil Engineering")]
    CivilEngineering,
    Accounting,
    Finance,
    Marketing,
    Management,
    #[serde(rename = "Law & Justice")]
    LawJustice,
    English,
    Economics,
}

// Order is the tie-break when a text contains more than one keyword.
const KEYWORDS: [(&str, Department); 12] = [
    ("computer", Department::ComputerScienceEngineering),
    ("electronic", Department::ElectricalElectronicEngineering),
    ("mathematics", Department::MathematicsStatistics),
    ("textile", Department::TextileEngineering),
    ("civil", Department::CivilEngineering),
    ("accounting", Department::Accounting),
    ("finance", Department::Finance),
    ("management", Department::Management),
    ("marketing", Department::Marketing),
    ("economics", Department::Economics),
    ("english", Department::English),
    ("justice", Department::LawJustice),
];

impl Department {
    pub fn name(&self) -> &'static str {
        match self {
            Department::ComputerScienceEngineering => "Computer Science and Engineering",
            Department::ElectricalElectronicEngineering => "Electrical and Electronic Engineering",
            Department::MathematicsStatistics => "Mathematics & Statistics",
            Department::TextileEngineering => "Textile Engineering",
            Department::CivilEngineering => "Civil Engineering",
            Department::Accounting => "Accounting",
            Department::Finance => "Finance",
            Department::Marketing => "Marketing",
            Department::Management => "Management",
            Department::LawJustice => "Law & Justice",
            Department::English => "English",
            Department::Economics => "Economics",
        }
    }

    /// Maps a label such as `"Dept: Computer Science and Engg."` to a department.
    pub fn from_text(text: &str) -> Option<Department> {
        let text = text.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, department)| *department)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const DEFAULT_FACULTY_LIST_SELECTOR: &str = "div.faculty-member";
const DEFAULT_PROFILE_URL_SELECTOR: &str = "a";

/// Where and how to find the faculty list of one department site.
#[derive(Debug, Clone)]
pub struct DepartmentConfig {
    pub alias: String,
    pub name: Department,
    pub base_url: String,
    /// Detail pages live at `<url_suffix>/<pageId>/` when set.
    pub url_suffix: Option<String>,
    pub faculty_list_selector: String,
    pub profile_url_selector: String,
}

impl DepartmentConfig {
    pub fn new(alias: &str, name: Department, base_url: &str) -> Self {
        Self {
            alias: alias.to_string(),
            name,
            base_url: base_url.to_string(),
            url_suffix: None,
            faculty_list_selector: DEFAULT_FACULTY_LIST_SELECTOR.to_string(),
            profile_url_selector: DEFAULT_PROFILE_URL_SELECTOR.to_string(),
        }
    }

    pub fn with_url_suffix(mut self, url_suffix: &str) -> Self {
        self.url_suffix = Some(url_suffix.to_string());
        self
    }

    pub fn with_selectors(mut self, faculty_list: &str, profile_url: &str) -> Self {
        self.faculty_list_selector = faculty_list.to_string();
        self.profile_url_selector = profile_url.to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.alias.trim().is_empty() {
            return Err(ConfigError::MissingField("alias".to_string()).into());
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::InvalidValue(format!("{}: invalid base url '{}': {}", self.alias, self.base_url, e))
        })?;
        if !url.scheme().starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "{}: base url must start with http(s): {}",
                self.alias, self.base_url
            ))
            .into());
        }

        if let Some(suffix) = &self.url_suffix {
            Url::parse(suffix).map_err(|e| {
                ConfigError::InvalidValue(format!("{}: invalid url suffix '{}': {}", self.alias, suffix, e))
            })?;
        }

        for selector in [&self.faculty_list_selector, &self.profile_url_selector] {
            Selector::parse(selector).map_err(|e| {
                ConfigError::InvalidValue(format!("{}: invalid selector '{}': {}", self.alias, selector, e))
            })?;
        }

        Ok(())
    }

    /// Parsed list selector. Only valid configs reach the registry, so this
    /// cannot fail for registered departments.
    pub fn faculty_list(&self) -> Option<Selector> {
        Selector::parse(&self.faculty_list_selector).ok()
    }

    pub fn profile_link(&self) -> Option<Selector> {
        Selector::parse(&self.profile_url_selector).ok()
    }
}

/// Validated department configurations, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct DepartmentRegistry {
    departments: Vec<DepartmentConfig>,
}

impl DepartmentRegistry {
    /// Keeps every valid entry; invalid or duplicate aliases are logged and dropped.
    pub fn from_configs(configs: Vec<DepartmentConfig>) -> Self {
        let mut departments: Vec<DepartmentConfig> = Vec::with_capacity(configs.len());

        for config in configs {
            if let Err(e) = config.validate() {
                log_warn!("[config] Found invalid department config: {}", e);
                continue;
            }
            if departments.iter().any(|d| d.alias == config.alias) {
                log_warn!("[config] Duplicate department alias '{}', ignoring", config.alias);
                continue;
            }
            departments.push(config);
        }

        Self { departments }
    }

    pub fn builtin() -> Self {
        Self::from_configs(builtin_departments())
    }

    pub fn get(&self, alias: &str) -> Option<&DepartmentConfig> {
        self.departments.iter().find(|d| d.alias == alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DepartmentConfig> {
        self.departments.iter()
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

fn builtin_departments() -> Vec<DepartmentConfig> {
    vec![
        // Business
        DepartmentConfig::new(
            "accounting",
            Department::Accounting,
            "https://www.bubt.edu.bd/home/faculty_member/38",
        ),
        DepartmentConfig::new(
            "finance",
            Department::Finance,
            "https://www.bubt.edu.bd/home/faculty_member/30",
        ),
        DepartmentConfig::new(
            "management",
            Department::Management,
            "https://www.bubt.edu.bd/home/faculty_member/37",
        ),
        DepartmentConfig::new(
            "marketing",
            Department::Marketing,
            "https://www.bubt.edu.bd/home/faculty_member/39",
        ),
        // Engineering. The faculty_member/33 and /34 listings are outdated,
        // the subdomain sites are used instead.
        DepartmentConfig::new(
            "cse2",
            Department::ComputerScienceEngineering,
            "https://cse.bubt.edu.bd/faculty",
        )
        .with_url_suffix("https://cse.bubt.edu.bd/facultydetails")
        .with_selectors(
            "div#nav-allfaculty div.single_faculty_wrapper",
            "div.fac_title a",
        ),
        DepartmentConfig::new(
            "eee2",
            Department::ElectricalElectronicEngineering,
            "https://eee.bubt.edu.bd/faculty-members",
        )
        .with_selectors(
            "div.right-wrap div.faculty_member",
            "div.person_specialization a",
        ),
        DepartmentConfig::new(
            "math-n-stats",
            Department::MathematicsStatistics,
            "https://bubt.edu.bd/home/faculty_member/35",
        ),
        DepartmentConfig::new(
            "textile",
            Department::TextileEngineering,
            "https://bubt.edu.bd/home/faculty_member/36",
        ),
        DepartmentConfig::new(
            "civil",
            Department::CivilEngineering,
            "https://www.bubt.edu.bd/home/faculty_member/civil-engineering",
        ),
        // Social Science
        DepartmentConfig::new(
            "economics",
            Department::Economics,
            "https://bubt.edu.bd/home/faculty_member/economics",
        ),
        // Arts & Humanities
        DepartmentConfig::new(
            "english",
            Department::English,
            "https://bubt.edu.bd/home/faculty_member/32",
        ),
        // Law
        DepartmentConfig::new(
            "law-n-justice",
            Department::LawJustice,
            "https://bubt.edu.bd/home/faculty_member/31",
        ),
    ]
}
