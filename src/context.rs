use crate::config::AppConfig;
use crate::department::DepartmentRegistry;
use std::path::Path;

/// Everything a run needs, built once in `main` and shared by reference.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub departments: DepartmentRegistry,
}

impl Context {
    pub fn new(config: AppConfig, departments: DepartmentRegistry) -> Self {
        Self {
            config,
            departments,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.config.root_dir
    }
}
