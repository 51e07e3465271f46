use gritboard_charts::PathFilter;
use gritlab_client::{DEFAULT_GRAPHQL_URL, DEFAULT_SIGNIN_URL};
use serde::{Deserialize, Serialize};

/// Endpoints, XP path rules and chart titles. Missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Endpoint that exchanges basic credentials for a bearer token.
    pub signin_url: String,
    /// GraphQL endpoint the profile queries are sent to.
    pub graphql_url: String,
    /// Path prefix an XP transaction must start with to count.
    pub curriculum_root: String,
    /// Prefixes, relative to `curriculum_root`, whose transactions are left out.
    pub excluded_paths: Vec<String>,
    /// Path suffixes that count even when excluded or outside the root.
    pub always_include: Vec<String>,
    /// Prefix stripped from skill transaction types to get the skill name.
    pub skill_prefix: String,
    /// Heading above the cumulative XP chart.
    pub xp_chart_title: String,
    /// Heading above the skills chart.
    pub skills_chart_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let filter = PathFilter::default();
        Self {
            signin_url: DEFAULT_SIGNIN_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            curriculum_root: filter.root,
            excluded_paths: filter.excluded,
            always_include: filter.always_include,
            skill_prefix: "skill_".to_string(),
            xp_chart_title: "XP Progression".to_string(),
            skills_chart_title: "Skills".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn path_filter(&self) -> PathFilter {
        PathFilter {
            root: self.curriculum_root.clone(),
            excluded: self.excluded_paths.clone(),
            always_include: self.always_include.clone(),
        }
    }
}
