//! The presentation sink: which view is visible and what each mount point holds.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use gritboard_charts::{layout, ChartData, ChartKind};
use gritboard_charts_html::render_chart;
use maud::{html, Markup, PreEscaped, Render, DOCTYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::ProfileField;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    #[default]
    Login,
    Profile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MountPoint {
    LoginError,
    SessionNotice,
    ProfileInfo,
    XpChart,
    SkillsChart,
}

impl MountPoint {
    pub const PROFILE_SECTIONS: [MountPoint; 3] = [
        MountPoint::ProfileInfo,
        MountPoint::XpChart,
        MountPoint::SkillsChart,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MountPoint::LoginError => "login-error",
            MountPoint::SessionNotice => "session-notice",
            MountPoint::ProfileInfo => "profile-info",
            MountPoint::XpChart => "xp-graph",
            MountPoint::SkillsChart => "skills-chart",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MountContent {
    Loading,
    /// Informational text, e.g. an empty state.
    Message(String),
    Error(String),
    Profile(Vec<ProfileField>),
    Chart {
        html: String,
        summary: Option<String>,
    },
}

/// What to draw and where. Built per render and dropped afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub mount: MountPoint,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, mount: MountPoint) -> Self {
        Self {
            kind,
            title: Some(title.into()),
            mount,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardPage {
    view: View,
    mounts: BTreeMap<MountPoint, MountContent>,
    mutations: u64,
}

impl DashboardPage {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn show(&mut self, view: View) {
        self.view = view;
        self.mutations += 1;
    }

    pub fn get(&self, mount: MountPoint) -> Option<&MountContent> {
        self.mounts.get(&mount)
    }

    /// Replaces whatever `mount` held.
    pub fn mount(&mut self, mount: MountPoint, content: MountContent) {
        self.mounts.insert(mount, content);
        self.mutations += 1;
    }

    pub fn clear(&mut self, mount: MountPoint) {
        self.mounts.remove(&mount);
        self.mutations += 1;
    }

    pub fn clear_all(&mut self) {
        self.mounts.clear();
        self.mutations += 1;
    }

    /// Number of writes so far, lets callers tell whether anything changed.
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Draws `data` into the mount point named by `spec`.
    ///
    /// Empty data is a no-op and returns `Ok(false)`; the mount point keeps its content.
    pub fn render_chart(
        &mut self,
        spec: &ChartSpec,
        data: &ChartData<'_>,
        summary: Option<String>,
    ) -> Result<bool> {
        if data.kind() != spec.kind {
            bail!("{:?} data cannot be drawn as a {:?} chart", data.kind(), spec.kind);
        }
        let Some(scene) = layout(data, spec.title.as_deref()) else {
            debug!("nothing to draw into {}", spec.mount.id());
            return Ok(false);
        };
        self.clear(spec.mount);
        let html = render_chart(&scene)?;
        self.mount(spec.mount, MountContent::Chart { html, summary });
        Ok(true)
    }

    /// Static HTML rendition of the current state.
    pub fn to_html(&self) -> String {
        self.render().into_string()
    }
}

impl Render for DashboardPage {
    fn render(&self) -> Markup {
        let (visible, hidden) = match self.view {
            View::Login => ("login-page", "profile-page"),
            View::Profile => ("profile-page", "login-page"),
        };
        let mounts: &[MountPoint] = match self.view {
            View::Login => &[MountPoint::SessionNotice, MountPoint::LoginError],
            View::Profile => &MountPoint::PROFILE_SECTIONS,
        };
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { "XP Dashboard" }
                }
                body {
                    section id=(visible) {}
                    section id=(hidden) class="hidden" {}
                    @for mount in mounts {
                        div id=(mount.id()) {
                            @if let Some(content) = self.get(*mount) {
                                (content)
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Render for MountContent {
    fn render(&self) -> Markup {
        html! {
            @match self {
                MountContent::Loading => {
                    p class="loading" { "Loading..." }
                }
                MountContent::Message(text) => {
                    p class="no-data" { (text) }
                }
                MountContent::Error(text) => {
                    p class="error" { (text) }
                }
                MountContent::Profile(fields) => {
                    @for field in fields {
                        div class="profile-field" {
                            h2 { (field.label) }
                            p { (field.value) }
                        }
                    }
                }
                MountContent::Chart { html: chart, summary } => {
                    (PreEscaped(chart))
                    @if let Some(summary) = summary {
                        p class="chart-summary" { (summary) }
                    }
                }
            }
        }
    }
}
