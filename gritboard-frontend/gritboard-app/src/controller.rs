use std::cell::{Ref, RefCell};

use chrono::{DateTime, Utc};
use gritboard_api_types::{
    graphql::EnvelopeError, queries, SkillQueryData, UserQueryData, XpQueryData,
};
use gritboard_charts::{
    build_progression, format::grouped, skill_entries, transform::total_amount, ChartData,
    ChartKind, PathFilter,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::{
    api::{IdentityProvider, QueryCollaborator},
    config::DashboardConfig,
    error::{AuthError, DashboardError, DashboardResult},
    page::{ChartSpec, DashboardPage, MountContent, MountPoint, View},
    profile::profile_fields,
    session::SessionStore,
    token::{normalize_signin_response, validate_token},
};

pub const NO_PROFILE_DATA: &str = "No profile data available";
pub const NO_XP_DATA: &str = "No XP data available";
pub const NO_SKILL_DATA: &str = "No skill data available";

/// Wires the session, the external collaborators and the page together.
///
/// Fetches run concurrently on the caller's task and each writes only its own
/// mount point, so a failing section never blocks its siblings.
pub struct DashboardController<S, I, Q> {
    store: S,
    identity: I,
    queries: Q,
    config: DashboardConfig,
    filter: PathFilter,
    page: RefCell<DashboardPage>,
    clock: fn() -> DateTime<Utc>,
}

impl<S, I, Q> DashboardController<S, I, Q>
where
    S: SessionStore,
    I: IdentityProvider,
    Q: QueryCollaborator,
{
    pub fn new(store: S, identity: I, queries: Q, config: DashboardConfig) -> Self {
        let filter = config.path_filter();
        Self {
            store,
            identity,
            queries,
            config,
            filter,
            page: RefCell::new(DashboardPage::default()),
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn page(&self) -> Ref<'_, DashboardPage> {
        self.page.borrow()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Picks the initial view from the stored credential.
    pub async fn on_load(&mut self) -> View {
        let Some(token) = self.store.get() else {
            debug!("no stored session");
            self.page.get_mut().show(View::Login);
            return View::Login;
        };
        match validate_token(&token, (self.clock)()) {
            Ok(claims) => {
                info!("resuming session for {:?}", claims.sub);
                self.show_profile(&token).await;
                View::Profile
            }
            Err(e) => {
                warn!("stored session rejected: {e}");
                self.drop_session();
                let page = self.page.get_mut();
                page.show(View::Login);
                page.mount(
                    MountPoint::SessionNotice,
                    MountContent::Message(DashboardError::SessionExpired.to_string()),
                );
                View::Login
            }
        }
    }

    /// Signs in and, on success, stores the token and loads the profile view.
    /// Failures are shown on the login form and no session is established.
    pub async fn login(&mut self, username: &str, password: &str) -> DashboardResult<()> {
        info!("sign in requested for {username}");
        let token = match self.sign_in(username, password).await {
            Ok(token) => token,
            Err(e) => {
                warn!("sign in failed: {e}");
                return self.reject_login(e.into());
            }
        };
        if let Err(e) = self.store.set(&token) {
            error!("unable to persist session: {e}");
            return self.reject_login(DashboardError::Storage(e.to_string()));
        }
        {
            let page = self.page.get_mut();
            page.clear(MountPoint::LoginError);
            page.clear(MountPoint::SessionNotice);
        }
        self.show_profile(&token).await;
        Ok(())
    }

    async fn sign_in(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let body = self.identity.sign_in(username, password).await?;
        normalize_signin_response(&body)
    }

    fn reject_login(&mut self, error: DashboardError) -> DashboardResult<()> {
        let content = MountContent::Error(error.to_string());
        self.page.get_mut().mount(MountPoint::LoginError, content);
        Err(error)
    }

    pub fn logout(&mut self) {
        info!("signing out");
        self.drop_session();
        let page = self.page.get_mut();
        page.clear_all();
        page.show(View::Login);
    }

    fn drop_session(&mut self) {
        if let Err(e) = self.store.clear() {
            error!("unable to clear session: {e}");
        }
    }

    async fn show_profile(&mut self, token: &str) {
        {
            let page = self.page.get_mut();
            page.show(View::Profile);
            for mount in MountPoint::PROFILE_SECTIONS {
                page.mount(mount, MountContent::Loading);
            }
        }
        self.load_profile(token).await;
    }

    /// Issues the three profile queries concurrently. Each fills its own mount point
    /// as soon as it resolves.
    pub async fn load_profile(&self, token: &str) {
        futures::join!(
            self.load_profile_section(token),
            self.load_xp_section(token),
            self.load_skills_section(token),
        );
    }

    async fn fetch<T>(&self, query: &str, token: &str) -> DashboardResult<T>
    where
        T: DeserializeOwned,
    {
        let envelope = self.queries.execute(query, token).await?;
        let data = envelope.into_result().map_err(|e| match e {
            EnvelopeError::Reported(message) => DashboardError::Query(message),
            EnvelopeError::MissingData => DashboardError::DataShape("no data in response".into()),
        })?;
        serde_json::from_value(data).map_err(|e| DashboardError::DataShape(e.to_string()))
    }

    fn mount(&self, mount: MountPoint, content: MountContent) {
        self.page.borrow_mut().mount(mount, content);
    }

    async fn load_profile_section(&self, token: &str) {
        let content = match self.fetch(queries::USER_PROFILE, token).await {
            Ok(UserQueryData { user }) => match user.first() {
                Some(user) => MountContent::Profile(profile_fields(user)),
                None => MountContent::Message(NO_PROFILE_DATA.to_string()),
            },
            Err(e) => section_failure("profile", e, NO_PROFILE_DATA),
        };
        self.mount(MountPoint::ProfileInfo, content);
    }

    async fn load_xp_section(&self, token: &str) {
        let spec = ChartSpec::new(
            ChartKind::Line,
            &self.config.xp_chart_title,
            MountPoint::XpChart,
        );
        match self.fetch(queries::XP_TRANSACTIONS, token).await {
            Ok(XpQueryData { transaction }) => {
                let series = build_progression(&transaction, &self.filter);
                let summary = format!("Total XP: {}", grouped(total_amount(&series)));
                let data = ChartData::Progression(&series);
                self.render_section(&spec, data, summary, NO_XP_DATA);
            }
            Err(e) => self.mount(spec.mount, section_failure("XP", e, NO_XP_DATA)),
        }
    }

    async fn load_skills_section(&self, token: &str) {
        let spec = ChartSpec::new(
            ChartKind::Bar,
            &self.config.skills_chart_title,
            MountPoint::SkillsChart,
        );
        match self.fetch(queries::SKILLS, token).await {
            Ok(SkillQueryData { transaction }) => {
                let skills = skill_entries(&transaction, &self.config.skill_prefix);
                let summary = format!("{} skills", skills.len());
                let data = ChartData::Skills(&skills);
                self.render_section(&spec, data, summary, NO_SKILL_DATA);
            }
            Err(e) => self.mount(spec.mount, section_failure("skills", e, NO_SKILL_DATA)),
        }
    }

    fn render_section(
        &self,
        spec: &ChartSpec,
        data: ChartData<'_>,
        summary: String,
        empty: &str,
    ) {
        let mut page = self.page.borrow_mut();
        match page.render_chart(spec, &data, Some(summary)) {
            Ok(true) => {}
            Ok(false) => page.mount(spec.mount, MountContent::Message(empty.to_string())),
            Err(e) => {
                error!("drawing {} failed: {e}", spec.mount.id());
                page.mount(
                    spec.mount,
                    MountContent::Error(format!("Failed to draw chart: {e}")),
                );
            }
        }
    }
}

/// Data shape problems become an empty state, everything else an inline error.
fn section_failure(section: &str, error: DashboardError, empty: &str) -> MountContent {
    match error {
        DashboardError::DataShape(reason) => {
            warn!("{section} response had an unexpected shape: {reason}");
            MountContent::Message(empty.to_string())
        }
        other => {
            warn!("loading {section} failed: {other}");
            MountContent::Error(format!("Failed to load {section} data: {other}"))
        }
    }
}
