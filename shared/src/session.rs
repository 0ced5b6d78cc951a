//! View models for the presentation shell: who is signed in, which page a
//! path resolves to, the colour theme and the dashboard's local UI state.

use serde::{Deserialize, Serialize};

/// localStorage key the theme is persisted under
pub const THEME_STORAGE_KEY: &str = "theme";

/// What the identity provider reports about the current visitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub signed_in: bool,
    pub email: Option<String>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(email: impl Into<String>) -> Self {
        Self {
            signed_in: true,
            email: Some(email.into()),
        }
    }

    /// Email that scopes the user's records. Only available when signed in
    /// with a non-empty address.
    pub fn owner_email(&self) -> Option<&str> {
        if !self.signed_in {
            return None;
        }
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Dashboard,
}

impl Route {
    /// Unknown paths fall back to the landing page
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/dashboard" => Route::Dashboard,
            _ => Route::Landing,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// The page actually rendered once the session gate is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Landing,
    Dashboard { owner_email: String },
}

impl Page {
    pub fn resolve(route: Route, identity: &Identity) -> Self {
        match (route, identity.owner_email()) {
            (Route::Dashboard, Some(email)) => Page::Dashboard {
                owner_email: email.to_string(),
            },
            _ => Page::Landing,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse the persisted value; anything unrecognised is light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Details,
}

impl ActiveView {
    pub fn label(self) -> &'static str {
        match self {
            ActiveView::Dashboard => "Dashboard",
            ActiveView::Details => "Detail View",
        }
    }
}

/// Dialog currently shown over the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Add,
    Edit { record_id: String },
    Delete { record_id: String },
}

/// Local UI state of the dashboard page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardModel {
    pub sidebar_open: bool,
    pub active_view: ActiveView,
    pub modal: Option<Modal>,
    /// A confirmed delete is waiting on the store
    pub deleting: bool,
}

impl Default for DashboardModel {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            active_view: ActiveView::Dashboard,
            modal: None,
            deleting: false,
        }
    }
}

impl DashboardModel {
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn show(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    pub fn open(&mut self, modal: Modal) {
        self.modal = Some(modal);
        self.deleting = false;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.deleting = false;
    }

    /// Mark the pending delete as sent. Returns the record to delete, or
    /// `None` when there is nothing to confirm or a delete is already running.
    pub fn begin_delete(&mut self) -> Option<String> {
        if self.deleting {
            return None;
        }
        let record_id = self.pending_delete()?.to_string();
        self.deleting = true;
        Some(record_id)
    }

    /// The store answered for `record_id`. The dialog closes only on success
    /// and only if it still belongs to that record.
    pub fn finish_delete(&mut self, record_id: &str, succeeded: bool) {
        if self.pending_delete() != Some(record_id) {
            return;
        }
        self.deleting = false;
        if succeeded {
            self.modal = None;
        }
    }

    /// Record awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&str> {
        match &self.modal {
            Some(Modal::Delete { record_id }) => Some(record_id.as_str()),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<&str> {
        match &self.modal {
            Some(Modal::Edit { record_id }) => Some(record_id.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_email_requires_sign_in() {
        assert_eq!(Identity::anonymous().owner_email(), None);
        assert_eq!(
            Identity::signed_in("student@example.com").owner_email(),
            Some("student@example.com")
        );

        let stale = Identity {
            signed_in: false,
            email: Some("student@example.com".to_string()),
        };
        assert_eq!(stale.owner_email(), None);
        assert_eq!(Identity::signed_in("  ").owner_email(), None);
    }

    #[test]
    fn test_routes() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path("/dashboard"), Route::Dashboard);
        assert_eq!(Route::from_path("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::from_path("/nope"), Route::Landing);
        assert_eq!(Route::Dashboard.path(), "/dashboard");
    }

    #[test]
    fn test_dashboard_is_session_gated() {
        assert_eq!(Page::resolve(Route::Dashboard, &Identity::anonymous()), Page::Landing);
        assert_eq!(
            Page::resolve(Route::Dashboard, &Identity::signed_in("a@b.c")),
            Page::Dashboard { owner_email: "a@b.c".to_string() }
        );
        assert_eq!(Page::resolve(Route::Landing, &Identity::signed_in("a@b.c")), Page::Landing);
    }

    #[test]
    fn test_theme_round_trip_through_storage_value() {
        assert_eq!(Theme::from_stored(None), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
        assert_eq!(Theme::from_stored(Some(Theme::Dark.as_str())), Theme::Dark);
        assert!(Theme::Light.toggled().is_dark());
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_dashboard_model_modals() {
        let mut model = DashboardModel::default();
        assert!(model.sidebar_open);
        assert_eq!(model.active_view, ActiveView::Dashboard);

        model.toggle_sidebar();
        model.show(ActiveView::Details);
        assert!(!model.sidebar_open);
        assert_eq!(model.active_view.label(), "Detail View");

        model.open(Modal::Delete { record_id: "r1".to_string() });
        assert_eq!(model.pending_delete(), Some("r1"));
        assert_eq!(model.editing(), None);

        model.open(Modal::Edit { record_id: "r2".to_string() });
        assert_eq!(model.pending_delete(), None);
        assert_eq!(model.editing(), Some("r2"));

        model.close_modal();
        assert_eq!(model.modal, None);
    }

    #[test]
    fn test_delete_dialog_stays_open_until_store_confirms() {
        let mut model = DashboardModel::default();
        assert_eq!(model.begin_delete(), None);

        model.open(Modal::Delete { record_id: "r1".to_string() });
        assert_eq!(model.begin_delete(), Some("r1".to_string()));
        assert!(model.deleting);
        assert_eq!(model.pending_delete(), Some("r1"));
        // A second click while the first is in flight sends nothing
        assert_eq!(model.begin_delete(), None);

        model.finish_delete("r1", false);
        assert!(!model.deleting);
        assert_eq!(model.pending_delete(), Some("r1"));

        assert_eq!(model.begin_delete(), Some("r1".to_string()));
        model.finish_delete("r1", true);
        assert_eq!(model.modal, None);
        assert!(!model.deleting);
    }

    #[test]
    fn test_late_delete_result_leaves_other_dialogs_alone() {
        let mut model = DashboardModel::default();
        model.open(Modal::Delete { record_id: "r1".to_string() });
        model.begin_delete();
        model.open(Modal::Edit { record_id: "r2".to_string() });

        model.finish_delete("r1", true);
        assert_eq!(model.editing(), Some("r2"));
    }
}
