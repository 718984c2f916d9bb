use contracts::domain::a001_application::aggregate::ApplicationOverview;
use contracts::enums::Track;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

/// What the main area shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    NewApplication(Track),
    Overview(String),
    /// Form re-opened from an overview
    Edit(String),
}

/// `?screen=...&track=...&no=...`
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScreenQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    screen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    no: Option<String>,
}

impl Screen {
    pub fn to_query(&self) -> String {
        let query = match self {
            Screen::Home => ScreenQuery::default(),
            Screen::NewApplication(track) => ScreenQuery {
                screen: Some("new".into()),
                track: Some(track.code().into()),
                no: None,
            },
            Screen::Overview(no) => ScreenQuery {
                screen: Some("overview".into()),
                track: None,
                no: Some(no.clone()),
            },
            Screen::Edit(no) => ScreenQuery {
                screen: Some("edit".into()),
                track: None,
                no: Some(no.clone()),
            },
        };
        serde_qs::to_string(&query).unwrap_or_default()
    }

    /// Unknown or incomplete queries fall back to `Home`
    pub fn from_query(search: &str) -> Self {
        let query: ScreenQuery =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        let no = query.no.filter(|n| !n.trim().is_empty());
        match (query.screen.as_deref(), query.track.as_deref(), no) {
            (Some("new"), Some(track), _) => Track::from_code(track)
                .map(Screen::NewApplication)
                .unwrap_or_default(),
            (Some("overview"), _, Some(no)) => Screen::Overview(no),
            (Some("edit"), _, Some(no)) => Screen::Edit(no),
            _ => Screen::Home,
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub screen: RwSignal<Screen>,
    /// Overview handed from the overview screen to the form it opens
    pub draft: RwSignal<Option<ApplicationOverview>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            screen: RwSignal::new(Screen::Home),
            draft: RwSignal::new(None),
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        self.screen.set(Screen::from_query(&search));

        let this = *self;
        Effect::new(move |_| {
            let query = this.screen.with(|s| s.to_query());
            let new_url = if query.is_empty() {
                "?".to_string()
            } else {
                format!("?{}", query)
            };
            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open(&self, screen: Screen) {
        log::debug!("open screen {:?}", screen);
        self.screen.set(screen);
    }

    pub fn edit(&self, overview: ApplicationOverview) {
        let no = overview.application_no.clone();
        self.draft.set(Some(overview));
        self.open(Screen::Edit(no));
    }

    /// Takes the handed-over overview if it belongs to `application_no`
    pub fn take_draft(&self, application_no: &str) -> Option<ApplicationOverview> {
        let draft = self.draft.get_untracked()?;
        self.draft.set(None);
        (draft.application_no == application_no).then_some(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_query() {
        let screen = Screen::NewApplication(Track::College);
        assert_eq!(Screen::from_query(&format!("?{}", screen.to_query())), screen);

        let screen = Screen::Overview("SCH-2026-00001".into());
        assert_eq!(Screen::from_query(&screen.to_query()), screen);

        assert_eq!(Screen::Home.to_query(), "");
    }

    #[test]
    fn test_bad_query_falls_back_home() {
        assert_eq!(Screen::from_query("?screen=new&track=bogus"), Screen::Home);
        assert_eq!(Screen::from_query("?screen=edit"), Screen::Home);
        assert_eq!(Screen::from_query("garbage"), Screen::Home);
    }
}
