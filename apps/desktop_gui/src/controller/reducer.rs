//! Folds backend surface events into what the egui frame draws.

use shared::domain::ResultsView;

use crate::controller::events::UiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    pub target: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceState {
    pub error_text: String,
    pub error_visible: bool,
    pub results: Option<ResultsView>,
    pub results_visible: bool,
    pub viewer: Option<ViewerState>,
}

impl SurfaceState {
    /// Applies one event. Returns the URL to hand to the platform when the
    /// viewer was (re)targeted.
    pub fn apply(&mut self, event: UiEvent) -> Option<String> {
        match event {
            UiEvent::ErrorShown(text) => {
                self.error_text = text;
                self.error_visible = true;
            }
            UiEvent::ErrorHidden => self.error_visible = false,
            UiEvent::ResultsReplaced(view) => self.results = Some(view),
            UiEvent::ResultsShown => self.results_visible = true,
            UiEvent::ResultsHidden => self.results_visible = false,
            UiEvent::ViewerOpened { target, url } => {
                // One viewer per target name: a new link replaces the old one.
                self.viewer = Some(ViewerState {
                    target,
                    url: url.clone(),
                });
                return Some(url);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::ResultLink;

    use super::*;

    #[test]
    fn error_then_search_restores_results_region() {
        let mut surface = SurfaceState::default();
        surface.apply(UiEvent::ResultsHidden);
        surface.apply(UiEvent::ErrorShown("Searching failed".into()));
        assert!(surface.error_visible);
        assert!(!surface.results_visible);

        surface.apply(UiEvent::ErrorHidden);
        surface.apply(UiEvent::ResultsReplaced(ResultsView::Searching(
            "Searching...".into(),
        )));
        surface.apply(UiEvent::ResultsShown);
        assert!(!surface.error_visible);
        assert!(surface.results_visible);
        assert_eq!(
            surface.results,
            Some(ResultsView::Searching("Searching...".into()))
        );
    }

    #[test]
    fn viewer_is_reused_for_every_link() {
        let mut surface = SurfaceState::default();
        let first = surface.apply(UiEvent::ViewerOpened {
            target: "docsearch-viewer".into(),
            url: "http://a".into(),
        });
        let second = surface.apply(UiEvent::ViewerOpened {
            target: "docsearch-viewer".into(),
            url: "http://b".into(),
        });

        assert_eq!(first.as_deref(), Some("http://a"));
        assert_eq!(second.as_deref(), Some("http://b"));
        assert_eq!(
            surface.viewer,
            Some(ViewerState {
                target: "docsearch-viewer".into(),
                url: "http://b".into(),
            })
        );
    }

    #[test]
    fn document_results_replace_previous_content() {
        let mut surface = SurfaceState::default();
        surface.apply(UiEvent::ResultsReplaced(ResultsView::NoResults(
            "No results found".into(),
        )));
        let docs = ResultsView::Documents(vec![ResultLink {
            title: "A".into(),
            url: "http://x".into(),
        }]);
        assert_eq!(surface.apply(UiEvent::ResultsReplaced(docs.clone())), None);
        assert_eq!(surface.results, Some(docs));
    }
}
