use crate::views::{
    FormView, LandingView, Navigation, Navigator, ResultsView, Route, ViewContext,
};
use tokio::sync::mpsc;

/// The screen currently mounted
#[derive(Debug)]
pub enum Screen {
    Landing(LandingView),
    Form(FormView),
    Results(ResultsView),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Landing(_) => Route::Landing,
            Screen::Form(_) => Route::Form,
            Screen::Results(_) => Route::Results,
        }
    }
}

/// Client-side router: owns exactly one mounted screen at a time
///
/// Views request transitions through their [`Navigator`]; the router applies
/// them, dropping the old screen (which cancels its timers and fetches)
/// before constructing the next one with the navigation payload.
#[derive(Debug)]
pub struct App {
    ctx: ViewContext,
    navigator: Navigator,
    inbox: mpsc::UnboundedReceiver<Navigation>,
    screen: Screen,
}

impl App {
    pub fn new(ctx: ViewContext) -> Self {
        let (navigator, inbox) = Navigator::channel();
        let screen = Screen::Landing(LandingView::new(navigator.clone()));
        Self {
            ctx,
            navigator,
            inbox,
            screen,
        }
    }

    /// Enter the app at a path, as a browser would on a fresh load
    pub fn open(&mut self, path: &str) -> Option<Route> {
        let route = Route::from_path(path)?;
        self.navigate(Navigation::to(route));
        Some(route)
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn landing(&self) -> Option<&LandingView> {
        match &self.screen {
            Screen::Landing(view) => Some(view),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormView> {
        match &mut self.screen {
            Screen::Form(view) => Some(view),
            _ => None,
        }
    }

    pub fn results_mut(&mut self) -> Option<&mut ResultsView> {
        match &mut self.screen {
            Screen::Results(view) => Some(view),
            _ => None,
        }
    }

    /// Replace the mounted screen
    pub fn navigate(&mut self, navigation: Navigation) {
        let route = navigation.route();
        tracing::debug!("Mounting {}", route.path());

        // Tear the old screen down before the next one starts its work
        self.screen = Screen::Landing(LandingView::new(self.navigator.clone()));

        self.screen = match navigation {
            Navigation::Landing => Screen::Landing(LandingView::new(self.navigator.clone())),
            Navigation::Form => Screen::Form(FormView::new(
                self.navigator.clone(),
                self.ctx.submit_delay,
            )),
            Navigation::Results(payload) => Screen::Results(ResultsView::mount(
                payload,
                &self.ctx,
                self.navigator.clone(),
            )),
        };
    }

    /// Wait for the mounted view to request a transition, then apply it
    pub async fn next_navigation(&mut self) -> Option<Route> {
        let navigation = self.inbox.recv().await?;
        let route = navigation.route();
        self.navigate(navigation);
        Some(route)
    }

    /// Apply any transitions already requested, without waiting
    pub fn drain_navigation(&mut self) -> Option<Route> {
        let mut last = None;
        while let Ok(navigation) = self.inbox.try_recv() {
            last = Some(navigation.route());
            self.navigate(navigation);
        }
        last
    }
}
