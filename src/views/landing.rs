use crate::views::{Navigation, Navigator};

/// Static entry screen with a single call to action
#[derive(Debug, Clone)]
pub struct LandingView {
    navigator: Navigator,
}

impl LandingView {
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }

    /// "Get started": go to the profile form
    pub fn start(&self) {
        self.navigator.navigate(Navigation::Form);
    }
}
