use leptos::prelude::*;

/// App-wide reactive state shared through context.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Bumped whenever the set of saved districts changes
    pub districts_version: RwSignal<u32>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            districts_version: RwSignal::new(0),
        }
    }

    /// Tell every subscriber to re-fetch the saved districts
    pub fn notify_districts_changed(&self) {
        self.districts_version.update(|v| *v = v.wrapping_add(1));
    }

    /// Reads the version inside a reactive scope so the caller re-runs on change
    pub fn track_districts(&self) -> u32 {
        self.districts_version.get()
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}
