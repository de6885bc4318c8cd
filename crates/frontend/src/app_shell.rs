//! Application shell: the drawing area on top and the saved-districts
//! list below it.

use crate::domain::a001_fire_district::ui::draw::DrawingView;
use crate::domain::a001_fire_district::ui::list::DistrictListView;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <Shell
            main=|| view! { <DrawingView /> }.into_any()
            below=|| view! {
                <h2 class="panel__title">"Saved Districts"</h2>
                <DistrictListView />
            }.into_any()
        />
    }
}
