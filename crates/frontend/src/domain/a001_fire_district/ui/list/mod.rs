use crate::domain::a001_fire_district::api;
use crate::layout::global_context::use_global_context;
use crate::shared::export::{download_text, CSV_CONTENT_TYPE};
use crate::shared::notice::{Notice, NoticeBox};
use contracts::domain::a001_fire_district::aggregate::{districts_to_csv, resolve_district_id};
use contracts::domain::a001_fire_district::DistrictListItem;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const CSV_FILE_NAME: &str = "districts.csv";

#[derive(Clone, Debug, PartialEq)]
enum ListState {
    Loading,
    Failed(String),
    Loaded(Vec<DistrictListItem>),
}

/// Keeps the picked name if it is still listed, otherwise picks the first row
fn reconcile_selection(rows: &[DistrictListItem], current: &str) -> String {
    if rows.iter().any(|row| row.name == current) {
        current.to_string()
    } else {
        rows.first().map(|row| row.name.clone()).unwrap_or_default()
    }
}

fn export_csv(rows: &[DistrictListItem]) -> Result<(), String> {
    let bytes = districts_to_csv(rows)?;
    let content = String::from_utf8(bytes).map_err(|e| e.to_string())?;
    download_text(&content, CSV_CONTENT_TYPE, CSV_FILE_NAME)
}

#[component]
pub fn DistrictListView() -> impl IntoView {
    let ctx = use_global_context();

    let state = RwSignal::new(ListState::Loading);
    let selected = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let deleting = RwSignal::new(false);

    // Re-fetches on mount and whenever a save or delete bumps the version
    Effect::new(move |_| {
        ctx.track_districts();
        spawn_local(async move {
            match api::fetch_districts().await {
                Ok(rows) => {
                    selected.set(reconcile_selection(&rows, &selected.get_untracked()));
                    state.set(ListState::Loaded(rows));
                }
                Err(e) => state.set(ListState::Failed(e)),
            }
        });
    });

    let on_download_csv = move |_| {
        let ListState::Loaded(rows) = state.get_untracked() else {
            return;
        };
        if let Err(e) = export_csv(&rows) {
            notice.set(Some(Notice::Error(e)));
        }
    };

    let on_delete = move |_| {
        let ListState::Loaded(rows) = state.get_untracked() else {
            return;
        };
        let name = selected.get_untracked();
        let Some(id) = resolve_district_id(&rows, &name).map(str::to_string) else {
            return;
        };

        deleting.set(true);
        notice.set(None);
        spawn_local(async move {
            match api::delete_district(&id).await {
                Ok(()) => {
                    log::info!("Deleted district '{}' ({})", name, id);
                    notice.set(Some(Notice::Success(format!("{} deleted", name))));
                    ctx.notify_districts_changed();
                }
                Err(e) => notice.set(Some(Notice::Error(e))),
            }
            deleting.set(false);
        });
    };

    view! {
        <div class="district-list">
            {move || match state.get() {
                ListState::Loading => view! {
                    <span class="district-list__loading">"Loading..."</span>
                }
                .into_any(),
                ListState::Failed(e) => view! { <NoticeBox notice=Notice::Error(e) /> }.into_any(),
                ListState::Loaded(rows) if rows.is_empty() => view! {
                    <NoticeBox notice=Notice::Info("No districts saved yet.".to_string()) />
                    {move || notice.get().map(|n| view! { <NoticeBox notice=n /> })}
                }
                .into_any(),
                ListState::Loaded(rows) => {
                    let options = rows.clone();
                    view! {
                        <div class="table">
                            <table class="table__data table--striped">
                                <thead class="table__head">
                                    <tr>
                                        <th class="table__header-cell">"district_name"</th>
                                        <th class="table__header-cell">"created_at"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows
                                        .into_iter()
                                        .map(|row| view! {
                                            <tr class="table__row">
                                                <td class="table__cell">{row.name}</td>
                                                <td class="table__cell">{row.created_at}</td>
                                            </tr>
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>

                        <Flex vertical=true gap=FlexGap::Medium>
                            <Button on_click=on_download_csv>"Download Districts CSV"</Button>

                            <label class="form__label" for="district-to-delete">
                                "Select a district to delete"
                            </label>
                            <select
                                id="district-to-delete"
                                class="doc-filter__select"
                                on:change=move |ev| selected.set(event_target_value(&ev))
                            >
                                {options
                                    .into_iter()
                                    .map(|row| {
                                        let option_value = row.name.clone();
                                        let compared = row.name.clone();
                                        let label = row.name;
                                        let is_selected = move || selected.get() == compared;
                                        view! {
                                            <option value=option_value selected=is_selected>
                                                {label}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>

                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=on_delete
                                disabled=move || deleting.get() || selected.get().is_empty()
                            >
                                {move || if deleting.get() { "Deleting..." } else { "Delete District" }}
                            </Button>

                            {move || notice.get().map(|n| view! { <NoticeBox notice=n /> })}
                        </Flex>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str) -> DistrictListItem {
        DistrictListItem {
            id: id.into(),
            name: name.into(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_selection_survives_refresh() {
        let rows = vec![row("a", "North"), row("b", "South")];
        assert_eq!(reconcile_selection(&rows, "South"), "South");
    }

    #[test]
    fn test_selection_falls_back_to_first_row() {
        let rows = vec![row("a", "North"), row("b", "South")];
        assert_eq!(reconcile_selection(&rows, "Gone"), "North");
        assert_eq!(reconcile_selection(&rows, ""), "North");
        assert_eq!(reconcile_selection(&[], "North"), "");
    }
}
