pub mod map_bridge;

use crate::domain::a001_fire_district::api;
use crate::layout::global_context::use_global_context;
use crate::shared::export::download_blob;
use crate::shared::notice::{Notice, NoticeBox};
use contracts::domain::a001_fire_district::{DistrictDraft, DistrictGeometry, ExportFormat};
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Map on the left, district information for the latest drawing on the right.
#[component]
pub fn DrawingView() -> impl IntoView {
    let ctx = use_global_context();

    let drawn = RwSignal::new(None::<DistrictGeometry>);
    let name = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let saving = RwSignal::new(false);
    let exporting = RwSignal::new(None::<ExportFormat>);
    let map_error = RwSignal::new(None::<String>);
    let map_ref = NodeRef::<Div>::new();
    let mounted = StoredValue::new(false);

    Effect::new(move |_| {
        let Some(container) = map_ref.get() else {
            return;
        };
        if mounted.get_value() {
            return;
        }
        mounted.set_value(true);

        let result = map_bridge::mount(&container, move |geometry_json| {
            notice.set(None);
            match geometry_json {
                Some(json) => match map_bridge::parse_drawn_geometry(&json) {
                    Ok(geometry) => drawn.set(Some(geometry)),
                    Err(e) => {
                        log::warn!("Ignoring drawn shape: {}", e);
                        drawn.set(None);
                    }
                },
                None => drawn.set(None),
            }
        });
        if let Err(e) = result {
            log::error!("{}", e);
            map_error.set(Some(e));
        }
    });

    let current_draft = move || {
        drawn.get_untracked().map(|geometry| DistrictDraft {
            name: name.get_untracked(),
            geometry,
        })
    };

    let on_save = move |_| {
        let Some(draft) = current_draft() else {
            return;
        };
        saving.set(true);
        notice.set(None);
        spawn_local(async move {
            match api::save_district(&draft).await {
                Ok(saved) => {
                    log::info!("Saved district '{}' as {}", draft.display_name(), saved.id);
                    notice.set(Some(Notice::Success("Polygon saved!".to_string())));
                    ctx.notify_districts_changed();
                }
                Err(e) => notice.set(Some(Notice::Error(e))),
            }
            saving.set(false);
        });
    };

    let on_export = move |format: ExportFormat| {
        let Some(draft) = current_draft() else {
            return;
        };
        exporting.set(Some(format));
        spawn_local(async move {
            let result = match api::fetch_export(&draft, format).await {
                Ok(blob) => download_blob(&blob, format.file_name()),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                notice.set(Some(Notice::Error(e)));
            }
            exporting.set(None);
        });
    };

    view! {
        <div class="draw-layout">
            <div class="draw-layout__map">
                <h2 class="panel__title">"Map"</h2>
                <div class="map" node_ref=map_ref></div>
                {move || map_error.get().map(|e| view! { <NoticeBox notice=Notice::Error(e) /> })}
            </div>

            <div class="draw-layout__info">
                <h2 class="panel__title">"District Information"</h2>
                {move || {
                    if drawn.get().is_none() {
                        return view! {
                            <NoticeBox notice=Notice::Info(
                                "Draw a polygon or rectangle on the map to define a district.".to_string(),
                            ) />
                        }
                        .into_any();
                    }

                    view! {
                        <Card>
                            <Flex vertical=true gap=FlexGap::Medium>
                                <label class="form__label" for="district-name">
                                    "Enter district name:"
                                </label>
                                <input
                                    id="district-name"
                                    type="text"
                                    class="form__input"
                                    placeholder="Unnamed District"
                                    prop:value=move || name.get()
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                />
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=on_save
                                    disabled=move || saving.get()
                                >
                                    {move || if saving.get() { "Saving..." } else { "Save" }}
                                </Button>
                                {move || notice.get().map(|n| view! { <NoticeBox notice=n /> })}
                            </Flex>
                        </Card>

                        <h3 class="panel__subtitle">"Export Options"</h3>
                        <Flex vertical=true gap=FlexGap::Small>
                            {ExportFormat::ALL
                                .into_iter()
                                .map(|format| {
                                    view! {
                                        <Button
                                            on_click=move |_| on_export(format)
                                            disabled=move || exporting.get().is_some()
                                        >
                                            {move || {
                                                if exporting.get() == Some(format) {
                                                    "Preparing..."
                                                } else {
                                                    format.button_label()
                                                }
                                            }}
                                        </Button>
                                    }
                                })
                                .collect_view()}
                        </Flex>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}
