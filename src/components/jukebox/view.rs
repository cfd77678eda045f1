use super::{
    clear_jukebox_queue, del_queue_jukebox_entries, get_jukebox_list, parse_jukebox_list,
    view_queue_jukebox_list_click_handler, JukeboxFetch, JukeboxLayout, JukeboxRender, JukeboxRow,
    JukeboxView, Paging,
};
use crate::api::{JukeboxMode, MympdClient, PartitionSettings};
use crate::components::{Icon, SearchExpression};
use crate::db::{save_settings, ClientSettings, ViewLayout};
use dioxus::prelude::*;
use tracing::{debug, warn};

#[component]
pub fn QueueJukeboxSong() -> Element {
    rsx! {
        QueueJukebox { view: JukeboxView::Song }
    }
}

#[component]
pub fn QueueJukeboxAlbum() -> Element {
    rsx! {
        QueueJukebox { view: JukeboxView::Album }
    }
}

/// Jukebox list for one view. The filter widget feeds the expression; the
/// list is fetched again whenever mode, paging, expression or settings change.
#[component]
pub fn QueueJukebox(view: JukeboxView) -> Element {
    let mut client_settings = use_context::<Signal<ClientSettings>>();
    let partition = use_context::<Signal<PartitionSettings>>();
    let expression = use_signal(String::new);
    let mut paging = use_signal(|| Paging::first(client_settings.peek().page_size));
    let mut reload = use_signal(|| 0u32);

    // Other settings writes, like the layout toggle, keep the current page.
    let page_size = use_memo(move || client_settings().page_size);
    use_effect(move || {
        let resized = paging.peek().resized(page_size());
        if *paging.peek() != resized {
            paging.set(resized);
        }
    });

    use_effect(move || {
        let _ = expression();
        let first = Paging::first(*page_size.peek());
        if *paging.peek() != first {
            paging.set(first);
        }
    });

    let list = use_resource(move || {
        let _ = reload();
        let mode = partition().jukebox_mode();
        let settings = client_settings();
        let fetch = get_jukebox_list(
            mode,
            paging(),
            &view.settings(&settings).fields,
            &expression(),
        );
        async move {
            match fetch {
                JukeboxFetch::Disabled => None,
                JukeboxFetch::Fetch(request) => {
                    let response = MympdClient::new(settings.server())
                        .list_jukebox(&request)
                        .await;
                    let clicks = partition.peek().webui.clone();
                    Some(parse_jukebox_list(response, view, mode, &settings, &clicks))
                }
            }
        }
    });

    let mode = partition().jukebox_mode();
    let disabled = mode == JukeboxMode::Off;
    let layout = view.settings(&client_settings()).layout;

    let on_clear = move |_| {
        let server = client_settings.peek().server();
        spawn(async move {
            MympdClient::new(server).dispatch(clear_jukebox_queue()).await;
            reload += 1;
        });
    };

    let on_remove = move |positions: Vec<u32>| {
        let server = client_settings.peek().server();
        spawn(async move {
            MympdClient::new(server)
                .dispatch(del_queue_jukebox_entries(&positions))
                .await;
            reload += 1;
        });
    };

    let on_row_click = move |row: JukeboxRow| {
        let settings = partition.peek();
        let Some(click) =
            view_queue_jukebox_list_click_handler(settings.jukebox_mode(), &row, &settings.webui)
        else {
            return;
        };
        let Some(request) = click.to_request() else {
            debug!(target: "jukebox", ?click, "click action has no queue request");
            return;
        };
        let server = client_settings.peek().server();
        spawn(async move {
            MympdClient::new(server).dispatch(request).await;
        });
    };

    let on_toggle_layout = move |_| {
        let updated = {
            let mut settings = client_settings.write();
            let view_settings = view.settings_mut(&mut settings);
            view_settings.layout = match view_settings.layout {
                ViewLayout::Table => ViewLayout::Grid,
                ViewLayout::Grid => ViewLayout::Table,
            };
            settings.clone()
        };
        spawn(async move {
            if let Err(err) = save_settings(updated).await {
                warn!(target: "settings", error = %err, "could not save view layout");
            }
        });
    };

    rsx! {
        div { class: "space-y-6",
            header { class: "page-header page-header--split",
                div {
                    h1 { class: "page-title", "Jukebox" }
                    p { class: "page-subtitle", "{view.label()} queue" }
                }
                div { class: "flex items-center gap-2",
                    button {
                        r#type: "button",
                        class: "px-3 py-2 rounded-xl bg-zinc-800 hover:bg-zinc-700 text-zinc-300 hover:text-white transition-colors",
                        title: "Toggle table / grid",
                        onclick: on_toggle_layout,
                        Icon {
                            name: if layout == ViewLayout::Table { "grid_view".to_string() } else { "table_rows".to_string() },
                            class: "".to_string(),
                        }
                    }
                    button {
                        r#type: "button",
                        disabled: disabled,
                        class: "px-4 py-2 rounded-xl bg-zinc-800 hover:bg-zinc-700 text-zinc-300 hover:text-white transition-colors flex items-center gap-2",
                        onclick: on_clear,
                        Icon { name: "delete".to_string(), class: "".to_string() }
                        "Clear"
                    }
                }
            }

            SearchExpression { view_id: view.id().to_string(), expression: expression }

            div {
                id: view.disabled_id(),
                class: if disabled { "flex flex-col items-center justify-center py-20" } else { "hidden" },
                Icon { name: "queue_music".to_string(), class: "text-5xl text-zinc-600 mb-4".to_string() }
                p { class: "text-zinc-400", "Jukebox is disabled" }
            }

            div {
                id: view.list_id(),
                class: if disabled { "hidden" } else { "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 overflow-hidden" },
                {
                    match list() {
                        Some(Some(JukeboxRender::Failed(message))) => rsx! {
                            div { class: "alert alert-danger p-4 text-red-300", "{message}" }
                        },
                        Some(Some(JukeboxRender::Ready { layout: JukeboxLayout::Table { columns, rows, footer }, total_entities, .. })) => rsx! {
                            JukeboxTable {
                                columns: columns,
                                rows: rows,
                                footer: footer,
                                on_row_click: on_row_click,
                                on_remove: on_remove,
                            }
                            Pager { paging: paging, total_entities: total_entities }
                        },
                        Some(Some(JukeboxRender::Ready { layout: JukeboxLayout::Grid { cards }, total_entities, .. })) => rsx! {
                            JukeboxGrid {
                                cards: cards,
                                on_row_click: on_row_click,
                                on_remove: on_remove,
                            }
                            Pager { paging: paging, total_entities: total_entities }
                        },
                        Some(None) => rsx! {},
                        None => rsx! {
                            div { class: "flex items-center justify-center py-8",
                                Icon { name: "hourglass_empty".to_string(), class: "text-zinc-500".to_string() }
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn JukeboxTable(
    columns: Vec<String>,
    rows: Vec<JukeboxRow>,
    footer: Option<String>,
    on_row_click: EventHandler<JukeboxRow>,
    on_remove: EventHandler<Vec<u32>>,
) -> Element {
    let column_count = columns.len() + 1;

    rsx! {
        table { class: "w-full text-sm",
            thead {
                tr { class: "text-left text-zinc-500",
                    for column in columns.iter() {
                        th { key: "{column}", class: "px-3 py-2 font-medium", "{column}" }
                    }
                    th { class: "px-3 py-2" }
                }
            }
            tbody { class: "divide-y divide-zinc-800/50",
                if rows.is_empty() {
                    tr {
                        td { colspan: "{column_count}", class: "px-3 py-6 text-center text-zinc-500",
                            "Empty list"
                        }
                    }
                }
                for row in rows {
                    {
                        let clicked = row.clone();
                        let pos = row.pos;
                        rsx! {
                            tr {
                                key: "{row.pos}-{row.uri}",
                                class: "hover:bg-zinc-700/30 transition-colors cursor-pointer group",
                                title: row.title.unwrap_or_default(),
                                onclick: move |_| on_row_click.call(clicked.clone()),
                                for (idx , cell) in row.cells.iter().enumerate() {
                                    td { key: "{idx}", class: "px-3 py-2 text-zinc-300 truncate", "{cell}" }
                                }
                                td { class: "px-3 py-2 text-right",
                                    button {
                                        r#type: "button",
                                        title: "Remove",
                                        class: "p-1 text-zinc-500 hover:text-red-400 transition-colors",
                                        onclick: move |evt: MouseEvent| {
                                            evt.stop_propagation();
                                            on_remove.call(vec![pos]);
                                        },
                                        Icon { name: "close".to_string(), class: "".to_string() }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(footer) = footer {
                tfoot {
                    tr {
                        td { colspan: "{column_count}", class: "px-3 py-2 text-xs text-zinc-500",
                            span { "{footer}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn JukeboxGrid(
    cards: Vec<JukeboxRow>,
    on_row_click: EventHandler<JukeboxRow>,
    on_remove: EventHandler<Vec<u32>>,
) -> Element {
    rsx! {
        div { class: "grid grid-cols-2 md:grid-cols-4 gap-4 p-4",
            for card in cards {
                {
                    let clicked = card.clone();
                    let pos = card.pos;
                    rsx! {
                        div {
                            key: "{card.pos}-{card.uri}",
                            class: "rounded-xl bg-zinc-900/50 p-4 cursor-pointer hover:bg-zinc-700/30 transition-colors",
                            onclick: move |_| on_row_click.call(clicked.clone()),
                            div { class: "flex items-start justify-between gap-2",
                                p { class: "font-medium text-white truncate", "{card.name}" }
                                button {
                                    r#type: "button",
                                    title: "Remove",
                                    class: "text-zinc-500 hover:text-red-400",
                                    onclick: move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        on_remove.call(vec![pos]);
                                    },
                                    Icon { name: "close".to_string(), class: "".to_string() }
                                }
                            }
                            for (idx , cell) in card.cells.iter().enumerate() {
                                p { key: "{idx}", class: "text-xs text-zinc-400 truncate", "{cell}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Pager(paging: Signal<Paging>, total_entities: i64) -> Element {
    let mut paging = paging;
    let page = paging();

    rsx! {
        div { class: "flex items-center justify-end gap-2 p-3",
            button {
                r#type: "button",
                disabled: !page.has_previous(),
                class: "p-1 text-zinc-400 hover:text-white disabled:opacity-40",
                onclick: move |_| paging.set(page.previous()),
                Icon { name: "chevron_left".to_string(), class: "".to_string() }
            }
            button {
                r#type: "button",
                disabled: !page.has_next(total_entities),
                class: "p-1 text-zinc-400 hover:text-white disabled:opacity-40",
                onclick: move |_| paging.set(page.next()),
                Icon { name: "chevron_right".to_string(), class: "".to_string() }
            }
        }
    }
}
