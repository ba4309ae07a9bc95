use leptos::*;
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    application::{StockListConfig, StockListController},
    domain::{
        errors::ServiceError,
        logging::LogComponent,
        market_data::{MoneyFormatter, StockDataService, StockRow, Symbol, Trend},
    },
    infrastructure::{InMemoryStockService, UsdFormatter},
    log_error,
    presentation::cells::{render_row, sparkline_polyline, CellView},
    view_state::ListViewport,
};

pub const LIST_HEIGHT_PX: f64 = 640.0;
const SPARKLINE_WIDTH: f64 = 120.0;
const SPARKLINE_HEIGHT: f64 = 24.0;

pub type SharedStockList =
    Rc<RefCell<StockListController<Rc<dyn StockDataService>, Rc<dyn MoneyFormatter>>>>;

/// Builds a list controller around the given backend and formatter.
pub fn shared_stock_list(
    service: Rc<dyn StockDataService>,
    formatter: Rc<dyn MoneyFormatter>,
    config: StockListConfig,
) -> SharedStockList {
    Rc::new(RefCell::new(StockListController::new(service, formatter, config)))
}

/// Demo page: the stock list over the in-memory catalog plus a selection readout
#[component]
pub fn App() -> impl IntoView {
    let controller = shared_stock_list(
        Rc::new(InMemoryStockService::demo()),
        Rc::new(UsdFormatter),
        StockListConfig::default(),
    );

    let (selected, set_selected) = create_signal::<Option<Symbol>>(None);
    controller
        .borrow_mut()
        .add_selected_listener(Rc::new(move |symbol: &Symbol| set_selected.set(Some(symbol.clone()))));

    view! {
        <style>
            {r#"
            .stock-app {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                display: flex;
                gap: 20px;
                padding: 20px;
            }
            .stock-list.dark {
                background: #1e2530;
                color: #e0e0e0;
            }
            .stock-list .search-field {
                width: 100%;
                box-sizing: border-box;
                padding: 8px 10px;
                border-radius: 5px;
                border: 1px solid #4a5d73;
                background: rgba(255, 255, 255, 0.08);
                color: inherit;
            }
            .stock-row {
                display: flex;
                align-items: center;
                cursor: pointer;
                gap: 8px;
                box-sizing: border-box;
                padding: 0 8px;
            }
            .stock-row.selected {
                background: rgba(114, 198, 133, 0.2);
            }
            .selection-status {
                font-size: 14px;
            }
            "#}
        </style>
        <div class="stock-app">
            <StockList controller=controller />
            <div class="selection-status">
                {move || match selected.get() {
                    Some(symbol) => format!("Selected: {}", symbol),
                    None => "No stock selected".to_string(),
                }}
            </div>
        </div>
    }
}

/// Search field over a lazily paged grid of stock rows.
///
/// Every keystroke stores the filter and triggers a full refresh. Pages are
/// fetched when they scroll into view. Backend errors are logged and handed
/// to `on_error`; nothing is retried.
#[component]
pub fn StockList(
    controller: SharedStockList,
    #[prop(optional)] on_error: Option<Rc<dyn Fn(ServiceError)>>,
) -> impl IntoView {
    let config = controller.borrow().config().clone();
    let row_height = config.row_height_px;

    let viewport = create_rw_signal(ListViewport::new(row_height as f64, LIST_HEIGHT_PX, config.page_size));
    let page_size = viewport.with_untracked(|vp| vp.page_size);
    let total = create_rw_signal(0usize);
    let generation = create_rw_signal(0u64);
    let pages = create_rw_signal(BTreeMap::<usize, Vec<StockRow>>::new());
    let selected = create_rw_signal::<Option<Symbol>>(None);
    let grid_ref = create_node_ref::<html::Div>();

    let report: Rc<dyn Fn(ServiceError)> = Rc::new(move |error: ServiceError| {
        log_error!(LogComponent::Presentation("StockList"), "{}", error);
        if let Some(on_error) = &on_error {
            on_error(error);
        }
    });

    let load_visible: Rc<dyn Fn()> = {
        let controller = Rc::clone(&controller);
        let report = Rc::clone(&report);
        Rc::new(move || {
            let requests = viewport.with_untracked(|vp| vp.pages_to_fetch(total.get_untracked()));
            for request in requests {
                if pages.with_untracked(|loaded| loaded.contains_key(&request.index)) {
                    continue;
                }
                let fetched = controller.borrow().fetch(request.offset, request.limit as i64);
                match fetched {
                    Ok(rows) => pages.update(|loaded| {
                        loaded.insert(request.index, rows);
                    }),
                    Err(error) => {
                        report(error);
                        return;
                    }
                }
            }
        })
    };

    // Back to the top, then count plus the first page in one controller call.
    let refresh: Rc<dyn Fn()> = {
        let controller = Rc::clone(&controller);
        let load_visible = Rc::clone(&load_visible);
        let report = Rc::clone(&report);
        Rc::new(move || {
            viewport.update(|vp| vp.reset());
            if let Some(grid) = grid_ref.get_untracked() {
                grid.set_scroll_top(0);
            }
            let refreshed = controller.borrow().refresh(0, page_size as i64);
            match refreshed {
                Ok(page) => {
                    generation.set(page.generation);
                    total.set(page.total);
                    pages.set(BTreeMap::from([(0, page.rows)]));
                    load_visible();
                }
                Err(error) => {
                    total.set(0);
                    pages.set(BTreeMap::new());
                    report(error);
                }
            }
        })
    };

    refresh();

    let on_input = {
        let controller = Rc::clone(&controller);
        let refresh = Rc::clone(&refresh);
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            controller.borrow_mut().set_filter(&value);
            refresh();
        }
    };

    let on_scroll = {
        let load_visible = Rc::clone(&load_visible);
        move |ev: ev::Event| {
            let target: web_sys::Element = event_target(&ev);
            let top = target.scroll_top() as f64;
            viewport.update(|vp| vp.scroll_to(top, total.get_untracked()));
            load_visible();
        }
    };

    let on_row_click: Rc<dyn Fn(Symbol)> = {
        let controller = Rc::clone(&controller);
        Rc::new(move |symbol: Symbol| {
            // Clicking the selected row deselects it, as a single-select grid does.
            let next = if selected.get_untracked().as_ref() == Some(&symbol) { None } else { Some(symbol) };
            selected.set(next.clone());
            let notice = controller.borrow_mut().select(next);
            if let Some(notice) = notice {
                notice.deliver();
            }
        })
    };

    let visible_rows = move || {
        let (start, count) = viewport.with(|vp| vp.visible_range(total.get()));
        let current = generation.get();
        pages.with(|loaded| {
            (start..start + count)
                .filter_map(|index| {
                    loaded
                        .get(&(index / page_size))
                        .and_then(|rows| rows.get(index % page_size))
                        .map(|row| (current, index, row.clone()))
                })
                .collect::<Vec<_>>()
        })
    };

    let list_class = if config.dark_theme { "stock-list dark" } else { "stock-list" };

    view! {
        <div class=list_class style=format!("width: {}px; height: 100%;", config.width_px)>
            <input
                class="search-field"
                type="search"
                placeholder=config.placeholder.clone()
                on:input=on_input
            />
            <div
                class="stock-grid"
                node_ref=grid_ref
                style=format!("position: relative; overflow-y: auto; height: {}px;", LIST_HEIGHT_PX)
                on:scroll=on_scroll
            >
                <div style=move || format!("height: {}px;", viewport.with(|vp| vp.content_height_px(total.get())))>
                    <For
                        each=visible_rows
                        key=|(stamp, index, row)| (*stamp, *index, row.symbol.clone())
                        children=move |(_, index, row)| {
                            let symbol = row.symbol.clone();
                            let is_selected = Signal::derive(move || selected.get().as_ref() == Some(&symbol));
                            view! {
                                <StockRowView
                                    row=row
                                    top_px=index as f64 * row_height as f64
                                    height_px=row_height
                                    is_selected=is_selected
                                    on_click=Rc::clone(&on_row_click)
                                />
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn StockRowView(
    row: StockRow,
    top_px: f64,
    height_px: u32,
    is_selected: Signal<bool>,
    on_click: Rc<dyn Fn(Symbol)>,
) -> impl IntoView {
    let symbol = row.symbol.clone();
    let cells = render_row(&row)
        .into_iter()
        .map(|(column, cell)| {
            let width = match column.width_px() {
                Some(px) => format!("width: {}px; flex: none;", px),
                None => "flex: 1;".to_string(),
            };
            let content = match cell {
                CellView::Sparkline { values, trend } => {
                    view! { <Sparkline values=values trend=trend /> }.into_view()
                }
                other => {
                    let style = other.style();
                    let text = other.text().unwrap_or_default().to_string();
                    view! { <div style=style>{text}</div> }.into_view()
                }
            };
            view! { <div class=format!("cell cell-{}", column.as_ref()) style=width>{content}</div> }
        })
        .collect_view();

    view! {
        <div
            class="stock-row"
            class:selected=move || is_selected.get()
            style=format!("position: absolute; left: 0; right: 0; top: {}px; height: {}px;", top_px, height_px)
            on:click=move |_| on_click(symbol.clone())
        >
            {cells}
        </div>
    }
}

/// Inline SVG trend line; the trend names the CSS class and the stroke color.
#[component]
fn Sparkline(values: Vec<f64>, trend: Trend) -> impl IntoView {
    let points = sparkline_polyline(&values, SPARKLINE_WIDTH, SPARKLINE_HEIGHT);
    view! {
        <svg
            class=format!("sparkline-chart {}", trend.css_class())
            width=SPARKLINE_WIDTH
            height=SPARKLINE_HEIGHT
            viewBox=format!("0 0 {} {}", SPARKLINE_WIDTH, SPARKLINE_HEIGHT)
        >
            <polyline points=points fill="none" stroke=trend.color() stroke-width="1.5" />
        </svg>
    }
}
