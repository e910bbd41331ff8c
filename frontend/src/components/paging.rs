use datagrid_shared::{PagingLabels, PagingView};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct PagingProps {
    pub view: PagingView,
    #[prop_or_default]
    pub labels: PagingLabels,
    /// Receives the zero-based page to show.
    pub on_change_page: Callback<usize>,
    pub on_change_rows_per_page: Callback<usize>,
}

#[function_component(Paging)]
pub fn paging(props: &PagingProps) -> Html {
    let view = &props.view;

    let on_previous = {
        let on_change_page = props.on_change_page.clone();
        let page = view.page;
        Callback::from(move |_: MouseEvent| on_change_page.emit(page.saturating_sub(1)))
    };

    let on_next = {
        let on_change_page = props.on_change_page.clone();
        let page = view.page;
        Callback::from(move |_: MouseEvent| on_change_page.emit(page + 1))
    };

    let on_rows_change = {
        let on_change_rows_per_page = props.on_change_rows_per_page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(rows) = select.value().parse::<usize>() {
                on_change_rows_per_page.emit(rows);
            }
        })
    };

    html! {
        <div class="data-grid-paging">
            <label class="rows-per-page">
                {&props.labels.rows_per_page}
                <select onchange={on_rows_change}>
                    {for view.rows_per_page_options.iter().map(|option| html! {
                        <option value={option.to_string()} selected={*option == view.rows_per_page}>
                            {option}
                        </option>
                    })}
                </select>
            </label>
            <span class="range">{props.labels.format_range(view)}</span>
            <button class="previous" disabled={!view.has_previous()} onclick={on_previous}>
                {&props.labels.previous}
            </button>
            <button class="next" disabled={!view.has_next()} onclick={on_next}>
                {&props.labels.next}
            </button>
        </div>
    }
}
