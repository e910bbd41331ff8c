use datagrid_shared::{GridHandle, GridOptions, PagingLabels};
use yew::prelude::*;

use crate::components::paging::{Paging, PagingProps};
use crate::components::table_plain::{ColumnDef, TablePlain, TableProps};
use crate::hooks::{use_data_grid, LoaderRef, Row, UseDataGridProps};

#[derive(Properties, PartialEq)]
pub struct DataGridProps {
    pub columns: Vec<ColumnDef>,
    #[prop_or_default]
    pub loader: Option<LoaderRef>,
    #[prop_or_default]
    pub options: GridOptions,
    /// Grid state owned elsewhere; several grids may render the same handle.
    #[prop_or_default]
    pub grid: Option<GridHandle<Row>>,
    #[prop_or_default]
    pub disable_paging: bool,
    #[prop_or_default]
    pub labels: PagingLabels,
    #[prop_or_default]
    pub on_row_click: Option<Callback<Row>>,
    #[prop_or_default]
    pub sub_component: Option<Callback<Row, Html>>,
    #[prop_or_default]
    pub render_table: Option<Callback<TableProps, Html>>,
    #[prop_or_default]
    pub render_loading: Option<Callback<(), Html>>,
    /// Receives the retry callback.
    #[prop_or_default]
    pub render_error: Option<Callback<Callback<()>, Html>>,
    #[prop_or_default]
    pub render_paging: Option<Callback<PagingProps, Html>>,
}

fn default_error(retry: Callback<()>) -> Html {
    let on_retry = Callback::from(move |_: MouseEvent| retry.emit(()));
    html! {
        <div class="data-grid-error">
            <p>{"The data could not be loaded."}</p>
            <button onclick={on_retry}>{"Reload"}</button>
        </div>
    }
}

#[function_component(DataGrid)]
pub fn data_grid(props: &DataGridProps) -> Html {
    let grid = use_data_grid(&UseDataGridProps {
        loader: props.loader.clone(),
        options: props.options.clone(),
        grid: props.grid.clone(),
    });
    let state = &grid.state;
    let actions = &grid.actions;

    if state.error {
        let retry = actions.load.clone();
        return match &props.render_error {
            Some(render_error) => render_error.emit(retry),
            None => default_error(retry),
        };
    }

    let loading = if state.loading {
        match &props.render_loading {
            Some(render_loading) => render_loading.emit(()),
            None => html! { <div class="loading">{"Loading..."}</div> },
        }
    } else {
        html! {}
    };

    let table_props = TableProps {
        data: state.data.clone(),
        columns: props.columns.clone(),
        order_by: state.order_by.clone(),
        sort_direction: state.sort_direction,
        filter: state.filter.clone(),
        on_change_order_by: actions.on_change_order_by.clone(),
        on_change_filter: actions.on_change_filter.clone(),
        on_row_click: props.on_row_click.clone(),
        sub_component: props.sub_component.clone(),
    };
    let table = match &props.render_table {
        Some(render_table) => render_table.emit(table_props),
        None => html! { <TablePlain ..table_props /> },
    };

    let paging = if props.disable_paging {
        html! {}
    } else {
        let paging_props = PagingProps {
            view: grid.paging.clone(),
            labels: props.labels.clone(),
            on_change_page: actions.on_change_page.clone(),
            on_change_rows_per_page: actions.on_change_rows_per_page.clone(),
        };
        match &props.render_paging {
            Some(render_paging) => render_paging.emit(paging_props),
            None => html! { <Paging ..paging_props /> },
        }
    };

    html! {
        <div class="data-grid">
            {loading}
            {table}
            {paging}
        </div>
    }
}
