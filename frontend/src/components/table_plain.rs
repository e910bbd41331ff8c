use datagrid_shared::{cell_text, value_text, Filter, SortDirection};
use serde_json::Value;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::Row;

/// One column of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Row field rendered in this column; also used as the sort and filter key.
    pub prop: String,
    pub header: String,
    pub sortable: bool,
    pub filterable: bool,
}

impl ColumnDef {
    pub fn new(prop: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            header: header.into(),
            sortable: false,
            filterable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct TableProps {
    pub data: Vec<Row>,
    pub columns: Vec<ColumnDef>,
    pub order_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub filter: Filter,
    pub on_change_order_by: Callback<String>,
    pub on_change_filter: Callback<(String, Value)>,
    #[prop_or_default]
    pub on_row_click: Option<Callback<Row>>,
    /// Extra content rendered in a full-width row below each data row.
    #[prop_or_default]
    pub sub_component: Option<Callback<Row, Html>>,
}

fn sort_indicator(column: &ColumnDef, props: &TableProps) -> &'static str {
    if props.order_by.as_deref() != Some(column.prop.as_str()) {
        return "";
    }
    if SortDirection::is_desc(props.sort_direction) {
        " ▼"
    } else {
        " ▲"
    }
}

/// Default table renderer: sortable headers, a filter row and plain text cells.
#[function_component(TablePlain)]
pub fn table_plain(props: &TableProps) -> Html {
    let has_filters = props.columns.iter().any(|column| column.filterable);

    let header_cells = props.columns.iter().map(|column| {
        if column.sortable {
            let on_click = {
                let on_change_order_by = props.on_change_order_by.clone();
                let prop = column.prop.clone();
                Callback::from(move |_: MouseEvent| on_change_order_by.emit(prop.clone()))
            };
            html! {
                <th class="sortable" onclick={on_click}>
                    {&column.header}{sort_indicator(column, props)}
                </th>
            }
        } else {
            html! { <th>{&column.header}</th> }
        }
    });

    let filter_cells = props.columns.iter().map(|column| {
        if !column.filterable {
            return html! { <th></th> };
        }
        let current = props.filter.get(&column.prop).map(value_text).unwrap_or_default();
        let on_change = {
            let on_change_filter = props.on_change_filter.clone();
            let prop = column.prop.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let text = input.value();
                // An empty box clears the column filter
                let value = if text.is_empty() {
                    Value::Null
                } else {
                    Value::String(text)
                };
                on_change_filter.emit((prop.clone(), value));
            })
        };
        html! {
            <th>
                <input type="text" class="filter-input" value={current} onchange={on_change} />
            </th>
        }
    });

    let column_count = props.columns.len().to_string();

    html! {
        <table class="data-grid-table">
            <thead>
                <tr>{for header_cells}</tr>
                {if has_filters {
                    html! { <tr class="filter-row">{for filter_cells}</tr> }
                } else {
                    html! {}
                }}
            </thead>
            <tbody>
                {for props.data.iter().map(|row| {
                    let on_click = props.on_row_click.clone().map(|on_row_click| {
                        let row = row.clone();
                        Callback::from(move |_: MouseEvent| on_row_click.emit(row.clone()))
                    });
                    let sub_row = props.sub_component.as_ref().map(|sub_component| html! {
                        <tr class="sub-row">
                            <td colspan={column_count.clone()}>{sub_component.emit(row.clone())}</td>
                        </tr>
                    });

                    html! {
                        <>
                            <tr class={classes!(on_click.is_some().then_some("clickable"))} onclick={on_click}>
                                {for props.columns.iter().map(|column| html! {
                                    <td>{cell_text(row, &column.prop)}</td>
                                })}
                            </tr>
                            {sub_row.unwrap_or_default()}
                        </>
                    }
                })}
            </tbody>
        </table>
    }
}
