use anyhow::Context;
use datagrid_frontend::components::{ColumnDef, DataGrid};
use datagrid_frontend::hooks::{create_grid, LoaderRef};
use datagrid_frontend::services::api::HttpSource;
use datagrid_frontend::services::logging::Logger;
use datagrid_shared::source::MemorySource;
use datagrid_shared::{GridOptions, SortDirection, StoreKind};
use serde_json::Value;
use yew::prelude::*;

const SAMPLE_PEOPLE: &str = r#"[
    { "id": 1, "name": "Ada", "city": "London", "age": 36 },
    { "id": 2, "name": "Grace", "city": "Arlington", "age": 85 },
    { "id": 3, "name": "Linus", "city": "Helsinki", "age": 54 },
    { "id": 4, "name": "Barbara", "city": "Boston", "age": 84 },
    { "id": 5, "name": "Ken", "city": "New Orleans", "age": 81 },
    { "id": 6, "name": "Margaret", "city": "Boston", "age": 88 },
    { "id": 7, "name": "Dennis", "city": "Bronxville", "age": 70 },
    { "id": 8, "name": "Frances", "city": "Palo Alto", "age": 88 },
    { "id": 9, "name": "Edsger", "city": "Rotterdam", "age": 72 },
    { "id": 10, "name": "Radia", "city": "Albuquerque", "age": 73 },
    { "id": 11, "name": "John", "city": "Budapest", "age": 53 },
    { "id": 12, "name": "Hedy", "city": "Vienna", "age": 85 }
]"#;

fn sample_people() -> anyhow::Result<Vec<Value>> {
    serde_json::from_str(SAMPLE_PEOPLE).context("Failed to parse sample people")
}

fn people_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "#"),
        ColumnDef::new("name", "Name").sortable().filterable(),
        ColumnDef::new("city", "City").sortable().filterable(),
        ColumnDef::new("age", "Age").sortable(),
    ]
}

#[function_component(App)]
fn app() -> Html {
    let source = use_memo((), |_| {
        let rows = sample_people().unwrap_or_else(|e| {
            Logger::error_with_component("demo", &format!("{:#}", e));
            Vec::new()
        });
        LoaderRef::new(MemorySource::new(rows))
    });
    let source = (*source).clone();

    // One grid state rendered by two tables
    let shared = {
        let source = source.clone();
        use_memo((), move |_| {
            create_grid(GridOptions::new().with_rows_per_page(5), Some(source))
        })
    };

    let remote = use_memo((), |_| LoaderRef::new(HttpSource::json_server("/api/people")));

    let selected = use_state(|| Option::<Value>::None);
    let on_row_click = {
        let selected = selected.clone();
        Callback::from(move |row: Value| selected.set(Some(row)))
    };

    let sub_component = Callback::from(|row: Value| {
        html! { <small>{format!("Record {}", row["id"])}</small> }
    });

    html! {
        <main class="demo">
            <section>
                <h2>{"Simple grid"}</h2>
                <DataGrid
                    columns={people_columns()}
                    loader={source.clone()}
                    on_row_click={on_row_click}
                />
                {if let Some(row) = &*selected {
                    html! { <p class="selected">{format!("Selected: {}", row["name"])}</p> }
                } else {
                    html! {}
                }}
            </section>

            <section>
                <h2>{"Sorted by age, newest first, with persisted state"}</h2>
                <DataGrid
                    columns={people_columns()}
                    loader={source.clone()}
                    options={GridOptions::new()
                        .with_order_by("age")
                        .with_sort(SortDirection::Desc)
                        .with_persist(StoreKind::Session, "demo-by-age")}
                    sub_component={sub_component}
                />
            </section>

            <section>
                <h2>{"Two views of one grid"}</h2>
                <DataGrid columns={people_columns()} grid={(*shared).clone()} />
                <DataGrid columns={people_columns()} grid={(*shared).clone()} disable_paging=true />
            </section>

            <section>
                <h2>{"Deferred first load"}</h2>
                <DataGrid
                    columns={people_columns()}
                    loader={source}
                    options={GridOptions::new().with_initial_load(false)}
                />
            </section>

            <section>
                <h2>{"Remote json-server grid"}</h2>
                <DataGrid columns={people_columns()} loader={(*remote).clone()} />
            </section>
        </main>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
