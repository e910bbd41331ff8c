pub mod use_data_grid;

pub use use_data_grid::{
    create_grid, spawn_pending, use_data_grid, LoaderRef, Row, UseDataGridActions,
    UseDataGridProps, UseDataGridResult,
};
