pub mod data_grid;
pub mod paging;
pub mod table_plain;

pub use data_grid::{DataGrid, DataGridProps};
pub use paging::{Paging, PagingProps};
pub use table_plain::{ColumnDef, TablePlain, TableProps};
