//! Yew rendering for `datagrid-shared`.
//!
//! [`components::DataGrid`] is the drop-in component. Applications that want
//! their own markup use [`hooks::use_data_grid`] directly and render from the
//! returned state and actions.

pub mod components;
pub mod hooks;
pub mod services;
