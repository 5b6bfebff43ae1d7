//! # Repository Implementations
//!
//! One repository per backend table, all tenant-scoped:
//!
//! - [`store`] - Stores and warehouses
//! - [`employee`] - Employee records
//! - [`toy`] - Toy catalog and store/warehouse assignment
//! - [`sale`] - Sale recording and the enriched month-window fetch

pub mod employee;
pub mod sale;
pub mod store;
pub mod toy;
