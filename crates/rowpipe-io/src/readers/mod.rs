//! Table-load readers that produce a whole `RowSet`.

pub mod csv;
