// Job catalogue: the read-only listing file the board renders.

pub mod handlers;
pub mod models;
pub mod store;
