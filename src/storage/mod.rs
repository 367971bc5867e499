pub mod batch;
pub mod connection;
pub mod entity;
pub mod schema;

pub use batch::RowBatch;
pub use connection::establish_connection;
