pub mod logging;
pub mod scoped_buffer;
pub mod sized_query;
