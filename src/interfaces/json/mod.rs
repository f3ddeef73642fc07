pub mod response_writer;

pub use response_writer::ResponseWriter;
