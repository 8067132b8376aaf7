pub mod cli;
pub mod cluster;
pub mod ctx;
pub mod error;
pub mod features;
pub mod genome;
pub mod io;
pub mod labels;
pub mod math;
pub mod pipeline;
pub mod schema;
