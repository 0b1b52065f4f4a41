mod output;
mod pipeline;

pub use pipeline::{CompileOutput, compile_file, compile_source};
