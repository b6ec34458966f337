use crate::command::handlers::{convert, list};
use crate::command::types::Command;
use crate::engine::adjust::Float32Encoding;
use crate::shared::config::Settings;
use std::io::Write;
use tracing::debug;

pub fn dispatch_command<W: Write>(
    cmd: &Command,
    settings: &Settings,
    writer: &mut W,
) -> anyhow::Result<()> {
    debug!(target: "dv_enabler::dispatch", command = ?cmd, "Dispatching command");

    match cmd {
        Command::List {
            index,
            verbose,
            json,
        } => list::handle(index, *verbose, *json, writer),
        Command::Convert {
            index,
            output,
            fields,
            exact_float32,
        } => {
            let mut options = settings.synthesis.options();
            if *exact_float32 {
                options = options.with_float32_encoding(Float32Encoding::SinglePrecision);
            }
            convert::handle(index, output, fields, options, writer).map(|_| ())
        }
    }
}
