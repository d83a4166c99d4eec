//! Command execution implementations

use super::Commands;
use super::{names, transcribe};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Transcribe {
                source,
                output_dir,
                common_strings,
                names_file,
                force_regen_names,
                delimiter,
                strict,
                parallel,
                quiet,
            } => transcribe::execute(&transcribe::TranscribeArgs {
                source,
                output_dir,
                common_strings,
                names_file,
                force_regen_names: *force_regen_names,
                delimiter: *delimiter,
                strict: *strict,
                parallel: *parallel,
                quiet: *quiet,
            }),
            Commands::Names {
                common_strings,
                names_file,
                delimiter,
            } => names::execute(common_strings, names_file, *delimiter),
        }
    }
}
