use std::io;
use std::process::ExitCode;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::commands::base_commands::CliArgs;

pub fn completions_command(shell: Shell) -> ExitCode {
    let mut command = CliArgs::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
    ExitCode::SUCCESS
}
