use std::path::{Path, PathBuf};

/// Arguments shared by every puzzle binary.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Puzzle input, read from stdin when omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

impl InputArgs {
    pub fn path(&self) -> Option<&Path> {
        self.input.as_deref()
    }
}

/// Logs to stderr, `RUST_LOG` overrides the default of warnings only.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::{CommandFactory, Parser};

    #[derive(Parser, Debug)]
    struct Args {
        #[command(flatten)]
        input: InputArgs,
    }

    #[test]
    fn test_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_input_path() {
        let args = Args::parse_from(["day13"]);
        assert_eq!(args.input.path(), None);

        let args = Args::parse_from(["day13", "input/day13.txt"]);
        assert_eq!(args.input.path(), Some(Path::new("input/day13.txt")));
    }
}
