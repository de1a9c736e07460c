//! Emit command
//!
//! Usage: loglib emit [--level <LEVEL>] [--stream] <MESSAGE>...

use clap::Args;
use loglib::{LogFacade, Severity};

#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Severity of the record
    #[arg(short, long, default_value = "INFO", value_parser = super::parse_severity)]
    pub level: Severity,

    /// Build the record word by word through a log stream
    #[arg(long)]
    pub stream: bool,

    /// Message words, joined with single spaces
    #[arg(required = true)]
    pub message: Vec<String>,
}

/// Execute emit command
pub fn execute(facade: &LogFacade, args: EmitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.stream {
        let mut stream = facade.stream(args.level);
        for (i, word) in args.message.iter().enumerate() {
            if i > 0 {
                stream.append(' ');
            }
            stream.append(word);
        }
    } else {
        facade.log(args.level, &args.message.join(" "));
    }
    Ok(())
}
