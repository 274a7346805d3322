//! Command definitions

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use color_eyre::{eyre::OptionExt, Result};
use tracing::debug;

use crate::db::{self, SubjectKind};
use crate::diagram::{self, raster::Scheme, spec, Request, Target, Width};

#[cfg(test)]
mod tests;

const FIELD_HELP: &str = "The --field option may be used to manually describe fields in the \
form \"{name}[hi{:lo}]{=value}\". For example, \"sf[31]\" describes a one-bit field named \
\"sf\" at bit position 31, while \"Rn[9:5]=0x5\" describes a 5-bit wide field named \"Rn\" \
spanning bit positions 9 to 5 inclusive and with value 0x5. The name is also optional, so \
\"[31]\" describes an anonymous bit at position 31 with no value, while \"[31:30]=0x3\" \
describes an anonymous field spanning bits 31 to 30 inclusive with value 0x3.";

#[derive(Parser)]
#[command(name = "opdiag", version)]
pub struct Cli {
    /// Enable logging verbose debug messages.
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    command: Command,
}
impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Opcode(args) => args.run(SubjectKind::Opcode),
            Command::Register(args) => args.run(SubjectKind::Register),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate diagrams of instruction opcode encodings
    #[command(visible_aliases = ["op", "o"], after_long_help = FIELD_HELP)]
    Opcode(DiagramArgs),
    /// Generate diagrams of system registers
    #[command(visible_aliases = ["reg", "r"], after_long_help = FIELD_HELP)]
    Register(DiagramArgs),
}

#[derive(Parser, Debug, Default)]
#[command(group = ArgGroup::new("subject").required(true))]
pub struct DiagramArgs {
    /// Name of the instruction or system register (example: "add", "hcr_el2").
    #[arg(value_name = "NAME", group = "subject")]
    name: Option<String>,

    /// Manually describe the subject's fields (see below).
    #[arg(long, value_name = "F", num_args = 1.., group = "subject")]
    field: Vec<String>,

    /// How many bits wide a manually described subject is.
    ///
    /// Subjects resolved by name carry their architectural width and ignore
    /// this option.
    #[arg(short = 's', value_parser = parse_width, default_value = "32")]
    section: Width,

    /// Dump rendered ASCII diagram to stdout.
    #[arg(long)]
    ascii: bool,

    /// Generate black-on-white PNG image.
    #[arg(long)]
    bow: bool,

    /// Generate black-on-transparent PNG image.
    #[arg(long)]
    bot: bool,

    /// Generate white-on-black PNG image.
    #[arg(long)]
    wob: bool,

    /// Generate white-on-transparent PNG image.
    #[arg(long)]
    wot: bool,

    /// Equivalent to `--ascii --bow --bot --wob --wot`.
    #[arg(long)]
    all: bool,

    /// Path to TTF font to use in PNG images (default: bundled DejaVu Sans Mono).
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// PNG image file name prefix (default: the subject name).
    #[arg(long, value_name = "NAME")]
    prefix: Option<String>,

    /// Overlay the given value over the entire subject.
    #[arg(long, value_name = "NUM")]
    value: Option<String>,
}

impl DiagramArgs {
    pub fn run(self, kind: SubjectKind) -> Result<()> {
        let fields = match &self.name {
            Some(name) => db::lookup(kind, name)?,
            None => spec::parse(&self.field, self.section)?,
        };
        debug!(
            "subject spans {} bits across {} fields",
            fields.width(),
            fields.fields().len()
        );

        let overlay = match &self.value {
            Some(raw) => {
                let value = parse_int(raw)?;
                if value > fields.width().mask() {
                    return Err(diagram::Error::ValueOutOfRange {
                        value,
                        bits: fields.width().bits(),
                    }
                    .into());
                }
                Some(value)
            }
            None => None,
        };

        let targets = self.targets();
        let prefix = match (self.prefix, self.name) {
            (Some(prefix), _) => prefix,
            (None, Some(name)) => name,
            (None, None) => kind.default_prefix().to_owned(),
        };

        diagram::generate(&Request {
            fields,
            overlay,
            targets,
            font: self.font,
            prefix,
        })?;
        Ok(())
    }

    fn targets(&self) -> Vec<Target> {
        let mut targets = vec![];
        if self.ascii || self.all {
            targets.push(Target::Ascii);
        }
        let flags = [self.bow, self.bot, self.wob, self.wot];
        for (requested, scheme) in flags.into_iter().zip(Scheme::ALL) {
            if requested || self.all {
                targets.push(Target::Image(scheme));
            }
        }
        if targets.is_empty() {
            targets.push(Target::Ascii);
        }
        targets
    }
}

fn parse_width(s: &str) -> Result<Width> {
    let bits = s.parse()?;
    Width::from_bits(bits).ok_or_eyre("section width must be one of 8, 16, 32, 64")
}

/// Parses an unsigned integer with an optional 0x prefix.
fn parse_int(s: &str) -> Result<u64> {
    if let Some(hex) = s.to_lowercase().strip_prefix("0x") {
        Ok(u64::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u64>()?)
    }
}
