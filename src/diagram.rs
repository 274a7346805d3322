//! Bit-field diagram engine.
//!
//! One immutable [`Layout`] is computed per invocation and fanned out to
//! every requested render target. Renderers never communicate; a failed
//! image write fails that target alone.

use std::path::PathBuf;

use tracing::{debug, warn};

pub mod ascii;
pub mod layout;
pub mod raster;
pub mod spec;

pub use layout::{FieldSet, FieldSpec, Layout};

use raster::Scheme;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed field spec `{0}`")]
    MalformedFieldSpec(String),
    #[error("field {field} is out of range for a {width}-bit diagram")]
    OutOfRangeField { field: String, width: u8 },
    #[error("fields {first} and {second} overlap")]
    FieldOverlap { first: String, second: String },
    #[error("value {value:#x} does not fit in {bits} bits")]
    ValueOutOfRange { value: u64, bits: u8 },
    #[error("unknown {kind} `{name}`")]
    UnknownSubjectName { kind: &'static str, name: String },
    #[error("failed to load font `{}`: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },
    #[error("failed to write image `{}`: {reason}", path.display())]
    ImageWrite { path: PathBuf, reason: String },
}

/// Total bit width of a diagrammed subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}
impl Width {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// Largest value representable in this width.
    pub fn mask(self) -> u64 {
        u64::MAX >> (64 - u32::from(self.bits()))
    }
}
impl Default for Width {
    fn default() -> Self {
        Width::W32
    }
}
impl std::fmt::Display for Width {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// A render target selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Ascii,
    Image(Scheme),
}

/// Everything one invocation of the engine needs.
#[derive(Debug)]
pub struct Request {
    pub fields: FieldSet,
    pub overlay: Option<u64>,
    pub targets: Vec<Target>,
    pub font: Option<PathBuf>,
    pub prefix: String,
}

/// Renders every requested target from a single layout.
///
/// Image targets that fail to write do not stop the remaining targets; the
/// first failure is returned once everything else has been attempted. A font
/// that cannot be loaded aborts all image targets, since they share it.
pub fn generate(request: &Request) -> Result<(), Error> {
    let layout = Layout::build(&request.fields, request.overlay);

    let font = if request
        .targets
        .iter()
        .any(|t| matches!(t, Target::Image(_)))
    {
        Some(raster::load_font(request.font.as_deref())?)
    } else {
        None
    };

    let mut failed = None;
    for &target in &request.targets {
        match target {
            Target::Ascii => print!("{}", ascii::render(&layout)),
            Target::Image(scheme) => {
                let font = font.as_ref().expect("font loaded for image targets");
                let path = raster::output_path(&request.prefix, scheme);
                match raster::render(&layout, scheme, font, &path) {
                    Ok(()) => debug!("wrote {}", path.display()),
                    Err(err) => {
                        warn!("{err}");
                        failed.get_or_insert(err);
                    }
                }
            }
        }
    }
    match failed {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
