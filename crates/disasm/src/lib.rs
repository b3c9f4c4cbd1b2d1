mod error;
mod javap;
mod krakatau;

use std::io::Write;

use declass_class_file::ClassFile;

pub use error::RenderError;
pub use javap::JavapRenderer;
pub use krakatau::KrakatauRenderer;

pub type Result<T, E = RenderError> = std::result::Result<T, E>;

/// The two supported output styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Krakatau,
    Javap,
}
impl OutputFormat {
    /// Anything that does not name the assembly style falls back to the
    /// javap-style summary.
    pub fn from_name(name: &str) -> OutputFormat {
        match name {
            "krakatau" => OutputFormat::Krakatau,
            _ => OutputFormat::Javap,
        }
    }
}

/// A renderer projects one parsed class into line-oriented text. It never
/// mutates the class, so repeated calls over the same model produce
/// identical output.
pub trait Renderer {
    fn render(&self, class_file: &ClassFile, w: &mut dyn Write) -> Result<()>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Krakatau => Box::new(KrakatauRenderer),
        OutputFormat::Javap => Box::new(JavapRenderer),
    }
}
