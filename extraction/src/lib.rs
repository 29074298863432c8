//! Extraction of CASA task parameter descriptions ("cabs") from CASA's own help output.

pub mod cabfile;
pub mod conventions;
pub mod description;
pub mod diagnostics;
pub mod extractor;
pub mod helpsource;
pub mod inplisting;
pub mod literal;
pub mod taskname;
#[cfg(test)]
mod testutil;
pub mod verbosehelp;
