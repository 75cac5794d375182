//! Ghost export import.
//!
//! - **Parse**: strict, typed read of the export (`ParseError` on bad input)
//! - **Filter**: posts whose status is `published`, in export order
//! - **Convert**: HTML (preferred) or plaintext body, placeholder stripped
//! - **Emit**: `<output_dir>/<slug>.md` with frontmatter, optionally uploaded

mod convert;
mod frontmatter;
mod ghost;

pub use convert::{Html2Md, HtmlConverter};
pub use frontmatter::{Frontmatter, date_only};
pub use ghost::{
    GHOST_URL_PLACEHOLDER, GhostImporter, ImportEntry, ImportOutcome, ImportReport, UploadOutcome,
    parse_export, strip_placeholder,
};
