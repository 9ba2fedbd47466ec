//! Template post-processing and section assembly for integration documentation
//!
//! Every operation here takes a document string and returns a new one. A
//! missing anchor heading turns an operation into a no-op, never an error.

pub mod agentless;
pub mod assemble;
pub mod templates;

pub use agentless::{AGENTLESS_SECTION, ensure_agentless_section, has_agentless_section};
pub use assemble::{combine, combine_sections, ensure_document_title, strip_preamble};
pub use templates::{
    TemplateKind, append_data_stream_subsection, ensure_data_stream_templates,
    has_data_stream_subsection, has_event_template, has_fields_template, has_reference_section,
    insert_event_template, insert_fields_template, remove_event_template, template_macro,
};
