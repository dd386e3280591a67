//! Reusable HTML components for page generation
//!
//! Maud component functions shared by the page renderers: the document
//! wrapper, header navigation, the tree sidebar and listing tables.

pub mod commit;
pub mod file_list;
pub mod icons;
pub mod layout;
pub mod nav;
pub mod sidebar;
