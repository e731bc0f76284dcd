mod domain;
mod infrastructure;
pub mod test_utils;

// Front-matter field names

pub const VISIBILITY_FIELD_NAME: &'static str = "visibility";
pub const TITLE_FIELD_NAME: &'static str = "title";
pub const DESCRIPTION_FIELD_NAME: &'static str = "description";
pub const TAGS_FIELD_NAME: &'static str = "tags";

pub const ID_FIELD_NAME: &'static str = "id";
pub const SLUG_FIELD_NAME: &'static str = "slug";
pub const PUBLISHED_FIELD_NAME: &'static str = "publishedAt";
// some authoring setups write the publication timestamp as "date"
pub const DATE_ALIAS_FIELD_NAME: &'static str = "date";

// expose domain module

pub use domain::*;
pub use infrastructure::content::ContentDirAdapter;
pub use infrastructure::content::load as load_content;
