use super::{check_optional_type, dict_types, InteractiveFormDict, NameDictionary, PageLayout, PageMode, ViewerPreferences};
use crate::pdf::{
    get_data, get_data_nullable, get_direct_data_nullable, maybe_ref::from_dictionary, Array, Dictionary,
    MaybeReference, Name, NumberTreeNode, SchemaError, ShouldBeReference, Stream,
};

const K_VERSION: &[u8] = b"Version";
const K_EXTENSIONS: &[u8] = b"Extensions";
const K_PAGES: &[u8] = b"Pages";
const K_PAGE_LABELS: &[u8] = b"PageLabels";
const K_NAMES: &[u8] = b"Names";
const K_DESTS: &[u8] = b"Dests";
const K_VIEWER_PREFERENCES: &[u8] = b"ViewerPreferences";
const K_PAGE_LAYOUT: &[u8] = b"PageLayout";
const K_PAGE_MODE: &[u8] = b"PageMode";
const K_OUTLINES: &[u8] = b"Outlines";
const K_THREADS: &[u8] = b"Threads";
const K_ACRO_FORM: &[u8] = b"AcroForm";
const K_METADATA: &[u8] = b"Metadata";

/// The document catalog, root of the object graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Version of the document if later than the header version.
    pub version: Option<Name>,
    pub extensions: Option<MaybeReference<Dictionary>>,
    /// Root of the page tree.
    pub pages: ShouldBeReference<Dictionary>,
    /// Number tree of page label dictionaries keyed by page index.
    pub page_labels: Option<MaybeReference<NumberTreeNode>>,
    pub names: Option<MaybeReference<NameDictionary>>,
    pub dests: Option<MaybeReference<Dictionary>>,
    pub viewer_preferences: Option<MaybeReference<ViewerPreferences>>,
    pub page_layout: Option<PageLayout>,
    pub page_mode: Option<PageMode>,
    pub outlines: Option<MaybeReference<Dictionary>>,
    /// Article thread dictionaries.
    pub threads: Option<MaybeReference<Array>>,
    pub acro_form: Option<MaybeReference<InteractiveFormDict>>,
    /// Metadata stream, see [`MetadataStreamDictionary`](super::MetadataStreamDictionary).
    pub metadata: Option<ShouldBeReference<Stream>>,
}

impl TryFrom<&Dictionary> for Catalog {
    type Error = SchemaError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        check_optional_type(dict, dict_types::CATALOG)?;

        Ok(Self {
            version: get_direct_data_nullable(dict, K_VERSION)?,
            extensions: get_data_nullable(dict, K_EXTENSIONS)?,
            pages: get_data(dict, K_PAGES)?,
            page_labels: get_data_nullable(dict, K_PAGE_LABELS)?,
            names: get_data_nullable(dict, K_NAMES)?,
            dests: get_data_nullable(dict, K_DESTS)?,
            viewer_preferences: get_data_nullable(dict, K_VIEWER_PREFERENCES)?,
            page_layout: get_direct_data_nullable(dict, K_PAGE_LAYOUT)?,
            page_mode: get_direct_data_nullable(dict, K_PAGE_MODE)?,
            outlines: get_data_nullable(dict, K_OUTLINES)?,
            threads: get_data_nullable(dict, K_THREADS)?,
            acro_form: get_data_nullable(dict, K_ACRO_FORM)?,
            metadata: get_data_nullable(dict, K_METADATA)?,
        })
    }
}

from_dictionary!(Catalog);
