use crate::pdf::{get_data_nullable, maybe_ref::from_dictionary, Dictionary, MaybeReference, NameTreeNode, SchemaError};

const K_DESTS: &[u8] = b"Dests";
const K_AP: &[u8] = b"AP";
const K_JAVA_SCRIPT: &[u8] = b"JavaScript";
const K_PAGES: &[u8] = b"Pages";
const K_TEMPLATES: &[u8] = b"Templates";
const K_IDS: &[u8] = b"IDS";
const K_URLS: &[u8] = b"URLS";
const K_EMBEDDED_FILES: &[u8] = b"EmbeddedFiles";
const K_ALTERNATE_PRESENTATIONS: &[u8] = b"AlternatePresentations";
const K_RENDITIONS: &[u8] = b"Renditions";

/// Name trees of the document, the `Names` entry of the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameDictionary {
    pub dests: Option<MaybeReference<NameTreeNode>>,
    pub ap: Option<MaybeReference<NameTreeNode>>,
    pub java_script: Option<MaybeReference<NameTreeNode>>,
    pub pages: Option<MaybeReference<NameTreeNode>>,
    pub templates: Option<MaybeReference<NameTreeNode>>,
    pub ids: Option<MaybeReference<NameTreeNode>>,
    pub urls: Option<MaybeReference<NameTreeNode>>,
    pub embedded_files: Option<MaybeReference<NameTreeNode>>,
    pub alternate_presentations: Option<MaybeReference<NameTreeNode>>,
    pub renditions: Option<MaybeReference<NameTreeNode>>,
}

impl TryFrom<&Dictionary> for NameDictionary {
    type Error = SchemaError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        Ok(Self {
            dests: get_data_nullable(dict, K_DESTS)?,
            ap: get_data_nullable(dict, K_AP)?,
            java_script: get_data_nullable(dict, K_JAVA_SCRIPT)?,
            pages: get_data_nullable(dict, K_PAGES)?,
            templates: get_data_nullable(dict, K_TEMPLATES)?,
            ids: get_data_nullable(dict, K_IDS)?,
            urls: get_data_nullable(dict, K_URLS)?,
            embedded_files: get_data_nullable(dict, K_EMBEDDED_FILES)?,
            alternate_presentations: get_data_nullable(dict, K_ALTERNATE_PRESENTATIONS)?,
            renditions: get_data_nullable(dict, K_RENDITIONS)?,
        })
    }
}

from_dictionary!(NameDictionary);
