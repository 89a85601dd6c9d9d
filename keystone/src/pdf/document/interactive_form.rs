use crate::pdf::{
    get_data_nullable, get_direct_data, get_direct_data_nullable, maybe_ref::from_dictionary, Dictionary, KsString,
    MaybeReference, Reference, SchemaError,
};

const K_FIELDS: &[u8] = b"Fields";
const K_NEED_APPEARANCES: &[u8] = b"NeedAppearances";
const K_SIG_FLAGS: &[u8] = b"SigFlags";
const K_CO: &[u8] = b"CO";
const K_DR: &[u8] = b"DR";
const K_DA: &[u8] = b"DA";
const K_Q: &[u8] = b"Q";

/// Interactive form, the `AcroForm` entry of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveFormDict {
    /// Root fields of the document.
    pub fields: Vec<Reference>,
    pub need_appearances: Option<bool>,
    pub sig_flags: Option<i64>,
    /// Calculation order of fields with calculation actions.
    pub co: Option<Vec<Reference>>,
    /// Default resources of form field appearance streams.
    pub dr: Option<MaybeReference<Dictionary>>,
    /// Default appearance string of variable text fields.
    pub da: Option<KsString>,
    /// Default quadding of variable text fields.
    pub q: Option<i64>,
}

impl TryFrom<&Dictionary> for InteractiveFormDict {
    type Error = SchemaError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        Ok(Self {
            fields: get_direct_data(dict, K_FIELDS)?,
            need_appearances: get_direct_data_nullable(dict, K_NEED_APPEARANCES)?,
            sig_flags: get_direct_data_nullable(dict, K_SIG_FLAGS)?,
            co: get_direct_data_nullable(dict, K_CO)?,
            dr: get_data_nullable(dict, K_DR)?,
            da: get_direct_data_nullable(dict, K_DA)?,
            q: get_direct_data_nullable(dict, K_Q)?,
        })
    }
}

from_dictionary!(InteractiveFormDict);
